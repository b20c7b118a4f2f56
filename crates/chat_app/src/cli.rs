use std::path::PathBuf;

use clap::Parser;

use crate::platform::logging::LogDestination;

#[derive(Parser, Debug, Default)]
#[command(
    name = "research-chat",
    about = "Terminal chat client for the research assistant backend",
    long_about = None
)]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:5000
    #[arg(long)]
    pub base_url: Option<String>,

    /// Settings file (RON). Defaults to ./chat_client.ron when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Give up on a request after this many seconds. Waits forever by default.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}
