mod cli;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let mut config = platform::config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    platform::logging::initialize(config.log);
    platform::run_app(config)
}
