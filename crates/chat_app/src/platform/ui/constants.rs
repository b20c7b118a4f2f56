pub const PROMPT: &str = "> ";

pub const CMD_FILE: &str = "/file";
pub const CMD_UPLOAD: &str = "/upload";
pub const CMD_HELP: &str = "/help";
pub const CMD_QUIT: &str = "/quit";
pub const CMD_EXIT: &str = "/exit";

/// Sends the rest of the line as a chat message starting with one slash.
pub const ESCAPE_PREFIX: &str = "//";

pub const COMMANDS: [&str; 5] = [CMD_FILE, CMD_UPLOAD, CMD_HELP, CMD_QUIT, CMD_EXIT];

pub const SOURCES_TITLE: &str = "Sources Used:";
