use super::constants::*;
use super::terminal::{TerminalCommand, TextStyle};

pub fn initial_commands(base_url: &str) -> Vec<TerminalCommand> {
    vec![
        TerminalCommand::ShowText {
            text: "Research chat".to_string(),
            style: TextStyle::Title,
        },
        TerminalCommand::ShowText {
            text: format!("Backend: {base_url}"),
            style: TextStyle::Dim,
        },
        help_command(),
    ]
}

pub fn help_command() -> TerminalCommand {
    TerminalCommand::ShowText {
        text: help_text(),
        style: TextStyle::Dim,
    }
}

fn help_text() -> String {
    [
        "Type a question and press Enter to ask the assistant.".to_string(),
        format!("  {CMD_FILE} <path>     choose the PDF to upload ({CMD_FILE} alone clears it)"),
        format!("  {CMD_UPLOAD} [path]   upload the chosen PDF"),
        format!("  {CMD_HELP}            show this help"),
        format!("  {CMD_QUIT}            leave (Ctrl+D works too)"),
        format!("Start a line with {ESCAPE_PREFIX} to send a message that begins with a command name."),
    ]
    .join("\n")
}
