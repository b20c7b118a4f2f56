use std::path::PathBuf;

use chat_core::Msg;

use super::constants::*;

/// What a typed line asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
}

/// Known commands are handled locally. Every other line, including one that
/// merely starts with a slash, is a chat message. A leading `//` sends the
/// rest of the line with a single slash, so `//help` asks about "/help".
pub fn parse_line(line: &str) -> InputAction {
    let trimmed = line.trim();
    if let Some(escaped) = trimmed.strip_prefix(ESCAPE_PREFIX) {
        return chat(format!("/{escaped}"));
    }
    if !trimmed.starts_with('/') {
        // Blank lines still go to the core, which ignores them.
        return chat(line.to_string());
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };
    let path = parse_path(rest);

    match command {
        CMD_FILE => InputAction::Dispatch(vec![Msg::FileSelected(path)]),
        CMD_UPLOAD => match path {
            Some(path) => {
                InputAction::Dispatch(vec![Msg::FileSelected(Some(path)), Msg::UploadClicked])
            }
            None => InputAction::Dispatch(vec![Msg::UploadClicked]),
        },
        CMD_HELP => InputAction::Help,
        CMD_QUIT | CMD_EXIT => InputAction::Quit,
        _ => chat(line.to_string()),
    }
}

fn chat(text: String) -> InputAction {
    InputAction::Dispatch(vec![Msg::ChatSubmitted(text)])
}

fn parse_path(raw: &str) -> Option<PathBuf> {
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(raw);
    (!unquoted.is_empty()).then(|| PathBuf::from(unquoted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_chat_submission() {
        assert_eq!(
            parse_line("what is rust?"),
            InputAction::Dispatch(vec![Msg::ChatSubmitted("what is rust?".to_string())])
        );
    }

    #[test]
    fn blank_line_is_forwarded_untouched() {
        assert_eq!(
            parse_line("   "),
            InputAction::Dispatch(vec![Msg::ChatSubmitted("   ".to_string())])
        );
    }

    #[test]
    fn file_selects_and_clears() {
        assert_eq!(
            parse_line("/file papers/a.pdf"),
            InputAction::Dispatch(vec![Msg::FileSelected(Some(PathBuf::from("papers/a.pdf")))])
        );
        assert_eq!(
            parse_line("/file"),
            InputAction::Dispatch(vec![Msg::FileSelected(None)])
        );
    }

    #[test]
    fn upload_with_path_selects_then_uploads() {
        assert_eq!(
            parse_line("/upload \"my paper.pdf\""),
            InputAction::Dispatch(vec![
                Msg::FileSelected(Some(PathBuf::from("my paper.pdf"))),
                Msg::UploadClicked,
            ])
        );
        assert_eq!(
            parse_line("/upload"),
            InputAction::Dispatch(vec![Msg::UploadClicked])
        );
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse_line("/help"), InputAction::Help);
        assert_eq!(parse_line(" /quit "), InputAction::Quit);
        assert_eq!(parse_line("/exit"), InputAction::Quit);
    }

    #[test]
    fn unrecognised_slash_line_is_a_chat_message() {
        let question = "/usr/lib vs /lib, what is the difference?";
        assert_eq!(
            parse_line(question),
            InputAction::Dispatch(vec![Msg::ChatSubmitted(question.to_string())])
        );
    }

    #[test]
    fn double_slash_sends_command_words_as_chat() {
        assert_eq!(
            parse_line("//help me with rust"),
            InputAction::Dispatch(vec![Msg::ChatSubmitted("/help me with rust".to_string())])
        );
        assert_eq!(
            parse_line("  //upload"),
            InputAction::Dispatch(vec![Msg::ChatSubmitted("/upload".to_string())])
        );
    }
}
