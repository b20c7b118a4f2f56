use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::constants::{CMD_FILE, CMD_UPLOAD, COMMANDS};

/// Completes slash commands, and file paths after `/file` and `/upload`.
pub struct CommandHelper {
    files: FilenameCompleter,
}

impl CommandHelper {
    pub fn new() -> Self {
        Self {
            files: FilenameCompleter::new(),
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        if !typed.starts_with('/') {
            return Ok((0, Vec::new()));
        }

        match typed.split_once(' ') {
            Some((command, _)) if command == CMD_FILE || command == CMD_UPLOAD => {
                self.files.complete_path(line, pos)
            }
            Some(_) => Ok((0, Vec::new())),
            None => Ok((0, command_candidates(typed))),
        }
    }
}

fn command_candidates(prefix: &str) -> Vec<Pair> {
    COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(prefix))
        .map(|cmd| Pair {
            display: cmd.to_string(),
            replacement: cmd.to_string(),
        })
        .collect()
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let typed = &line[..pos];
        if !typed.starts_with('/') || typed.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(typed) && cmd.len() > typed.len())
            .map(|cmd| cmd[typed.len()..].to_string())
    }
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_prefix_lists_matching_commands() {
        let names: Vec<String> = command_candidates("/u")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(names, vec!["/upload".to_string()]);
    }

    #[test]
    fn ambiguous_prefix_lists_all_matches() {
        assert_eq!(command_candidates("/").len(), COMMANDS.len());
        assert!(command_candidates("/zzz").is_empty());
    }
}
