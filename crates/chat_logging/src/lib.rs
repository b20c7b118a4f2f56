#![deny(missing_docs)]
//! Shared logging utilities for the chat client workspace.
//!
//! This crate provides the `chat_*` logging macros used by the core, the
//! engine and the terminal app, plus a minimal test initializer for the
//! global logger.

use std::fmt::Write as _;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! chat_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! chat_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! chat_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! chat_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! chat_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens user text for log lines so transcripts do not end up in logs
/// verbatim. Keeps at most `max_chars` characters and appends the total
/// character count when something was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    let mut out: String = text
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if total > max_chars {
        let _ = write!(out, "... ({total} chars)");
    }
    out
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_cuts_and_flattens_long_text() {
        assert_eq!(preview("ab\ncdef", 4), "ab c... (7 chars)");
    }
}
