use std::io::{self, Write};

use chat_core::{EntryId, EntryView, Sender, StatusTone};
use chat_logging::chat_trace;
use colored::Colorize;
use rustyline::ExternalPrinter;

use super::constants::SOURCES_TITLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Dim,
}

/// Retained-mode instructions for the terminal surface, produced by
/// [`super::render::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    ShowText { text: String, style: TextStyle },
    AppendEntry(EntryView),
    /// Printed output cannot be taken back; the entry is only forgotten.
    RemoveEntry { id: EntryId },
    SetUploadStatus { text: String, tone: StatusTone },
    SetUploadButton { label: &'static str, enabled: bool },
    SetFileLabel(String),
}

type Clock = Box<dyn Fn() -> String + Send>;

/// Writes commands to an injected output, normally stdout.
pub struct Terminal<W: Write> {
    out: W,
    clock: Clock,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self::with_clock(out, Box::new(|| chrono::Local::now().format("%H:%M").to_string()))
    }

    pub fn with_clock(out: W, clock: Clock) -> Self {
        Self { out, clock }
    }

    pub fn apply(&mut self, commands: &[TerminalCommand]) -> io::Result<()> {
        for command in commands {
            self.apply_one(command)?;
        }
        self.out.flush()
    }

    fn apply_one(&mut self, command: &TerminalCommand) -> io::Result<()> {
        match command {
            TerminalCommand::ShowText { text, style } => {
                let styled = match style {
                    TextStyle::Title => text.bold(),
                    TextStyle::Dim => text.dimmed(),
                };
                writeln!(self.out, "{styled}")
            }
            TerminalCommand::AppendEntry(entry) => self.write_entry(entry),
            TerminalCommand::RemoveEntry { id } => {
                chat_trace!("Entry {} removed from transcript", id);
                Ok(())
            }
            TerminalCommand::SetUploadStatus { text, tone } => {
                if text.is_empty() {
                    return Ok(());
                }
                let styled = match tone {
                    StatusTone::Neutral => text.normal(),
                    StatusTone::Success => text.green(),
                    StatusTone::Error => text.red(),
                };
                writeln!(self.out, "{} {styled}", "[upload]".dimmed())
            }
            TerminalCommand::SetUploadButton { label, enabled } => {
                // Only the busy state is worth a line.
                if *enabled {
                    return Ok(());
                }
                writeln!(self.out, "{} {}", "[upload]".dimmed(), label.yellow())
            }
            TerminalCommand::SetFileLabel(label) => {
                writeln!(self.out, "{} {label}", "[file]".dimmed())
            }
        }
    }

    fn write_entry(&mut self, entry: &EntryView) -> io::Result<()> {
        let name = match entry.sender {
            Sender::User => entry.sender.label().green().bold(),
            Sender::Bot => entry.sender.label().blue().bold(),
        };
        let avatar = icon_glyph(entry.sender.avatar());
        let stamp = (self.clock)();

        if entry.placeholder {
            let text = entry.lines.join(" ");
            return writeln!(
                self.out,
                "{} {avatar} {name}> {}",
                stamp.dimmed(),
                text.dimmed()
            );
        }

        // "HH:MM x name> "
        let indent = " ".repeat(stamp.chars().count() + entry.sender.label().len() + 5);
        for (index, line) in entry.lines.iter().enumerate() {
            if index == 0 {
                writeln!(self.out, "{} {avatar} {name}> {line}", stamp.dimmed())?;
            } else {
                writeln!(self.out, "{indent}{line}")?;
            }
        }

        if !entry.badges.is_empty() {
            let badges = entry
                .badges
                .iter()
                .map(|badge| format!("[{} {}]", icon_glyph(badge.icon), badge.label))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.out, "{indent}{} {}", SOURCES_TITLE.dimmed(), badges.cyan())?;
        }
        Ok(())
    }
}

/// Single-width stand-ins for the icon identifiers carried by the view.
fn icon_glyph(icon: &str) -> char {
    // Identifiers may carry a style prefix ("fa-solid fa-bolt").
    match icon.rsplit(' ').next().unwrap_or(icon) {
        "fa-user" => '●',
        "fa-robot" => '◆',
        "fa-file-pdf" => '▤',
        "fa-wikipedia-w" => 'W',
        "fa-globe" => '◎',
        "fa-graduation-cap" => '▲',
        "fa-bolt" => '↯',
        _ => '•',
    }
}

/// Hands each flushed batch to the line editor, which prints it above the
/// prompt and redraws the line being typed.
pub struct PromptWriter<P: ExternalPrinter> {
    printer: P,
    buffer: Vec<u8>,
}

impl<P: ExternalPrinter> PromptWriter<P> {
    pub fn new(printer: P) -> Self {
        Self {
            printer,
            buffer: Vec::new(),
        }
    }
}

impl<P: ExternalPrinter> Write for PromptWriter<P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let bytes = std::mem::take(&mut self.buffer);
        let text = String::from_utf8_lossy(&bytes).into_owned();
        self.printer
            .print(text)
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{SourceBadge, SourceCategory};

    fn terminal() -> Terminal<Vec<u8>> {
        colored::control::set_override(false);
        Terminal::with_clock(Vec::new(), Box::new(|| "12:00".to_string()))
    }

    fn output(terminal: Terminal<Vec<u8>>) -> String {
        String::from_utf8(terminal.out).unwrap()
    }

    #[test]
    fn bot_entry_prints_lines_and_badges() {
        let mut terminal = terminal();
        terminal
            .apply(&[TerminalCommand::AppendEntry(EntryView {
                id: 1,
                sender: Sender::Bot,
                lines: vec!["Hi".to_string(), "there".to_string()],
                badges: vec![SourceBadge::from(SourceCategory::PdfContext)],
                placeholder: false,
            })])
            .unwrap();

        assert_eq!(
            output(terminal),
            "12:00 ◆ bot> Hi\n             there\n             Sources Used: [▤ PDF Context]\n"
        );
    }

    #[test]
    fn upload_lines_follow_tone_and_busy_state() {
        let mut terminal = terminal();
        terminal
            .apply(&[
                TerminalCommand::SetUploadButton {
                    label: "Uploading...",
                    enabled: false,
                },
                TerminalCommand::SetUploadStatus {
                    text: String::new(),
                    tone: StatusTone::Neutral,
                },
                TerminalCommand::SetUploadButton {
                    label: "Upload PDF",
                    enabled: true,
                },
                TerminalCommand::SetUploadStatus {
                    text: "Error: bad file".to_string(),
                    tone: StatusTone::Error,
                },
            ])
            .unwrap();

        assert_eq!(
            output(terminal),
            "[upload] Uploading...\n[upload] Error: bad file\n"
        );
    }

    #[test]
    fn removal_prints_nothing() {
        let mut terminal = terminal();
        terminal
            .apply(&[TerminalCommand::RemoveEntry { id: 3 }])
            .unwrap();

        assert!(output(terminal).is_empty());
    }

    #[test]
    fn user_entry_uses_its_avatar() {
        let mut terminal = terminal();
        terminal
            .apply(&[TerminalCommand::AppendEntry(EntryView {
                id: 2,
                sender: Sender::User,
                lines: vec!["hello".to_string()],
                badges: Vec::new(),
                placeholder: false,
            })])
            .unwrap();

        assert_eq!(output(terminal), "12:00 ● you> hello\n");
    }

    #[test]
    fn icon_glyph_ignores_style_prefix() {
        assert_eq!(icon_glyph("fa-solid fa-bolt"), '↯');
        assert_eq!(icon_glyph("fa-brands fa-wikipedia-w"), 'W');
        assert_eq!(icon_glyph("fa-info-circle"), '•');
    }

    #[derive(Default)]
    struct RecordingPrinter {
        printed: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl ExternalPrinter for RecordingPrinter {
        fn print(&mut self, msg: String) -> rustyline::Result<()> {
            self.printed.lock().unwrap().push(msg);
            Ok(())
        }
    }

    #[test]
    fn prompt_writer_prints_one_batch_per_apply() {
        colored::control::set_override(false);
        let printer = RecordingPrinter::default();
        let printed = printer.printed.clone();
        let mut terminal = Terminal::with_clock(
            PromptWriter::new(printer),
            Box::new(|| "12:00".to_string()),
        );

        terminal
            .apply(&[
                TerminalCommand::SetFileLabel("a.pdf".to_string()),
                TerminalCommand::SetUploadButton {
                    label: "Uploading...",
                    enabled: false,
                },
            ])
            .unwrap();
        terminal.apply(&[]).unwrap();

        assert_eq!(
            *printed.lock().unwrap(),
            vec!["[file] a.pdf\n[upload] Uploading...\n".to_string()]
        );
    }
}
