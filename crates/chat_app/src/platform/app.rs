use std::io::{self, Write};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;

use anyhow::Context;
use chat_core::{update, AppState, Msg};
use chat_engine::EngineHandle;
use chat_logging::{chat_debug, chat_error, chat_info, chat_warn};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use super::config::ChatConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::completion::CommandHelper;
use super::ui::input::{parse_line, InputAction};
use super::ui::render::TranscriptSurface;
use super::ui::terminal::{PromptWriter, Terminal, TerminalCommand};

type SharedTerminal = Arc<Mutex<Terminal<Box<dyn Write + Send>>>>;

pub fn run_app(config: ChatConfig) -> anyhow::Result<()> {
    let settings = config.backend_settings()?;
    chat_info!("Chat client starting");
    let (engine, events) = EngineHandle::new(settings).context("starting backend engine")?;

    let mut editor: Editor<CommandHelper, DefaultHistory> =
        Editor::new().context("opening line editor")?;
    editor.set_helper(Some(CommandHelper::new()));

    // Output from the dispatcher arrives while the prompt is active, so it
    // goes through the editor, which reprints the prompt below it.
    let out: Box<dyn Write + Send> = match editor.create_external_printer() {
        Ok(printer) => Box::new(PromptWriter::new(printer)),
        Err(err) => {
            chat_warn!("No prompt-aware printer ({}); writing to stdout", err);
            Box::new(io::stdout())
        }
    };
    let terminal: SharedTerminal = Arc::new(Mutex::new(Terminal::new(out)));
    show(&terminal, &ui::layout::initial_commands(&config.base_url));

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, events, msg_tx.clone());
    let dispatcher = Dispatcher::new(runner, terminal.clone());
    thread::spawn(move || dispatcher.run(msg_rx));

    loop {
        match editor.readline(ui::constants::PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match parse_line(&line) {
                    InputAction::Dispatch(msgs) => {
                        for msg in msgs {
                            if msg_tx.send(msg).is_err() {
                                chat_error!("Dispatcher stopped; leaving");
                                return Ok(());
                            }
                        }
                    }
                    InputAction::Help => show(&terminal, &[ui::layout::help_command()]),
                    InputAction::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("reading input"),
        }
    }

    chat_info!("Chat client exiting");
    Ok(())
}

fn show(terminal: &SharedTerminal, commands: &[TerminalCommand]) {
    let mut terminal = terminal.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(err) = terminal.apply(commands) {
        chat_error!("Failed to write to terminal: {}", err);
    }
}

/// Owns the state and feeds every message through `update`, rendering only
/// when the state reports a change.
struct Dispatcher {
    state: AppState,
    surface: TranscriptSurface,
    runner: EffectRunner,
    terminal: SharedTerminal,
}

impl Dispatcher {
    fn new(runner: EffectRunner, terminal: SharedTerminal) -> Self {
        Self {
            state: AppState::new(),
            surface: TranscriptSurface::default(),
            runner,
            terminal,
        }
    }

    fn run(mut self, msg_rx: mpsc::Receiver<Msg>) {
        while let Ok(msg) = msg_rx.recv() {
            self.dispatch_msg(msg);
        }
        chat_debug!("Message channel closed");
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let commands = ui::render::render(&mut self.surface, &state.view());
            show(&self.terminal, &commands);
        }
        self.state = state;
        self.runner.enqueue(effects);
    }
}
