use std::collections::BTreeSet;

use chat_core::{AppViewModel, EntryId, UploadView};

use super::terminal::TerminalCommand;

/// What the terminal already shows, so each render only emits changes.
#[derive(Debug, Default)]
pub struct TranscriptSurface {
    shown: BTreeSet<EntryId>,
    upload: UploadView,
}

pub fn render(surface: &mut TranscriptSurface, view: &AppViewModel) -> Vec<TerminalCommand> {
    let mut cmds = Vec::new();

    let current: BTreeSet<EntryId> = view.entries.iter().map(|entry| entry.id).collect();
    let removed: Vec<EntryId> = surface.shown.difference(&current).copied().collect();
    for id in removed {
        surface.shown.remove(&id);
        cmds.push(TerminalCommand::RemoveEntry { id });
    }
    // Entries only ever append, so new ones are already in display order.
    for entry in &view.entries {
        if surface.shown.insert(entry.id) {
            cmds.push(TerminalCommand::AppendEntry(entry.clone()));
        }
    }

    let upload = &view.upload;
    if upload.file_label != surface.upload.file_label {
        cmds.push(TerminalCommand::SetFileLabel(upload.file_label.clone()));
    }
    if (upload.button_label, upload.button_enabled)
        != (surface.upload.button_label, surface.upload.button_enabled)
    {
        cmds.push(TerminalCommand::SetUploadButton {
            label: upload.button_label,
            enabled: upload.button_enabled,
        });
    }
    // Compared by revision so a repeated failure still prints a new line.
    if upload.revision != surface.upload.revision {
        cmds.push(TerminalCommand::SetUploadStatus {
            text: upload.status_text.clone(),
            tone: upload.tone,
        });
    }
    surface.upload = upload.clone();

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{update, AppState, Msg};

    fn step(state: AppState, surface: &mut TranscriptSurface, msg: Msg) -> (AppState, Vec<TerminalCommand>) {
        let (state, _effects) = update(state, msg);
        let cmds = render(surface, &state.view());
        (state, cmds)
    }

    #[test]
    fn first_render_of_empty_state_emits_nothing() {
        let mut surface = TranscriptSurface::default();
        assert!(render(&mut surface, &AppState::new().view()).is_empty());
    }

    #[test]
    fn chat_turn_appends_then_removes_placeholder() {
        let mut surface = TranscriptSurface::default();
        let (state, cmds) = step(AppState::new(), &mut surface, Msg::ChatSubmitted("hi".into()));
        assert_eq!(cmds.len(), 2);
        assert!(matches!(&cmds[1], TerminalCommand::AppendEntry(entry) if entry.placeholder));

        let (_state, cmds) = step(
            state,
            &mut surface,
            Msg::QueryCompleted {
                request_id: 1,
                outcome: chat_core::QueryOutcome::RequestFailed,
            },
        );
        assert!(matches!(cmds[0], TerminalCommand::RemoveEntry { .. }));
        assert!(matches!(&cmds[1], TerminalCommand::AppendEntry(entry) if !entry.placeholder));
    }

    #[test]
    fn repeated_identical_failure_prints_again() {
        let mut surface = TranscriptSurface::default();
        let (state, first) = step(AppState::new(), &mut surface, Msg::UploadClicked);
        let (_state, second) = step(state, &mut surface, Msg::UploadClicked);

        let status = |cmds: &[TerminalCommand]| {
            cmds.iter()
                .any(|cmd| matches!(cmd, TerminalCommand::SetUploadStatus { .. }))
        };
        assert!(status(&first));
        assert!(status(&second));
    }

    #[test]
    fn file_label_change_is_emitted_once() {
        let mut surface = TranscriptSurface::default();
        let msg = Msg::FileSelected(Some("a.pdf".into()));
        let (state, cmds) = step(AppState::new(), &mut surface, msg.clone());
        assert_eq!(cmds, vec![TerminalCommand::SetFileLabel("a.pdf".to_string())]);

        let (_state, cmds) = step(state, &mut surface, msg);
        assert!(cmds.is_empty());
    }
}
