use crate::view_model::{
    CHAT_ERROR_TEXT, NO_FILE_SELECTED, UPLOAD_FAILED_TEXT, UPLOAD_SUCCESS_TEXT,
};
use crate::{AppState, Effect, Msg, QueryOutcome, Sender, UploadOutcome, UploadStatus};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ChatSubmitted(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                return (state, Vec::new());
            }
            let text = text.to_owned();
            state
                .transcript_mut()
                .render(text.clone(), Sender::User, Vec::new());
            let request_id = state.begin_query();
            vec![Effect::SendQuery { request_id, text }]
        }
        Msg::FileSelected(path) => {
            state.select_file(path);
            Vec::new()
        }
        Msg::UploadClicked => {
            // The button is disabled while a request is in flight.
            if *state.upload_status() == UploadStatus::Uploading {
                return (state, Vec::new());
            }
            match state.selected_file().map(ToOwned::to_owned) {
                None => {
                    state.set_upload_status(UploadStatus::Failure(NO_FILE_SELECTED.to_string()));
                    Vec::new()
                }
                Some(path) => {
                    state.set_upload_status(UploadStatus::Uploading);
                    vec![Effect::UploadPdf { path }]
                }
            }
        }
        Msg::QueryCompleted {
            request_id,
            outcome,
        } => {
            state.finish_query(request_id);
            let transcript = state.transcript_mut();
            match outcome {
                QueryOutcome::Answered(answer) => {
                    transcript.render(answer.reply, Sender::Bot, answer.sources);
                }
                QueryOutcome::RequestFailed => {
                    transcript.render(CHAT_ERROR_TEXT, Sender::Bot, Vec::new());
                }
            }
            Vec::new()
        }
        Msg::UploadCompleted { outcome } => {
            let status = match outcome {
                UploadOutcome::Accepted => UploadStatus::Success(UPLOAD_SUCCESS_TEXT.to_string()),
                UploadOutcome::Rejected { error } => {
                    UploadStatus::Failure(format!("Error: {error}"))
                }
                UploadOutcome::RequestFailed => {
                    UploadStatus::Failure(UPLOAD_FAILED_TEXT.to_string())
                }
            };
            state.set_upload_status(status);
            Vec::new()
        }
    };

    (state, effects)
}
