//! Chat core: pure transcript model, source classification and the
//! chat/upload state machine.
mod effect;
mod msg;
mod outcome;
mod source;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{AgentReply, QueryOutcome, UploadOutcome};
pub use source::{classify, unique_categories, SourceCategory, SOURCE_RULES};
pub use state::{AppState, RequestId, UploadStatus};
pub use transcript::{EntryId, Message, Sender, Transcript};
pub use update::update;
pub use view_model::{
    AppViewModel, EntryView, SourceBadge, StatusTone, UploadView, CHAT_ERROR_TEXT,
    NO_FILE_CHOSEN, NO_FILE_SELECTED, PLACEHOLDER_TEXT, UPLOADING_LABEL, UPLOAD_FAILED_TEXT,
    UPLOAD_LABEL, UPLOAD_SUCCESS_TEXT,
};
