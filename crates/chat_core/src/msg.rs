use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a line in the chat input.
    ChatSubmitted(String),
    /// User picked (or cleared) the file to upload.
    FileSelected(Option<PathBuf>),
    /// User pressed the upload button.
    UploadClicked,
    /// Engine finished a chat request.
    QueryCompleted {
        request_id: crate::RequestId,
        outcome: crate::QueryOutcome,
    },
    /// Engine finished the upload request.
    UploadCompleted { outcome: crate::UploadOutcome },
}
