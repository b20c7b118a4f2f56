use std::path::PathBuf;

/// Side effects requested by [`crate::update`]; executed by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the user's text to the agent endpoint.
    SendQuery {
        request_id: crate::RequestId,
        text: String,
    },
    /// POST the selected file to the upload endpoint.
    UploadPdf { path: PathBuf },
}
