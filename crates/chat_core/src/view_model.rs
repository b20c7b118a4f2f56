use crate::{EntryId, Sender, SourceCategory, UploadStatus};

pub const PLACEHOLDER_TEXT: &str = "Thinking...";
pub const CHAT_ERROR_TEXT: &str =
    "Error: Could not get response. Make sure the backend is running.";

pub const UPLOAD_LABEL: &str = "Upload PDF";
pub const UPLOADING_LABEL: &str = "Uploading...";
pub const NO_FILE_CHOSEN: &str = "No file chosen";
pub const NO_FILE_SELECTED: &str = "Please select a PDF file.";
pub const UPLOAD_SUCCESS_TEXT: &str = "PDF uploaded successfully!";
pub const UPLOAD_FAILED_TEXT: &str = "Error uploading PDF.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub entries: Vec<EntryView>,
    /// Entry the transcript should be scrolled to.
    pub scroll_to: Option<EntryId>,
    pub pending_queries: usize,
    pub upload: UploadView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: EntryId,
    pub sender: Sender,
    pub lines: Vec<String>,
    pub badges: Vec<SourceBadge>,
    pub placeholder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBadge {
    pub category: SourceCategory,
    pub label: &'static str,
    pub icon: &'static str,
}

impl From<SourceCategory> for SourceBadge {
    fn from(category: SourceCategory) -> Self {
        Self {
            category,
            label: category.display_name(),
            icon: category.icon(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub status_text: String,
    pub tone: StatusTone,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub file_label: String,
    /// Bumped on every status change, including a change to an equal status.
    pub revision: u64,
}

impl Default for UploadView {
    fn default() -> Self {
        Self {
            status_text: String::new(),
            tone: StatusTone::Neutral,
            button_label: UPLOAD_LABEL,
            button_enabled: true,
            file_label: NO_FILE_CHOSEN.to_string(),
            revision: 0,
        }
    }
}

impl UploadView {
    pub(crate) fn from_status(status: &UploadStatus, file_label: String, revision: u64) -> Self {
        let (status_text, tone) = match status {
            UploadStatus::Idle | UploadStatus::Uploading => (String::new(), StatusTone::Neutral),
            UploadStatus::Success(text) => (text.clone(), StatusTone::Success),
            UploadStatus::Failure(text) => (text.clone(), StatusTone::Error),
        };
        let uploading = matches!(status, UploadStatus::Uploading);
        Self {
            status_text,
            tone,
            button_label: if uploading { UPLOADING_LABEL } else { UPLOAD_LABEL },
            button_enabled: !uploading,
            file_label,
            revision,
        }
    }
}
