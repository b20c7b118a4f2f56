use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, UploadView, NO_FILE_CHOSEN};
use crate::{EntryId, Transcript};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    transcript: Transcript,
    /// Placeholder entry per in-flight chat request.
    pending: BTreeMap<RequestId, EntryId>,
    next_request_id: RequestId,
    upload_status: UploadStatus,
    upload_revision: u64,
    selected_file: Option<PathBuf>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            entries: self.transcript.view(),
            scroll_to: self.transcript.latest(),
            pending_queries: self.pending.len(),
            upload: UploadView::from_status(
                &self.upload_status,
                self.file_label(),
                self.upload_revision,
            ),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn upload_status(&self) -> &UploadStatus {
        &self.upload_status
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        self.dirty = true;
        &mut self.transcript
    }

    /// Allocates a request id and shows its placeholder.
    pub(crate) fn begin_query(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        let placeholder = self.transcript_mut().push_placeholder();
        self.pending.insert(request_id, placeholder);
        request_id
    }

    /// Drops the placeholder of a finished request, if it is still shown.
    pub(crate) fn finish_query(&mut self, request_id: RequestId) {
        if let Some(placeholder) = self.pending.remove(&request_id) {
            self.transcript_mut().remove(placeholder);
        }
    }

    pub(crate) fn set_upload_status(&mut self, status: UploadStatus) {
        self.upload_status = status;
        self.upload_revision += 1;
        self.dirty = true;
    }

    pub(crate) fn select_file(&mut self, path: Option<PathBuf>) {
        self.selected_file = path;
        self.dirty = true;
    }

    fn file_label(&self) -> String {
        self.selected_file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| NO_FILE_CHOSEN.to_string())
    }
}
