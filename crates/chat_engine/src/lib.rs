//! Chat engine: backend HTTP exchanges and effect execution.
mod api;
mod client;
mod engine;
mod types;
mod upload;

pub use api::{
    AgentRequest, AgentResponse, UploadResponse, AGENT_ENDPOINT, DEFAULT_BASE_URL, PDF_FIELD,
    PDF_MIME, UPLOAD_PDF_ENDPOINT,
};
pub use client::{endpoint_url, Backend, BackendSettings, ReqwestBackend};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{EngineError, EngineEvent, FailureKind, FetchError, RequestId};
pub use upload::{PdfUpload, UploadFileError};
