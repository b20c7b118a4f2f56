use std::{fmt, io};

use thiserror::Error;

use crate::{AgentResponse, UploadResponse};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    QueryCompleted {
        request_id: RequestId,
        result: Result<AgentResponse, FetchError>,
    },
    UploadCompleted {
        result: Result<UploadResponse, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// Non-2xx status without a usable body.
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body is not a JSON object of the expected shape.
    InvalidBody,
    /// The file to upload could not be read.
    FileRead,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::FileRead => write!(f, "file read error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failures of the engine itself, as opposed to a single request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error(transparent)]
    Client(#[from] FetchError),
    #[error("engine is no longer running")]
    Stopped,
}
