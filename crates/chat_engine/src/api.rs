//! Wire shapes of the research backend.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const UPLOAD_PDF_ENDPOINT: &str = "upload_pdf";
pub const AGENT_ENDPOINT: &str = "agent";

/// Multipart field carrying the uploaded file.
pub const PDF_FIELD: &str = "pdf";
pub const PDF_MIME: &str = "application/pdf";

/// Body of `POST /agent`. The backend reads `message` for the prompt and
/// `query` for tool searches; the client sends the same text in both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRequest<'a> {
    pub message: &'a str,
    pub query: &'a str,
}

impl<'a> AgentRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            message: text,
            query: text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentResponse {
    pub reply: String,
    #[serde(default)]
    pub agent_context: Option<Vec<String>>,
}

impl AgentResponse {
    /// Short description for logs; never includes the reply text.
    pub fn summary(&self) -> String {
        format!(
            "{} chars, {} source tags",
            self.reply.chars().count(),
            self.agent_context.as_ref().map_or(0, Vec::len)
        )
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.reply, self.agent_context.unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// Backend-reported error. An empty string counts as no error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|error| !error.is_empty())
    }
}
