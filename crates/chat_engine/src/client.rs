use std::path::Path;
use std::time::Duration;

use chat_logging::{chat_debug, chat_warn};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    AgentRequest, AgentResponse, FailureKind, FetchError, PdfUpload, UploadResponse,
    AGENT_ENDPOINT, DEFAULT_BASE_URL, PDF_FIELD, PDF_MIME, UPLOAD_PDF_ENDPOINT,
};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Overall deadline per request. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

impl BackendSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("unsupported scheme {:?}", base_url.scheme()),
            ));
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

/// The two backend exchanges. Implemented over HTTP by [`ReqwestBackend`].
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn ask(&self, text: &str) -> Result<AgentResponse, FetchError>;

    async fn upload_pdf(&self, path: &Path) -> Result<UploadResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn ask(&self, text: &str) -> Result<AgentResponse, FetchError> {
        let url = endpoint_url(&self.settings.base_url, AGENT_ENDPOINT)?;
        let response = self
            .client
            .post(url)
            .json(&AgentRequest::new(text))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        // The agent answers some failures with a non-2xx status and a normal
        // `reply`; those are shown like any other reply.
        let parsed: AgentResponse = decode_object(&bytes, status)?;
        if !status.is_success() {
            chat_warn!("Agent replied with status {}", status.as_u16());
        }
        chat_debug!("Agent reply: {}", parsed.summary());
        Ok(parsed)
    }

    async fn upload_pdf(&self, path: &Path) -> Result<UploadResponse, FetchError> {
        let upload = PdfUpload::read(path)
            .await
            .map_err(|err| FetchError::new(FailureKind::FileRead, err.to_string()))?;
        let url = endpoint_url(&self.settings.base_url, UPLOAD_PDF_ENDPOINT)?;
        chat_debug!(
            "Uploading {} ({} bytes)",
            upload.file_name,
            upload.bytes.len()
        );

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(PDF_MIME)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part(PDF_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        let parsed: UploadResponse = decode_object(&bytes, status)?;
        // Only a 2xx without `error` counts as accepted.
        if parsed.error().is_none() && !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(parsed)
    }
}

/// Joins an endpoint onto the base URL, keeping any path prefix the base
/// carries (`http://host/api` + `agent` -> `http://host/api/agent`).
pub fn endpoint_url(base: &Url, endpoint: &str) -> Result<Url, FetchError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(endpoint)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

/// Decodes a body that must be a JSON object. A body that fails to decode
/// after a non-2xx status is reported as that status.
fn decode_object<T: DeserializeOwned>(bytes: &[u8], status: StatusCode) -> Result<T, FetchError> {
    let fail = |message: String| {
        if status.is_success() {
            FetchError::new(FailureKind::InvalidBody, message)
        } else {
            FetchError::new(FailureKind::HttpStatus(status.as_u16()), message)
        }
    };

    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|err| fail(err.to_string()))?;
    if !value.is_object() {
        return Err(fail("expected a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|err| fail(err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
