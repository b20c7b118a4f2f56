use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chat_engine::{BackendSettings, DEFAULT_BASE_URL};
use chat_logging::chat_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;
use crate::cli::Cli;

pub const CONFIG_FILENAME: &str = "chat_client.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid backend url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    /// `None` waits for the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub log: LogDestination,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: backend.connect_timeout.as_secs(),
            request_timeout_secs: backend.request_timeout.map(|t| t.as_secs()),
            max_response_bytes: backend.max_response_bytes,
            log: LogDestination::default(),
        }
    }
}

impl ChatConfig {
    /// Command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(secs) = cli.request_timeout_secs {
            self.request_timeout_secs = Some(secs);
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
    }

    pub fn backend_settings(&self) -> Result<BackendSettings, ConfigError> {
        let base = BackendSettings::with_base_url(&self.base_url).map_err(|err| {
            ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: err.message,
            }
        })?;
        Ok(BackendSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_response_bytes: self.max_response_bytes,
            ..base
        })
    }
}

/// Loads settings from `path`, or from `./chat_client.ron` when no path is
/// given. Only the implicit file may be missing.
pub fn load(path: Option<&Path>) -> Result<ChatConfig, ConfigError> {
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = PathBuf::from(CONFIG_FILENAME);
            if default_path.exists() {
                read_config(&default_path)
            } else {
                Ok(ChatConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<ChatConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    chat_info!("Loaded settings from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_backend_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout_secs, None);

        let settings = config.backend_settings().unwrap();
        assert_eq!(settings.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(
            &path,
            r#"(base_url: "http://10.0.0.2:8000", request_timeout_secs: Some(30))"#,
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.request_timeout_secs, Some(30));
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.log, LogDestination::File);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load(Some(&dir.path().join("nope.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ron");
        fs::write(&path, "(base_url: 5").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut config = ChatConfig {
            base_url: "http://file:1".to_string(),
            ..ChatConfig::default()
        };
        let cli = Cli {
            base_url: Some("http://cli:2".to_string()),
            request_timeout_secs: Some(5),
            log: Some(LogDestination::Terminal),
            ..Cli::default()
        };
        config.apply_cli(&cli);

        assert_eq!(config.base_url, "http://cli:2");
        assert_eq!(config.request_timeout_secs, Some(5));
        assert_eq!(config.log, LogDestination::Terminal);
        let settings = config.backend_settings().unwrap();
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = ChatConfig {
            base_url: "localhost:5000".to_string(),
            ..ChatConfig::default()
        };
        assert!(matches!(
            config.backend_settings(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
