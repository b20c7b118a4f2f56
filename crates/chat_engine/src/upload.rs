use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadFileError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0:?} does not name a file")]
    NoFileName(PathBuf),
}

/// A file loaded into memory for the multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub async fn read(path: &Path) -> Result<Self, UploadFileError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| UploadFileError::NoFileName(path.to_path_buf()))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadFileError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { file_name, bytes })
    }
}
