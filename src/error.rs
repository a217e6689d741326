use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between a computed policy and a model file on disk.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("State index {index} out of range for policy of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Path error: {0}")]
    PathError(String),
    #[error("I/O error on {}: {}", path.display(), source)]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Encoding error: {0}")]
    EncodingError(String),
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> ExportError {
        ExportError::IoError { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
