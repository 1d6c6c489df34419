use thiserror::Error;

use crate::encoding::EncodingError;
use crate::filesystem::FileSystemError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema error: {0}")]
    Schema(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::FileSystem(FileSystemError::Io(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
