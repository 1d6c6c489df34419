mod real;

pub use real::RealFileSystem;

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Not found: {0}")]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub path: PathBuf,
    pub len: u64,
    pub created: SystemTime,
    pub modified: SystemTime,
    pub is_directory: bool,
}

impl EntryMetadata {
    /// Final path component as a lossy string, empty for paths like `/`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub trait FileSystem: Send + Sync {
    /// Direct children of `path`, in no particular order.
    fn list_directory(&self, path: &Path) -> Result<Vec<EntryMetadata>>;

    /// Every regular file below `path`, recursively.
    fn walk_files(&self, path: &Path) -> Result<Vec<EntryMetadata>>;

    fn get_metadata(&self, path: &Path) -> Result<EntryMetadata>;

    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Writes `contents`, replacing any existing file and creating parent directories.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn create_directory(&self, path: &Path) -> Result<()>;

    fn remove_directory(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> Result<bool>;

    fn set_modified_time(&self, path: &Path, time: SystemTime) -> Result<()>;
}
