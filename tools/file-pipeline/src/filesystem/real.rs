use std::fs;
use std::path::Path;
use std::time::SystemTime;
use filetime::{set_file_mtime, FileTime};
use walkdir::WalkDir;

use super::{EntryMetadata, FileSystem, FileSystemError, Result};

#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn entry_metadata(path: &Path, metadata: &fs::Metadata) -> EntryMetadata {
    let modified = match metadata.modified() {
        Ok(m) => m,
        Err(_) => SystemTime::now(), // Use current time as fallback
    };

    // Not every filesystem records a birth time
    let created = metadata.created().unwrap_or(modified);

    EntryMetadata {
        path: path.to_path_buf(),
        len: metadata.len(),
        created,
        modified,
        is_directory: metadata.is_dir(),
    }
}

impl FileSystem for RealFileSystem {
    fn list_directory(&self, path: &Path) -> Result<Vec<EntryMetadata>> {
        let mut results = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue, // Skip entries we can't read
            };

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(_) => continue, // Skip entries we can't get metadata for
            };

            results.push(entry_metadata(&entry.path(), &metadata));
        }

        Ok(results)
    }

    fn walk_files(&self, path: &Path) -> Result<Vec<EntryMetadata>> {
        let mut results = Vec::new();

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => FileSystemError::Io(io),
                None => FileSystemError::PathError(format!("Filesystem loop under {}", path.display())),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                FileSystemError::PathError(format!("{}: {}", entry.path().display(), e))
            })?;
            results.push(entry_metadata(entry.path(), &metadata));
        }

        Ok(results)
    }

    fn get_metadata(&self, path: &Path) -> Result<EntryMetadata> {
        let metadata = fs::metadata(path)?;
        Ok(entry_metadata(path, &metadata))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(FileSystemError::NotFound(path.to_path_buf()));
        }
        Ok(fs::read(path)?)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn remove_directory(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(path.exists())
    }

    fn set_modified_time(&self, path: &Path, time: SystemTime) -> Result<()> {
        let file_time = FileTime::from(time);
        set_file_mtime(path, file_time)?;
        Ok(())
    }
}
