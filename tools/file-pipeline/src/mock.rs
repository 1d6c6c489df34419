use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::filesystem::{EntryMetadata, FileSystem, FileSystemError, Result};

#[derive(Debug, Clone)]
struct MockFile {
    content: Vec<u8>,
    created: SystemTime,
    modified: SystemTime,
}

impl MockFile {
    fn metadata(&self, path: &Path) -> EntryMetadata {
        EntryMetadata {
            path: path.to_path_buf(),
            len: self.content.len() as u64,
            created: self.created,
            modified: self.modified,
            is_directory: false,
        }
    }
}

fn directory_metadata(path: &Path) -> EntryMetadata {
    let now = SystemTime::now();
    EntryMetadata {
        path: path.to_path_buf(),
        len: 0,
        created: now,
        modified: now,
        is_directory: true,
    }
}

/// In-memory filesystem. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockFile>>>,
    directories: Arc<Mutex<Vec<PathBuf>>>,
    read_only: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: Vec<u8>, modified: SystemTime) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_directory(parent);
        }
        let mut files = self.files.lock().unwrap();
        files.insert(path, MockFile { content, created: modified, modified });
    }

    /// Registers `path` and all of its ancestors.
    pub fn add_directory(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut directories = self.directories.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            if !directories.iter().any(|d| d == ancestor) {
                directories.push(ancestor.to_path_buf());
            }
        }
    }

    /// Makes every write below `path` fail with a permission error.
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        self.read_only.lock().unwrap().push(path.into());
    }

    pub fn get_file_content(&self, path: &Path) -> Option<Vec<u8>> {
        let files = self.files.lock().unwrap();
        files.get(path).map(|f| f.content.clone())
    }

    pub fn list_all_files(&self) -> Vec<PathBuf> {
        let files = self.files.lock().unwrap();
        let mut paths: Vec<PathBuf> = files.keys().cloned().collect();
        paths.sort();
        paths
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        let read_only = self.read_only.lock().unwrap();
        if read_only.iter().any(|denied| path.starts_with(denied)) {
            return Err(FileSystemError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("read-only: {}", path.display()),
            )));
        }
        Ok(())
    }
}

impl FileSystem for MockFileSystem {
    fn list_directory(&self, path: &Path) -> Result<Vec<EntryMetadata>> {
        let files = self.files.lock().unwrap();
        let directories = self.directories.lock().unwrap();

        if !directories.iter().any(|d| d == path) {
            return Err(FileSystemError::NotFound(path.to_path_buf()));
        }

        let mut results = Vec::new();

        for (file_path, file) in files.iter() {
            if file_path.parent() == Some(path) {
                results.push(file.metadata(file_path));
            }
        }

        for dir_path in directories.iter() {
            if dir_path.parent() == Some(path) {
                results.push(directory_metadata(dir_path));
            }
        }

        Ok(results)
    }

    fn walk_files(&self, path: &Path) -> Result<Vec<EntryMetadata>> {
        if !self.exists(path)? {
            return Err(FileSystemError::NotFound(path.to_path_buf()));
        }

        let files = self.files.lock().unwrap();
        let mut results: Vec<EntryMetadata> = files
            .iter()
            .filter(|(file_path, _)| file_path.starts_with(path))
            .map(|(file_path, file)| file.metadata(file_path))
            .collect();
        results.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(results)
    }

    fn get_metadata(&self, path: &Path) -> Result<EntryMetadata> {
        let files = self.files.lock().unwrap();
        let directories = self.directories.lock().unwrap();

        if let Some(file) = files.get(path) {
            Ok(file.metadata(path))
        } else if directories.iter().any(|d| d == path) {
            Ok(directory_metadata(path))
        } else {
            Err(FileSystemError::NotFound(path.to_path_buf()))
        }
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.get_file_content(path)
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.check_writable(path)?;
        let now = SystemTime::now();
        if let Some(parent) = path.parent() {
            self.add_directory(parent);
        }

        let mut files = self.files.lock().unwrap();
        let created = files.get(path).map(|f| f.created).unwrap_or(now);
        files.insert(
            path.to_path_buf(),
            MockFile { content: contents.to_vec(), created, modified: now },
        );
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        self.check_writable(path)?;
        self.add_directory(path);
        Ok(())
    }

    fn remove_directory(&self, path: &Path) -> Result<()> {
        let mut files = self.files.lock().unwrap();
        let mut directories = self.directories.lock().unwrap();

        if !directories.iter().any(|d| d == path) {
            return Err(FileSystemError::NotFound(path.to_path_buf()));
        }

        files.retain(|file_path, _| !file_path.starts_with(path));
        directories.retain(|dir_path| !dir_path.starts_with(path));
        Ok(())
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let files = self.files.lock().unwrap();
        let directories = self.directories.lock().unwrap();

        Ok(files.contains_key(path) || directories.iter().any(|d| d == path))
    }

    fn set_modified_time(&self, path: &Path, time: SystemTime) -> Result<()> {
        let mut files = self.files.lock().unwrap();

        if let Some(file) = files.get_mut(path) {
            file.modified = time;
            Ok(())
        } else {
            Err(FileSystemError::NotFound(path.to_path_buf()))
        }
    }
}
