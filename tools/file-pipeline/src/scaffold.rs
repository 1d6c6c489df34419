use std::path::{Path, PathBuf};
use log::info;

use crate::filesystem::{FileSystem, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOutcome {
    pub path: PathBuf,
    pub status: DirectoryStatus,
}

/// Creates every directory in `dirs` that is not there yet.
///
/// Existing directories are reported, never treated as an error, so running
/// this twice is harmless.
pub fn create_directories<FS: FileSystem>(fs: &FS, dirs: &[PathBuf]) -> Result<Vec<DirectoryOutcome>> {
    let mut outcomes = Vec::with_capacity(dirs.len());

    for dir in dirs {
        info!("Creating directory: {}", dir.display());
        let status = create_directory(fs, dir)?;
        outcomes.push(DirectoryOutcome { path: dir.clone(), status });
    }

    Ok(outcomes)
}

fn create_directory<FS: FileSystem>(fs: &FS, dir: &Path) -> Result<DirectoryStatus> {
    if fs.exists(dir)? {
        info!("Directory already exists: {}", dir.display());
        return Ok(DirectoryStatus::AlreadyExists);
    }

    fs.create_directory(dir)?;
    info!("Directory created: {}", dir.display());
    Ok(DirectoryStatus::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectLayout;
    use crate::mock::MockFileSystem;

    #[test]
    fn test_second_run_only_reports_existing() {
        let fs = MockFileSystem::new();
        let layout = ProjectLayout::new("/work/project_root");
        let dirs = layout.directories();

        let first = create_directories(&fs, &dirs).unwrap();
        assert!(first.iter().all(|o| o.status == DirectoryStatus::Created));

        let second = create_directories(&fs, &dirs).unwrap();
        assert_eq!(second.len(), dirs.len());
        assert!(second.iter().all(|o| o.status == DirectoryStatus::AlreadyExists));

        for dir in &dirs {
            assert!(fs.exists(dir).unwrap());
        }
    }

    #[test]
    fn test_partial_tree_is_completed() {
        let fs = MockFileSystem::new();
        let layout = ProjectLayout::new("/work/project_root");
        fs.add_directory(&layout.raw_dir);

        let outcomes = create_directories(&fs, &layout.directories()).unwrap();
        let created: Vec<&PathBuf> = outcomes
            .iter()
            .filter(|o| o.status == DirectoryStatus::Created)
            .map(|o| &o.path)
            .collect();

        assert_eq!(
            created,
            vec![&layout.processed_dir, &layout.logs_dir, &layout.backups_dir, &layout.output_dir]
        );
    }
}
