//! Dated zip backups of the data directory and their restoration.
//!
//! Archives are named `backup_YYYYMMDD.zip`, so there is at most one per
//! calendar day and a second run on the same day replaces the first. Entry
//! names are relative to the project root (`data/raw/...`).

use std::io::{Cursor, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike};
use log::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::ProjectLayout;
use crate::error::Result;
use crate::filesystem::{FileSystem, FileSystemError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    pub archive: PathBuf,
    pub restore_dir: PathBuf,
    pub files_restored: usize,
    pub entries_skipped: usize,
    /// Whether a leftover pre-restore directory was deleted first.
    pub removed_stale: bool,
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("backup_{}.zip", date.format("%Y%m%d"))
}

/// Archive entry name for `path`, using `/` regardless of platform.
fn entry_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| FileSystemError::PathError(e.to_string()))?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn to_zip_time(time: SystemTime) -> zip::DateTime {
    let local = DateTime::<Local>::from(time);
    // Zip timestamps only cover 1980..=2107
    zip::DateTime::from_date_and_time(
        local.year().clamp(1980, 2107) as u16,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .unwrap_or_default()
}

fn from_zip_time(time: &zip::DateTime) -> Option<SystemTime> {
    let naive = NaiveDate::from_ymd_opt(time.year() as i32, time.month() as u32, time.day() as u32)?
        .and_hms_opt(time.hour() as u32, time.minute() as u32, time.second() as u32)?;
    Local.from_local_datetime(&naive).earliest().map(SystemTime::from)
}

pub struct BackupManager<FS: FileSystem> {
    filesystem: FS,
    layout: ProjectLayout,
}

impl<FS: FileSystem> BackupManager<FS> {
    pub fn new(filesystem: FS, layout: ProjectLayout) -> Self {
        Self { filesystem, layout }
    }

    /// Zips the whole data directory into the backup for `date`.
    ///
    /// Returns the archive path.
    pub fn create_backup(&self, date: NaiveDate) -> Result<PathBuf> {
        let archive_path = self.layout.backups_dir.join(backup_file_name(date));
        info!("Creating backup: {}", archive_path.display());

        let files = self.filesystem.walk_files(&self.layout.data_dir)?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for file in &files {
            let name = entry_name(&file.path, &self.layout.root)?;
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(to_zip_time(file.modified));

            let contents = self.filesystem.read_file(&file.path)?;
            writer.start_file(name.clone(), options)?;
            writer.write_all(&contents)?;
            log::debug!("Added to backup: {}", name);
        }

        let bytes = writer.finish()?.into_inner();

        if !self.filesystem.exists(&self.layout.backups_dir)? {
            self.filesystem.create_directory(&self.layout.backups_dir)?;
        }
        self.filesystem.write_file(&archive_path, &bytes)?;

        info!("Backup created with {} file(s): {}", files.len(), archive_path.display());
        Ok(archive_path)
    }

    /// Resolves a bare archive name inside the backups directory; anything
    /// with more than one path component is used as given.
    pub fn archive_path(&self, archive: &str) -> PathBuf {
        let path = Path::new(archive);
        if path.components().count() == 1 && !path.is_absolute() {
            self.layout.backups_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Extracts `archive` into the restore directory, overwriting whatever is
    /// already there.
    pub fn restore(&self, archive: &str) -> Result<RestoreResult> {
        let archive_path = self.archive_path(archive);
        if !self.filesystem.exists(&archive_path)? {
            return Err(FileSystemError::NotFound(archive_path).into());
        }

        let restore_dir = self.layout.restore_dir.clone();
        if !self.filesystem.exists(&restore_dir)? {
            self.filesystem.create_directory(&restore_dir)?;
            info!("Created restore directory: {}", restore_dir.display());
        }

        let removed_stale = self.remove_stale_pre_restore()?;

        let bytes = self.filesystem.read_file(&archive_path)?;
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;

        let mut result = RestoreResult {
            archive: archive_path,
            restore_dir,
            files_restored: 0,
            entries_skipped: 0,
            removed_stale,
        };

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;

            let relative = match entry.enclosed_name() {
                Some(path) => path.to_path_buf(),
                None => {
                    warn!("Skipping archive entry with unsafe path: {}", entry.name());
                    result.entries_skipped += 1;
                    continue;
                }
            };
            if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
                warn!("Skipping archive entry with unsafe path: {}", entry.name());
                result.entries_skipped += 1;
                continue;
            }

            let target = result.restore_dir.join(&relative);
            if entry.is_dir() {
                self.filesystem.create_directory(&target)?;
                continue;
            }

            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            self.filesystem.write_file(&target, &contents)?;

            if let Some(modified) = entry.last_modified().as_ref().and_then(from_zip_time) {
                if let Err(e) = self.filesystem.set_modified_time(&target, modified) {
                    warn!("Failed to restore timestamp for {}: {}", target.display(), e);
                }
            }

            result.files_restored += 1;
            log::debug!("Restored: {}", target.display());
        }

        info!(
            "Restored {} file(s) from {} into {}",
            result.files_restored,
            result.archive.display(),
            result.restore_dir.display()
        );
        Ok(result)
    }

    fn remove_stale_pre_restore(&self) -> Result<bool> {
        let stale = &self.layout.pre_restore_dir;
        if !self.filesystem.exists(stale)? {
            return Ok(false);
        }

        self.filesystem.remove_directory(stale)?;
        info!("Removed stale pre-restore directory: {}", stale.display());
        Ok(true)
    }
}
