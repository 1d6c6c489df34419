use std::path::{Path, PathBuf};
use std::time::SystemTime;
use chrono::{DateTime, Local};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::detect::detect_encoding;
use crate::error::Result;
use crate::filesystem::{EntryMetadata, FileSystem};
use crate::transform::swap_case;

/// Timestamp layout of [`FileRecord::modified`].
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Content snapshot of one processed raw file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub original_text: String,
    pub transformed_text: String,
    /// UTF-8 length of `original_text` in bytes.
    pub file_size: u64,
    pub modified: String,
    pub encoding: String,
}

#[derive(Debug, Default)]
pub struct ProcessResult {
    pub records: Vec<FileRecord>,
    pub skipped: Vec<PathBuf>,
    pub output_path: PathBuf,
}

/// Name of the case-swapped copy: `notes.txt` becomes `notes_processed.txt`.
pub fn processed_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{}_processed.{}", stem, extension),
        _ => format!("{}_processed", file_name),
    }
}

pub fn format_modified(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(MODIFIED_FORMAT).to_string()
}

/// Serializes records as an indented JSON array, non-ASCII kept verbatim.
pub fn records_to_json(records: &[FileRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;

    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub struct TextProcessor<FS: FileSystem> {
    filesystem: FS,
}

impl<FS: FileSystem> TextProcessor<FS> {
    pub fn new(filesystem: FS) -> Self {
        Self { filesystem }
    }

    /// Case-swaps every raw file into `processed_dir` and writes the records
    /// to `output_path` as a UTF-8 JSON array.
    ///
    /// Files that cannot be detected, decoded or written back in their own
    /// encoding are skipped with a warning.
    pub fn process(&self, raw_dir: &Path, processed_dir: &Path, output_path: &Path) -> Result<ProcessResult> {
        let mut result = ProcessResult {
            output_path: output_path.to_path_buf(),
            ..ProcessResult::default()
        };

        let mut entries: Vec<EntryMetadata> = self
            .filesystem
            .list_directory(raw_dir)?
            .into_iter()
            .filter(|entry| !entry.is_directory)
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        for entry in entries {
            log::debug!("Processing entry: {:?}", entry.path);
            match self.process_file(&entry, processed_dir)? {
                Some(record) => {
                    info!("File {} processed ({})", record.filename, record.encoding);
                    result.records.push(record);
                }
                None => result.skipped.push(entry.path),
            }
        }

        let json = records_to_json(&result.records)?;
        self.filesystem.write_file(output_path, json.as_bytes())?;
        info!(
            "Wrote {} record(s) to {}",
            result.records.len(),
            output_path.display()
        );

        Ok(result)
    }

    fn process_file(&self, entry: &EntryMetadata, processed_dir: &Path) -> Result<Option<FileRecord>> {
        let file_name = entry.file_name();
        let bytes = self.filesystem.read_file(&entry.path)?;

        let charset = match detect_encoding(&bytes) {
            Some(charset) => charset,
            None => {
                warn!("Could not detect encoding of {}, skipping", entry.path.display());
                return Ok(None);
            }
        };
        info!("File: {}, encoding: {}", file_name, charset);

        let original_text = match charset.decode(&bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not decode {}: {}, skipping", entry.path.display(), e);
                return Ok(None);
            }
        };
        let transformed_text = swap_case(&original_text);

        let encoded = match charset.encode(&transformed_text) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not write {} back as {}: {}, skipping", entry.path.display(), charset, e);
                return Ok(None);
            }
        };

        let target = processed_dir.join(processed_file_name(&file_name));
        self.filesystem.write_file(&target, &encoded)?;

        Ok(Some(FileRecord {
            filename: file_name,
            file_size: original_text.len() as u64,
            modified: format_modified(entry.modified),
            encoding: charset.name().to_string(),
            original_text,
            transformed_text,
        }))
    }
}
