use std::path::Path;
use chrono::{DateTime, Local};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::filesystem::{EntryMetadata, FileSystem};

/// Filesystem snapshot of one processed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
}

impl FileInfo {
    pub fn from_entry(entry: &EntryMetadata) -> Self {
        Self {
            file_name: entry.file_name(),
            file_path: entry.path.to_string_lossy().into_owned(),
            file_size: entry.len,
            created: DateTime::<Local>::from(entry.created),
            modified: DateTime::<Local>::from(entry.modified),
        }
    }
}

pub fn encode_file_infos(infos: &[FileInfo]) -> Result<String> {
    Ok(serde_json::to_string_pretty(infos)?)
}

pub fn decode_file_infos(json: &str) -> Result<Vec<FileInfo>> {
    Ok(serde_json::from_str(json)?)
}

/// JSON schema every element of the metadata array must satisfy.
pub fn file_info_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "file_name": { "type": "string" },
            "file_path": { "type": "string" },
            "file_size": { "type": "number" },
            "created": { "type": "string", "format": "date-time" },
            "modified": { "type": "string", "format": "date-time" }
        },
        "required": ["file_name", "file_path", "file_size", "created", "modified"]
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub checked: usize,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks every element of `document` against [`file_info_schema`].
///
/// Violations are logged and returned in the report; only a schema that
/// fails to compile is an `Err`.
pub fn validate_file_infos(document: &Value) -> Result<ValidationReport> {
    let schema = file_info_schema();
    let validator = jsonschema::options()
        .should_validate_formats(true)
        .build(&schema)
        .map_err(|e| Error::Schema(e.to_string()))?;

    let mut report = ValidationReport::default();

    let items = match document.as_array() {
        Some(items) => items,
        None => {
            let message = "document is not a JSON array".to_string();
            error!("Metadata validation failed: {}", message);
            report.errors.push(message);
            return Ok(report);
        }
    };

    for (index, item) in items.iter().enumerate() {
        report.checked += 1;
        for violation in validator.iter_errors(item) {
            let message = format!("[{}] {}: {}", index, violation.instance_path, violation);
            error!("Metadata validation failed: {}", message);
            report.errors.push(message);
        }
    }

    if report.is_valid() {
        info!("Metadata validated: {} record(s)", report.checked);
    }
    Ok(report)
}

pub struct MetadataCollector<FS: FileSystem> {
    filesystem: FS,
}

impl<FS: FileSystem> MetadataCollector<FS> {
    pub fn new(filesystem: FS) -> Self {
        Self { filesystem }
    }

    /// Snapshots every file in `processed_dir`, writes the list to
    /// `output_path`, then reads it back and returns what was read.
    pub fn collect(&self, processed_dir: &Path, output_path: &Path) -> Result<Vec<FileInfo>> {
        let mut entries: Vec<EntryMetadata> = self
            .filesystem
            .list_directory(processed_dir)?
            .into_iter()
            .filter(|entry| !entry.is_directory)
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        let infos: Vec<FileInfo> = entries.iter().map(FileInfo::from_entry).collect();
        let json = encode_file_infos(&infos)?;
        self.filesystem.write_file(output_path, json.as_bytes())?;
        info!("Wrote metadata for {} file(s) to {}", infos.len(), output_path.display());

        let stored = self.filesystem.read_file(output_path)?;
        let decoded = decode_file_infos(&String::from_utf8_lossy(&stored))?;
        Ok(decoded)
    }

    pub fn validate_file(&self, path: &Path) -> Result<ValidationReport> {
        let bytes = self.filesystem.read_file(path)?;
        let document: Value = serde_json::from_slice(&bytes)?;
        validate_file_infos(&document)
    }
}
