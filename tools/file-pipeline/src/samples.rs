use std::path::{Path, PathBuf};
use log::{error, info};

use crate::encoding::Charset;
use crate::filesystem::FileSystem;

/// Labels of the sample files written by default.
pub const DEFAULT_CHARSETS: [&str; 3] = ["utf-8", "windows-1251", "utf-16"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSpec {
    pub text: String,
    pub charset_label: String,
}

impl SampleSpec {
    pub fn new(text: impl Into<String>, charset_label: impl Into<String>) -> Self {
        Self { text: text.into(), charset_label: charset_label.into() }
    }

    pub fn file_name(&self, index: usize) -> String {
        format!("file_{}_{}.txt", index, self.charset_label)
    }
}

pub fn default_samples() -> Vec<SampleSpec> {
    DEFAULT_CHARSETS
        .iter()
        .map(|label| SampleSpec::new(format!("Привет, Мир! (encoding: {})", label), *label))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleStatus {
    Created,
    AlreadyExists,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOutcome {
    pub path: PathBuf,
    pub status: SampleStatus,
}

impl SampleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, SampleStatus::Failed { .. })
    }
}

/// Writes one file per sample into `raw_dir`, leaving existing files alone.
///
/// A sample that cannot be encoded or written is recorded as failed and the
/// remaining samples are still attempted.
pub fn generate_samples<FS: FileSystem>(fs: &FS, raw_dir: &Path, samples: &[SampleSpec]) -> Vec<SampleOutcome> {
    let mut outcomes = Vec::with_capacity(samples.len());

    for (index, sample) in samples.iter().enumerate() {
        let path = raw_dir.join(sample.file_name(index));
        info!("Creating file: {}", path.display());

        let status = match write_sample(fs, &path, sample) {
            Ok(status) => status,
            Err(reason) => {
                error!("Failed to create {}: {}", path.display(), reason);
                SampleStatus::Failed { reason }
            }
        };
        outcomes.push(SampleOutcome { path, status });
    }

    outcomes
}

fn write_sample<FS: FileSystem>(fs: &FS, path: &Path, sample: &SampleSpec) -> Result<SampleStatus, String> {
    if fs.exists(path).map_err(|e| e.to_string())? {
        info!("File already exists: {}", path.display());
        return Ok(SampleStatus::AlreadyExists);
    }

    let charset = Charset::for_label(&sample.charset_label).map_err(|e| e.to_string())?;
    let bytes = charset.encode(&sample.text).map_err(|e| e.to_string())?;
    fs.write_file(path, &bytes).map_err(|e| e.to_string())?;

    info!("File created: {}", path.display());
    Ok(SampleStatus::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFileSystem;
    use std::time::SystemTime;

    #[test]
    fn test_default_samples_are_written_in_their_encodings() {
        let fs = MockFileSystem::new();
        let raw = Path::new("/p/data/raw");
        fs.add_directory(raw);

        let outcomes = generate_samples(&fs, raw, &default_samples());
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.status == SampleStatus::Created));

        let utf8 = fs.get_file_content(&raw.join("file_0_utf-8.txt")).unwrap();
        assert_eq!(String::from_utf8(utf8).unwrap(), "Привет, Мир! (encoding: utf-8)");

        let cp1251 = fs.get_file_content(&raw.join("file_1_windows-1251.txt")).unwrap();
        assert_eq!(cp1251[0], 0xCF); // 'П'

        let utf16 = fs.get_file_content(&raw.join("file_2_utf-16.txt")).unwrap();
        assert_eq!(&utf16[..2], &[0xFF, 0xFE]);
    }

    #[test]
    fn test_existing_files_are_left_untouched() {
        let fs = MockFileSystem::new();
        let raw = Path::new("/p/data/raw");
        let existing = raw.join("file_0_utf-8.txt");
        fs.add_file(&existing, b"keep me".to_vec(), SystemTime::now());

        let outcomes = generate_samples(&fs, raw, &default_samples());
        assert_eq!(outcomes[0].status, SampleStatus::AlreadyExists);
        assert_eq!(outcomes[1].status, SampleStatus::Created);
        assert_eq!(fs.get_file_content(&existing).unwrap(), b"keep me");
    }

    #[test]
    fn test_one_failure_does_not_stop_the_rest() {
        let fs = MockFileSystem::new();
        let raw = Path::new("/p/data/raw");
        fs.add_directory(raw);

        let samples = vec![
            SampleSpec::new("abc", "utf-8"),
            SampleSpec::new("日本語", "windows-1251"),
            SampleSpec::new("abc", "klingon-8"),
            SampleSpec::new("abc", "utf-16"),
        ];
        let outcomes = generate_samples(&fs, raw, &samples);

        let failed: Vec<usize> = outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_failure())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(failed, vec![1, 2]);
        assert_eq!(outcomes[3].status, SampleStatus::Created);
        assert!(fs.get_file_content(&raw.join("file_1_windows-1251.txt")).is_none());
    }

    #[test]
    fn test_write_errors_are_isolated() {
        let fs = MockFileSystem::new();
        let raw = Path::new("/p/data/raw");
        fs.add_directory(raw);
        fs.deny_writes(raw.join("file_1_windows-1251.txt"));

        let outcomes = generate_samples(&fs, raw, &default_samples());
        assert!(outcomes[1].is_failure());
        assert_eq!(outcomes[0].status, SampleStatus::Created);
        assert_eq!(outcomes[2].status, SampleStatus::Created);
    }
}
