use std::path::Path;
use log::info;

use crate::filesystem::{FileSystem, Result};

pub const REPORT_TEXT: &str = "\
File pipeline report
====================

1. Created the project directory tree (data/raw, data/processed, logs, backups, output).
2. Wrote sample text files in UTF-8, windows-1251 and UTF-16.
3. Detected the encoding of every raw file, swapped the case of its text and
   saved the result next to a JSON summary of all processed files.
4. Archived the data directory into a dated zip backup.
5. Restored the backup into the restore directory.
6. Collected metadata of the processed files and validated it against a JSON schema.
7. Every step was logged to logs/log.txt.
";

pub fn write_report<FS: FileSystem>(fs: &FS, path: &Path) -> Result<()> {
    fs.write_file(path, REPORT_TEXT.as_bytes())?;
    info!("Report written: {}", path.display());
    Ok(())
}
