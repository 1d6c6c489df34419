use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

/// Copies every write to stderr and to an append-only log file.
pub struct TeeWriter {
    file: File,
}

impl TeeWriter {
    /// Opens `log_file` for appending; its directory must already exist.
    pub fn open(log_file: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(log_file)?;
        Ok(Self { file })
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A broken stderr must not stop the log file from being written
        let _ = io::stderr().write_all(buf);
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = io::stderr().flush();
        self.file.flush()
    }
}

/// Installs the global logger, writing `YYYY-MM-DD HH:MM:SS: LEVEL message`
/// lines to stderr and `log_file`.
pub fn init(log_file: &Path, verbose: bool) -> io::Result<()> {
    let log_level = if verbose { "debug" } else { "info" };
    let writer = TeeWriter::open(log_file)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {} {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(writer)))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_tee_writer_appends() {
        let temp = tempfile::TempDir::new().unwrap();
        let log_file = temp.path().join("log.txt");

        let mut first = TeeWriter::open(&log_file).unwrap();
        first.write_all(b"one\n").unwrap();
        drop(first);

        let mut second = TeeWriter::open(&log_file).unwrap();
        second.write_all(b"two\n").unwrap();
        second.flush().unwrap();

        assert_eq!(fs::read_to_string(&log_file).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_tee_writer_needs_existing_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let log_file = temp.path().join("missing").join("log.txt");

        assert!(TeeWriter::open(&log_file).is_err());
    }
}
