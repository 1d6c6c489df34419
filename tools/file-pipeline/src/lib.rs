pub mod backup;
pub mod config;
pub mod detect;
pub mod encoding;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod samples;
pub mod scaffold;
pub mod transform;

pub mod mock;

pub use backup::{BackupManager, RestoreResult};
pub use config::ProjectLayout;
pub use detect::{detect_encoding, detect_file_encoding};
pub use encoding::{Charset, EncodingError};
pub use error::{Error, Result};
pub use filesystem::{EntryMetadata, FileSystem, FileSystemError, RealFileSystem};
pub use metadata::{FileInfo, MetadataCollector, ValidationReport};
pub use pipeline::{FileRecord, ProcessResult, TextProcessor};
pub use samples::{default_samples, generate_samples, SampleSpec};
pub use scaffold::create_directories;
pub use transform::swap_case;
