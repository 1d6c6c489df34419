use std::path::Path;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use log::debug;

use crate::encoding::Charset;
use crate::filesystem::{FileSystem, Result};

/// Best-guess encoding of `bytes`, or `None` when the guess is not usable.
///
/// A byte order mark wins outright. Without one, the statistical detector
/// decides, and its answer is rejected when the input contains NUL bytes or
/// does not decode cleanly in the guessed encoding.
pub fn detect_encoding(bytes: &[u8]) -> Option<Charset> {
    if bytes.is_empty() {
        return None;
    }

    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        debug!("Byte order mark found: {}", encoding.name());
        return Some(Charset::from_encoding(encoding));
    }

    if bytes.contains(&0) {
        debug!("NUL bytes without a byte order mark, refusing to guess");
        return None;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, true);

    let (_, had_errors) = guess.decode_without_bom_handling(bytes);
    if had_errors {
        debug!("Guessed {} but the input does not decode cleanly", guess.name());
        return None;
    }

    Some(Charset::from_encoding(guess))
}

pub fn detect_file_encoding<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Option<Charset>> {
    let bytes = fs.read_file(path)?;
    Ok(detect_encoding(&bytes))
}
