use std::fmt;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Unknown encoding label: {0}")]
    UnknownLabel(String),

    #[error("Text cannot be represented in {0}")]
    Unmappable(&'static str),

    #[error("Input is not valid {0}")]
    Malformed(&'static str),
}

/// A character encoding with strict encode and decode.
///
/// `encoding_rs` only encodes to ASCII-compatible encodings, so UTF-16 output
/// is produced here directly, always with a byte order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset(&'static Encoding);

impl Charset {
    pub fn for_label(label: &str) -> Result<Self, EncodingError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Charset)
            .ok_or_else(|| EncodingError::UnknownLabel(label.to_string()))
    }

    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        Charset(encoding)
    }

    /// Canonical WHATWG name, e.g. `UTF-8`, `windows-1251`, `UTF-16LE`.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
        if self.0 == UTF_16LE {
            let mut bytes = vec![0xFF, 0xFE];
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
            return Ok(bytes);
        }
        if self.0 == UTF_16BE {
            let mut bytes = vec![0xFE, 0xFF];
            bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
            return Ok(bytes);
        }

        let (bytes, _, had_errors) = self.0.encode(text);
        if had_errors {
            return Err(EncodingError::Unmappable(self.name()));
        }
        Ok(bytes.into_owned())
    }

    /// Decodes `bytes`, dropping a BOM that matches this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError> {
        let (text, had_errors) = self.0.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(EncodingError::Malformed(self.name()));
        }
        Ok(text.into_owned())
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
