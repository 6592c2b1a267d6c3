// File: src/error.rs
use thiserror::Error;

/// Errors from the library surfaces around the encoder. Encoding itself
/// never fails.
#[derive(Error, Debug)]
pub enum PhoneError {
    #[error("Glyph pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Index format version {found} is not supported (expected {expected})")]
    IndexVersion { found: u32, expected: u32 },

    #[error("Corrupt index: {0}")]
    CorruptIndex(String),
}

pub type Result<T> = std::result::Result<T, PhoneError>;
