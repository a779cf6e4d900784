//! Error type for the fallible outer surfaces (JSON input, file output, FFI).
//!
//! Fragment builders and assemblers never fail; only the layers that talk to
//! the outside world return [`ForgeError`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForgeError>;

#[derive(Debug, Error)]
pub enum ForgeError {
    /// The requested document kind is not one we can assemble.
    #[error("unknown document kind: {0:?}")]
    UnknownKind(String),

    /// Document data did not match the expected shape.
    #[error("invalid document data: {0}")]
    InvalidData(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("string contains an interior NUL byte")]
    NulByte(#[from] std::ffi::NulError),

    /// A download filename that is empty or would escape the target directory.
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    /// A download anchor pointed at an object URL that was never created or
    /// has already been revoked.
    #[error("unknown object URL")]
    UnknownObjectUrl,
}
