//! Error types for tagkv
//!
//! This module defines the error type shared by the codec, the backends and
//! the store adapter. We use `thiserror` for automatic `Display` and `Error`
//! trait implementations.
//!
//! Missing entries are not errors: lookups return `Option`, and enumeration
//! simply omits them.

use crate::codec::CodecError;
use std::io;
use thiserror::Error;

/// Result type alias for tagkv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for tagkv
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error raised by a backend
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Namespace prefix (or branch id) is empty or not `[0-9A-Za-z]+`
    #[error("Invalid prefix: {0:?}")]
    InvalidPrefix(String),

    /// A stored string could not be decoded
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Stored value has a different type than the operation needs
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type required by the operation
        expected: &'static str,
        /// Type actually stored
        actual: &'static str,
    },

    /// Backend-specific failure that is not an I/O error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error was produced by the codec
    pub fn is_codec(&self) -> bool {
        matches!(self, Error::Codec(_))
    }
}
