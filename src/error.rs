//! Error types for coursekit.
//!
//! Structuring and pagination never fail; errors only arise at the
//! boundaries (reading input, decoding bytes, loading options, rendering).

use std::io;
use thiserror::Error;

/// Result type alias for coursekit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the structuring core.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input bytes are not valid UTF-8 text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Options are inconsistent (e.g. margins larger than the page).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidConfig(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
