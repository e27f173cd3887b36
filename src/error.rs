//! Error types for richtex library.

use std::io;
use thiserror::Error;

/// Result type alias for richtex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around content rendering.
///
/// Rendering itself degrades gracefully and never returns these; they
/// surface from I/O, decoding, typesetting backends and option validation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input bytes are not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The math typesetter rejected an expression.
    #[error("Typesetting error: {0}")]
    Typeset(String),

    /// A render option could not be parsed or is invalid.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Error while producing serialized output (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<katex::Error> for Error {
    fn from(err: katex::Error) -> Self {
        Error::Typeset(err.to_string())
    }
}
