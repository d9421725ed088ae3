//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Error)]
pub enum FormatError {
    /// Malformed or unexpected HTML structure
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The content stream could not be expressed as HTML.
    ///
    /// This always points at a broken invariant upstream (an unknown tag kind
    /// reaching the writer, unbalanced events), never at bad user input.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// The format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, FormatError::ParseError(_))
    }
}
