//! Error types for XML extraction

use thiserror::Error;

/// Errors reported while scanning an XML document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The underlying XML reader rejected the document
    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: usize, message: String },
}

/// Result type alias for extraction operations
pub type ParseResult<T> = Result<T, ParseError>;
