//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The HTML front end could not read the input
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// The element nesting of the input is deeper than the serializer allows.
    ///
    /// Recoverable: the offending subtree is dropped and conversion continues.
    #[error("Recursion limit exceeded: more than {limit} nested elements")]
    RecursionLimitExceeded { limit: usize },
    /// A format parameter had a value the format cannot use
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: String, value: String },
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
