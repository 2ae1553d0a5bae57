//! Error types for the host-side glue.

use thiserror::Error;

/// Errors raised by documents and the language registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LangError {
    /// A line index past the end of the document.
    #[error("line {index} is out of range (document has {len} lines)")]
    LineOutOfRange {
        /// Requested 0-based index
        index: usize,
        /// Number of lines in the document
        len: usize,
    },

    /// A language with this id is already registered.
    #[error("language `{0}` is already registered")]
    DuplicateLanguage(String),
}

/// Result type for host-side operations
pub type LangResult<T> = Result<T, LangError>;
