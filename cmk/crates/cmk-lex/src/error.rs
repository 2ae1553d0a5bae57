//! Error types for lexing and keyword loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use cmk_util::diagnostic::DiagnosticCode;

/// Errors returned by a single token call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No rule matched at the cursor; nothing was consumed.
    #[error("no rule matches {found:?} at byte {position}")]
    NoProgress {
        /// Byte position of the cursor
        position: usize,
        /// Character under the cursor
        found: char,
    },

    /// The line is exhausted; there is nothing left to classify.
    #[error("end of line at byte {position}")]
    EndOfLine {
        /// Byte position of the cursor
        position: usize,
    },
}

/// Errors raised while loading or merging a keyword resource.
#[derive(Debug, Error)]
pub enum KeywordError {
    /// The resource file could not be read.
    #[error("cannot read keyword resource {}: {source}", path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The resource is not valid JSON.
    #[error("keyword resource is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The resource is JSON but not an object of string arrays.
    #[error("keyword resource has the wrong shape: {0}")]
    Shape(String),
}

impl KeywordError {
    /// Warning code reported when this resource is skipped.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            KeywordError::Io { .. } => DiagnosticCode::KEYWORDS_UNAVAILABLE,
            KeywordError::Json(_) | KeywordError::Shape(_) => DiagnosticCode::KEYWORDS_MALFORMED,
        }
    }
}

/// Result type for token calls
pub type LexResult<T> = Result<T, LexError>;

/// Result type for keyword loading
pub type KeywordResult<T> = Result<T, KeywordError>;
