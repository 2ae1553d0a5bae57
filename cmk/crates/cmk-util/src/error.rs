//! Core error types for cmk-util crate
//!
//! This module defines error types used throughout the util crate.

use thiserror::Error;

/// Error type for span operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpanError {
    /// Invalid span range
    #[error("Invalid span: start {start} > end {end}")]
    InvalidSpan {
        /// Start byte offset
        start: usize,
        /// End byte offset
        end: usize,
    },

    /// Span out of bounds for the text it indexes
    #[error("Span out of bounds: text has {text_len} bytes, span is {span_start}..{span_end}")]
    OutOfBounds {
        /// Length of the indexed text
        text_len: usize,
        /// Start byte offset
        span_start: usize,
        /// End byte offset
        span_end: usize,
    },

    /// Span does not fall on a character boundary
    #[error("Span {start}..{end} does not fall on a UTF-8 character boundary")]
    NotCharBoundary {
        /// Start byte offset
        start: usize,
        /// End byte offset
        end: usize,
    },
}

/// Result type alias for span operations
pub type SpanResult<T> = std::result::Result<T, SpanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_error_display() {
        let err = SpanError::OutOfBounds {
            text_len: 3,
            span_start: 1,
            span_end: 9,
        };
        assert_eq!(
            err.to_string(),
            "Span out of bounds: text has 3 bytes, span is 1..9"
        );
    }
}
