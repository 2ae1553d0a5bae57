//! Span module - Source location tracking.
//!
//! A token produced by the lexer covers a byte range of one line. [`Span`]
//! records that range together with the 1-based line and column of its
//! first character, which is what renderers and diagnostics need.
//!
//! # Examples
//!
//! ```
//! use cmk_util::span::Span;
//!
//! let span = Span::new(3, 8, 1, 4);
//! assert_eq!(span.len(), 5);
//! assert_eq!(span.slice("if  (NOT X)").unwrap(), "(NOT ");
//! ```

use crate::error::{SpanError, SpanResult};

/// Source location span
///
/// `start` and `end` are byte offsets into the line text; `line` and
/// `column` are 1-based and describe `start`. Column counts characters,
/// not bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, in characters)
    pub column: u32,
}

impl Span {
    /// Dummy span for testing
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
    };

    /// Create a new span
    #[inline]
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Returns true if this span is empty (start == end)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the span in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns the text this span covers
    pub fn slice<'a>(&self, text: &'a str) -> SpanResult<&'a str> {
        if self.start > self.end {
            return Err(SpanError::InvalidSpan {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > text.len() {
            return Err(SpanError::OutOfBounds {
                text_len: text.len(),
                span_start: self.start,
                span_end: self.end,
            });
        }
        text.get(self.start..self.end)
            .ok_or(SpanError::NotCharBoundary {
                start: self.start,
                end: self.end,
            })
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
