//! cmk-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! Small foundation types shared by the lexer, the host-side language glue
//! and the command-line tool:
//!
//! - [`symbol`] - Global string interner. Command names recorded in the
//!   persisted lexer state are interned so the state stays `Copy` and cheap
//!   to store once per line.
//! - [`span`] - Byte ranges within a line plus 1-based line/column info.
//! - [`diagnostic`] - Severity levels, diagnostics and the collecting
//!   [`Handler`] used when a line cannot be tokenized cleanly.
//! - [`error`] - Error enums for the operations above.
//!
//! ```
//! use cmk_util::{Symbol, Span};
//!
//! let cmd = Symbol::intern("if");
//! assert_eq!(cmd.as_str(), "if");
//!
//! let span = Span::new(0, 2, 1, 1);
//! assert_eq!(span.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use error::SpanError;
pub use span::Span;
pub use symbol::Symbol;
