//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! The lexer never rejects input, so diagnostics are rare: a line where no
//! rule could make progress, or a keyword resource that could not be used.
//! They are collected by a [`Handler`] owned by whoever drives the lexer.
//!
//! # Examples
//!
//! ```
//! use cmk_util::diagnostic::{Diagnostic, DiagnosticCode, Handler};
//! use cmk_util::Span;
//!
//! let handler = Handler::new();
//! Diagnostic::error("no rule matched", Span::new(4, 5, 1, 5))
//!     .with_code(DiagnosticCode::NO_PROGRESS)
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! ```

mod codes;

pub use codes::DiagnosticCode;

use crate::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Something could not be processed as intended
    Error,
    /// Processing continued with degraded results
    Warning,
}

impl Level {
    /// Returns the canonical name for this level
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A diagnostic message with severity and location
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Main diagnostic message
    pub message: String,
    /// Source location
    pub span: Span,
    /// Optional diagnostic code
    pub code: Option<DiagnosticCode>,
    /// Additional notes for context
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a note to the diagnostic
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Hand the diagnostic to `handler`
    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self);
    }

    /// One-line rendering: `error[E0001]: message at 3:5`
    ///
    /// ```
    /// use cmk_util::diagnostic::{Diagnostic, DiagnosticCode};
    /// use cmk_util::Span;
    ///
    /// let diag = Diagnostic::error("stuck", Span::new(0, 1, 3, 5))
    ///     .with_code(DiagnosticCode::NO_PROGRESS);
    /// assert_eq!(diag.render(), "error[E0001]: stuck at 3:5");
    /// ```
    pub fn render(&self) -> String {
        let mut out = match self.code {
            Some(code) => format!("{}[{}]: {}", self.level, code, self.message),
            None => format!("{}: {}", self.level, self.message),
        };
        if self.span != Span::DUMMY {
            out.push_str(&format!(" at {}", self.span));
        }
        for note in &self.notes {
            out.push_str(&format!("\n  = note: {}", note));
        }
        out
    }
}

/// Handler for collecting diagnostics
///
/// Interior mutability lets the lexer driver report through a shared
/// reference while the caller keeps reading tokens.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emit a pre-built diagnostic
    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Remove and return all diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("diagnostics", &self.diagnostics.borrow().len())
            .finish()
    }
}
