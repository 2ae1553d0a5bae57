//! Symbol module - String interning for command names.
//!
//! This module provides the [`Symbol`] type, a compact (4-byte) handle to an
//! interned string. The lexer records the currently open command as a
//! `Symbol`, which keeps the persisted per-line state `Copy` and makes state
//! comparison (used to detect when incremental relexing has converged) a
//! plain integer comparison.
//!
//! # Performance Characteristics
//!
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `Symbol::intern()` (hit) | O(1) | String already interned |
//! | `Symbol::intern()` (miss) | O(1) | New string allocation |
//! | `Symbol` comparison | O(1) | Index comparison only |
//! | `Symbol::as_str()` | O(1) | Indexed reverse table |
//!
//! # Examples
//!
//! ```
//! use cmk_util::symbol::Symbol;
//!
//! let s1 = Symbol::intern("add_executable");
//! let s2 = Symbol::intern("add_executable");
//! let s3 = Symbol::intern("add_library");
//!
//! assert_eq!(s1, s2);
//! assert_ne!(s1, s3);
//! ```

mod interner;

pub use interner::{StringTable, STRING_TABLE};

/// An interned string.
///
/// Symbols are only created through [`Symbol::intern`] and
/// [`Symbol::lookup`], so every symbol refers to a live table entry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    /// Index into the global string table
    pub(crate) index: u32,
}

impl Symbol {
    /// Intern a string, returning its symbol
    ///
    /// ```
    /// use cmk_util::symbol::Symbol;
    ///
    /// let cmd = Symbol::intern("if");
    /// assert_eq!(Symbol::intern("if"), cmd);
    /// ```
    #[inline]
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.intern(string)
    }

    /// Returns the symbol for `string` if it has been interned before.
    ///
    /// ```
    /// use cmk_util::symbol::Symbol;
    ///
    /// let sym = Symbol::intern("foreach");
    /// assert_eq!(Symbol::lookup("foreach"), Some(sym));
    /// ```
    #[inline]
    pub fn lookup(string: &str) -> Option<Self> {
        STRING_TABLE.lookup(string)
    }

    /// Get the string value associated with this symbol
    ///
    /// ```
    /// use cmk_util::symbol::Symbol;
    ///
    /// let sym = Symbol::intern("message");
    /// assert_eq!(sym.as_str(), "message");
    /// ```
    #[inline]
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.get(*self).unwrap_or("")
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::intern(value)
    }
}
