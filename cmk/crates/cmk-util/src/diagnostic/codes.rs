//! Diagnostic codes for categorizing lexer errors and warnings.
//!
//! ```
//! use cmk_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::NO_PROGRESS;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.number(), 1);
//! assert_eq!(code.as_str(), "E0001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Codes follow the format `{prefix}{number}` with a four digit number:
/// "E" for errors and "W" for warnings.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
    /// Short machine-readable name
    pub name: &'static str,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    #[inline]
    pub const fn new(prefix: &'static str, number: u32, name: &'static str) -> Self {
        Self {
            prefix,
            number,
            name,
        }
    }

    /// Get the prefix
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E0001")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    /// E0001: no lexical rule matched at the cursor
    pub const NO_PROGRESS: Self = Self::new("E", 1, "no_progress");

    /// W0001: keyword resource could not be read
    pub const KEYWORDS_UNAVAILABLE: Self = Self::new("W", 1, "keywords_unavailable");
    /// W0002: keyword resource is not a command → keyword-list mapping
    pub const KEYWORDS_MALFORMED: Self = Self::new("W", 2, "keywords_malformed");
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({}, {})", self.as_str(), self.name)
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
