//! Token classification.

use cmk_util::Span;
use serde::Serialize;
use std::fmt;

/// Style class assigned to a token.
///
/// Plain text (arguments, whitespace, parentheses) carries no class and is
/// represented as `None` wherever an `Option<StyleClass>` is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleClass {
    /// Line or bracket comment
    Comment,
    /// Quoted or bracket string
    String,
    /// Command name or recognized command keyword
    Keyword,
    /// `${...}` / `$ENV{...}` reference
    Variable,
}

impl StyleClass {
    /// All classes, in declaration order
    pub const ALL: [StyleClass; 4] = [
        StyleClass::Comment,
        StyleClass::String,
        StyleClass::Keyword,
        StyleClass::Variable,
    ];

    /// Lower-case class name as used by editor themes
    pub const fn as_str(&self) -> &'static str {
        match self {
            StyleClass::Comment => "comment",
            StyleClass::String => "string",
            StyleClass::Keyword => "keyword",
            StyleClass::Variable => "variable",
        }
    }
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// Style class, `None` for plain text
    pub class: Option<StyleClass>,
    /// Location of the token within its line
    pub span: Span,
}

impl Token {
    /// Creates a token.
    pub fn new(class: Option<StyleClass>, span: Span) -> Self {
        Self { class, span }
    }

    /// Text the token covers in `line`.
    ///
    /// Returns an empty string if the span does not belong to `line`.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        self.span.slice(line).unwrap_or("")
    }
}
