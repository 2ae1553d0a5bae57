//! Lexical rules.
//!
//! Each [`RuleKind`] is an anchored pattern tested at the cursor. In normal
//! mode the lexer tries them in [`RuleKind::PRIORITY`] order and the first
//! match wins; what happens after a match is decided by the lexer's handler
//! for that rule.
//!
//! | Rule | Pattern |
//! |------|---------|
//! | `Comment` | `#` |
//! | `Quote` | `"` |
//! | `OBracket` | `\[(=*)\[` |
//! | `CBracket` | `\](=*)\]` |
//! | `Space` | `\s+` |
//! | `LParen` | `\(` |
//! | `RParen` | `\)` |
//! | `Ident` | `[A-Za-z_][A-Za-z0-9_]*` |
//! | `VarRef` | `\$(ENV)?\{.*?\}` |
//! | `Argument` | `[^()#"\\]+` |

use std::fmt;

/// A named lexical pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Start of a line comment or bracket comment
    Comment,
    /// Double quote
    Quote,
    /// Bracket opener `[=*[`
    OBracket,
    /// Bracket closer `]=*]`
    CBracket,
    /// Whitespace run
    Space,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Identifier
    Ident,
    /// `${...}` or `$ENV{...}`, closing at the first `}`
    VarRef,
    /// Run of characters other than `(`, `)`, `#`, `"` and `\`
    Argument,
}

/// Result of a successful rule match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleMatch {
    /// Matched length in bytes
    pub len: usize,
    /// Number of `=` characters in a bracket delimiter, 0 for other rules
    pub equals: usize,
}

impl RuleMatch {
    fn plain(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, equals: 0 })
    }
}

impl RuleKind {
    /// Normal-mode evaluation order.
    pub const PRIORITY: [RuleKind; 10] = [
        RuleKind::Comment,
        RuleKind::Quote,
        RuleKind::OBracket,
        RuleKind::CBracket,
        RuleKind::Space,
        RuleKind::LParen,
        RuleKind::RParen,
        RuleKind::Ident,
        RuleKind::VarRef,
        RuleKind::Argument,
    ];

    /// Upper-case rule name
    pub const fn name(&self) -> &'static str {
        match self {
            RuleKind::Comment => "COMMENT",
            RuleKind::Quote => "QUOTE",
            RuleKind::OBracket => "OBRACKET",
            RuleKind::CBracket => "CBRACKET",
            RuleKind::Space => "SPACE",
            RuleKind::LParen => "LPAREN",
            RuleKind::RParen => "RPAREN",
            RuleKind::Ident => "IDENT",
            RuleKind::VarRef => "VARREF",
            RuleKind::Argument => "ARGUMENT",
        }
    }

    /// Matches this rule against the start of `text`.
    ///
    /// ```
    /// use cmk_lex::rule::RuleKind;
    ///
    /// assert_eq!(RuleKind::Ident.match_at("foo_1(x)").map(|m| m.len), Some(5));
    /// assert_eq!(RuleKind::Ident.match_at("1foo"), None);
    /// assert_eq!(RuleKind::CBracket.match_at("]=]").map(|m| m.equals), Some(1));
    /// ```
    pub fn match_at(&self, text: &str) -> Option<RuleMatch> {
        match self {
            RuleKind::Comment => single(text, '#'),
            RuleKind::Quote => single(text, '"'),
            RuleKind::OBracket => bracket(text, '[', '['),
            RuleKind::CBracket => bracket(text, ']', ']'),
            RuleKind::Space => RuleMatch::plain(prefix_len(text, is_space)),
            RuleKind::LParen => single(text, '('),
            RuleKind::RParen => single(text, ')'),
            RuleKind::Ident => ident(text),
            RuleKind::VarRef => var_ref(text),
            RuleKind::Argument => RuleMatch::plain(prefix_len(text, is_argument_char)),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whitespace as the `Space` rule sees it.
///
/// Unicode whitespace plus U+FEFF, without U+0085. A byte order mark at the
/// start of a file is therefore skipped like any other blank.
///
/// ```
/// use cmk_lex::rule::is_space;
///
/// assert!(is_space('\t'));
/// assert!(is_space('\u{FEFF}'));
/// assert!(!is_space('\u{85}'));
/// ```
#[inline]
pub fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

fn single(text: &str, expected: char) -> Option<RuleMatch> {
    text.starts_with(expected)
        .then(|| RuleMatch::plain(expected.len_utf8()))
        .flatten()
}

/// Byte length of the longest prefix whose characters all satisfy `pred`.
fn prefix_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| i)
}

fn bracket(text: &str, open: char, close: char) -> Option<RuleMatch> {
    let rest = text.strip_prefix(open)?;
    let equals = prefix_len(rest, |c| c == '=');
    rest[equals..].strip_prefix(close)?;
    Some(RuleMatch {
        len: equals + 2,
        equals,
    })
}

fn ident(text: &str) -> Option<RuleMatch> {
    let first = text.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    RuleMatch::plain(prefix_len(text, |c| c.is_ascii_alphanumeric() || c == '_'))
}

fn var_ref(text: &str) -> Option<RuleMatch> {
    let rest = text.strip_prefix('$')?;
    let body = rest
        .strip_prefix("ENV{")
        .filter(|body| closing_brace(body).is_some())
        .or_else(|| rest.strip_prefix('{'))?;
    let close = closing_brace(body)?;
    let opener_len = text.len() - body.len();
    RuleMatch::plain(opener_len + close + 1)
}

/// Offset of the first `}` before any line terminator.
fn closing_brace(body: &str) -> Option<usize> {
    for (i, c) in body.char_indices() {
        match c {
            '}' => return Some(i),
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => return None,
            _ => {}
        }
    }
    None
}

fn is_argument_char(c: char) -> bool {
    !matches!(c, '(' | ')' | '#' | '"' | '\\')
}
