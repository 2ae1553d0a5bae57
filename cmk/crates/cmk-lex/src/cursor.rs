//! Character cursor over a single line of source.
//!
//! This module provides the [`Cursor`] the lexer reads from. A cursor covers
//! exactly one line (without its terminator) and tracks two byte positions:
//! where the current token started and how far it has been consumed. The
//! operations mirror what an editor's line stream offers a highlighting
//! mode:
//!
//! - anchored match-and-consume of a lexical rule ([`Cursor::eat`]) and its
//!   look-ahead form ([`Cursor::check`])
//! - consume one character ([`Cursor::next`])
//! - consume to end of line ([`Cursor::skip_to_end`])
//! - consume a whitespace run ([`Cursor::eat_space`])
//! - retreat by a number of characters ([`Cursor::back_up`])

use crate::rule::{is_space, RuleKind, RuleMatch};

/// A cursor for traversing one line character by character.
///
/// # Example
///
/// ```
/// use cmk_lex::cursor::Cursor;
/// use cmk_lex::rule::RuleKind;
///
/// let mut cursor = Cursor::new("set(FOO bar)");
/// assert!(cursor.eat(RuleKind::Ident).is_some());
/// assert_eq!(cursor.current(), "set");
/// assert_eq!(cursor.peek(), Some('('));
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    /// The line being traversed.
    line: &'a str,

    /// Current byte position in the line.
    position: usize,

    /// Byte position where the current token started.
    token_start: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `line`.
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            position: 0,
            token_start: 0,
        }
    }

    /// Marks the current position as the start of the next token.
    #[inline]
    pub fn start_token(&mut self) {
        self.token_start = self.position;
    }

    /// Returns the current byte position in the line.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if the whole line has been consumed.
    ///
    /// ```
    /// use cmk_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("a");
    /// assert!(!cursor.is_at_end());
    /// cursor.next();
    /// assert!(cursor.is_at_end());
    /// ```
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.line.len()
    }

    /// Returns the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes exactly one character and returns it.
    ///
    /// Does nothing and returns `None` at end of line.
    pub fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes the rest of the line.
    #[inline]
    pub fn skip_to_end(&mut self) {
        self.position = self.line.len();
    }

    /// Consumes a run of whitespace, returning true if anything was eaten.
    pub fn eat_space(&mut self) -> bool {
        let start = self.position;
        while self.peek().is_some_and(is_space) {
            self.next();
        }
        self.position > start
    }

    /// Moves the cursor back by `count` characters.
    ///
    /// Never retreats past the start of the current token.
    ///
    /// ```
    /// use cmk_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("if  (");
    /// cursor.next();
    /// cursor.next();
    /// cursor.eat_space();
    /// cursor.back_up(2);
    /// assert_eq!(cursor.current(), "if");
    /// ```
    pub fn back_up(&mut self, count: usize) {
        let consumed = &self.line[self.token_start..self.position];
        let retreat: usize = consumed
            .chars()
            .rev()
            .take(count)
            .map(char::len_utf8)
            .sum();
        self.position -= retreat;
    }

    /// Number of characters between byte `from` and the current position.
    pub fn chars_since(&self, from: usize) -> usize {
        self.line
            .get(from..self.position)
            .map_or(0, |s| s.chars().count())
    }

    /// Tests `rule` at the cursor without consuming anything.
    #[inline]
    pub fn check(&self, rule: RuleKind) -> Option<RuleMatch> {
        rule.match_at(self.remaining())
    }

    /// Tests `rule` at the cursor and consumes the match if there is one.
    pub fn eat(&mut self, rule: RuleKind) -> Option<RuleMatch> {
        let matched = self.check(rule)?;
        self.position += matched.len;
        Some(matched)
    }

    /// Text of the current token (from token start to the cursor).
    #[inline]
    pub fn current(&self) -> &'a str {
        &self.line[self.token_start..self.position]
    }

    /// Unconsumed text.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.line[self.position..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_utf8() {
        let mut cursor = Cursor::new("αβ");
        assert_eq!(cursor.next(), Some('α'));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.next(), Some('β'));
        assert_eq!(cursor.next(), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_eat_space() {
        let mut cursor = Cursor::new(" \t x");
        assert!(cursor.eat_space());
        assert_eq!(cursor.peek(), Some('x'));
        assert!(!cursor.eat_space());

        let mut cursor = Cursor::new("\u{feff}\u{85}");
        assert!(cursor.eat_space());
        assert_eq!(cursor.peek(), Some('\u{85}'));
        assert!(!cursor.eat_space());
    }

    #[test]
    fn test_skip_to_end() {
        let mut cursor = Cursor::new("# comment");
        cursor.next();
        cursor.skip_to_end();
        assert_eq!(cursor.current(), "# comment");
        assert_eq!(cursor.remaining(), "");
    }

    #[test]
    fn test_check_does_not_consume() {
        let cursor = Cursor::new("[==[");
        let m = cursor.check(RuleKind::OBracket).unwrap();
        assert_eq!(m.len, 4);
        assert_eq!(m.equals, 2);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_eat_consumes_match() {
        let mut cursor = Cursor::new("${A}${B}");
        assert!(cursor.eat(RuleKind::VarRef).is_some());
        assert_eq!(cursor.current(), "${A}");
        assert!(cursor.eat(RuleKind::Ident).is_none());
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_back_up_stops_at_token_start() {
        let mut cursor = Cursor::new("ab cd");
        cursor.next();
        cursor.next();
        cursor.start_token();
        cursor.next();
        cursor.back_up(10);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_back_up_multibyte() {
        let mut cursor = Cursor::new("é é");
        cursor.skip_to_end();
        cursor.back_up(2);
        assert_eq!(cursor.remaining(), " é");
    }

    #[test]
    fn test_chars_since() {
        let mut cursor = Cursor::new("foo  (");
        cursor.eat(RuleKind::Ident);
        let end = cursor.position();
        cursor.eat_space();
        assert_eq!(cursor.chars_since(end), 2);
    }
}
