//! Comment lexing.
//!
//! A `#` either opens a bracket comment (`#[[`, `#[==[`, ...) that runs
//! until a closer with the same number of `=`, possibly on a later line,
//! or starts a line comment that runs to the end of the line.

use crate::cursor::Cursor;
use crate::rule::RuleKind;
use crate::state::LexerState;
use crate::token::StyleClass;
use crate::Lexer;

impl Lexer {
    /// Handles a `#` that has just been consumed.
    pub(super) fn lex_comment(
        &self,
        stream: &mut Cursor<'_>,
        state: &mut LexerState,
    ) -> Option<StyleClass> {
        match stream.eat(RuleKind::OBracket) {
            Some(opener) => state.enter_bracket_comment(opener.equals),
            None => stream.skip_to_end(),
        }
        Some(StyleClass::Comment)
    }
}
