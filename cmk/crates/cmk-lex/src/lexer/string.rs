//! Quoted string and bracket body lexing.
//!
//! Inside a nested construct each call consumes either the closing
//! delimiter or exactly one character. Backslash has no special meaning:
//! `"a\"` is closed by its second quote.

use crate::cursor::Cursor;
use crate::rule::RuleKind;
use crate::state::LexerState;
use crate::token::StyleClass;
use crate::Lexer;

impl Lexer {
    /// One step inside a double-quoted string.
    pub(super) fn lex_string_body(
        &self,
        stream: &mut Cursor<'_>,
        state: &mut LexerState,
    ) -> StyleClass {
        if stream.eat(RuleKind::Quote).is_some() {
            state.leave_nested();
        } else {
            stream.next();
        }
        StyleClass::String
    }

    /// One step inside a bracket argument or bracket comment.
    ///
    /// Only a closer with exactly `equals` `=` characters ends the
    /// construct; any other `]=*]` is content and only its first character
    /// is consumed.
    pub(super) fn lex_bracket_body(
        &self,
        stream: &mut Cursor<'_>,
        state: &mut LexerState,
        equals: usize,
    ) {
        match stream.check(RuleKind::CBracket) {
            Some(closer) if closer.equals == equals => {
                stream.eat(RuleKind::CBracket);
                state.leave_nested();
            },
            _ => {
                stream.next();
            },
        }
    }
}
