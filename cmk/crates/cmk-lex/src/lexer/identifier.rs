//! Identifier lexing.
//!
//! Outside a command invocation an identifier directly followed by `(`
//! (optionally with whitespace in between) names a command; it is styled
//! as a keyword and recorded in the state. Inside an invocation an
//! identifier is a keyword only if the keyword table lists it for the
//! open command.

use crate::cursor::Cursor;
use crate::rule::RuleKind;
use crate::state::{CommandRef, LexerState};
use crate::token::StyleClass;
use crate::Lexer;

impl Lexer {
    /// Handles an identifier that has just been consumed.
    pub(super) fn lex_identifier(
        &self,
        stream: &mut Cursor<'_>,
        state: &mut LexerState,
    ) -> Option<StyleClass> {
        let word = stream.current();

        if let Some(command) = state.command() {
            return command
                .symbol()
                .is_some_and(|command| self.keywords.contains(command, word))
                .then_some(StyleClass::Keyword);
        }

        // Look past whitespace for `(`, then give the whitespace back so
        // the token is the identifier alone.
        let ident_end = stream.position();
        stream.eat_space();
        let opens_call = stream.check(RuleKind::LParen).is_some();
        stream.back_up(stream.chars_since(ident_end));

        if opens_call {
            state.open_command(CommandRef::resolve(word));
            Some(StyleClass::Keyword)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{CommandRef, Cursor, KeywordTable, Lexer, LexerState, Mode, StyleClass};
    use cmk_util::Symbol;
    use std::sync::Arc;

    #[test]
    fn test_command_with_space_before_paren() {
        let lexer = Lexer::with_builtin();
        let mut state = LexerState::new();
        let mut stream = Cursor::new("endif  ()");
        assert_eq!(lexer.token(&mut stream, &mut state), Ok(Some(StyleClass::Keyword)));
        assert_eq!(stream.current(), "endif");
        assert_eq!(stream.remaining(), "  ()");
        assert_eq!(state.command(), Some(CommandRef::Known(Symbol::intern("endif"))));
        assert_eq!(state.paren_balance(), 0);
    }

    #[test]
    fn test_bare_identifier_is_plain() {
        let lexer = Lexer::with_builtin();
        let mut state = LexerState::new();
        let mut stream = Cursor::new("word next");
        assert_eq!(lexer.token(&mut stream, &mut state), Ok(None));
        assert_eq!(stream.current(), "word");
        assert_eq!(state.command(), None);
    }

    #[test]
    fn test_unknown_command_argument_is_plain() {
        let lexer = Lexer::with_builtin();
        let mut state = LexerState::new();
        state.open_command(CommandRef::Known(Symbol::intern("my_macro")));
        state.open_paren();
        let mut stream = Cursor::new("NOT");
        assert_eq!(lexer.token(&mut stream, &mut state), Ok(None));
    }

    #[test]
    fn test_nested_call_does_not_replace_command() {
        let lexer = Lexer::with_builtin();
        let mut state = LexerState::new();
        let mut stream = Cursor::new("if(inner(x) AND y)");
        let mut classes = Vec::new();
        while !stream.is_at_end() {
            let class = lexer.token(&mut stream, &mut state).unwrap();
            classes.push((stream.current().to_string(), class));
            if stream.current() == "AND" {
                assert_eq!(state.command(), Some(CommandRef::Known(Symbol::intern("if"))));
                assert_eq!(state.paren_balance(), 1);
            }
        }
        assert!(classes.contains(&("AND".to_string(), Some(StyleClass::Keyword))));
        assert!(classes.contains(&("inner".to_string(), None)));
        assert_eq!(state, LexerState::new());
    }

    #[test]
    fn test_unlisted_command_is_not_interned() {
        let lexer = Lexer::with_builtin();
        for i in 0..100 {
            let name = format!("typed_cmd_{}", i);
            let line = format!("{}(NOT x)", name);
            let mut state = LexerState::new();
            let mut stream = Cursor::new(&line);
            assert_eq!(lexer.token(&mut stream, &mut state), Ok(Some(StyleClass::Keyword)));
            assert_eq!(state.command(), Some(CommandRef::Unknown));
            assert_eq!(Symbol::lookup(&name), None);
        }
    }

    #[test]
    fn test_command_resolves_after_merge() {
        let table = Arc::new(KeywordTable::new());
        let lexer = Lexer::new(Arc::clone(&table));
        let mut state = LexerState::new();
        let mut stream = Cursor::new("late_loaded_cmd(FLAG)");
        lexer.token(&mut stream, &mut state).unwrap();
        assert_eq!(state.command(), Some(CommandRef::Unknown));

        table.merge_json(r#"{ "late_loaded_cmd": ["FLAG"] }"#).unwrap();
        let mut state = LexerState::new();
        let mut stream = Cursor::new("late_loaded_cmd(FLAG)");
        lexer.token(&mut stream, &mut state).unwrap();
        assert_eq!(
            state.command(),
            Some(CommandRef::Known(Symbol::intern("late_loaded_cmd")))
        );
        lexer.token(&mut stream, &mut state).unwrap();
        assert_eq!(lexer.token(&mut stream, &mut state), Ok(Some(StyleClass::Keyword)));
        assert_eq!(stream.current(), "FLAG");
    }
}
