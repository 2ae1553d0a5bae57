//! Core lexer implementation.
//!
//! This module contains the main Lexer struct and the per-token dispatch.

use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::keywords::KeywordTable;
use crate::mode::Mode;
use crate::rule::{RuleKind, RuleMatch};
use crate::state::{Context, LexerState};
use crate::token::StyleClass;

/// Highlighting mode for CMake.
///
/// The lexer itself holds no per-document data; everything that must survive
/// between calls lives in the [`LexerState`] the host passes in. One lexer
/// can therefore serve any number of documents.
///
/// # Example
///
/// ```
/// use cmk_lex::{CommandRef, Cursor, Lexer, Mode, StyleClass};
/// use cmk_util::Symbol;
///
/// let lexer = Lexer::with_builtin();
/// let mut state = lexer.start_state();
/// let mut stream = Cursor::new("if(NOT X)");
///
/// assert_eq!(lexer.token(&mut stream, &mut state), Ok(Some(StyleClass::Keyword)));
/// assert_eq!(stream.current(), "if");
/// assert_eq!(state.command(), Some(CommandRef::Known(Symbol::intern("if"))));
/// ```
#[derive(Clone, Debug)]
pub struct Lexer {
    /// Command keyword table, possibly still loading.
    pub(super) keywords: Arc<KeywordTable>,
}

impl Lexer {
    /// Creates a lexer that consults `keywords`.
    pub fn new(keywords: Arc<KeywordTable>) -> Self {
        Self { keywords }
    }

    /// Creates a lexer that knows only the built-in condition operators.
    pub fn with_builtin() -> Self {
        Self::new(Arc::new(KeywordTable::new()))
    }

    /// The keyword table this lexer consults.
    pub fn keywords(&self) -> &Arc<KeywordTable> {
        &self.keywords
    }

    /// Tries each rule in priority order and applies the first match.
    fn lex_normal(
        &self,
        stream: &mut Cursor<'_>,
        state: &mut LexerState,
        found: char,
    ) -> LexResult<Option<StyleClass>> {
        for rule in RuleKind::PRIORITY {
            if let Some(matched) = stream.eat(rule) {
                return Ok(self.apply(rule, matched, stream, state));
            }
        }
        Err(LexError::NoProgress {
            position: stream.position(),
            found,
        })
    }

    /// Runs the handler for `rule`, which has just consumed `matched`.
    fn apply(
        &self,
        rule: RuleKind,
        matched: RuleMatch,
        stream: &mut Cursor<'_>,
        state: &mut LexerState,
    ) -> Option<StyleClass> {
        match rule {
            RuleKind::Comment => self.lex_comment(stream, state),
            RuleKind::Quote => {
                state.enter_string();
                Some(StyleClass::String)
            },
            RuleKind::OBracket => {
                state.enter_bracket_string(matched.equals);
                Some(StyleClass::String)
            },
            RuleKind::LParen => {
                state.open_paren();
                None
            },
            RuleKind::RParen => {
                state.close_paren();
                None
            },
            RuleKind::Ident => self.lex_identifier(stream, state),
            RuleKind::VarRef => Some(StyleClass::Variable),
            RuleKind::CBracket | RuleKind::Space | RuleKind::Argument => None,
        }
    }
}

impl Mode for Lexer {
    type State = LexerState;

    fn name(&self) -> &'static str {
        "cmake"
    }

    fn start_state(&self) -> LexerState {
        LexerState::new()
    }

    fn token(
        &self,
        stream: &mut Cursor<'_>,
        state: &mut LexerState,
    ) -> LexResult<Option<StyleClass>> {
        stream.start_token();
        let Some(found) = stream.peek() else {
            return Err(LexError::EndOfLine {
                position: stream.position(),
            });
        };

        match state.context() {
            Context::Normal => self.lex_normal(stream, state, found),
            Context::String => Ok(Some(self.lex_string_body(stream, state))),
            Context::BracketString { equals } => {
                self.lex_bracket_body(stream, state, equals);
                Ok(Some(StyleClass::String))
            },
            Context::BracketComment { equals } => {
                self.lex_bracket_body(stream, state, equals);
                Ok(Some(StyleClass::Comment))
            },
        }
    }

    fn line_comment(&self) -> Option<&'static str> {
        Some("#")
    }
}
