//! Whole-line driver.
//!
//! [`tokenize_line`] runs a [`Mode`] over one line and collects the tokens
//! with their spans. It guarantees the line is consumed completely: when
//! the mode cannot make progress the driver reports a diagnostic and
//! consumes a single character as plain text.

use cmk_util::{Diagnostic, DiagnosticCode, Handler, Span};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::mode::Mode;
use crate::token::Token;

/// Tokenizes `line` starting from `state`, leaving the end-of-line state in
/// `state`.
///
/// `line_number` is 1-based and is copied into every token span.
///
/// # Example
///
/// ```
/// use cmk_lex::{tokenize_line, Lexer, Mode, StyleClass};
/// use cmk_util::Handler;
///
/// let lexer = Lexer::with_builtin();
/// let handler = Handler::new();
/// let mut state = lexer.start_state();
///
/// let tokens = tokenize_line(&lexer, "if(${X})", 1, &mut state, &handler);
/// let classes: Vec<_> = tokens.iter().map(|t| t.class).collect();
/// assert_eq!(
///     classes,
///     [Some(StyleClass::Keyword), None, Some(StyleClass::Variable), None]
/// );
/// assert!(!handler.has_errors());
/// ```
pub fn tokenize_line<M: Mode>(
    mode: &M,
    line: &str,
    line_number: u32,
    state: &mut M::State,
    handler: &Handler,
) -> Vec<Token> {
    let mut stream = Cursor::new(line);
    let mut tokens = Vec::new();
    let mut column: u32 = 1;

    while !stream.is_at_end() {
        let start = stream.position();
        let class = match mode.token(&mut stream, state) {
            Ok(class) if stream.position() > start => class,
            Ok(_) => {
                let err = LexError::NoProgress {
                    position: start,
                    found: stream.peek().unwrap_or_default(),
                };
                recover(&mut stream, start, handler, err, line_number, column);
                None
            },
            Err(LexError::EndOfLine { .. }) => break,
            Err(err) => {
                recover(&mut stream, start, handler, err, line_number, column);
                None
            },
        };

        let span = Span::new(start, stream.position(), line_number, column);
        column += stream.chars_since(start) as u32;
        tokens.push(Token::new(class, span));
    }

    tokens
}

/// Reports a stuck cursor and steps over one character.
fn recover(
    stream: &mut Cursor<'_>,
    start: usize,
    handler: &Handler,
    err: LexError,
    line: u32,
    column: u32,
) {
    if stream.position() == start {
        stream.next();
    }

    log::debug!("{} (line {}, column {})", err, line, column);
    Diagnostic::error(err.to_string(), Span::new(start, stream.position(), line, column))
        .with_code(DiagnosticCode::NO_PROGRESS)
        .with_note("the character is treated as plain text")
        .emit(handler);
}
