//! Host-facing highlighting contract.

use std::fmt::Debug;

use crate::cursor::Cursor;
use crate::error::LexResult;
use crate::token::StyleClass;

/// A line-oriented highlighting mode.
///
/// The host creates one state per document with [`Mode::start_state`],
/// then for each line calls [`Mode::token`] until the line is exhausted,
/// keeping the state for the next line. Every successful call consumes at
/// least one character.
pub trait Mode {
    /// State persisted between token calls and lines.
    type State: Clone + PartialEq + Debug;

    /// Mode name as registered with the host.
    fn name(&self) -> &'static str;

    /// State at the start of a document.
    fn start_state(&self) -> Self::State;

    /// Classifies and consumes one token.
    ///
    /// Returns `Ok(None)` for plain text.
    fn token(&self, stream: &mut Cursor<'_>, state: &mut Self::State)
        -> LexResult<Option<StyleClass>>;

    /// Line comment marker, if the language has one.
    fn line_comment(&self) -> Option<&'static str> {
        None
    }
}
