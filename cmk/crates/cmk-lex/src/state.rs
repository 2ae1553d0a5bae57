//! Persisted lexer state.
//!
//! A [`LexerState`] is created once per document and threaded through every
//! line. It records which nested construct (if any) is open at the end of a
//! line and which command invocation is in progress, so the next line can
//! pick up where the previous one stopped.
//!
//! State changes happen only through the transition methods below; the
//! lexer never pokes fields directly.

use cmk_util::Symbol;

/// Nested lexical context.
///
/// The three nested modes are mutually exclusive, which the enum enforces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Context {
    /// Not inside any nested construct
    #[default]
    Normal,
    /// Inside a double-quoted string
    String,
    /// Inside a `[=*[ ... ]=*]` bracket argument
    BracketString {
        /// Number of `=` in the opening delimiter
        equals: usize,
    },
    /// Inside a `#[=*[ ... ]=*]` bracket comment
    BracketComment {
        /// Number of `=` in the opening delimiter
        equals: usize,
    },
}

/// The command whose argument list is open.
///
/// Only names the keyword table has interned resolve to a [`Symbol`]. Any
/// other name cannot have keywords, so it is recorded without interning it.
///
/// ```
/// use cmk_lex::{CommandRef, KeywordTable};
/// use cmk_util::Symbol;
///
/// let _table = KeywordTable::new();
/// assert_eq!(CommandRef::resolve("if"), CommandRef::Known(Symbol::intern("if")));
/// assert_eq!(CommandRef::resolve("never_interned_cmd"), CommandRef::Unknown);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandRef {
    /// A name already present in the interner
    Known(Symbol),
    /// A name with no keyword entry
    Unknown,
}

impl CommandRef {
    /// Looks `name` up without interning it.
    pub fn resolve(name: &str) -> Self {
        Symbol::lookup(name).map_or(CommandRef::Unknown, CommandRef::Known)
    }

    /// The interned name, if there is one
    #[inline]
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            CommandRef::Known(symbol) => Some(*symbol),
            CommandRef::Unknown => None,
        }
    }
}

/// State carried between token calls and between lines.
///
/// `Copy` so hosts can store one per line cheaply.
///
/// ```
/// use cmk_lex::LexerState;
///
/// let state = LexerState::new();
/// assert!(state.is_normal());
/// assert_eq!(state.command(), None);
/// assert_eq!(state.paren_balance(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LexerState {
    context: Context,
    command: Option<CommandRef>,
    paren_balance: u32,
}

impl LexerState {
    /// Initial state: normal mode, no open command, zero balance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nested context
    #[inline]
    pub fn context(&self) -> Context {
        self.context
    }

    /// True when no nested construct is open
    #[inline]
    pub fn is_normal(&self) -> bool {
        self.context == Context::Normal
    }

    /// Inside a double-quoted string
    #[inline]
    pub fn in_string(&self) -> bool {
        self.context == Context::String
    }

    /// Inside a bracket argument
    #[inline]
    pub fn in_bracket_string(&self) -> bool {
        matches!(self.context, Context::BracketString { .. })
    }

    /// Inside a bracket comment
    #[inline]
    pub fn in_bracket_comment(&self) -> bool {
        matches!(self.context, Context::BracketComment { .. })
    }

    /// Number of `=` in the open bracket delimiter, 0 outside bracket modes
    #[inline]
    pub fn bracket_length(&self) -> usize {
        match self.context {
            Context::BracketString { equals } | Context::BracketComment { equals } => equals,
            Context::Normal | Context::String => 0,
        }
    }

    /// The command whose argument list is open
    #[inline]
    pub fn command(&self) -> Option<CommandRef> {
        self.command
    }

    /// Paren depth inside the open command invocation
    #[inline]
    pub fn paren_balance(&self) -> u32 {
        self.paren_balance
    }

    /// Opening `"` seen.
    pub fn enter_string(&mut self) {
        self.context = Context::String;
    }

    /// Opening `[=*[` seen outside a comment.
    pub fn enter_bracket_string(&mut self, equals: usize) {
        self.context = Context::BracketString { equals };
    }

    /// Opening `#[=*[` seen.
    pub fn enter_bracket_comment(&mut self, equals: usize) {
        self.context = Context::BracketComment { equals };
    }

    /// Closing delimiter of the open nested construct seen.
    pub fn leave_nested(&mut self) {
        self.context = Context::Normal;
    }

    /// Identifier followed by `(` with no command open.
    pub fn open_command(&mut self, command: CommandRef) {
        self.command = Some(command);
    }

    /// `(` seen in normal mode.
    pub fn open_paren(&mut self) {
        self.paren_balance += 1;
    }

    /// `)` seen in normal mode; closes the command when balance returns to 0.
    ///
    /// A stray `)` at balance 0 leaves the balance at 0.
    pub fn close_paren(&mut self) {
        self.paren_balance = self.paren_balance.saturating_sub(1);
        if self.paren_balance == 0 {
            self.command = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_modes_are_exclusive() {
        let mut state = LexerState::new();
        state.enter_string();
        assert!(state.in_string());
        state.enter_bracket_comment(2);
        assert!(!state.in_string());
        assert!(state.in_bracket_comment());
        assert!(!state.in_bracket_string());
        assert_eq!(state.bracket_length(), 2);
        state.leave_nested();
        assert!(state.is_normal());
        assert_eq!(state.bracket_length(), 0);
    }

    #[test]
    fn test_command_closes_at_zero_balance() {
        let mut state = LexerState::new();
        let command = CommandRef::Known(Symbol::intern("if"));
        state.open_command(command);
        state.open_paren();
        state.open_paren();
        state.close_paren();
        assert_eq!(state.command(), Some(command));
        assert_eq!(state.paren_balance(), 1);
        state.close_paren();
        assert_eq!(state.command(), None);
        assert_eq!(state.paren_balance(), 0);
    }

    #[test]
    fn test_stray_close_paren_saturates() {
        let mut state = LexerState::new();
        state.close_paren();
        assert_eq!(state.paren_balance(), 0);
        assert_eq!(state, LexerState::new());
    }

    #[test]
    fn test_unknown_command_still_closes() {
        let mut state = LexerState::new();
        state.open_command(CommandRef::Unknown);
        state.open_paren();
        assert_eq!(state.command(), Some(CommandRef::Unknown));
        assert_eq!(CommandRef::Unknown.symbol(), None);
        state.close_paren();
        assert_eq!(state, LexerState::new());
    }

    #[test]
    fn test_bracket_string_length() {
        let mut state = LexerState::new();
        state.enter_bracket_string(0);
        assert!(state.in_bracket_string());
        assert_eq!(state.context(), Context::BracketString { equals: 0 });
    }
}
