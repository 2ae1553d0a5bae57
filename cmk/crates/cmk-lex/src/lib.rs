//! cmk-lex - Streaming Incremental Lexer for CMake
//!
//! This crate classifies the characters of CMake source text for syntax
//! highlighting. It works one line at a time: the host calls
//! [`Mode::token`] repeatedly on a line, each call consuming one token and
//! returning its [`StyleClass`], and keeps the [`LexerState`] for the next
//! line. Strings, bracket arguments and bracket comments may span lines;
//! the state records which one is open.
//!
//! # Example Usage
//!
//! ```
//! use cmk_lex::{tokenize_line, Lexer, Mode, StyleClass};
//! use cmk_util::Handler;
//!
//! let lexer = Lexer::with_builtin();
//! let handler = Handler::new();
//! let mut state = lexer.start_state();
//!
//! let first = tokenize_line(&lexer, "message(\"multi", 1, &mut state, &handler);
//! assert!(state.in_string());
//!
//! let second = tokenize_line(&lexer, "line\")", 2, &mut state, &handler);
//! assert_eq!(second[0].class, Some(StyleClass::String));
//! assert!(state.is_normal());
//! assert_eq!(state.command(), None);
//! # let _ = first;
//! ```
//!
//! # Module Structure
//!
//! - [`cursor`] - Line cursor with anchored match, look-ahead and back-up
//! - [`rule`] - The lexical rules and their priority order
//! - [`state`] - Persisted lexer state and its transitions
//! - [`keywords`] - Command keyword table with background loading
//! - [`mode`] - The host-facing highlighting contract
//! - [`lexer`] - The CMake [`Mode`] implementation
//! - [`line`] - Whole-line driver with recovery
//!
//! # Style Classes
//!
//! | Class | Produced by |
//! |-------|-------------|
//! | `comment` | `# ...`, `#[[ ... ]]` |
//! | `string` | `"..."`, `[[ ... ]]` |
//! | `keyword` | command names, keywords of the open command |
//! | `variable` | `${...}`, `$ENV{...}` |
//! | plain (`None`) | everything else |

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod line;
pub mod mode;
pub mod rule;
pub mod state;
pub mod token;

mod edge_cases;

pub use cursor::Cursor;
pub use cursor::Cursor as LineStream;
pub use error::{KeywordError, KeywordResult, LexError, LexResult};
pub use keywords::{KeywordMap, KeywordSource, KeywordTable, MergeStats};
pub use lexer::Lexer;
pub use line::tokenize_line;
pub use mode::Mode;
pub use rule::{RuleKind, RuleMatch};
pub use state::{CommandRef, Context, LexerState};
pub use token::{StyleClass, Token};
