//! Lexer module.
//!
//! This module organizes the lexer implementation into smaller, focused components:
//! - `core` - Main Lexer struct, the `Mode` implementation and rule dispatch
//! - `identifier` - Command names and command keywords
//! - `string` - Quoted strings and bracket arguments
//! - `comment` - Line and bracket comments

mod comment;
mod core;
mod identifier;
mod string;

pub use self::core::Lexer;
