//! Command modules for the cmkt CLI.
//!
//! Each subcommand lives in its own file: an `*Args` struct filled in by
//! `main`, a command struct holding the args and configuration, and a
//! `run_*` entry point.

pub mod common;

pub mod detect;
pub mod highlight;
pub mod tokens;

pub use detect::{run_detect, DetectArgs};
pub use highlight::{run_highlight, HighlightArgs};
pub use tokens::{run_tokens, TokensArgs};
