//! cmk-lang - Host-Side Glue for the CMake Lexer
//!
//! Everything an editor-like host needs around [`cmk_lex`]:
//!
//! - [`language`] - language definitions, path detection and line comment
//!   toggling
//! - [`document`] - per-document sessions that store the lexer state at the
//!   start of each line and relex incrementally after edits
//! - [`render`] - ANSI and HTML output of a lexed document
//!
//! ```
//! use cmk_lang::{render_plain, Document, LanguageRegistry};
//! use cmk_lex::Lexer;
//! use std::path::Path;
//!
//! let registry = LanguageRegistry::with_defaults();
//! assert!(registry.for_path(Path::new("CMakeLists.txt")).is_some());
//!
//! let doc = Document::new(Lexer::with_builtin(), "project(demo)\n");
//! assert_eq!(render_plain(&doc), "project(demo)\n");
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod language;
pub mod render;

pub use document::Document;
pub use error::{LangError, LangResult};
pub use language::{Language, LanguageRegistry};
pub use render::{escape_html, render_ansi, render_html, render_plain, Theme};
