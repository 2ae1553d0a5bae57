//! Language definitions and path-based detection.
//!
//! A [`Language`] describes how a host recognizes files of one language and
//! which line comment marker it uses. The [`LanguageRegistry`] picks a
//! language for a path: an exact file name match wins, otherwise the
//! longest matching extension does, so `config.cmake.in` resolves through
//! `cmake.in` rather than `in`.
//!
//! ```
//! use cmk_lang::LanguageRegistry;
//! use std::path::Path;
//!
//! let registry = LanguageRegistry::with_defaults();
//! let lang = registry.for_path(Path::new("src/CMakeLists.txt")).unwrap();
//! assert_eq!(lang.id, "cmake");
//! assert_eq!(lang.mime, "text/x-cmake");
//! assert!(registry.for_path(Path::new("main.rs")).is_none());
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{LangError, LangResult};

/// A language known to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Language {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// MIME type
    pub mime: String,
    /// Extensions without the leading dot, possibly multi-part (`cmake.in`)
    pub file_extensions: Vec<String>,
    /// Exact file names
    pub file_names: Vec<String>,
    /// Line comment marker
    pub line_comment: Option<String>,
}

impl Language {
    /// The CMake language.
    pub fn cmake() -> Self {
        Self {
            id: "cmake".to_string(),
            name: "CMake".to_string(),
            mime: "text/x-cmake".to_string(),
            file_extensions: vec!["cmake".to_string(), "cmake.in".to_string()],
            file_names: vec!["CMakeLists.txt".to_string()],
            line_comment: Some("#".to_string()),
        }
    }

    /// True if `file_name` is one of the exact file names.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        self.file_names.iter().any(|name| name == file_name)
    }

    /// Length of the longest extension `file_name` ends with.
    ///
    /// Extensions compare case-insensitively and must follow a `.` that is
    /// not the first character of the name.
    pub fn extension_match(&self, file_name: &str) -> Option<usize> {
        let lower = file_name.to_ascii_lowercase();
        self.file_extensions
            .iter()
            .filter(|ext| {
                let ext = ext.to_ascii_lowercase();
                lower.len() > ext.len() + 1
                    && lower.ends_with(&ext)
                    && lower.as_bytes()[lower.len() - ext.len() - 1] == b'.'
            })
            .map(String::len)
            .max()
    }

    /// Adds or removes the line comment marker, keeping indentation.
    ///
    /// Blank lines and languages without a marker are returned unchanged.
    ///
    /// ```
    /// use cmk_lang::Language;
    ///
    /// let cmake = Language::cmake();
    /// assert_eq!(cmake.toggle_line_comment("  set(X 1)"), "  # set(X 1)");
    /// assert_eq!(cmake.toggle_line_comment("  # set(X 1)"), "  set(X 1)");
    /// assert_eq!(cmake.toggle_line_comment("#set(X 1)"), "set(X 1)");
    /// ```
    pub fn toggle_line_comment(&self, line: &str) -> String {
        let Some(marker) = self.line_comment.as_deref() else {
            return line.to_string();
        };
        let body = line.trim_start();
        if body.is_empty() {
            return line.to_string();
        }
        let indent = &line[..line.len() - body.len()];

        match body.strip_prefix(marker) {
            Some(rest) => {
                let rest = rest.strip_prefix(' ').unwrap_or(rest);
                format!("{}{}", indent, rest)
            },
            None => format!("{}{} {}", indent, marker, body),
        }
    }
}

/// Registered languages, searched in registration order.
#[derive(Clone, Debug, Default)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
    by_id: FxHashMap<String, usize>,
}

impl LanguageRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in languages.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.languages.push(Language::cmake());
        registry.by_id.insert("cmake".to_string(), 0);
        registry
    }

    /// Registers `language`, rejecting duplicate ids.
    pub fn register(&mut self, language: Language) -> LangResult<()> {
        if self.by_id.contains_key(&language.id) {
            return Err(LangError::DuplicateLanguage(language.id));
        }
        log::debug!("registered language {}", language.id);
        self.by_id.insert(language.id.clone(), self.languages.len());
        self.languages.push(language);
        Ok(())
    }

    /// Picks the language for `path`, if any.
    pub fn for_path(&self, path: &Path) -> Option<&Language> {
        let file_name = path.file_name()?.to_str()?;

        if let Some(lang) = self.languages.iter().find(|l| l.matches_file_name(file_name)) {
            return Some(lang);
        }

        let mut best: Option<(&Language, usize)> = None;
        for lang in &self.languages {
            if let Some(len) = lang.extension_match(file_name) {
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((lang, len));
                }
            }
        }
        best.map(|(lang, _)| lang)
    }

    /// Number of registered languages
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
