//! Command keyword table.
//!
//! Maps a command name (case as written) to the bare words that count as
//! keywords inside that command's argument list. The table starts with the
//! condition operators shared by `if`, `else`, `elseif` and `endif`, and
//! grows when a JSON resource of the form
//!
//! ```json
//! { "install": ["TARGETS", "DESTINATION"], "set": ["CACHE"] }
//! ```
//!
//! is merged in. Merging unions each command's list with what is already
//! there.
//!
//! Readers never block on a merge: every lookup takes an [`Arc`] snapshot
//! of the current map, and a merge builds a new map and swaps it in whole.
//! Until a merge lands, lookups see whatever was there before (at minimum
//! the built-in condition operators).
//!
//! # Example
//!
//! ```
//! use cmk_lex::KeywordTable;
//! use cmk_util::Symbol;
//!
//! let table = KeywordTable::new();
//! assert!(table.contains(Symbol::intern("if"), "DEFINED"));
//! assert!(!table.contains(Symbol::intern("install"), "TARGETS"));
//!
//! table.merge_json(r#"{ "install": ["TARGETS"] }"#).unwrap();
//! assert!(table.contains(Symbol::intern("install"), "TARGETS"));
//! ```

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use cmk_util::Symbol;
use parking_lot::{Mutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

use crate::error::{KeywordError, KeywordResult};

/// Commands seeded with [`CONDITIONAL_KEYWORDS`].
pub const CONDITIONAL_COMMANDS: [&str; 4] = ["if", "else", "elseif", "endif"];

/// Condition operators recognized inside `if`-family commands.
pub const CONDITIONAL_KEYWORDS: [&str; 22] = [
    "NOT",
    "AND",
    "OR",
    "COMMAND",
    "POLICY",
    "TARGET",
    "EXISTS",
    "IS_NEWER_THAN",
    "IS_DIRECTORY",
    "IS_SYMLINK",
    "IS_ABSOLUTE",
    "MATCHES",
    "LESS",
    "GREATER",
    "EQUAL",
    "STRLESS",
    "STRGREATER",
    "STREQUAL",
    "VERSION_LESS",
    "VERSION_EQUAL",
    "VERSION_GREATER",
    "DEFINED",
];

/// Keyword resource shipped with the crate.
pub const BUNDLED_COMMANDS: &str = include_str!("../resources/commands.json");

/// Command name to accepted keywords.
pub type KeywordMap = FxHashMap<Symbol, FxHashSet<Symbol>>;

/// Where a keyword resource comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeywordSource {
    /// The resource bundled with this crate
    Bundled,
    /// A JSON file on disk
    File(PathBuf),
    /// JSON text held in memory
    Inline(String),
}

impl KeywordSource {
    /// Short description for log messages
    pub fn describe(&self) -> String {
        match self {
            KeywordSource::Bundled => "bundled commands.json".to_string(),
            KeywordSource::File(path) => path.display().to_string(),
            KeywordSource::Inline(_) => "inline keywords".to_string(),
        }
    }

    fn read(&self) -> KeywordResult<String> {
        match self {
            KeywordSource::Bundled => Ok(BUNDLED_COMMANDS.to_string()),
            KeywordSource::File(path) => {
                fs::read_to_string(path).map_err(|source| KeywordError::Io {
                    path: path.clone(),
                    source,
                })
            },
            KeywordSource::Inline(text) => Ok(text.clone()),
        }
    }
}

/// Counts reported by a successful merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Commands named by the resource
    pub commands: usize,
    /// Keywords that were not already present
    pub keywords: usize,
}

/// Swappable command keyword table.
pub struct KeywordTable {
    current: RwLock<Arc<KeywordMap>>,
    /// Serializes merges so concurrent loads cannot drop each other's words.
    merge_lock: Mutex<()>,
}

impl KeywordTable {
    /// Creates a table holding only the built-in condition operators.
    pub fn new() -> Self {
        let mut map = KeywordMap::default();
        let words: FxHashSet<Symbol> = CONDITIONAL_KEYWORDS
            .iter()
            .map(|word| Symbol::intern(word))
            .collect();
        for command in CONDITIONAL_COMMANDS {
            map.insert(Symbol::intern(command), words.clone());
        }
        Self {
            current: RwLock::new(Arc::new(map)),
            merge_lock: Mutex::new(()),
        }
    }

    /// Creates a table and merges the bundled resource synchronously.
    pub fn with_bundled() -> KeywordResult<Self> {
        let table = Self::new();
        table.load(&KeywordSource::Bundled)?;
        Ok(table)
    }

    /// Current mapping.
    #[inline]
    pub fn snapshot(&self) -> Arc<KeywordMap> {
        Arc::clone(&self.current.read())
    }

    /// True iff `command` has an entry containing `word`.
    pub fn contains(&self, command: Symbol, word: &str) -> bool {
        // A word that was never interned cannot be in any set.
        let Some(word) = Symbol::lookup(word) else {
            return false;
        };
        self.snapshot()
            .get(&command)
            .is_some_and(|words| words.contains(&word))
    }

    /// Number of commands with an entry
    pub fn command_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Unions a JSON command table into the current mapping.
    ///
    /// The whole resource is validated before anything is swapped in, so a
    /// malformed resource leaves the table untouched.
    pub fn merge_json(&self, json: &str) -> KeywordResult<MergeStats> {
        let parsed = parse_resource(json)?;

        let _guard = self.merge_lock.lock();
        let mut next = KeywordMap::clone(&self.snapshot());
        let mut stats = MergeStats {
            commands: parsed.len(),
            keywords: 0,
        };
        for (command, words) in parsed {
            let entry = next.entry(Symbol::intern(&command)).or_default();
            for word in words {
                if entry.insert(Symbol::intern(&word)) {
                    stats.keywords += 1;
                }
            }
        }
        *self.current.write() = Arc::new(next);
        Ok(stats)
    }

    /// Reads `source` and merges it.
    pub fn load(&self, source: &KeywordSource) -> KeywordResult<MergeStats> {
        let text = source.read()?;
        self.merge_json(&text)
    }

    /// Loads `source` on a background thread.
    ///
    /// Failures are logged at `warn` and the table keeps its previous
    /// contents. The handle can be joined by callers that need the merge to
    /// have landed.
    pub fn load_in_background(
        self: &Arc<Self>,
        source: KeywordSource,
    ) -> JoinHandle<KeywordResult<MergeStats>> {
        let table = Arc::clone(self);
        thread::spawn(move || {
            let result = table.load(&source);
            match &result {
                Ok(stats) => log::debug!(
                    "merged {} commands ({} new keywords) from {}",
                    stats.commands,
                    stats.keywords,
                    source.describe()
                ),
                Err(err) => log::warn!(
                    "[{}] keyword resource {} skipped: {}",
                    err.code(),
                    source.describe(),
                    err
                ),
            }
            result
        })
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeywordTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordTable")
            .field("commands", &self.command_count())
            .finish()
    }
}

fn parse_resource(json: &str) -> KeywordResult<Vec<(String, Vec<String>)>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(entries) = value else {
        return Err(KeywordError::Shape("expected a JSON object".to_string()));
    };

    let mut parsed = Vec::with_capacity(entries.len());
    for (command, args) in entries {
        let Value::Array(items) = args else {
            return Err(KeywordError::Shape(format!("`{}` is not an array", command)));
        };
        let mut words = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(word) => words.push(word),
                other => {
                    return Err(KeywordError::Shape(format!(
                        "`{}` lists a non-string keyword: {}",
                        command, other
                    )))
                },
            }
        }
        parsed.push((command, words));
    }
    Ok(parsed)
}
