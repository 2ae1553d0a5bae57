//! String interner implementation using DashMap for concurrent access.
//!
//! - Forward map (string → index) is a `DashMap` hashed with `ahash`
//! - Reverse table (index → string) is an append-only vector behind a
//!   `parking_lot::RwLock`, so [`StringTable::get`] is O(1)
//!
//! Interned strings are leaked to obtain `'static` references, so only
//! keyword resources intern. Lexing a document uses [`StringTable::lookup`]
//! and never adds entries.

use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::LazyLock;

use super::Symbol;

/// Global string table instance.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

/// Thread-safe string table.
pub struct StringTable {
    /// Maps interned string to its symbol index
    map: DashMap<&'static str, u32, RandomState>,

    /// Strings by index
    strings: RwLock<Vec<&'static str>>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity_and_hasher(256, RandomState::new()),
            strings: RwLock::new(Vec::with_capacity(256)),
        }
    }

    /// Intern a string, returning its symbol
    ///
    /// If the string is already interned, returns the existing symbol.
    /// Otherwise the string is copied into the table under the shard lock
    /// of its entry, so two threads racing on the same new string observe
    /// the same index.
    pub fn intern(&self, string: &str) -> Symbol {
        if let Some(index) = self.map.get(string) {
            return Symbol { index: *index };
        }

        let interned: &'static str = Box::leak(string.to_owned().into_boxed_str());
        match self.map.entry(interned) {
            Entry::Occupied(entry) => {
                // Lost the race; the leaked copy is a few bytes and never reused.
                Symbol {
                    index: *entry.get(),
                }
            }
            Entry::Vacant(entry) => {
                let mut strings = self.strings.write();
                let index = strings.len() as u32;
                strings.push(interned);
                entry.insert(index);
                Symbol { index }
            }
        }
    }

    /// Look up a string without interning it
    pub fn lookup(&self, string: &str) -> Option<Symbol> {
        self.map.get(string).map(|index| Symbol { index: *index })
    }

    /// Get string by symbol
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.strings.read().get(symbol.index as usize).copied()
    }
}
