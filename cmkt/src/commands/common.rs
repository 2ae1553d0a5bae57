//! Shared helpers for cmkt commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use cmk_lang::Document;
use cmk_lex::{KeywordSource, KeywordTable, Lexer};
use tracing::{debug, warn};

use crate::config::KeywordsConfig;

/// Keyword options shared by commands that lex.
#[derive(Debug, Clone, Default)]
pub struct KeywordArgs {
    /// Extra keyword resources from the command line.
    pub extra: Vec<PathBuf>,
    /// Skip the bundled resource even if the configuration enables it.
    pub no_bundled: bool,
}

/// Resources to merge, in merge order.
pub fn keyword_sources(config: &KeywordsConfig, args: &KeywordArgs) -> Vec<KeywordSource> {
    let mut sources = Vec::new();
    if config.bundled && !args.no_bundled {
        sources.push(KeywordSource::Bundled);
    }
    sources.extend(
        config
            .extra
            .iter()
            .chain(&args.extra)
            .cloned()
            .map(KeywordSource::File),
    );
    sources
}

/// Builds a lexer and waits for its keyword resources to load.
///
/// Resources load concurrently. A resource that fails to load is logged by
/// the loader and skipped; the lexer still works with whatever did load.
pub fn build_lexer(config: &KeywordsConfig, args: &KeywordArgs) -> Lexer {
    let table = Arc::new(KeywordTable::new());
    let handles: Vec<_> = keyword_sources(config, args)
        .into_iter()
        .map(|source| (source.describe(), table.load_in_background(source)))
        .collect();

    for (name, handle) in handles {
        match handle.join() {
            Ok(Ok(_)) => {},
            Ok(Err(_)) => debug!("continuing without {}", name),
            Err(_) => warn!("keyword loader for {} panicked", name),
        }
    }

    debug!("keyword table has {} commands", table.command_count());
    Lexer::new(table)
}

/// Reads a source file.
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Logs every diagnostic a document produced.
pub fn report_diagnostics(path: &Path, document: &Document) {
    for diag in document.diagnostics() {
        warn!("{}: {}", path.display(), diag.render());
    }
}
