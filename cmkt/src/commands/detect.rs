//! Detect command implementation.
//!
//! Prints the language id the registry picks for each path, or `-`.
//! Only the path is inspected; the files need not exist.

use std::io::{self, Write};
use std::path::PathBuf;

use cmk_lang::LanguageRegistry;

/// Arguments for the detect command.
#[derive(Debug, Clone, Default)]
pub struct DetectArgs {
    /// Paths to classify.
    pub paths: Vec<PathBuf>,
}

/// `path<TAB>id` for each path.
pub fn detect_lines(registry: &LanguageRegistry, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            let id = registry.for_path(path).map_or("-", |lang| lang.id.as_str());
            format!("{}\t{}", path.display(), id)
        })
        .collect()
}

/// Run the detect command.
pub fn run_detect(args: DetectArgs) -> anyhow::Result<()> {
    let registry = LanguageRegistry::with_defaults();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in detect_lines(&registry, &args.paths) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
