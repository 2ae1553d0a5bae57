//! Highlight command implementation.
//!
//! Lexes each input file and writes it back out with ANSI colors, as an
//! HTML `<pre>` block, or unstyled when color is disabled.

use std::io::{self, Write};
use std::path::PathBuf;

use cmk_lang::{render_ansi, render_html, render_plain, Document, LanguageRegistry};
use tracing::debug;

use crate::commands::common::{build_lexer, read_source, report_diagnostics, KeywordArgs};
use crate::config::Config;

/// Output flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightFormat {
    /// ANSI escapes
    Ansi,
    /// HTML fragment
    Html,
    /// Text as-is
    Plain,
}

/// Arguments for the highlight command.
#[derive(Debug, Clone)]
pub struct HighlightArgs {
    /// Files to highlight.
    pub files: Vec<PathBuf>,
    /// Output flavor.
    pub format: HighlightFormat,
    /// Keyword resource options.
    pub keywords: KeywordArgs,
}

/// Highlight command handler.
pub struct HighlightCommand<'a> {
    args: HighlightArgs,
    config: &'a Config,
}

impl<'a> HighlightCommand<'a> {
    /// Create a new HighlightCommand.
    pub fn new(args: HighlightArgs, config: &'a Config) -> Self {
        Self { args, config }
    }

    /// Execute the command.
    pub fn run(&self) -> anyhow::Result<()> {
        let theme = self.config.theme.to_theme()?;
        let lexer = build_lexer(&self.config.keywords, &self.args.keywords);
        let registry = LanguageRegistry::with_defaults();
        let many = self.args.files.len() > 1;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for path in &self.args.files {
            if registry.for_path(path).is_none() {
                debug!("{} does not look like a CMake file", path.display());
            }

            let source = read_source(path)?;
            let document = Document::new(lexer.clone(), &source);
            let rendered = match self.args.format {
                HighlightFormat::Ansi => render_ansi(&document, &theme),
                HighlightFormat::Html => render_html(&document),
                HighlightFormat::Plain => render_plain(&document),
            };

            if many {
                writeln!(out, "==> {} <==", path.display())?;
            }
            out.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(out)?;
            }
            report_diagnostics(path, &document);
        }

        out.flush()?;
        Ok(())
    }
}

/// Run the highlight command.
pub fn run_highlight(args: HighlightArgs, config: &Config) -> anyhow::Result<()> {
    HighlightCommand::new(args, config).run()
}
