//! Tokens command implementation.
//!
//! Dumps every token of a file with its position and style class, either
//! one per line or as a JSON array.

use std::io::{self, Write};
use std::path::PathBuf;

use cmk_lang::Document;
use cmk_lex::StyleClass;
use serde::Serialize;

use crate::commands::common::{build_lexer, read_source, report_diagnostics, KeywordArgs};
use crate::config::Config;
use crate::error::CmktError;

/// Arguments for the tokens command.
#[derive(Debug, Clone)]
pub struct TokensArgs {
    /// File to tokenize.
    pub file: PathBuf,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Keyword resource options.
    pub keywords: KeywordArgs,
}

/// One token as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord<'a> {
    /// 1-based line
    pub line: u32,
    /// 1-based column, in characters
    pub column: u32,
    /// Start byte offset within the line
    pub start: usize,
    /// End byte offset within the line
    pub end: usize,
    /// Style class, `null` for plain text
    pub class: Option<StyleClass>,
    /// Token text
    pub text: &'a str,
}

impl TokenRecord<'_> {
    /// `line:column  class  "text"`
    pub fn to_line(&self) -> String {
        let class = self.class.map_or("plain", |c| c.as_str());
        format!("{}:{}\t{}\t{:?}", self.line, self.column, class, self.text)
    }
}

/// Collects records for every token of `document`.
pub fn records(document: &Document) -> Vec<TokenRecord<'_>> {
    document
        .lines()
        .flat_map(|(line, tokens)| {
            tokens.iter().map(move |token| TokenRecord {
                line: token.span.line,
                column: token.span.column,
                start: token.span.start,
                end: token.span.end,
                class: token.class,
                text: token.text(line),
            })
        })
        .collect()
}

/// Tokens command handler.
pub struct TokensCommand<'a> {
    args: TokensArgs,
    config: &'a Config,
}

impl<'a> TokensCommand<'a> {
    /// Create a new TokensCommand.
    pub fn new(args: TokensArgs, config: &'a Config) -> Self {
        Self { args, config }
    }

    /// Execute the command.
    pub fn run(&self) -> anyhow::Result<()> {
        let lexer = build_lexer(&self.config.keywords, &self.args.keywords);
        let source = read_source(&self.args.file)?;
        let document = Document::new(lexer, &source);
        let records = records(&document);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        if self.args.json {
            let json = serde_json::to_string_pretty(&records).map_err(CmktError::Json)?;
            writeln!(out, "{}", json)?;
        } else {
            for record in &records {
                writeln!(out, "{}", record.to_line())?;
            }
        }
        out.flush()?;

        report_diagnostics(&self.args.file, &document);
        Ok(())
    }
}

/// Run the tokens command.
pub fn run_tokens(args: TokensArgs, config: &Config) -> anyhow::Result<()> {
    TokensCommand::new(args, config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmk_lex::Lexer;

    #[test]
    fn test_records_cover_document() {
        let document = Document::new(Lexer::with_builtin(), "if(X)\n# c");
        let records = records(&document);
        let texts: Vec<_> = records.iter().map(|r| r.text).collect();
        assert_eq!(texts, ["if", "(", "X", ")", "# c"]);
        assert_eq!(records[4].line, 2);
        assert_eq!(records[4].class, Some(StyleClass::Comment));
    }

    #[test]
    fn test_record_line_format() {
        let record = TokenRecord {
            line: 3,
            column: 7,
            start: 6,
            end: 10,
            class: None,
            text: "a b",
        };
        assert_eq!(record.to_line(), "3:7\tplain\t\"a b\"");
    }

    #[test]
    fn test_record_json() {
        let record = TokenRecord {
            line: 1,
            column: 1,
            start: 0,
            end: 2,
            class: Some(StyleClass::Keyword),
            text: "if",
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["class"], "keyword");
        assert_eq!(value["text"], "if");
    }
}
