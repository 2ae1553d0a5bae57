//! cmkt - command-line front end for the CMake lexer.
//!
//! Parses arguments with clap, sets up logging, loads `cmkt.toml` and
//! dispatches to the subcommand handlers.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    common::KeywordArgs, highlight::HighlightFormat, run_detect, run_highlight, run_tokens,
    DetectArgs, HighlightArgs, TokensArgs,
};
use config::Config;
use error::{CmktError, Result};

/// cmkt - Highlight and inspect CMake sources
#[derive(Parser, Debug)]
#[command(name = "cmkt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Highlight and inspect CMake sources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "CMKT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CMKT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "CMKT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the cmkt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Highlight CMake files
    ///
    /// Writes each file to stdout with ANSI colors, or as HTML with
    /// `--html`. With `--no-color` the text is written unstyled.
    Highlight(HighlightCommand),

    /// Print the tokens of a CMake file
    ///
    /// One token per line as `line:column<TAB>class<TAB>"text"`, or a JSON
    /// array with `--json`.
    Tokens(TokensCommand),

    /// Print the detected language of each path
    Detect(DetectCommand),
}

/// Keyword resource flags shared by lexing subcommands.
#[derive(clap::Args, Debug)]
struct KeywordFlags {
    /// Extra keyword resource (JSON object of command -> keywords)
    #[arg(short, long = "keywords", value_name = "JSON")]
    keywords: Vec<PathBuf>,

    /// Do not load the bundled keyword resource
    #[arg(long)]
    no_bundled: bool,
}

impl From<KeywordFlags> for KeywordArgs {
    fn from(flags: KeywordFlags) -> Self {
        Self {
            extra: flags.keywords,
            no_bundled: flags.no_bundled,
        }
    }
}

/// Arguments for the highlight subcommand.
#[derive(Parser, Debug)]
struct HighlightCommand {
    /// Files to highlight
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Emit HTML instead of ANSI escapes
    #[arg(long)]
    html: bool,

    #[command(flatten)]
    keywords: KeywordFlags,
}

/// Arguments for the tokens subcommand.
#[derive(Parser, Debug)]
struct TokensCommand {
    /// File to tokenize
    file: PathBuf,

    /// Emit JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    keywords: KeywordFlags,
}

/// Arguments for the detect subcommand.
#[derive(Parser, Debug)]
struct DetectCommand {
    /// Paths to classify
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

/// Main entry point for the cmkt CLI.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.no_color, &config)
}

/// Initialize the logging system.
///
/// Logs go to stderr so command output on stdout stays clean. Library
/// crates log through `log`; the subscriber picks those records up too.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CmktError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, no_color: bool, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Highlight(args) => execute_highlight(args, no_color, config),
        Commands::Tokens(args) => execute_tokens(args, config),
        Commands::Detect(args) => run_detect(DetectArgs { paths: args.paths }),
    }
}

/// Execute the highlight command.
fn execute_highlight(args: HighlightCommand, no_color: bool, config: &Config) -> anyhow::Result<()> {
    let format = if args.html {
        HighlightFormat::Html
    } else if no_color {
        HighlightFormat::Plain
    } else {
        HighlightFormat::Ansi
    };
    let highlight_args = HighlightArgs {
        files: args.files,
        format,
        keywords: args.keywords.into(),
    };
    run_highlight(highlight_args, config)
}

/// Execute the tokens command.
fn execute_tokens(args: TokensCommand, config: &Config) -> anyhow::Result<()> {
    let tokens_args = TokensArgs {
        file: args.file,
        json: args.json,
        keywords: args.keywords.into(),
    };
    run_tokens(tokens_args, config)
}
