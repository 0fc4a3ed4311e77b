//! CLI argument handling.

use clap::Parser;
use confparse_core::parse::ParserConfig;
use std::path::PathBuf;

pub mod output;

/// Lint INI-style configuration files.
///
/// Parses each file permissively and reports every malformed line in
/// one pass, so damaged files can be fixed in a single edit.
#[derive(Debug, Parser)]
#[command(name = "confparse", version, about)]
pub struct Args {
    /// Configuration files to check.
    #[arg(required = true, value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// Treat duplicate sections and options as fatal instead of
    /// merging or keeping the first value.
    #[arg(long)]
    pub strict: bool,

    /// Emit machine-readable JSON instead of human output.
    #[arg(long)]
    pub json: bool,

    /// Include the parsed document in JSON output.
    #[arg(long, requires = "json")]
    pub dump: bool,

    /// Print per-file section and option counts.
    #[arg(long)]
    pub summary: bool,

    /// Key/value delimiter to accept (repeatable; default '=' and ':').
    #[arg(long = "delimiter", value_name = "STRING")]
    pub delimiters: Vec<String>,

    /// Full-line comment prefix (repeatable; default '#' and ';').
    #[arg(long = "comment-prefix", value_name = "STRING")]
    pub comment_prefixes: Vec<String>,

    /// Inline comment prefix, honored only when whitespace-adjacent
    /// (repeatable; default '#' and ';').
    #[arg(long = "inline-comment-prefix", value_name = "STRING")]
    pub inline_comment_prefixes: Vec<String>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the parser configuration from command-line overrides.
    pub fn parser_config(&self) -> ParserConfig {
        let mut config = if self.strict {
            ParserConfig::strict()
        } else {
            ParserConfig::lenient()
        };
        if !self.delimiters.is_empty() {
            config = config.with_delimiters(self.delimiters.clone());
        }
        if !self.comment_prefixes.is_empty() {
            config = config.with_comment_prefixes(self.comment_prefixes.clone());
        }
        if !self.inline_comment_prefixes.is_empty() {
            config = config.with_inline_comment_prefixes(self.inline_comment_prefixes.clone());
        }
        config
    }
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// All files parsed cleanly.
    Ok = 0,
    /// Syntax problems or strict-mode failures were reported.
    Findings = 1,
    /// The tool could not start (unreadable file, bad flags).
    StartupFailure = 2,
}

impl From<ExitCode> for u8 {
    fn from(code: ExitCode) -> Self {
        code as u8
    }
}
