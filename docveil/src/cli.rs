// docveil/src/cli.rs
//! This file defines the command-line interface (CLI) for the docveil
//! application, including all available commands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "docveil",
    author = "Docveil Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Redact PII from pre-extracted document pages",
    long_about = "Docveil locates personally identifiable information in pre-extracted document text (and optional OCR word boxes), classifies each finding by sensitivity tier, and produces a redacted text plus an image mask plan at the tier you select. OCR and NER run outside this tool; docveil consumes their output.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'docveil' crates to DEBUG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `docveil` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redacts one or more document pages at the requested tier.
    #[command(about = "Redacts one or more document pages at the requested tier.")]
    Redact(RedactCommand),

    /// Scans pages and reports detected PII without redacting.
    #[command(about = "Scans pages and reports detected PII without redacting.")]
    Scan(ScanCommand),
}

/// Arguments for the `redact` command.
#[derive(Parser, Debug)]
pub struct RedactCommand {
    /// Page text files, in page order (reads one page from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// JSON file of OCR word boxes: an array with one token array per page.
    #[arg(long, value_name = "FILE", help = "Per-page OCR token boxes as JSON.")]
    pub tokens: Option<PathBuf>,

    /// Redaction tier: basic, intermediate, or critical. Unrecognized values fall back to basic.
    #[arg(long, short = 't', value_name = "TIER", default_value = "basic")]
    pub tier: String,

    /// Path to a custom YAML pattern library, merged over the defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write redacted text to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the per-page mask-box plan as JSON to this file.
    #[arg(long, value_name = "FILE")]
    pub boxes_out: Option<PathBuf>,

    /// Do not print the findings summary to stderr.
    #[arg(long)]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Page text files, in page order (reads one page from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Path to a custom YAML pattern library, merged over the defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print matched values verbatim instead of sample hashes. Handle with care.
    #[arg(long, help = "Print matched values verbatim instead of sample hashes.")]
    pub show_values: bool,
}
