// docveil/src/main.rs
//! Docveil CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to the selected
//! command.

use anyhow::Result;
use clap::Parser;

use docveil::cli::{Cli, Commands};
use docveil::commands;
use docveil::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else {
        logger::init_logger(None);
    }

    match &args.command {
        Commands::Redact(cmd) => commands::redact::run_redact(cmd, args.quiet),
        Commands::Scan(cmd) => commands::scan::run_scan(cmd, args.quiet),
    }
}
