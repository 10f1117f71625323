// docveil/src/commands/scan.rs
//! Scan command implementation: detects PII and reports a per-category
//! summary without producing any redacted artifact.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use owo_colors::OwoColorize;
use std::io;
use std::sync::Arc;

use docveil_core::{DocumentSession, FusionEngine};

use crate::cli::ScanCommand;
use crate::commands::{load_library, read_pages};
use crate::report::render_findings_table;

pub fn run_scan(cmd: &ScanCommand, _quiet: bool) -> Result<()> {
    info!("Starting docveil scan operation.");

    let config = load_library(cmd.config.as_deref())?;
    let engine = Arc::new(FusionEngine::new(config)?);
    let pages = read_pages(&cmd.input)?;

    let mut session = DocumentSession::new(engine);
    for text in &pages {
        session.process_page(text, Vec::new());
    }

    let color = io::stdout().is_terminal();
    if session.findings().is_empty() {
        if color {
            println!("{}", "No PII detected.".green());
        } else {
            println!("No PII detected.");
        }
        return Ok(());
    }

    let table = render_findings_table(session.findings(), None, cmd.show_values, color);
    println!("{table}");

    info!("Docveil scan operation completed.");
    Ok(())
}
