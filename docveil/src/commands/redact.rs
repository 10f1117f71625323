// docveil/src/commands/redact.rs
//! Redact command implementation: runs the full pipeline over the given
//! pages and emits the redacted text, the mask-box plan, and a findings
//! summary.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::sync::Arc;

use docveil_core::{
    DocumentSession, FusionEngine, RedactionScope, SeverityTier,
};

use crate::cli::RedactCommand;
use crate::commands::{load_library, load_tokens, read_pages};
use crate::report::render_findings_table;

pub fn run_redact(cmd: &RedactCommand, quiet: bool) -> Result<()> {
    info!("Starting docveil redact operation.");

    let config = load_library(cmd.config.as_deref())?;
    // NER runs as an external service; the CLI builds the engine without an
    // entity capability.
    let engine = Arc::new(FusionEngine::new(config)?);

    let pages = read_pages(&cmd.input)?;
    let tokens = load_tokens(cmd.tokens.as_deref(), pages.len())?;
    let tier = SeverityTier::from_request(&cmd.tier);

    let mut session = DocumentSession::new(engine);
    for (text, page_tokens) in pages.iter().zip(tokens) {
        session.process_page(text, page_tokens);
    }
    debug!(
        "Processed {} page(s); {} categor(ies) detected.",
        session.page_count(),
        session.findings().len()
    );

    let findings = session.findings().clone();
    let scope = RedactionScope::select(&findings, tier);
    let plan = session.finalize(tier);

    match &cmd.output {
        Some(path) => {
            info!("Writing redacted text to file: {}", path.display());
            std::fs::write(path, &plan.redacted_text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(plan.redacted_text.as_bytes())?;
            if !plan.redacted_text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }

    if let Some(path) = &cmd.boxes_out {
        info!("Writing mask-box plan to file: {}", path.display());
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create box-plan file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &plan.page_boxes)
            .context("Failed to serialize mask-box plan")?;
    }

    if !cmd.no_summary && !quiet && !findings.is_empty() {
        let color = io::stderr().is_terminal();
        let table = render_findings_table(&findings, Some(&scope), false, color);
        eprintln!("{table}");
    }

    info!("Docveil redact operation completed.");
    Ok(())
}
