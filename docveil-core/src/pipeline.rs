// docveil-core/src/pipeline.rs

//! `pipeline.rs`
//! Convenience wrappers tying the engine, aggregator, and planner together.
//!
//! A [`DocumentSession`] is the per-document processing handle: the caller
//! owns one per in-flight document, feeds it pages, and finalizes it into a
//! [`RedactionPlan`]. There is no process-wide "is processing" state of any
//! kind - dropping the session abandons the document.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::aggregation::DocumentFindings;
use crate::config::{PatternConfig, SeverityTier};
use crate::engine::{DetectorCapabilities, FusionEngine};
use crate::findings::PageFindings;
use crate::geometry::SpatialToken;
use crate::planner::{self, RedactionPlan};

/// Pre-extracted inputs for one page: the OCR text and the OCR word boxes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInput {
    pub text: String,
    pub tokens: Vec<SpatialToken>,
}

/// Accumulates one document's pages, findings, and geometry.
///
/// Page fusion itself is thread-safe (the engine is shared and immutable);
/// the session is the single serialization point where page results are
/// merged, so concurrent page workers should fuse independently and absorb
/// into the session from one place - or fold with [`crate::aggregation::merge`]
/// and build the session afterwards.
#[derive(Debug)]
pub struct DocumentSession {
    id: Uuid,
    created_at: String,
    engine: Arc<FusionEngine>,
    findings: DocumentFindings,
    pages: Vec<Vec<SpatialToken>>,
    text: String,
}

impl DocumentSession {
    pub fn new(engine: Arc<FusionEngine>) -> Self {
        let id = Uuid::new_v4();
        debug!("Opened document session {}.", id);
        Self {
            id,
            created_at: Utc::now().to_rfc3339(),
            engine,
            findings: DocumentFindings::new(),
            pages: Vec::new(),
            text: String::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Fuses one page and merges its findings into the document set.
    ///
    /// Returns the page-level result so the transport layer can stream
    /// per-page findings if it wants to. Re-submitting an identical page is
    /// idempotent with respect to the document finding set.
    pub fn process_page(&mut self, text: &str, tokens: Vec<SpatialToken>) -> PageFindings {
        let page = self.engine.fuse(text);
        self.findings.absorb(page.clone());
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(text);
        self.pages.push(tokens);
        page
    }

    /// Records a page whose extraction failed entirely.
    ///
    /// The page contributes no text and no findings, but keeps its slot in
    /// the per-page geometry so box lists stay aligned with page numbers.
    pub fn skip_page(&mut self) {
        debug!("Session {}: page {} skipped (no contribution).", self.id, self.pages.len());
        self.pages.push(Vec::new());
    }

    pub fn findings(&self) -> &DocumentFindings {
        &self.findings
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Full document text accumulated so far, pages joined by newlines.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Closes the session and produces the redaction plan at the requested
    /// tier.
    pub fn finalize(self, threshold: SeverityTier) -> RedactionPlan {
        info!(
            "Finalizing session {}: {} page(s), {} categor(ies) found, tier '{}'.",
            self.id,
            self.pages.len(),
            self.findings.len(),
            threshold
        );
        planner::finalize(&self.findings, threshold, &self.pages, &self.text)
    }
}

/// Fully processes a document in a single call.
///
/// This function is the primary entry point for non-interactive use: it
/// builds the engine, feeds every page through a fresh session, and
/// returns the finished plan.
///
/// # Arguments
///
/// * `config` - The merged pattern library (defaults + optional user overrides).
/// * `capabilities` - Which detectors the engine runs with.
/// * `pages` - Pre-extracted text and token boxes, one entry per page.
/// * `threshold` - The redaction tier requested by the caller.
pub fn redact_document(
    config: PatternConfig,
    capabilities: DetectorCapabilities,
    pages: &[PageInput],
    threshold: SeverityTier,
) -> Result<RedactionPlan> {
    let engine = Arc::new(FusionEngine::with_capabilities(config, capabilities)?);
    let mut session = DocumentSession::new(engine);
    for page in pages {
        session.process_page(&page.text, page.tokens.clone());
    }
    Ok(session.finalize(threshold))
}
