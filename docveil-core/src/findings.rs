// docveil-core/src/findings.rs
//! Provides core data structures for raw and fused PII findings, plus
//! utility functions for PII-safe debug logging within the `docveil-core`
//! library.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use crate::config::SeverityTier;

/// A static boolean that is initialized once to determine if PII is allowed in debug logs.
static PII_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("DOCVEIL_ALLOW_DEBUG_PII")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// Byte range of a match within one page's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// One detector hit, before fusion.
///
/// `span` is `None` for detectors that supply text only (the entity
/// detector, and any recognizer that cannot report reliable offsets).
/// Every downstream consumer operates on `matched_text`, so offset-less
/// findings need no special handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFinding {
    pub category: String,
    pub matched_text: String,
    pub span: Option<Span>,
    pub detector: &'static str,
}

/// All distinct matched values for one category, with its mapped tier.
///
/// This is the unit the redaction layer operates on. Values are trimmed of
/// leading/trailing whitespace and deduplicated by exact byte equality;
/// case or inner-whitespace variants remain distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusedFinding {
    pub category: String,
    pub tier: SeverityTier,
    pub values: BTreeSet<String>,
}

impl FusedFinding {
    pub fn new(category: impl Into<String>, tier: SeverityTier) -> Self {
        Self {
            category: category.into(),
            tier,
            values: BTreeSet::new(),
        }
    }
}

/// The fused detection result for one text block (one page).
pub type PageFindings = BTreeMap<String, FusedFinding>;

/// Replaces sensitive content for log output.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

/// Debug-logs a detector hit without leaking the matched value.
pub fn log_finding_debug(detector: &str, category: &str, matched_text: &str) {
    debug!(
        "Detector '{}' found category '{}': '{}'",
        detector,
        category,
        get_loggable_content(matched_text)
    );
}

/// Stable hash of a matched value, suitable for reports and correlation
/// without exposing the value itself. Normalizes case and whitespace so
/// OCR spacing noise does not split samples.
pub fn canonical_sample_hash(category: &str, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(category.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
