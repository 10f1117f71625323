// docveil-core/src/planner.rs
//! The redaction planner: decides which findings are in scope for a
//! requested tier, rewrites text by substring substitution, and maps
//! findings onto OCR token boxes for image masking.
//!
//! Both consumers operate on literal matched text, never on byte offsets,
//! so entity findings (which carry no offsets) flow through the exact same
//! code path as regex findings.

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::aggregation::DocumentFindings;
use crate::config::SeverityTier;
use crate::geometry::{BoundingBox, SpatialToken};

/// The fixed marker substituted for every redacted span.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// The set of categories (and their values) covered by a tier request.
///
/// Scope selection is the only place tier filtering happens: a category is
/// in scope iff its tier is at or below the requested threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionScope {
    pub threshold: SeverityTier,
    pub categories: BTreeSet<String>,
    pub values: BTreeSet<String>,
}

impl RedactionScope {
    /// Selects every category whose tier is `<= threshold` and flattens
    /// their matched values.
    pub fn select(findings: &DocumentFindings, threshold: SeverityTier) -> Self {
        let mut categories = BTreeSet::new();
        let mut values = BTreeSet::new();

        for (category, finding) in findings.iter() {
            if finding.tier <= threshold {
                categories.insert(category.clone());
                values.extend(finding.values.iter().cloned());
            }
        }

        debug!(
            "Redaction scope at tier '{}': {} categories, {} distinct values.",
            threshold,
            categories.len(),
            values.len()
        );

        Self {
            threshold,
            categories,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Replaces every occurrence of every in-scope value with the redaction
/// marker.
///
/// All occurrences are located against the *original* text and spliced in
/// one pass, so a later substitution can never match text introduced by an
/// earlier one. Overlapping occurrences collapse: a span already consumed
/// is skipped, and a span overhanging the previous one redacts only its
/// uncovered tail.
pub fn redact_text(original: &str, scope: &RedactionScope) -> String {
    if scope.is_empty() {
        return original.to_string();
    }

    let mut occurrences: Vec<(usize, usize)> = Vec::new();
    for value in &scope.values {
        for (start, matched) in original.match_indices(value.as_str()) {
            occurrences.push((start, start + matched.len()));
        }
    }
    // Earliest first; at equal starts, longest span wins.
    occurrences.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut redacted = String::with_capacity(original.len());
    let mut last_end = 0usize;
    for (start, end) in occurrences {
        if end <= last_end {
            continue;
        }
        let current_start = start.max(last_end);
        redacted.push_str(&original[last_end..current_start]);
        redacted.push_str(REDACTION_MARKER);
        last_end = end;
    }
    redacted.push_str(&original[last_end..]);
    redacted
}

/// Maps in-scope values onto OCR token boxes, one list per page.
///
/// A token is masked when its trimmed text contains an in-scope value or
/// an in-scope value contains the token text. Containment in both
/// directions is required because OCR may render a value as one merged
/// token or split it across several. The trade-off is accepted: a short
/// numeric token can over-match an unrelated value, and no stricter rule
/// is guessed here.
pub fn plan_image_redaction(pages: &[Vec<SpatialToken>], scope: &RedactionScope) -> Vec<Vec<BoundingBox>> {
    pages
        .iter()
        .map(|tokens| {
            if scope.is_empty() {
                return Vec::new();
            }
            tokens
                .iter()
                .filter_map(|token| {
                    let text = token.text.trim();
                    if text.is_empty() {
                        return None;
                    }
                    let hit = scope
                        .values
                        .iter()
                        .any(|value| text.contains(value.as_str()) || value.contains(text));
                    hit.then_some(token.bbox)
                })
                .collect()
        })
        .collect()
}

/// Everything the rendering/output step needs to produce the redacted
/// artifacts. Derived once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionPlan {
    pub threshold: SeverityTier,
    pub categories: BTreeSet<String>,
    pub redacted_text: String,
    pub page_boxes: Vec<Vec<BoundingBox>>,
    pub generated_at: String,
}

/// Assembles the full plan for a finalized document.
pub fn finalize(
    findings: &DocumentFindings,
    threshold: SeverityTier,
    pages: &[Vec<SpatialToken>],
    original_text: &str,
) -> RedactionPlan {
    let scope = RedactionScope::select(findings, threshold);
    RedactionPlan {
        threshold,
        redacted_text: redact_text(original_text, &scope),
        page_boxes: plan_image_redaction(pages, &scope),
        categories: scope.categories,
        generated_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::{FusedFinding, PageFindings};

    fn findings(entries: &[(&str, SeverityTier, &[&str])]) -> DocumentFindings {
        let mut page = PageFindings::new();
        for (category, tier, values) in entries {
            let mut finding = FusedFinding::new(*category, *tier);
            finding.values.extend(values.iter().map(|v| v.to_string()));
            page.insert(category.to_string(), finding);
        }
        DocumentFindings::from(page)
    }

    #[test]
    fn empty_scope_is_identity() {
        let doc = findings(&[("credit_card", SeverityTier::Critical, &["1234 5678 9012 3456"])]);
        let scope = RedactionScope::select(&doc, SeverityTier::Basic);
        assert!(scope.is_empty());

        let text = "card 1234 5678 9012 3456";
        assert_eq!(redact_text(text, &scope), text);
        let boxes = plan_image_redaction(&[vec![SpatialToken::new("1234", 0, 0, 40, 10)]], &scope);
        assert!(boxes[0].is_empty());
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let doc = findings(&[("email", SeverityTier::Basic, &["a@b.com"])]);
        let scope = RedactionScope::select(&doc, SeverityTier::Basic);
        let out = redact_text("a@b.com wrote to a@b.com", &scope);
        assert_eq!(out, "[REDACTED] wrote to [REDACTED]");
    }

    #[test]
    fn overlapping_values_never_corrupt_output() {
        let doc = findings(&[("bank_account", SeverityTier::Basic, &["123456789", "456789012345"])]);
        let scope = RedactionScope::select(&doc, SeverityTier::Basic);
        // "123456789" and "456789012345" overlap inside the longer run.
        let out = redact_text("acct 123456789012345 end", &scope);
        assert!(!out.contains("123456789"));
        assert!(!out.contains("456789012345"));
        assert!(out.starts_with("acct "));
        assert!(out.ends_with(" end"));
    }

    #[test]
    fn marker_text_in_input_is_left_alone() {
        let doc = findings(&[("email", SeverityTier::Basic, &["a@b.com"])]);
        let scope = RedactionScope::select(&doc, SeverityTier::Basic);
        let out = redact_text("[REDACTED] a@b.com", &scope);
        assert_eq!(out, "[REDACTED] [REDACTED]");
    }

    #[test]
    fn token_matching_works_in_both_directions() {
        let doc = findings(&[("credit_card", SeverityTier::Critical, &["1234 5678 9012 3456"])]);
        let scope = RedactionScope::select(&doc, SeverityTier::Critical);

        // OCR split the value across tokens: value contains token.
        let split = vec![
            SpatialToken::new("1234", 0, 0, 40, 10),
            SpatialToken::new("5678", 45, 0, 40, 10),
            SpatialToken::new("hello", 90, 0, 40, 10),
        ];
        // OCR merged the value into one token: token contains value.
        let merged = vec![SpatialToken::new("nr:1234 5678 9012 3456", 0, 20, 200, 10)];

        let boxes = plan_image_redaction(&[split, merged], &scope);
        assert_eq!(boxes[0].len(), 2);
        assert_eq!(boxes[1].len(), 1);
    }

    #[test]
    fn whitespace_only_tokens_never_match() {
        let doc = findings(&[("email", SeverityTier::Basic, &["a@b.com"])]);
        let scope = RedactionScope::select(&doc, SeverityTier::Basic);
        let boxes = plan_image_redaction(&[vec![SpatialToken::new("   ", 0, 0, 5, 5)]], &scope);
        assert!(boxes[0].is_empty());
    }

    #[test]
    fn raising_threshold_never_shrinks_scope() {
        let doc = findings(&[
            ("email", SeverityTier::Basic, &["a@b.com"]),
            ("pan", SeverityTier::Intermediate, &["ABCDE1234F"]),
            ("credit_card", SeverityTier::Critical, &["1234 5678 9012 3456"]),
        ]);
        let basic = RedactionScope::select(&doc, SeverityTier::Basic);
        let mid = RedactionScope::select(&doc, SeverityTier::Intermediate);
        let critical = RedactionScope::select(&doc, SeverityTier::Critical);

        assert!(basic.categories.is_subset(&mid.categories));
        assert!(mid.categories.is_subset(&critical.categories));
        assert_eq!(critical.categories.len(), 3);
    }

    #[test]
    fn out_of_scope_values_remain_verbatim() {
        let doc = findings(&[
            ("email", SeverityTier::Basic, &["a@b.com"]),
            ("credit_card", SeverityTier::Critical, &["1234 5678 9012 3456"]),
        ]);
        let scope = RedactionScope::select(&doc, SeverityTier::Basic);
        let out = redact_text("a@b.com card 1234 5678 9012 3456", &scope);
        assert_eq!(out, "[REDACTED] card 1234 5678 9012 3456");
    }
}
