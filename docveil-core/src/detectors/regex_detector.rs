// docveil-core/src/detectors/regex_detector.rs
//! A [`Detector`] that scans text with every category's bare pattern.
//!
//! Matching is case-sensitive exactly as the pattern specifies; no
//! normalization is applied. Every non-overlapping match yields one raw
//! finding with exact byte offsets.

use anyhow::Result;
use std::sync::Arc;

use crate::detectors::compiler::CompiledPatternSet;
use crate::detectors::Detector;
use crate::findings::{RawFinding, Span};

#[derive(Debug)]
pub struct RegexDetector {
    patterns: Arc<CompiledPatternSet>,
}

impl RegexDetector {
    pub fn new(patterns: Arc<CompiledPatternSet>) -> Self {
        Self { patterns }
    }
}

impl Detector for RegexDetector {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn detect(&self, text: &str) -> Result<Vec<RawFinding>> {
        let mut findings = Vec::new();
        for pattern in &self.patterns.patterns {
            for m in pattern.regex.find_iter(text) {
                findings.push(RawFinding {
                    category: pattern.category.clone(),
                    matched_text: m.as_str().to_string(),
                    span: Some(Span {
                        start: m.start(),
                        end: m.end(),
                    }),
                    detector: self.name(),
                });
            }
        }
        Ok(findings)
    }
}
