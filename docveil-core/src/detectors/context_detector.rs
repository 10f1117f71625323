// docveil-core/src/detectors/context_detector.rs
//! A [`Detector`] that requires a trigger phrase before the pattern.
//!
//! A bare pattern is often too weak on its own (a 10-digit number could be
//! a phone number or a fragment of a bank account), so this detector only
//! fires when one of the category's phrases immediately precedes the
//! pattern. It is a precision booster layered on top of [`RegexDetector`],
//! not a replacement: the reported finding is the captured pattern portion
//! only, never the phrase.
//!
//! [`RegexDetector`]: crate::detectors::regex_detector::RegexDetector

use anyhow::Result;
use std::sync::Arc;

use crate::detectors::compiler::CompiledPatternSet;
use crate::detectors::Detector;
use crate::findings::{RawFinding, Span};

#[derive(Debug)]
pub struct ContextDetector {
    patterns: Arc<CompiledPatternSet>,
}

impl ContextDetector {
    pub fn new(patterns: Arc<CompiledPatternSet>) -> Self {
        Self { patterns }
    }
}

impl Detector for ContextDetector {
    fn name(&self) -> &'static str {
        "context"
    }

    fn detect(&self, text: &str) -> Result<Vec<RawFinding>> {
        let mut findings = Vec::new();
        for pattern in &self.patterns.patterns {
            for ctx_regex in &pattern.context {
                for caps in ctx_regex.captures_iter(text) {
                    // Group 1 is the pattern portion following the phrase.
                    let Some(value) = caps.get(1) else { continue };
                    findings.push(RawFinding {
                        category: pattern.category.clone(),
                        matched_text: value.as_str().to_string(),
                        span: Some(Span {
                            start: value.start(),
                            end: value.end(),
                        }),
                        detector: self.name(),
                    });
                }
            }
        }
        Ok(findings)
    }
}
