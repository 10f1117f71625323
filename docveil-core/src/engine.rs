// docveil-core/src/engine.rs
//! The fusion engine: merges raw findings from every active detector for
//! one text block into a single deduplicated, tier-classified finding set.
//!
//! The engine is immutable after construction. The compiled library and
//! tier mapping are shared behind `Arc`, and every detector is stateless,
//! so one engine may fuse many pages concurrently from as many threads as
//! the caller likes.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

use crate::config::{PatternConfig, TierMapping};
use crate::detectors::compiler::{get_or_compile_patterns, CompiledPatternSet};
use crate::detectors::context_detector::ContextDetector;
use crate::detectors::entity_detector::{EntityDetector, EntityRecognizer};
use crate::detectors::regex_detector::RegexDetector;
use crate::detectors::Detector;
use crate::findings::{log_finding_debug, FusedFinding, PageFindings};

/// Which detection strategies an engine is built with.
///
/// Capability selection is a construction-time decision: there is no
/// runtime probing and no fallback. An absent NER service means
/// `entity: None`, and the engine simply runs without entity findings.
#[derive(Clone, Default)]
pub struct DetectorCapabilities {
    /// Bare pattern matching over every category.
    pub regex: bool,
    /// Phrase-anchored contextual matching.
    pub context: bool,
    /// External NER capability, if available.
    pub entity: Option<Arc<dyn EntityRecognizer>>,
}

impl DetectorCapabilities {
    /// Regex and contextual detection, no NER.
    pub fn standard() -> Self {
        Self {
            regex: true,
            context: true,
            entity: None,
        }
    }

    /// Regex, contextual, and entity detection.
    pub fn with_recognizer(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            regex: true,
            context: true,
            entity: Some(recognizer),
        }
    }
}

impl fmt::Debug for DetectorCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DetectorCapabilities")
            .field("regex", &self.regex)
            .field("context", &self.context)
            .field("entity", &self.entity.is_some())
            .finish()
    }
}

/// Merges raw findings from all active detectors for one text block.
pub struct FusionEngine {
    patterns: Arc<CompiledPatternSet>,
    tiers: TierMapping,
    detectors: Vec<Box<dyn Detector>>,
    config: PatternConfig,
}

impl fmt::Debug for FusionEngine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FusionEngine")
            .field("categories", &self.patterns.patterns.len())
            .field("detectors", &self.detectors.len())
            .finish_non_exhaustive()
    }
}

impl FusionEngine {
    /// Builds an engine with the standard capabilities (regex + context).
    pub fn new(config: PatternConfig) -> Result<Self> {
        Self::with_capabilities(config, DetectorCapabilities::standard())
    }

    /// Builds an engine with an explicit capability descriptor.
    ///
    /// Compilation of the pattern library happens here; a bad pattern is a
    /// configuration error and fails construction, never a detection call.
    pub fn with_capabilities(config: PatternConfig, capabilities: DetectorCapabilities) -> Result<Self> {
        let patterns = get_or_compile_patterns(&config)
            .context("Failed to compile pattern library for FusionEngine")?;
        let tiers = TierMapping::from_config(&config);

        let mut detectors: Vec<Box<dyn Detector>> = Vec::new();
        if capabilities.regex {
            detectors.push(Box::new(RegexDetector::new(Arc::clone(&patterns))));
        }
        if capabilities.context {
            detectors.push(Box::new(ContextDetector::new(Arc::clone(&patterns))));
        }
        if let Some(recognizer) = capabilities.entity {
            detectors.push(Box::new(EntityDetector::new(recognizer)));
        }
        debug!("FusionEngine built with {} detector(s).", detectors.len());

        Ok(Self {
            patterns,
            tiers,
            detectors,
            config,
        })
    }

    /// Fuses all active detectors' findings for one text block (one page).
    ///
    /// Raw findings are grouped by category; within a group, matched texts
    /// are trimmed of leading/trailing whitespace and deduplicated by exact
    /// byte equality. The mapped tier is attached to each group. A failing
    /// detector contributes nothing and is logged; the remaining detectors
    /// still run, so a page never aborts fusion.
    pub fn fuse(&self, text: &str) -> PageFindings {
        let mut fused = PageFindings::new();

        for detector in &self.detectors {
            let findings = match detector.detect(text) {
                Ok(findings) => findings,
                Err(e) => {
                    warn!(
                        "Detector '{}' failed on this text block: {e:#}. Continuing with remaining detectors.",
                        detector.name()
                    );
                    continue;
                }
            };

            for finding in findings {
                let value = finding.matched_text.trim();
                if value.is_empty() {
                    continue;
                }
                log_finding_debug(finding.detector, &finding.category, value);
                fused
                    .entry(finding.category.clone())
                    .or_insert_with(|| {
                        FusedFinding::new(finding.category.clone(), self.tiers.tier_for(&finding.category))
                    })
                    .values
                    .insert(value.to_string());
            }
        }

        fused
    }

    pub fn tiers(&self) -> &TierMapping {
        &self.tiers
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn compiled_patterns(&self) -> &CompiledPatternSet {
        &self.patterns
    }
}
