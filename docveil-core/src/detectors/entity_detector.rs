// docveil-core/src/detectors/entity_detector.rs
//! A [`Detector`] that wraps an external named-entity recognition service.
//!
//! The NER model itself is outside this crate; callers supply anything
//! implementing [`EntityRecognizer`]. Recognized entities carry a label and
//! the span text but no byte offsets - entity findings flow through fusion
//! and redaction as text-only values, which every consumer already handles.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::detectors::Detector;
use crate::findings::RawFinding;

/// Entity labels the pipeline recognizes as PII categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// A personal name.
    Person,
    /// A date expression.
    Date,
    /// A geopolitical entity (city, state, country).
    Gpe,
}

impl EntityLabel {
    /// The category identifier used for findings with this label.
    pub fn as_category(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Date => "DATE",
            EntityLabel::Gpe => "GPE",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_category())
    }
}

/// One entity returned by the external recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub label: EntityLabel,
    pub text: String,
}

/// External NER capability.
///
/// Implementations are expected to be stateless per call and may be shared
/// across threads. Labels outside [`EntityLabel`] are the implementation's
/// problem to filter; this crate never sees them.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>>;
}

pub struct EntityDetector {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl EntityDetector {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }
}

impl fmt::Debug for EntityDetector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EntityDetector").finish_non_exhaustive()
    }
}

impl Detector for EntityDetector {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn detect(&self, text: &str) -> Result<Vec<RawFinding>> {
        let entities = self.recognizer.recognize(text)?;
        Ok(entities
            .into_iter()
            .map(|entity| RawFinding {
                category: entity.label.as_category().to_string(),
                matched_text: entity.text,
                span: None,
                detector: "entity",
            })
            .collect())
    }
}
