// docveil-core/src/detectors/mod.rs
//! This module contains the detection strategies feeding the fusion engine.
//!
//! Each detector is a separate file within this directory and implements the
//! [`Detector`] trait. This modular design allows for easy addition of new
//! detection strategies, such as checksum-validated or ML-based detectors.
//!
//! To add a new detector, create a new file (e.g. `entropy_detector.rs`),
//! define its logic, and declare it here using `pub mod <detector_name>;`.

pub mod compiler;
pub mod context_detector;
pub mod entity_detector;
pub mod regex_detector;

use anyhow::Result;

use crate::findings::RawFinding;

/// A single detection strategy over one text block.
///
/// Detectors never mutate the input and hold no per-call state, so one
/// instance may be shared across threads and pages. A detector that fails
/// on a given text block returns `Err`; the fusion engine treats that as
/// an empty result set and continues with the remaining detectors.
pub trait Detector: Send + Sync {
    /// Stable identifier of the strategy, used in logs and findings.
    fn name(&self) -> &'static str;

    /// Scans `text` and returns every raw finding.
    fn detect(&self, text: &str) -> Result<Vec<RawFinding>>;
}
