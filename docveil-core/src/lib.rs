// docveil-core/src/lib.rs
//! # Docveil Core Library
//!
//! `docveil-core` provides the fundamental, transport-independent logic for
//! locating personally identifiable information (PII) in scanned documents
//! and planning its redaction. It merges the results of heterogeneous
//! detectors (regex categories, contextual-phrase heuristics, named-entity
//! recognition) into a single deduplicated, tier-classified finding set,
//! then maps each finding back onto raw text for substring replacement and
//! onto OCR word boxes for image masking.
//!
//! The library is designed to be pure and stateless: OCR execution, NER
//! inference, PDF conversion, file storage, and the HTTP/WebSocket surface
//! all live outside this crate and are consumed as capabilities.
//!
//! ## Modules
//!
//! * `config`: Defines the pattern library (`PatternRule`, `PatternConfig`),
//!   severity tiers, and the category-to-tier mapping.
//! * `detectors`: The `Detector` trait and its three strategies (regex,
//!   contextual phrase, entity), plus pattern compilation and caching.
//! * `engine`: The `FusionEngine` merging all detectors' findings for one
//!   text block.
//! * `aggregation`: Document-level accumulation of per-page finding sets.
//! * `planner`: Tier scoping, text substitution, and token-box planning.
//! * `pipeline`: `DocumentSession` and one-shot helpers for headless use.
//! * `findings`: Finding data structures and PII-safe logging helpers.
//! * `geometry`: OCR token and bounding-box value types.
//! * `errors`: The structured `DocveilError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use docveil_core::{
//!     DetectorCapabilities, PageInput, PatternConfig, SeverityTier, redact_document,
//! };
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the built-in pattern library.
//!     let config = PatternConfig::load_default_library()?;
//!
//!     // 2. Pages arrive pre-extracted (text + OCR token boxes).
//!     let pages = vec![PageInput {
//!         text: "Send it to my email rahul@example.com please".to_string(),
//!         tokens: Vec::new(),
//!     }];
//!
//!     // 3. Redact at the requested tier in a single call.
//!     let plan = redact_document(
//!         config,
//!         DetectorCapabilities::standard(),
//!         &pages,
//!         SeverityTier::Basic,
//!     )?;
//!     println!("{}", plan.redacted_text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The library uses `anyhow::Error` for fallible operations and defines the
//! structured `DocveilError` type for programmatic handling. A bad pattern
//! is a configuration error and fails engine construction; a detector that
//! fails on one text block degrades to an empty contribution and is logged;
//! an unrecognized tier request degrades to `basic`. No error in this crate
//! aborts a whole document.
//!
//! ## Design Principles
//!
//! * **Pluggable Detection:** The `Detector` trait and the
//!   `DetectorCapabilities` descriptor make detection strategies an
//!   explicit construction-time choice, never a runtime probe.
//! * **Stateless:** The compiled library and tier mapping are immutable;
//!   the only mutable state is the caller-owned `DocumentSession`.
//! * **Deterministic:** Fusion and aggregation results are ordered maps and
//!   sets; merging pages is associative, commutative, and idempotent.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod aggregation;
pub mod config;
pub mod detectors;
pub mod engine;
pub mod errors;
pub mod findings;
pub mod geometry;
pub mod pipeline;
pub mod planner;

/// Re-exports the public configuration types and functions for managing the
/// pattern library.
pub use config::{
    merge_libraries, validate_rules, PatternConfig, PatternRule, SeverityTier, TierMapping,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::DocveilError;

/// Re-exports the fusion engine and its capability descriptor.
pub use engine::{DetectorCapabilities, FusionEngine};

/// Re-exports the detector trait and the entity-recognition capability
/// surface implemented by external NER services.
pub use detectors::entity_detector::{EntityLabel, EntityRecognizer, RecognizedEntity};
pub use detectors::Detector;

/// Re-exports finding types and the PII-safe logging helpers.
pub use findings::{canonical_sample_hash, redact_sensitive, FusedFinding, PageFindings, RawFinding};

/// Re-exports document-level aggregation.
pub use aggregation::{merge, DocumentFindings};

/// Re-exports spatial types consumed from the OCR layer.
pub use geometry::{BoundingBox, SpatialToken};

/// Re-exports the redaction planner surface.
pub use planner::{
    finalize, plan_image_redaction, redact_text, RedactionPlan, RedactionScope, REDACTION_MARKER,
};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use pipeline::{redact_document, DocumentSession, PageInput};

// Re-export key types from the detectors::compiler module for advanced usage.
pub use detectors::compiler::{compile_patterns, CompiledPattern, CompiledPatternSet};
