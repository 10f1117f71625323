// docveil-core/tests/redaction_integration_tests.rs
//! End-to-end redaction behavior over the default pattern library:
//! tier scoping, document aggregation across pages, and the text/image
//! planning surfaces.

use anyhow::{bail, Result};
use std::sync::Arc;

use docveil_core::{
    merge, DetectorCapabilities, DocumentFindings, DocumentSession, EntityRecognizer,
    FusionEngine, PageInput, PatternConfig, RecognizedEntity, RedactionScope, SeverityTier,
    SpatialToken, redact_document, redact_text,
};

fn standard_engine() -> Arc<FusionEngine> {
    let config = PatternConfig::load_default_library().unwrap();
    Arc::new(FusionEngine::new(config).unwrap())
}

#[test]
fn critical_finding_is_untouched_at_basic_tier() {
    // A critical-tier card number is out of scope for a basic request.
    let engine = standard_engine();
    let text = "card 1234 5678 9012 3456";
    let doc = DocumentFindings::from(engine.fuse(text));

    let scope = RedactionScope::select(&doc, SeverityTier::Basic);
    assert_eq!(redact_text(text, &scope), text);
}

#[test]
fn critical_tier_redacts_card_and_masks_split_tokens() {
    let engine = standard_engine();
    let text = "card 1234 5678 9012 3456";
    let mut session = DocumentSession::new(engine);
    session.process_page(
        text,
        vec![
            SpatialToken::new("card", 0, 0, 40, 12),
            SpatialToken::new("1234", 50, 0, 40, 12),
            SpatialToken::new("5678", 95, 0, 40, 12),
            SpatialToken::new("9012", 140, 0, 40, 12),
            SpatialToken::new("3456", 185, 0, 40, 12),
        ],
    );

    let plan = session.finalize(SeverityTier::Critical);
    assert_eq!(plan.redacted_text, "card [REDACTED]");
    // Each OCR-split digit group is contained in the flagged value.
    assert_eq!(plan.page_boxes[0].len(), 4);
}

#[test]
fn pages_union_without_duplicates() {
    // Page 1 finds {a@b.com}; page 2 finds {a@b.com, c@d.com};
    // the aggregated document has exactly two values.
    let engine = standard_engine();
    let mut session = DocumentSession::new(engine);
    session.process_page("mail a@b.com", Vec::new());
    session.process_page("mail a@b.com and c@d.com", Vec::new());

    let email = session.findings().get("email").unwrap();
    assert_eq!(email.values.len(), 2);
    assert!(email.values.contains("a@b.com"));
    assert!(email.values.contains("c@d.com"));
}

#[test]
fn page_order_does_not_change_the_document_set() {
    let engine = standard_engine();
    let p1 = engine.fuse("mail a@b.com");
    let p2 = engine.fuse("pan ABCDE1234F, mail c@d.com");

    let forward = merge(merge(DocumentFindings::new(), p1.clone()), p2.clone());
    let backward = merge(merge(DocumentFindings::new(), p2), p1);
    assert_eq!(forward, backward);
}

#[test]
fn replaying_a_page_is_idempotent() {
    let engine = standard_engine();
    let page = engine.fuse("mail a@b.com");

    let once = merge(DocumentFindings::new(), page.clone());
    let twice = merge(once.clone(), page);
    assert_eq!(once, twice);
}

struct PageThreeFails;

impl EntityRecognizer for PageThreeFails {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
        if text.contains("page three") {
            bail!("NER backend crashed on this page");
        }
        Ok(Vec::new())
    }
}

#[test]
fn one_failing_page_leaves_the_rest_intact() {
    // Detector failure on page 3 of 5; the document still carries the
    // union of the other pages' findings.
    let config = PatternConfig::load_default_library().unwrap();
    let engine = Arc::new(
        FusionEngine::with_capabilities(
            config,
            DetectorCapabilities::with_recognizer(Arc::new(PageThreeFails)),
        )
        .unwrap(),
    );

    let pages = [
        "mail p1@a.com",
        "mail p2@a.com",
        "page three mail p3@a.com",
        "mail p4@a.com",
        "mail p5@a.com",
    ];
    let mut session = DocumentSession::new(engine);
    for page in pages {
        session.process_page(page, Vec::new());
    }

    let email = session.findings().get("email").unwrap();
    // The regex detector still ran on page 3; only the entity detector
    // failed there, so all five addresses are present.
    assert_eq!(email.values.len(), 5);
}

#[test]
fn one_shot_helper_matches_session_result() -> Result<()> {
    let config = PatternConfig::load_default_library().unwrap();
    let pages = vec![
        PageInput {
            text: "mail a@b.com".to_string(),
            tokens: vec![SpatialToken::new("a@b.com", 0, 0, 60, 10)],
        },
        PageInput {
            text: "card 1234 5678 9012 3456".to_string(),
            tokens: Vec::new(),
        },
    ];

    let plan = redact_document(
        config,
        DetectorCapabilities::standard(),
        &pages,
        SeverityTier::Basic,
    )?;

    // Basic scope covers the email but not the critical card number.
    assert!(plan.categories.contains("email"));
    assert!(!plan.categories.contains("credit_card"));
    assert!(plan.redacted_text.contains("[REDACTED]"));
    assert!(plan.redacted_text.contains("1234 5678 9012 3456"));
    assert_eq!(plan.page_boxes.len(), 2);
    assert_eq!(plan.page_boxes[0].len(), 1);
    assert!(plan.page_boxes[1].is_empty());
    Ok(())
}

#[test]
fn entity_only_findings_redact_via_literal_text() {
    // A text-only finding (no offsets) still drives both consumers.
    struct NameSpotter;
    impl EntityRecognizer for NameSpotter {
        fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>> {
            Ok(vec![RecognizedEntity {
                label: docveil_core::EntityLabel::Person,
                text: "Rahul Sharma".to_string(),
            }])
        }
    }

    let config = PatternConfig::load_default_library().unwrap();
    let engine = Arc::new(
        FusionEngine::with_capabilities(
            config,
            DetectorCapabilities::with_recognizer(Arc::new(NameSpotter)),
        )
        .unwrap(),
    );
    let mut session = DocumentSession::new(engine);
    session.process_page(
        "Applicant: Rahul Sharma",
        vec![
            SpatialToken::new("Applicant:", 0, 0, 70, 12),
            SpatialToken::new("Rahul", 80, 0, 40, 12),
            SpatialToken::new("Sharma", 125, 0, 50, 12),
        ],
    );

    let plan = session.finalize(SeverityTier::Intermediate);
    assert_eq!(plan.redacted_text, "Applicant: [REDACTED]");
    // Both name tokens are substrings of the flagged value.
    assert_eq!(plan.page_boxes[0].len(), 2);
}
