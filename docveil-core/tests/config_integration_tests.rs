// docveil-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use docveil_core::config::{self, PatternConfig, PatternRule, SeverityTier, TierMapping};

#[test]
fn test_load_default_library() {
    let config = PatternConfig::load_default_library().unwrap();
    assert!(!config.rules.is_empty());
    assert!(config.rules.iter().any(|r| r.name == "email"));

    // Entity labels are tier-only rules.
    let person = config.rule("PERSON").unwrap();
    assert!(person.pattern.is_none());
    assert_eq!(person.tier, SeverityTier::Intermediate);
}

#[test]
fn test_default_tier_assignment_matches_policy() {
    let config = PatternConfig::load_default_library().unwrap();
    let tiers = TierMapping::from_config(&config);

    assert_eq!(tiers.tier_for("email"), SeverityTier::Basic);
    assert_eq!(tiers.tier_for("dob"), SeverityTier::Basic);
    assert_eq!(tiers.tier_for("aadhaar"), SeverityTier::Intermediate);
    assert_eq!(tiers.tier_for("GPE"), SeverityTier::Intermediate);
    assert_eq!(tiers.tier_for("credit_card"), SeverityTier::Critical);
    assert_eq!(tiers.tier_for("debit_card"), SeverityTier::Critical);
    // Unknown categories are basic by construction.
    assert_eq!(tiers.tier_for("shoe_size"), SeverityTier::Basic);
}

#[test]
fn test_credit_and_debit_share_one_pattern() {
    let config = PatternConfig::load_default_library().unwrap();
    let credit = config.rule("credit_card").unwrap();
    let debit = config.rule("debit_card").unwrap();
    assert_eq!(credit.pattern, debit.pattern);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: employee_id
    pattern: '\bEMP-\d{6}\b'
    description: "Internal employee id"
    tier: intermediate
    context_phrases: ["employee id"]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = PatternConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].name, "employee_id");
    assert_eq!(config.rules[0].tier, SeverityTier::Intermediate);
    assert_eq!(config.rules[0].context_phrases, vec!["employee id".to_string()]);
    Ok(())
}

#[test]
fn test_load_from_file_tier_defaults_to_basic() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: badge
    pattern: '\bB\d{4}\b'
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = PatternConfig::load_from_file(file.path())?;
    assert_eq!(config.rules[0].tier, SeverityTier::Basic);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_bad_pattern() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: broken
    pattern: '(\d{4'
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = PatternConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("validation failed"));
    Ok(())
}

#[test]
fn test_validate_rejects_duplicate_names() {
    let rules = vec![
        PatternRule {
            name: "email".to_string(),
            pattern: Some("a".to_string()),
            ..Default::default()
        },
        PatternRule {
            name: "email".to_string(),
            pattern: Some("b".to_string()),
            ..Default::default()
        },
    ];
    assert!(config::validate_rules(&rules).is_err());
}

#[test]
fn test_merge_libraries_no_user_config() {
    let default_config = PatternConfig {
        rules: vec![PatternRule {
            name: "email".to_string(),
            pattern: Some("old".to_string()),
            tier: SeverityTier::Basic,
            ..Default::default()
        }],
    };
    let merged = config::merge_libraries(default_config, None);
    assert_eq!(merged.rules.len(), 1);
    assert_eq!(merged.rules[0].pattern.as_deref(), Some("old"));
}

#[test]
fn test_merge_libraries_user_overrides_and_extends() {
    let default_config = PatternConfig {
        rules: vec![
            PatternRule {
                name: "email".to_string(),
                pattern: Some("old".to_string()),
                tier: SeverityTier::Basic,
                ..Default::default()
            },
            PatternRule {
                name: "phone".to_string(),
                pattern: Some("p".to_string()),
                ..Default::default()
            },
        ],
    };
    let user_config = PatternConfig {
        rules: vec![
            PatternRule {
                name: "email".to_string(),
                pattern: Some("new".to_string()),
                tier: SeverityTier::Critical,
                ..Default::default()
            },
            PatternRule {
                name: "employee_id".to_string(),
                pattern: Some("e".to_string()),
                ..Default::default()
            },
        ],
    };

    let merged = config::merge_libraries(default_config, Some(user_config));
    assert_eq!(merged.rules.len(), 3);

    let email = merged.rule("email").unwrap();
    assert_eq!(email.pattern.as_deref(), Some("new"));
    assert_eq!(email.tier, SeverityTier::Critical);
    assert!(merged.rule("employee_id").is_some());
    assert!(merged.rule("phone").is_some());
}
