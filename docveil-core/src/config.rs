//! Configuration management for `docveil-core`.
//!
//! This module defines the pattern library: the set of PII categories, their
//! regex patterns, their contextual trigger phrases, and the sensitivity tier
//! assigned to each category. It handles serialization/deserialization of
//! YAML libraries and provides utilities for loading, merging, and validating
//! them. The library is read-only after load; a bad pattern is a
//! configuration error and fails fast, before any detection runs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Ordered sensitivity classification for a PII category.
///
/// The ordering is total: `Basic < Intermediate < Critical`. A redaction
/// request at tier `t` covers every category whose tier is `<= t`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    #[default]
    Basic,
    Intermediate,
    Critical,
}

impl SeverityTier {
    /// Parses a caller-supplied tier request leniently.
    ///
    /// Unrecognized values degrade to `Basic` rather than failing; a bad
    /// tier string from a client must never abort document processing.
    pub fn from_request(value: &str) -> Self {
        match value.parse() {
            Ok(tier) => tier,
            Err(_) => {
                warn!("Unrecognized redaction tier '{}'; defaulting to 'basic'.", value);
                SeverityTier::Basic
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Basic => "basic",
            SeverityTier::Intermediate => "intermediate",
            SeverityTier::Critical => "critical",
        }
    }
}

impl FromStr for SeverityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(SeverityTier::Basic),
            "intermediate" => Ok(SeverityTier::Intermediate),
            "critical" => Ok(SeverityTier::Critical),
            other => Err(format!("unknown severity tier: '{}'", other)),
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a single PII category definition in the pattern library.
///
/// A rule with a `pattern` participates in regex and contextual-phrase
/// detection. A rule without one (e.g. the NER labels `PERSON`, `DATE`,
/// `GPE`) only contributes its tier to the [`TierMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternRule {
    /// Category identifier (e.g. "aadhaar", "credit_card", "PERSON").
    pub name: String,
    /// Human-readable description of what the category covers.
    pub description: Option<String>,
    /// The regex pattern string, if this category is pattern-matchable.
    pub pattern: Option<String>,
    /// Lowercase literal phrases that anchor contextual detection
    /// (e.g. "credit card", "cc no").
    pub context_phrases: Vec<String>,
    /// Sensitivity tier of the category; absent means `basic`.
    pub tier: SeverityTier,
    /// If true, enables multiline mode for the regex engine.
    pub multiline: bool,
    /// If true, the dot character `.` in regex will match newlines.
    pub dot_matches_new_line: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for PatternRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            context_phrases: Vec::new(),
            tier: SeverityTier::Basic,
            multiline: false,
            dot_matches_new_line: false,
            enabled: None,
        }
    }
}

/// Represents the top-level pattern library for Docveil.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternConfig {
    /// The category definitions making up the library.
    pub rules: Vec<PatternRule>,
}

impl PatternConfig {
    /// Loads a pattern library from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom pattern library from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern library {}", path.display()))?;
        let config: PatternConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse pattern library {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} categories from {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in pattern library from the embedded configuration.
    pub fn load_default_library() -> Result<Self> {
        debug!("Loading default pattern library from embedded string...");
        let default_yaml = include_str!("../config/default_patterns.yaml");
        let config: PatternConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default pattern library")?;

        debug!("Loaded {} default categories.", config.rules.len());
        Ok(config)
    }

    /// Returns the rule for a category name, if defined.
    pub fn rule(&self, name: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

/// Immutable mapping from category name to severity tier.
///
/// Built once from a [`PatternConfig`]; categories absent from the library
/// are `Basic` by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierMapping {
    map: HashMap<String, SeverityTier>,
}

impl TierMapping {
    pub fn from_config(config: &PatternConfig) -> Self {
        let map = config
            .rules
            .iter()
            .map(|rule| (rule.name.clone(), rule.tier))
            .collect();
        Self { map }
    }

    /// Looks up the tier for a category, defaulting to `Basic`.
    pub fn tier_for(&self, category: &str) -> SeverityTier {
        self.map.get(category).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Merges a user-defined pattern library over the defaults.
///
/// User rules replace default rules of the same name wholesale; new names
/// are appended.
pub fn merge_libraries(
    default_config: PatternConfig,
    user_config: Option<PatternConfig>,
) -> PatternConfig {
    debug!(
        "merge_libraries called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let mut final_rules_map: HashMap<String, PatternRule> = default_config
        .rules
        .into_iter()
        .map(|rule| (rule.name.clone(), rule))
        .collect();

    if let Some(user_cfg) = user_config {
        debug!("User library provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            final_rules_map.insert(user_rule.name.clone(), user_rule);
        }
    }

    let mut final_rules: Vec<PatternRule> = final_rules_map.into_values().collect();
    final_rules.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Final total rules after merge: {}", final_rules.len());

    PatternConfig { rules: final_rules }
}

/// Validates library integrity (names, pattern compilation, phrase casing).
pub fn validate_rules(rules: &[PatternRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate category name found: '{}'.", rule.name));
        }

        if let Some(pattern) = &rule.pattern {
            if pattern.is_empty() {
                errors.push(format!("Category '{}' has an empty `pattern` field.", rule.name));
                continue;
            }

            if pattern.len() > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "Category '{}': pattern length ({}) exceeds maximum allowed ({}).",
                    rule.name,
                    pattern.len(),
                    MAX_PATTERN_LENGTH
                ));
                continue;
            }

            if let Err(e) = Regex::new(pattern) {
                errors.push(format!(
                    "Category '{}' has an invalid regex pattern: {}",
                    rule.name, e
                ));
            }
        } else if rule.context_phrases.is_empty() && rule.tier == SeverityTier::Basic {
            debug!(
                "Category '{}' has no pattern, no phrases, and the default tier; it is inert.",
                rule.name
            );
        }

        for phrase in &rule.context_phrases {
            if phrase.trim().is_empty() {
                errors.push(format!("Category '{}' has an empty context phrase.", rule.name));
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Pattern library validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_order_is_total() {
        assert!(SeverityTier::Basic < SeverityTier::Intermediate);
        assert!(SeverityTier::Intermediate < SeverityTier::Critical);
    }

    #[test]
    fn tier_request_parsing_is_lenient() {
        assert_eq!(SeverityTier::from_request("critical"), SeverityTier::Critical);
        assert_eq!(SeverityTier::from_request(" Intermediate "), SeverityTier::Intermediate);
        assert_eq!(SeverityTier::from_request("paranoid"), SeverityTier::Basic);
        assert_eq!(SeverityTier::from_request(""), SeverityTier::Basic);
    }

    #[test]
    fn unmapped_category_defaults_to_basic() {
        let config = PatternConfig {
            rules: vec![PatternRule {
                name: "credit_card".to_string(),
                tier: SeverityTier::Critical,
                ..Default::default()
            }],
        };
        let tiers = TierMapping::from_config(&config);
        assert_eq!(tiers.tier_for("credit_card"), SeverityTier::Critical);
        assert_eq!(tiers.tier_for("never_heard_of_it"), SeverityTier::Basic);
    }
}
