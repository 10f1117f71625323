//! compiler.rs - Manages the compilation and caching of the pattern library.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `PatternConfig` into a `CompiledPatternSet`, which is optimized for
//! efficient detection. It uses a global, shared cache to avoid redundant
//! compilation when several sessions share one library.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{PatternConfig, PatternRule, SeverityTier, MAX_PATTERN_LENGTH};
use crate::errors::DocveilError;

/// Represents a single compiled PII category.
///
/// Holds the category's compiled regular expression together with one
/// compiled contextual matcher per trigger phrase. A contextual matcher is
/// `(?i)<escaped phrase>[:\s]*(<pattern>)` - the phrase anchors the match
/// and the category's own pattern is captured as group 1.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The category identifier this pattern detects.
    pub category: String,
    /// Sensitivity tier of the category.
    pub tier: SeverityTier,
    /// The compiled regular expression used for bare pattern matching.
    pub regex: Regex,
    /// Compiled phrase-anchored matchers, one per context phrase.
    pub context: Vec<Regex>,
}

/// Represents the full compiled library, ready for detection.
#[derive(Debug)]
pub struct CompiledPatternSet {
    /// Compiled categories, in library order.
    pub patterns: Vec<CompiledPattern>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled pattern sets.
    /// The key is a hash of the sorted `PatternConfig` rules.
    static ref COMPILED_PATTERN_CACHE: RwLock<HashMap<u64, Arc<CompiledPatternSet>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the `PatternConfig` to create a stable, unique key for the cache.
///
/// To ensure determinism, the rules are sorted by name before hashing.
fn hash_config(config: &PatternConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut rules_to_hash = config.rules.clone();

    rules_to_hash.sort_by(|a, b| a.name.cmp(&b.name));
    rules_to_hash.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a list of `PatternRule`s into a `CompiledPatternSet`.
/// This is the low-level function that performs the actual regex compilation.
///
/// Rules without a `pattern` field (tier-only categories such as the NER
/// labels) are skipped here; they still participate in tier mapping.
pub fn compile_patterns(rules_to_compile: Vec<PatternRule>) -> Result<CompiledPatternSet, DocveilError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_patterns = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if let Some(false) = rule.enabled {
            debug!("Skipping disabled category '{}'.", rule.name);
            continue;
        }

        let pattern = match rule.pattern.as_ref() {
            Some(pattern) => pattern,
            None => {
                debug!("Category '{}' has no pattern; tier-only.", rule.name);
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(DocveilError::PatternLengthExceeded(
                rule.name.clone(),
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(pattern)
            .multi_line(rule.multiline)
            .dot_matches_new_line(rule.dot_matches_new_line)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        let regex = match regex_result {
            Ok(regex) => regex,
            Err(e) => {
                compilation_errors.push(DocveilError::PatternCompilationError(rule.name.clone(), e));
                continue;
            }
        };

        let mut context = Vec::with_capacity(rule.context_phrases.len());
        for phrase in &rule.context_phrases {
            let phrase = phrase.trim();
            if phrase.is_empty() {
                warn!("Skipping empty context phrase for category '{}'.", rule.name);
                continue;
            }
            // Phrase, optional separator, then the category's own pattern
            // captured as group 1. Case-insensitive across the whole match.
            let anchored = format!("(?i){}[:\\s]*({})", regex::escape(phrase), pattern);
            match RegexBuilder::new(&anchored)
                .multi_line(rule.multiline)
                .dot_matches_new_line(rule.dot_matches_new_line)
                .size_limit(10 * (1 << 20))
                .build()
            {
                Ok(ctx_regex) => context.push(ctx_regex),
                Err(e) => {
                    compilation_errors.push(DocveilError::ContextCompilationError(
                        rule.name.clone(),
                        phrase.to_string(),
                        e,
                    ));
                }
            }
        }

        debug!(
            "Category '{}' compiled successfully ({} context matchers).",
            &rule.name,
            context.len()
        );
        compiled_patterns.push(CompiledPattern {
            category: rule.name,
            tier: rule.tier,
            regex,
            context,
        });
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(DocveilError::Fatal(format!(
            "Failed to compile {} pattern(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling library. Total compiled: {}.", compiled_patterns.len());
        Ok(CompiledPatternSet { patterns: compiled_patterns })
    }
}

/// Gets a `CompiledPatternSet` from the cache or compiles it if not found.
///
/// This is the public entry point for retrieving compiled patterns. It
/// returns an `Arc`, allowing cheap sharing across sessions and threads.
pub fn get_or_compile_patterns(config: &PatternConfig) -> Result<Arc<CompiledPatternSet>> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_PATTERN_CACHE.read().unwrap();
        if let Some(patterns) = cache.get(&cache_key) {
            debug!("Serving compiled patterns from cache for key: {}", &cache_key);
            return Ok(Arc::clone(patterns));
        }
    } // Read lock is released here.

    debug!("Compiled patterns not found in cache. Compiling now.");
    let compiled = compile_patterns(config.rules.clone())?;
    let compiled_arc = Arc::new(compiled);

    COMPILED_PATTERN_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached patterns for key: {}", &cache_key);
    Ok(compiled_arc)
}
