// docveil/src/commands/mod.rs
//! Command implementations for the docveil CLI, plus the input-loading
//! helpers they share.

pub mod redact;
pub mod scan;

use anyhow::{Context, Result};
use log::warn;
use std::io::Read;
use std::path::{Path, PathBuf};

use docveil_core::{merge_libraries, PatternConfig, SpatialToken};

/// Loads the default pattern library, merged with an optional user library.
pub fn load_library(user_config: Option<&Path>) -> Result<PatternConfig> {
    let defaults = PatternConfig::load_default_library()?;
    let user = match user_config {
        Some(path) => Some(PatternConfig::load_from_file(path)?),
        None => None,
    };
    Ok(merge_libraries(defaults, user))
}

/// Reads page texts from the given files, or one page from stdin when no
/// files were supplied.
pub fn read_pages(inputs: &[PathBuf]) -> Result<Vec<String>> {
    if inputs.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read page text from stdin")?;
        return Ok(vec![text]);
    }

    inputs
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read page file {}", path.display()))
        })
        .collect()
}

/// Loads per-page OCR tokens from a JSON file, padding or truncating to the
/// page count so box lists stay aligned with pages.
pub fn load_tokens(path: Option<&Path>, page_count: usize) -> Result<Vec<Vec<SpatialToken>>> {
    let mut tokens: Vec<Vec<SpatialToken>> = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read token file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse token file {}", path.display()))?
        }
        None => Vec::new(),
    };

    if path.is_some() && tokens.len() != page_count {
        warn!(
            "Token file has {} page(s) but {} page text(s) were given; aligning to page count.",
            tokens.len(),
            page_count
        );
    }
    tokens.resize_with(page_count, Vec::new);
    Ok(tokens)
}
