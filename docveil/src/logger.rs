// docveil/src/logger.rs
//! Logger initialization for the docveil CLI.
//!
//! Findings are logged through the core's PII-safe helpers, so even DEBUG
//! output never contains raw matched values unless the user opts in via
//! `DOCVEIL_ALLOW_DEBUG_PII=true`.

use log::LevelFilter;

/// Initializes `env_logger` with an explicit level override, or defers to
/// `RUST_LOG` when none is given.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    // The CLI may be initialized more than once in test harnesses.
    let _ = builder.format_timestamp(None).try_init();
}
