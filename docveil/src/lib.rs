// docveil/src/lib.rs
//! # Docveil CLI Application
//!
//! This crate provides the command-line interface for the Docveil redaction
//! engine. It wires pre-extracted page text and OCR token boxes through
//! `docveil-core` and emits the redacted artifacts the core plans.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod report;
