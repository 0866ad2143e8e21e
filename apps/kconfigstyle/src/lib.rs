//! kconfigstyle core library.
//!
//! This crate exposes programmatic APIs for linting and formatting Kconfig
//! files against a style profile (zephyr or espidf presets plus overrides).
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Presets, config file discovery and effective configuration.
//! - `classify`: Line classification and whitespace helpers.
//! - `continuation`: Backslash continuations and expression wrapping.
//! - `parser`: Structural scan (placement, depth, help bodies) and entry tree.
//! - `indent`: Indentation strings for a given placement and depth.
//! - `reflow`: Greedy help-text paragraph filling.
//! - `checks`: Individual per-line style checks.
//! - `lint`: File and batch linting.
//! - `format`: Rendering a file in canonical style and writing it back.
//! - `models`: Issue, report and syntax tree types.
//! - `output`: Human/JSON printers for lint/format.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod classify;
pub mod cli;
pub mod config;
pub mod continuation;
pub mod format;
pub mod indent;
pub mod lint;
pub mod models;
pub mod output;
pub mod parser;
pub mod reflow;
pub mod utils;
