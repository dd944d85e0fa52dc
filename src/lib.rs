//! tagsweep core library.
//!
//! Scans a source tree for annotation comments (TODO, FIXME, BUG, ...)
//! across arbitrary comment syntaxes and attributes each match with the
//! author and age of its last change as known to git.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Preference discovery and the symbol-support wizard.
//! - `grammar`: The composite tag pattern and the text cleaner.
//! - `search`: Ripgrep invocation and search-output parsing.
//! - `blame`: Git blame invocation and line correlation.
//! - `report`: Per-file aggregation and the staleness policy.
//! - `output`: Plain/bw/full renderers.
//! - `models`: Shared data structs.
//! - `utils`: Stderr prefix helpers.
pub mod blame;
pub mod cli;
pub mod config;
pub mod grammar;
pub mod models;
pub mod output;
pub mod report;
pub mod search;
pub mod utils;
