//! Ripgrep invocation and search-output parsing.
//!
//! Output comes in two shapes: `<file>:<line>:<text>` when a folder is
//! scanned recursively, and `<line>:<text>` when ripgrep is given exactly
//! one file. Both are parsed into per-file ordered hit lists keyed by
//! path; `BTreeMap` keeps the files in sort order for deterministic
//! presentation.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use regex::Regex;
use thiserror::Error;

use crate::models::RawHit;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to run ripgrep (is rg installed?): {0}")]
    Invoke(#[from] std::io::Error),
    #[error("ripgrep search failed: {0}")]
    Failed(String),
}

/// Run ripgrep over `path` with the composite tag pattern.
///
/// A non-empty stderr stream is a fatal search failure. Empty stdout is
/// not an error: it simply means there were no matches.
pub fn run_ripgrep(pattern: &str, path: &Path, glob: Option<&str>) -> Result<String, SearchError> {
    let mut cmd = Command::new("rg");
    cmd.arg(pattern).arg(path).arg("-n");
    if let Some(glob) = glob {
        cmd.args(["-g", glob]);
    }
    let out = cmd.output()?;
    let stderr = String::from_utf8_lossy(&out.stderr);
    if !stderr.trim().is_empty() {
        return Err(SearchError::Failed(stderr.trim().to_string()));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

/// Parse folder-mode output: `<file>:<line>:<text>`.
///
/// File paths may themselves contain colons, so the split point is the
/// first `:<digits>:` boundary rather than a naive colon split. Lines
/// matching neither shape (ripgrep's own diagnostics) are dropped.
pub fn parse_folder_output(output: &str) -> BTreeMap<String, Vec<RawHit>> {
    let shape = Regex::new(r"^(.+?):([0-9]+):(.*)$").expect("static regex");
    let mut by_file: BTreeMap<String, Vec<RawHit>> = BTreeMap::new();
    for line in output.lines() {
        let Some(caps) = shape.captures(line) else {
            continue;
        };
        let Ok(n) = caps[2].parse::<u32>() else {
            continue;
        };
        by_file
            .entry(caps[1].to_string())
            .or_default()
            .push(RawHit {
                line: n,
                text: caps[3].to_string(),
            });
    }
    by_file
}

/// Parse file-mode output: `<line>:<text>`.
///
/// Ripgrep omits the file name when given exactly one file, so the caller
/// supplies the known target path and it is attached to every record.
pub fn parse_file_output(output: &str, file: &str) -> BTreeMap<String, Vec<RawHit>> {
    let shape = Regex::new(r"^([0-9]+):(.*)$").expect("static regex");
    let mut hits = Vec::new();
    for line in output.lines() {
        let Some(caps) = shape.captures(line) else {
            continue;
        };
        let Ok(n) = caps[1].parse::<u32>() else {
            continue;
        };
        hits.push(RawHit {
            line: n,
            text: caps[2].to_string(),
        });
    }
    let mut by_file = BTreeMap::new();
    if !hits.is_empty() {
        by_file.insert(file.to_string(), hits);
    }
    by_file
}
