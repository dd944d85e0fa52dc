//! Git blame correlation.
//!
//! One `git blame` invocation per file produces a dense line-indexed table
//! of authorship; point lookups then answer the matched line numbers. The
//! table is scoped to a single file and discarded after use. Files with no
//! version-control history, and environments where git cannot be run at
//! all, degrade to sentinel authorship instead of failing the scan.

use std::path::Path;
use std::process::Command;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::models::AuthorInfo;

#[derive(Debug, Error)]
pub enum BlameError {
    #[error("requested line {line} is beyond the blame table ({len} rows)")]
    LineOutOfRange { line: u32, len: usize },
}

/// One row of `git blame <file> -l`: a fixed-width revision token, then
/// `(author  YYYY-MM-DD HH:MM:SS +ZZZZ  N)`, then the line content.
fn row_regex() -> Regex {
    Regex::new(
        r"^\S{40} .*?\(\s*(.*?)\s+(\d{4}-[01]\d-[0-3]\d) [0-2]\d:[0-5]\d:[0-5]\d [+-]\d{4}\s+\d+\)",
    )
    .expect("static regex")
}

/// Parse whole-file blame output into a table indexed by `line - 1`.
///
/// Rows that do not match the fixed layout become sentinel entries rather
/// than failing the whole correlation.
fn parse_table(output: &str, today: NaiveDate) -> Vec<AuthorInfo> {
    let row = row_regex();
    output
        .lines()
        .map(|line| {
            let Some(caps) = row.captures(line) else {
                return AuthorInfo::sentinel(today);
            };
            match NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d") {
                Ok(date) => AuthorInfo {
                    name: caps[1].trim().to_string(),
                    date,
                },
                Err(_) => AuthorInfo::sentinel(today),
            }
        })
        .collect()
}

/// Git reports untracked paths with a leading `fatal` token instead of
/// blame rows.
fn is_untracked(tracked: bool, output: &str) -> bool {
    !tracked || output.trim_start().starts_with("fatal")
}

/// Run `git blame` from the file's directory. Returns whether the command
/// succeeded plus its output (stderr when stdout is empty, so the `fatal`
/// token is visible either way).
fn blame_file(file: &Path) -> std::io::Result<(bool, String)> {
    let mut cmd = Command::new("git");
    cmd.arg("blame").arg(file).arg("-l");
    if let Some(dir) = file.parent() {
        if !dir.as_os_str().is_empty() {
            cmd.current_dir(dir);
        }
    }
    let out = cmd.output()?;
    let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
    let output = if stdout.trim().is_empty() {
        String::from_utf8_lossy(&out.stderr).into_owned()
    } else {
        stdout
    };
    Ok((out.status.success(), output))
}

/// Map raw blame output to the requested lines.
///
/// The i-th returned entry corresponds to the i-th requested line number,
/// not to table order.
fn correlate(
    tracked: bool,
    output: &str,
    lines: &[u32],
    today: NaiveDate,
) -> Result<Vec<AuthorInfo>, BlameError> {
    if is_untracked(tracked, output) {
        return Ok(lines.iter().map(|_| AuthorInfo::sentinel(today)).collect());
    }
    let table = parse_table(output, today);
    lines
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .and_then(|idx| table.get(idx as usize))
                .cloned()
                .ok_or(BlameError::LineOutOfRange {
                    line: n,
                    len: table.len(),
                })
        })
        .collect()
}

/// Turn one invocation outcome into per-line authorship. A failed spawn
/// (git missing from PATH, permission trouble) is treated like an
/// untracked file: authorship is optional, the scan continues.
fn resolve(
    invocation: std::io::Result<(bool, String)>,
    lines: &[u32],
    today: NaiveDate,
) -> Result<Vec<AuthorInfo>, BlameError> {
    match invocation {
        Ok((tracked, output)) => correlate(tracked, &output, lines, today),
        Err(e) => {
            log::debug!("git blame unavailable: {e}");
            Ok(lines.iter().map(|_| AuthorInfo::sentinel(today)).collect())
        }
    }
}

/// Resolve authorship for the requested line numbers of one file.
///
/// Invokes git blame once for the whole file, not once per line. An
/// untracked file, or a git that cannot be run, resolves every request to
/// the sentinel. Requesting a line beyond the table of a tracked file is
/// a caller contract violation and is reported as a hard error.
pub fn blame_lines(
    file: &Path,
    lines: &[u32],
    today: NaiveDate,
) -> Result<Vec<AuthorInfo>, BlameError> {
    resolve(blame_file(file), lines, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "3f786850e387550fdab836ed7e6dc881de23001b";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn blame_output() -> String {
        format!(
            "{HASH} (Ada Lovelace 2023-04-01 10:11:12 +0000  1) # TODO one\n\
             {HASH} (Grace Hopper  2024-12-24 23:59:59 -0300  2) x = 1\n\
             not a blame row at all\n\
             {HASH} src/old name.py (Ada Lovelace 2023-04-01 10:11:12 +0000  4) # BUG four\n"
        )
    }

    #[test]
    fn test_correlate_answers_in_request_order() {
        let got = correlate(true, &blame_output(), &[4, 1], today()).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "Ada Lovelace");
        assert_eq!(got[0].date, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
        assert_eq!(got[1].name, "Ada Lovelace");
    }

    #[test]
    fn test_malformed_row_becomes_sentinel() {
        let got = correlate(true, &blame_output(), &[3], today()).unwrap();
        assert!(got[0].is_sentinel());
        assert_eq!(got[0].date, today());
    }

    #[test]
    fn test_row_with_filename_column_parses() {
        let got = correlate(true, &blame_output(), &[4], today()).unwrap();
        assert_eq!(got[0].name, "Ada Lovelace");
    }

    #[test]
    fn test_untracked_file_yields_sentinels() {
        let out = "fatal: no such path 'scratch.py' in HEAD";
        let got = correlate(false, out, &[1, 2, 3], today()).unwrap();
        assert_eq!(got.len(), 3);
        assert!(got.iter().all(|a| a.is_sentinel()));
    }

    #[test]
    fn test_fatal_token_on_stdout_counts_as_untracked() {
        let out = "fatal: this operation must be run in a work tree";
        let got = correlate(true, out, &[7], today()).unwrap();
        assert!(got[0].is_sentinel());
    }

    #[test]
    fn test_out_of_range_request_is_hard_error() {
        let err = correlate(true, &blame_output(), &[99], today()).unwrap_err();
        assert!(matches!(
            err,
            BlameError::LineOutOfRange { line: 99, len: 4 }
        ));
    }

    #[test]
    fn test_unrunnable_git_degrades_to_sentinels() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "git not on PATH");
        let got = resolve(Err(err), &[1, 2], today()).unwrap();
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|a| a.is_sentinel()));
    }

    #[test]
    fn test_timezone_offset_variants() {
        let out = format!("{HASH} (Someone 2025-01-31 00:00:00 +1400 1) text");
        let got = correlate(true, &out, &[1], today()).unwrap();
        assert_eq!(got[0].name, "Someone");
        assert_eq!(got[0].date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }
}
