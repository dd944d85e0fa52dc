//! Per-file aggregation and the staleness policy.
//!
//! Turns one file's raw search hits into a `FileReport`: each hit is
//! re-parsed through the tag grammar, correlated with blame authorship,
//! and classified as stale when older than the age limit. Tallies feed
//! the per-file summary banner.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Duration, NaiveDate};

use crate::blame::{self, BlameError};
use crate::grammar::TagMatcher;
use crate::models::{AuthorInfo, Entry, FileReport, RawHit};

/// True when `author` is older than the age limit.
///
/// The boundary day itself is not stale, and the sentinel (no
/// attribution) is never stale regardless of the limit.
pub fn is_stale(author: &AuthorInfo, age_limit_days: u32, today: NaiveDate) -> bool {
    if author.is_sentinel() {
        return false;
    }
    author.date < today - Duration::days(i64::from(age_limit_days))
}

/// Build the report for one file from its raw search hits.
///
/// Hits that fail the tag grammar are logged as recoverable warnings and
/// skipped; they still count toward the raw hit total shown in the
/// filename header. Blame is invoked once per file, and only when
/// authorship was requested.
pub fn build_report(
    file: &Path,
    display_name: &str,
    hits: &[RawHit],
    matcher: &TagMatcher,
    with_author: bool,
    age_limit_days: u32,
    today: NaiveDate,
) -> Result<FileReport, BlameError> {
    let authors = if with_author && !hits.is_empty() {
        let lines: Vec<u32> = hits.iter().map(|h| h.line).collect();
        Some(blame::blame_lines(file, &lines, today)?)
    } else {
        None
    };

    let mut entries = Vec::with_capacity(hits.len());
    for (i, hit) in hits.iter().enumerate() {
        let Some(found) = matcher.match_line(&hit.text) else {
            log::warn!(
                "line could not be parsed: {}:{}: {}",
                file.display(),
                hit.line,
                hit.text
            );
            continue;
        };
        let author = authors.as_ref().map(|a| a[i].clone());
        let stale = author
            .as_ref()
            .map(|a| is_stale(a, age_limit_days, today))
            .unwrap_or(false);
        entries.push(Entry {
            line: hit.line,
            tag: found.tag,
            text: found.text,
            author,
            stale,
        });
    }

    Ok(FileReport {
        file: display_name.to_string(),
        entries,
        hits: hits.len(),
    })
}

/// Count matched tags per kind. Entries that failed grammar matching never
/// reach the report, so they are excluded by construction.
pub fn tally(report: &FileReport) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in &report.entries {
        *counts.entry(entry.tag.clone()).or_default() += 1;
    }
    counts
}

/// A summary banner is worth emitting only when more than one distinct
/// tag kind has a non-zero count. Display-noise reduction, not a
/// correctness rule.
pub fn wants_summary(tally: &BTreeMap<String, usize>) -> bool {
    tally.values().filter(|&&count| count > 0).count() > 1
}
