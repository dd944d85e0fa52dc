//! Shared data models for search hits, tag matches, and authorship.

use chrono::NaiveDate;

/// A single matched annotation extracted from one line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub tag: String,
    /// Comment text with delimiter decoration stripped from both ends.
    pub text: String,
}

/// One raw hit emitted by the search tool: a 1-based line number and the
/// unparsed line text. Line numbering agrees with git blame's numbering
/// for the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    pub line: u32,
    pub text: String,
}

/// Authorship of a line as reported by git blame.
///
/// An empty `name` marks the sentinel used when no blame data is
/// available; it carries today's date and is never classified as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInfo {
    pub name: String,
    pub date: NaiveDate,
}

impl AuthorInfo {
    /// Placeholder authorship for lines without usable blame data.
    pub fn sentinel(today: NaiveDate) -> Self {
        AuthorInfo {
            name: String::new(),
            date: today,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty()
    }
}

/// A fully resolved annotation line ready for rendering.
#[derive(Debug, Clone)]
pub struct Entry {
    pub line: u32,
    pub tag: String,
    pub text: String,
    /// `None` when authorship was not requested for this scan.
    pub author: Option<AuthorInfo>,
    pub stale: bool,
}

/// All resolved annotations of one file, in source order. Built once per
/// scanned file, rendered, and discarded.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path as shown to the user (possibly shortened).
    pub file: String,
    pub entries: Vec<Entry>,
    /// Number of raw search hits, including lines that failed tag parsing.
    pub hits: usize,
}
