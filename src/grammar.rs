//! Comment grammar and tag matching.
//!
//! A `TagMatcher` compiles the configured tag keywords into one composite
//! pattern that recognizes annotation comments across heterogeneous comment
//! syntaxes: line comments, block comments, triple-quoted strings, and
//! HTML/template delimiters. The same pattern string is handed to ripgrep,
//! so search hits and re-parsing agree on what constitutes a match.
//!
//! The matcher is built once at startup and never reconstructed per line.

use regex::Regex;
use thiserror::Error;

use crate::models::TagMatch;

/// Comment-opening tokens tolerated (possibly repeated and interleaved
/// with whitespace) before a tag keyword.
const OPENERS: &str = r##"#+|//+|<!--|--|/\*|"""|'''"##;

/// Comment-closing tokens that truncate the captured text.
const CLOSERS: &str = r##"-->|#\}\}|\*/|--\}\}|\}\}|#+|#\}|"""|'''"##;

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("no tags configured")]
    EmptyTagSet,
    #[error("invalid tag {0:?}: tags must be non-empty and contain only word characters")]
    InvalidTag(String),
}

/// Immutable matcher compiled from the configured tag set.
pub struct TagMatcher {
    source: String,
    pattern: Regex,
    cleaner: Regex,
}

impl TagMatcher {
    /// Compile the composite pattern for `tags`.
    ///
    /// Tag identifiers are case-sensitive and must match `^\w+$`; anything
    /// else is a configuration error surfaced before scanning begins.
    pub fn new(tags: &[String]) -> Result<Self, GrammarError> {
        if tags.is_empty() {
            return Err(GrammarError::EmptyTagSet);
        }
        let ident = Regex::new(r"^\w+$").expect("static regex");
        for tag in tags {
            if !ident.is_match(tag) {
                return Err(GrammarError::InvalidTag(tag.clone()));
            }
        }

        // Tag keywords are accepted only at the start of the line or after
        // a word boundary, and must be followed by at least one of
        // `:`, `;`, `-`, or whitespace, so "TODOS" and "mTODO" never match.
        let source = format!(
            r##"(?:^|(?:(?:{op})+\s*)+)\s*(?:^|\b)({tags})[\s:;-]+(.+?)(?:$|{cl})*$"##,
            op = OPENERS,
            cl = CLOSERS,
            tags = tags.join("|"),
        );
        let pattern = Regex::new(&source).expect("composite pattern from validated tags");
        let cleaner = Regex::new(&format!(
            r##"^\s*(?:(?:{op})+\s*)+|(?:(?:{cl})\s*)*$"##,
            op = OPENERS,
            cl = CLOSERS,
        ))
        .expect("static cleaner pattern");

        Ok(TagMatcher {
            source,
            pattern,
            cleaner,
        })
    }

    /// The pattern string, suitable for handing to ripgrep.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Apply the composite pattern to one raw line of search output.
    ///
    /// Returns `None` when the line does not conform to the tag grammar;
    /// the caller decides whether that is a logged warning or a silent
    /// skip. The captured text is cleaned of comment decoration.
    pub fn match_line(&self, raw: &str) -> Option<TagMatch> {
        let caps = self.pattern.captures(raw)?;
        let (tag, text) = match (caps.get(1), caps.get(2)) {
            (Some(tag), Some(text)) => (tag.as_str(), text.as_str()),
            _ => return None,
        };
        Some(TagMatch {
            tag: tag.to_string(),
            text: self.clean(text),
        })
    }

    /// Strip leading/trailing comment decoration from an already-captured
    /// text span. Idempotent: cleaning clean text is a no-op.
    pub fn clean(&self, text: &str) -> String {
        self.cleaner.replace_all(text, "").trim().to_string()
    }
}
