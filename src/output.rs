//! Rendering of file reports to the terminal.
//!
//! Three styles: `full` (colors and symbols), `bw` (bold only), and
//! `plain` (machine-friendly). Per-tag styling is a lookup from tag kind
//! to a display record rather than per-tag branching, with a synthetic
//! stale pseudo-tag used to restyle aged authorship. Renderers are pure
//! (they return lines) so the printers stay thin.

use std::collections::BTreeMap;

use owo_colors::{OwoColorize, Style as ColorStyle};

use crate::models::{Entry, FileReport};
use crate::report;

/// Output style selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Full,
    Bw,
    Plain,
}

/// Options threaded from the CLI and preference file into rendering.
/// `extra_symbols` only affects labels, never matching or tallies.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub style: Style,
    pub extra_symbols: bool,
    pub show_author: bool,
    pub show_summary: bool,
}

/// Pseudo-tag keying the display style of stale authorship.
const STALE_TAG: &str = "#OLD";

/// Display record for one tag kind.
struct TagStyle {
    color: ColorStyle,
    symbol: &'static str,
}

fn tag_style(tag: &str) -> TagStyle {
    let (color, symbol) = match tag {
        "TODO" => (ColorStyle::new().cyan(), "✓"),
        "XXX" => (ColorStyle::new().black().on_yellow(), "✘"),
        "FIXME" => (ColorStyle::new().bright_red(), "⚠"),
        "OPTIMIZE" => (ColorStyle::new().yellow(), "⚡"),
        "BUG" => (ColorStyle::new().white().on_red(), "☢"),
        "NOTE" => (ColorStyle::new().green(), "✐"),
        "HACK" => (ColorStyle::new().bright_yellow(), "✄"),
        STALE_TAG => (ColorStyle::new().bold().white().on_bright_red(), "☠"),
        _ => (ColorStyle::new(), "⚠"),
    };
    TagStyle { color, symbol }
}

fn use_colors(style: Style) -> bool {
    style == Style::Full && std::env::var_os("NO_COLOR").is_none()
}

fn use_bold(style: Style) -> bool {
    style != Style::Plain && std::env::var_os("NO_COLOR").is_none()
}

fn paint(text: &str, tag: &str, color: bool) -> String {
    if color {
        format!("{}", text.style(tag_style(tag).color))
    } else {
        text.to_string()
    }
}

fn embolden(text: &str, bold: bool) -> String {
    if bold {
        format!("{}", text.bold())
    } else {
        text.to_string()
    }
}

/// Tag label with the optional unicode symbol prepended.
pub fn label_tag(tag: &str, extra_symbols: bool) -> String {
    if extra_symbols {
        format!("{} {}", tag_style(tag).symbol, tag)
    } else {
        tag.to_string()
    }
}

/// Padded `[Line N]` gutter; `max_digits` is the width of the largest
/// matched line number in the file.
fn pad_line_number(n: u32, max_digits: usize) -> String {
    format!("[Line {:>max_digits$}] ", n)
}

/// Author column: `[Name]` colored like the entry's tag, or the stale form
/// `[OLD Name]` restyled with the stale pseudo-tag. Sentinel authorship
/// renders as nothing.
fn author_label(entry: &Entry, opts: &RenderOptions) -> String {
    let Some(author) = &entry.author else {
        return String::new();
    };
    if author.is_sentinel() {
        return String::new();
    }
    let color = use_colors(opts.style);
    if entry.stale {
        let name = if opts.extra_symbols {
            format!("☠ OLD {}", author.name)
        } else {
            format!("OLD {}", author.name)
        };
        let label = embolden(&format!("[{name}]"), use_bold(opts.style) && !color);
        format!(" {}", paint(&label, STALE_TAG, color))
    } else {
        format!(" {}", paint(&format!("[{}]", author.name), &entry.tag, color))
    }
}

/// Filename header. Plain style prints the bare path; the other styles add
/// a bullet and the raw hit count.
fn render_filename(report: &FileReport, style: Style) -> String {
    match style {
        Style::Plain => report.file.clone(),
        Style::Full | Style::Bw => {
            let head = format!("• {} ({} comments):", report.file, report.hits);
            if use_colors(style) {
                format!("{}", head.blue().bold())
            } else {
                embolden(&head, use_bold(style))
            }
        }
    }
}

/// Summary banner: `[ TAG: n  TAG: m ]` for tags with non-zero counts.
fn render_summary(tally: &BTreeMap<String, usize>, opts: &RenderOptions) -> String {
    let color = use_colors(opts.style);
    let cells: Vec<String> = tally
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(tag, count)| {
            let cell = format!(" {}: {} ", label_tag(tag, opts.extra_symbols), count);
            paint(&cell, tag, color)
        })
        .collect();
    format!("  [{}]", cells.join(" "))
}

/// Plain rendering: the filename, one `\t<TAG>: <text>` line per entry,
/// and a trailing blank line.
pub fn render_plain(report: &FileReport) -> Vec<String> {
    let mut out = Vec::with_capacity(report.entries.len() + 2);
    out.push(report.file.clone());
    for entry in &report.entries {
        out.push(format!("\t{}: {}", entry.tag, entry.text));
    }
    out.push(String::new());
    out
}

/// Render one report in the requested style. Order: filename header,
/// optional summary banner, entries in source order, one blank line.
pub fn render_report(
    report: &FileReport,
    tally: &BTreeMap<String, usize>,
    opts: &RenderOptions,
) -> Vec<String> {
    if opts.style == Style::Plain {
        return render_plain(report);
    }

    let mut out = Vec::with_capacity(report.entries.len() + 3);
    out.push(render_filename(report, opts.style));
    if opts.show_summary && report::wants_summary(tally) {
        out.push(render_summary(tally, opts));
    }

    let max_digits = report
        .entries
        .iter()
        .map(|e| e.line.to_string().len())
        .max()
        .unwrap_or(1);
    let color = use_colors(opts.style);
    let bold = use_bold(opts.style);

    for entry in &report.entries {
        let label = format!(
            "{}: {}",
            embolden(&label_tag(&entry.tag, opts.extra_symbols), bold),
            entry.text
        );
        let mut line = format!(
            "  {}{}",
            pad_line_number(entry.line, max_digits),
            paint(&label, &entry.tag, color)
        );
        if opts.show_author {
            line.push_str(&author_label(entry, opts));
        }
        out.push(line);
    }
    out.push(String::new());
    out
}

/// Print one report to stdout.
pub fn print_report(report: &FileReport, tally: &BTreeMap<String, usize>, opts: &RenderOptions) {
    for line in render_report(report, tally, opts) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::TagMatcher;
    use crate::models::RawHit;
    use crate::report::build_report;
    use chrono::NaiveDate;
    use std::path::Path;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn default_tags() -> Vec<String> {
        ["BUG", "FIXME", "XXX", "TODO", "HACK", "OPTIMIZE", "NOTE"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// The classic mixed-syntax scenario: seven differently decorated tags
    /// in one file must come out as seven clean plain lines in source
    /// order, with a trailing blank line.
    #[test]
    fn test_plain_scan_of_mixed_comment_styles() {
        let matcher = TagMatcher::new(&default_tags()).unwrap();
        let raw_rg_output = "\
7:NOTE this is a note in a multiline comment
14:# TODO type hints
19:# HACK this uses the Dijkstra algorithm
24:    heapq.heapify(queue)  # FIXME don't forget to fix me
34:        # OPTIMIZE this could be optimized
48:    ## # XXX this has an unusual arrangement of # before the comment
51:# BUG I'm not a bug, don't believe them!
";
        let by_file = crate::search::parse_file_output(raw_rg_output, "/tmp/generic_code.py");
        let hits: &Vec<RawHit> = &by_file["/tmp/generic_code.py"];
        let report = build_report(
            Path::new("/tmp/generic_code.py"),
            "generic_code.py",
            hits,
            &matcher,
            false,
            60,
            today(),
        )
        .unwrap();
        let lines = render_plain(&report);
        assert_eq!(
            lines,
            vec![
                "generic_code.py".to_string(),
                "\tNOTE: this is a note in a multiline comment".to_string(),
                "\tTODO: type hints".to_string(),
                "\tHACK: this uses the Dijkstra algorithm".to_string(),
                "\tFIXME: don't forget to fix me".to_string(),
                "\tOPTIMIZE: this could be optimized".to_string(),
                "\tXXX: this has an unusual arrangement of # before the comment".to_string(),
                "\tBUG: I'm not a bug, don't believe them!".to_string(),
                String::new(),
            ]
        );
    }

    #[test]
    fn test_line_number_padding() {
        assert_eq!(pad_line_number(7, 3), "[Line   7] ");
        assert_eq!(pad_line_number(123, 3), "[Line 123] ");
        assert_eq!(pad_line_number(1, 1), "[Line 1] ");
    }

    #[test]
    fn test_label_tag_symbols_are_optional() {
        assert_eq!(label_tag("TODO", false), "TODO");
        assert_eq!(label_tag("TODO", true), "✓ TODO");
        assert_eq!(label_tag("CUSTOM", true), "⚠ CUSTOM");
    }

    #[test]
    fn test_summary_banner_gating() {
        let matcher = TagMatcher::new(&default_tags()).unwrap();
        let opts = RenderOptions {
            style: Style::Bw,
            extra_symbols: false,
            show_author: false,
            show_summary: true,
        };

        let single = vec![
            RawHit { line: 1, text: "# TODO a".into() },
            RawHit { line: 2, text: "# TODO b".into() },
        ];
        let report = build_report(Path::new("x.py"), "x.py", &single, &matcher, false, 60, today())
            .unwrap();
        let tally = crate::report::tally(&report);
        let lines = render_report(&report, &tally, &opts);
        // header + 2 entries + blank, no banner
        assert_eq!(lines.len(), 4);

        let mixed = vec![
            RawHit { line: 1, text: "# TODO a".into() },
            RawHit { line: 2, text: "# BUG b".into() },
        ];
        let report = build_report(Path::new("x.py"), "x.py", &mixed, &matcher, false, 60, today())
            .unwrap();
        let tally = crate::report::tally(&report);
        let lines = render_report(&report, &tally, &opts);
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("TODO: 1"));
        assert!(lines[1].contains("BUG: 1"));
    }

    #[test]
    fn test_sentinel_author_renders_empty() {
        let entry = Entry {
            line: 1,
            tag: "TODO".into(),
            text: "x".into(),
            author: Some(crate::models::AuthorInfo::sentinel(today())),
            stale: false,
        };
        let opts = RenderOptions {
            style: Style::Bw,
            extra_symbols: false,
            show_author: true,
            show_summary: true,
        };
        assert_eq!(author_label(&entry, &opts), "");
    }

    #[test]
    fn test_stale_author_marked_old() {
        let entry = Entry {
            line: 1,
            tag: "TODO".into(),
            text: "x".into(),
            author: Some(crate::models::AuthorInfo {
                name: "Ada".into(),
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            }),
            stale: true,
        };
        let opts = RenderOptions {
            style: Style::Plain,
            extra_symbols: false,
            show_author: true,
            show_summary: true,
        };
        // Plain style never colors; label content is still the OLD form.
        assert!(author_label(&entry, &opts).contains("[OLD Ada]"));
    }
}
