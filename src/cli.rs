//! CLI argument parsing via `clap`.

use clap::Parser;

use crate::output::Style;

/// Default tag set, matching the annotations most tooling recognizes.
pub const DEFAULT_TAGS: &[&str] = &["BUG", "FIXME", "XXX", "TODO", "HACK", "OPTIMIZE", "NOTE"];

#[derive(Parser)]
#[command(
    name = "tagsweep",
    version,
    about = "List annotation comments (TODO, FIXME, BUG, ...) with git authorship",
    long_about = "tagsweep — scan a file or folder for annotation comments across arbitrary comment syntaxes and report each match with the author and age of its last change.\n\nRequires ripgrep (rg) on PATH; git is only needed for authorship info.",
    after_help = "Examples:\n  tagsweep src/\n  tagsweep src/ --tags TODO FIXME --glob '*.py'\n  tagsweep main.rs --plain --no-author\n  tagsweep . --age-limit 90 --bw"
)]
/// Top-level CLI options.
pub struct Cli {
    /// Path to the folder or file to scan. Folder search is recursive.
    #[arg(default_value = ".")]
    pub path: String,

    /// Tags to search for (word characters only, case-sensitive)
    #[arg(long, short = 'T', num_args = 1.., default_values_t = DEFAULT_TAGS.iter().map(|s| s.to_string()))]
    pub tags: Vec<String>,

    /// Glob to include/exclude files, ripgrep syntax (quote it)
    #[arg(long, short = 'g')]
    pub glob: Option<String>,

    /// Age limit in days; entries older than this are marked OLD
    #[arg(long, short = 'l', default_value_t = 60)]
    pub age_limit: u32,

    /// Log skipped lines and other recoverable parse warnings
    #[arg(long, short = 'v', action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Show full file paths instead of paths relative to the scan root
    #[arg(long, short = 'R', action = clap::ArgAction::SetTrue)]
    pub full_path: bool,

    /// Show paths relative to the scan root (the default)
    #[arg(long, short = 'r', action = clap::ArgAction::SetTrue, conflicts_with = "full_path")]
    pub relative_path: bool,

    /// Hide git author info
    #[arg(long, short = 'A', action = clap::ArgAction::SetTrue)]
    pub no_author: bool,

    /// Show git author info (the default)
    #[arg(long, short = 'a', action = clap::ArgAction::SetTrue, conflicts_with = "no_author")]
    pub author: bool,

    /// Hide per-file tag summaries
    #[arg(long, short = 'S', action = clap::ArgAction::SetTrue)]
    pub no_summary: bool,

    /// Show per-file tag summaries (the default)
    #[arg(long, short = 's', action = clap::ArgAction::SetTrue, conflicts_with = "no_summary")]
    pub summary: bool,

    /// Full colored output (the default)
    #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with_all = ["bw", "plain"])]
    pub full: bool,

    /// Black-and-white output (no colors, bold only)
    #[arg(long, short = 'b', action = clap::ArgAction::SetTrue, conflicts_with = "plain")]
    pub bw: bool,

    /// Plain machine-friendly output (implies no author info)
    #[arg(long, short = 'p', action = clap::ArgAction::SetTrue)]
    pub plain: bool,

    /// Re-run the symbol-support wizard and exit
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub configure: bool,
}

impl Cli {
    /// Resolve the mutually exclusive style flags; full is the default.
    pub fn style(&self) -> Style {
        if self.plain {
            Style::Plain
        } else if self.bw {
            Style::Bw
        } else {
            Style::Full
        }
    }

    /// Default log filter for the binary. Recoverable per-line parse
    /// warnings surface only with `--verbose`; a quiet run reports
    /// errors alone.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "error"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["tagsweep"]);
        assert_eq!(cli.path, ".");
        assert_eq!(cli.tags, DEFAULT_TAGS);
        assert_eq!(cli.age_limit, 60);
        assert_eq!(cli.style(), Style::Full);
        assert!(!cli.no_author);
    }

    #[test]
    fn test_style_flags() {
        let cli = Cli::parse_from(["tagsweep", "--plain"]);
        assert_eq!(cli.style(), Style::Plain);
        let cli = Cli::parse_from(["tagsweep", "-b"]);
        assert_eq!(cli.style(), Style::Bw);
        assert!(Cli::try_parse_from(["tagsweep", "-b", "-p"]).is_err());
    }

    #[test]
    fn test_positive_flags_restate_defaults() {
        let cli = Cli::parse_from(["tagsweep", "-r", "-a", "-s", "--full"]);
        assert_eq!(cli.style(), Style::Full);
        assert!(!cli.full_path);
        assert!(!cli.no_author);
        assert!(!cli.no_summary);
    }

    #[test]
    fn test_opposite_flags_conflict() {
        assert!(Cli::try_parse_from(["tagsweep", "-r", "-R"]).is_err());
        assert!(Cli::try_parse_from(["tagsweep", "-a", "-A"]).is_err());
        assert!(Cli::try_parse_from(["tagsweep", "-s", "-S"]).is_err());
        assert!(Cli::try_parse_from(["tagsweep", "--full", "--bw"]).is_err());
        assert!(Cli::try_parse_from(["tagsweep", "--full", "--plain"]).is_err());
    }

    #[test]
    fn test_log_filter_tracks_verbosity() {
        let cli = Cli::parse_from(["tagsweep"]);
        assert_eq!(cli.log_filter(), "error");
        let cli = Cli::parse_from(["tagsweep", "-v"]);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_tags_override() {
        let cli = Cli::parse_from(["tagsweep", "src", "--tags", "TODO", "WIP"]);
        assert_eq!(cli.path, "src");
        assert_eq!(cli.tags, vec!["TODO", "WIP"]);
    }
}
