//! tagsweep binary entry point.
//! Wires the search, blame, and rendering modules together and maps
//! errors to exit codes (2 = configuration, 1 = collaborator failure).

use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use rayon::prelude::*;

use tagsweep::blame::BlameError;
use tagsweep::cli::Cli;
use tagsweep::config::{self, Preferences};
use tagsweep::grammar::TagMatcher;
use tagsweep::models::{FileReport, RawHit};
use tagsweep::output::{self, RenderOptions, Style};
use tagsweep::{report, search, utils};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let config_dir = config::config_dir();
    if cli.configure {
        let Some(dir) = config_dir.as_deref() else {
            eprintln!("{} {}", utils::error_prefix(), "no config directory found");
            exit(2);
        };
        if let Err(e) = config::wizard(dir) {
            eprintln!("{} configuration wizard failed: {}", utils::error_prefix(), e);
            exit(2);
        }
        return;
    }

    // First run: ask about symbol support once, then persist the answer.
    let prefs = match config_dir.as_deref().and_then(config::load_preferences) {
        Some(prefs) => prefs,
        None => match config_dir.as_deref().map(config::wizard) {
            Some(Ok(prefs)) => prefs,
            _ => {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "could not persist preferences; continuing without extra symbols"
                );
                Preferences::default()
            }
        },
    };

    let matcher = match TagMatcher::new(&cli.tags) {
        Ok(matcher) => matcher,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            exit(2);
        }
    };

    let root: PathBuf = match std::fs::canonicalize(&cli.path) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{} cannot scan {}: {}", utils::error_prefix(), cli.path, e);
            exit(2);
        }
    };

    let raw = match search::run_ripgrep(matcher.pattern(), &root, cli.glob.as_deref()) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            exit(1);
        }
    };

    let by_file = if root.is_dir() {
        search::parse_folder_output(&raw)
    } else {
        search::parse_file_output(&raw, &root.to_string_lossy())
    };

    let style = cli.style();
    let opts = RenderOptions {
        style,
        extra_symbols: prefs.extra_symbols,
        show_author: !cli.no_author,
        show_summary: !cli.no_summary,
    };
    // Plain output carries no author column, so skip the blame invocations.
    let with_author = !cli.no_author && style != Style::Plain;
    let today = chrono::Local::now().date_naive();

    // BTreeMap iteration is already in file-path sort order. Reports are
    // built in parallel (one blame invocation each) and printed
    // sequentially in that same order.
    let files: Vec<(&String, &Vec<RawHit>)> = by_file.iter().collect();
    let reports: Vec<Result<FileReport, BlameError>> = files
        .par_iter()
        .map(|(file, hits)| {
            let path = Path::new(file.as_str());
            let display = display_name(path, &root, cli.full_path);
            report::build_report(
                path,
                &display,
                hits,
                &matcher,
                with_author,
                cli.age_limit,
                today,
            )
        })
        .collect();

    for result in reports {
        match result {
            Ok(file_report) => {
                let tally = report::tally(&file_report);
                output::print_report(&file_report, &tally, &opts);
            }
            Err(e) => {
                eprintln!("{} {}", utils::error_prefix(), e);
                exit(1);
            }
        }
    }
}

/// Shorten the displayed path relative to the scan root unless the full
/// path was requested. A single-file scan falls back to the file name.
fn display_name(path: &Path, root: &Path, full_path: bool) -> String {
    if full_path {
        return path.display().to_string();
    }
    match pathdiff::diff_paths(path, root) {
        Some(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    }
}
