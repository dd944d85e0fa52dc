//! Preference discovery and the symbol-support wizard.
//!
//! tagsweep keeps one small preference: whether extra unicode symbols are
//! prepended to tag labels. It lives in the platform config directory as
//! `config.toml` (a `config.json` written by earlier versions is still
//! read). Loaders take an explicit base directory so the engine stays
//! testable without touching the real config, and the preference is passed
//! into rendering explicitly rather than read from ambient state.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Persisted display preferences. Affects labels only, never matching or
/// tallying.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub extra_symbols: bool,
}

/// Symbol glyphs shown by the wizard, with readable names.
pub const SYMBOLS: &[(&str, &str)] = &[
    ("✓", "check mark"),
    ("✘", "x mark"),
    ("⚠", "warning sign"),
    ("⚡", "lightning"),
    ("☢", "radioactive sign"),
    ("✐", "pencil"),
    ("✄", "scissors"),
    ("☠", "skull and crossbones"),
];

/// Platform config directory for tagsweep.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tagsweep").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Load preferences from `dir`, trying TOML first and JSON second.
/// Returns `None` when no readable preference file exists.
pub fn load_preferences(dir: &Path) -> Option<Preferences> {
    if let Ok(body) = fs::read_to_string(dir.join("config.toml")) {
        return toml::from_str(&body).ok();
    }
    let body = fs::read_to_string(dir.join("config.json")).ok()?;
    serde_json::from_str(&body).ok()
}

/// Persist preferences as `config.toml` under `dir`.
pub fn store_preferences(dir: &Path, prefs: &Preferences) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let body = toml::to_string(prefs).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(dir.join("config.toml"), body)
}

/// Interactive first-run wizard: show the glyphs, ask whether they render
/// correctly, and persist the answer.
pub fn wizard(dir: &Path) -> io::Result<Preferences> {
    println!("Welcome to the tagsweep configuration wizard!");
    println!("Can you see the following symbols correctly?");
    for (symbol, name) in SYMBOLS {
        println!("{symbol} -> {name}");
    }

    let stdin = io::stdin();
    let support = loop {
        print!("Please choose yes or no [y/n]: ");
        io::stdout().flush()?;
        let mut choice = String::new();
        if stdin.lock().read_line(&mut choice)? == 0 {
            // EOF on stdin; assume plain labels.
            break false;
        }
        match choice.trim().to_ascii_lowercase().as_str() {
            "y" => break true,
            "n" => break false,
            _ => continue,
        }
    };

    if !support {
        println!(
            "no problem, those symbols will not be shown. \
             A font with extra unicode symbol support is still recommended!"
        );
    }

    let prefs = Preferences {
        extra_symbols: support,
    };
    store_preferences(dir, &prefs)?;
    println!("you can run this wizard again with tagsweep --configure");
    Ok(prefs)
}
