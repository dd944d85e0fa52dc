//! Stderr prefix helpers shared by the binary.

use owo_colors::OwoColorize;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal errors printed to stderr.
pub fn error_prefix() -> String {
    if colors_enabled() {
        format!("{}", "✖ error:".red().bold())
    } else {
        "✖ error:".to_string()
    }
}

/// Prefix for friendly notes printed to stderr.
pub fn note_prefix() -> String {
    if colors_enabled() {
        format!("{}", "◆ note:".blue().bold())
    } else {
        "◆ note:".to_string()
    }
}
