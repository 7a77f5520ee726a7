//! Utility functions for common operations.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());

/// Slugify a string for branch names
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    SEPARATOR_RUNS
        .replace_all(&kept, "-")
        .trim_matches('-')
        .to_string()
}
