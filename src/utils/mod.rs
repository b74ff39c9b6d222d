//! Utility functions and helpers.

pub mod http;

use std::sync::OnceLock;

use regex::Regex;

/// Derive the canonical URL slug from a problem title.
///
/// Lowercase, runs of non-alphanumeric characters collapse to a single
/// hyphen, leading and trailing hyphens are trimmed.
pub fn title_to_slug(title: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let non_alnum = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid pattern"));

    let lowered = title.to_lowercase();
    non_alnum
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
