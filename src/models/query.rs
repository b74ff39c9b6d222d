//! Free-form query parsing.
//!
//! A query can be a bare number ("1"), a bare title ("Two Sum"), or the
//! combined picker form ("1. Two Sum").

use regex::Regex;

/// A raw query split into its numeric-prefix and keyword parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Leading digits, kept as a string for prefix matching
    pub number_prefix: Option<String>,

    /// Title keywords, if any
    pub keywords: Option<String>,
}

impl ParsedQuery {
    /// Parse a raw query string.
    ///
    /// Precedence: `^(\d+)\.?\s*(.+)?$` splits off a leading number and an
    /// optional title remainder; a purely numeric input is a bare prefix;
    /// anything else is keywords.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        let pattern = Regex::new(r"^(\d+)\.?\s*(.+)?$").expect("valid query pattern");
        if let Some(caps) = pattern.captures(trimmed) {
            let number_prefix = caps.get(1).map(|m| m.as_str().to_string());
            let keywords = caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty());
            return Self {
                number_prefix,
                keywords,
            };
        }

        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Self {
                number_prefix: Some(trimmed.to_string()),
                keywords: None,
            };
        }

        Self {
            number_prefix: None,
            keywords: Some(trimmed.to_string()),
        }
    }
}
