//! Problem data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Problem difficulty as reported by the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

/// A problem row returned by a search.
///
/// The identifier is kept as the decimal string the remote supplied: prefix
/// search is a string-prefix test over digits ("8" matches 8, 80, 800 but
/// not 18), so it must never round-trip through an integer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemSummary {
    /// Frontend problem number as a decimal string
    pub identifier: String,

    /// Problem display title
    pub title: String,

    /// Canonical URL slug
    pub canonical_slug: String,

    /// Difficulty rating
    pub difficulty: Difficulty,

    /// Whether the problem is behind the paid tier
    pub paid_only: bool,
}

/// A fully resolved problem record, ready for editor insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemRecord {
    /// Frontend problem number
    pub identifier: u32,

    /// Problem display title
    pub title: String,

    /// Plain-text description with the Examples section removed
    pub description: String,

    /// Difficulty rating
    pub difficulty: Difficulty,

    /// Code skeleton with auxiliary definition blocks un-commented
    pub code_template: String,
}

impl ProblemRecord {
    /// Format the record for display using a template.
    ///
    /// Supported placeholders:
    /// - `{identifier}`, `{title}`, `{difficulty}`
    /// - `{description}`, `{code}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{identifier}", &self.identifier.to_string())
            .replace("{title}", &self.title)
            .replace("{difficulty}", &self.difficulty.to_string())
            .replace("{description}", &self.description)
            .replace("{code}", &self.code_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProblemRecord {
        ProblemRecord {
            identifier: 1,
            title: "Two Sum".to_string(),
            description: "Given an array of integers...".to_string(),
            difficulty: Difficulty::Easy,
            code_template: "class Solution:\n    pass".to_string(),
        }
    }

    #[test]
    fn test_format() {
        let record = sample_record();
        let result = record.format("{identifier}. {title} [{difficulty}]");
        assert_eq!(result, "1. Two Sum [Easy]");
    }

    #[test]
    fn test_format_body_placeholders() {
        let record = sample_record();
        let result = record.format("{description}\n\n{code}");
        assert_eq!(
            result,
            "Given an array of integers...\n\nclass Solution:\n    pass"
        );
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_difficulty_deserialize() {
        let d: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
    }
}
