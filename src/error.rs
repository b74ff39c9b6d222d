// src/error.rs

//! Unified error handling for the crawler.

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (connection, timeout, non-2xx status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Problem lookup came back empty after all slug candidates
    #[error("Problem \"{title}\" ({identifier}) not found with slug '{slug}'. Verify the name matches the exact problem title.")]
    NotFound {
        title: String,
        identifier: u32,
        slug: String,
    },

    /// Problem exists but carries no code template for the target language
    #[error("No {language} code template available for problem: {title}")]
    TemplateUnavailable { title: String, language: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error naming the attempted lookup.
    pub fn not_found(title: impl Into<String>, identifier: u32, slug: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
            identifier,
            slug: slug.into(),
        }
    }

    /// Create a template-unavailable error.
    pub fn template_unavailable(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self::TemplateUnavailable {
            title: title.into(),
            language: language.into(),
        }
    }
}
