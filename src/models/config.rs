//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and search behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.endpoint.trim().is_empty() {
            return Err(AppError::validation("crawler.endpoint is empty"));
        }
        url::Url::parse(&self.crawler.endpoint)
            .map_err(|e| AppError::validation(format!("crawler.endpoint is not a URL: {e}")))?;
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.page_size == 0 {
            return Err(AppError::validation("crawler.page_size must be > 0"));
        }
        if self.crawler.max_page_requests == 0 {
            return Err(AppError::validation(
                "crawler.max_page_requests must be > 0",
            ));
        }
        if self.crawler.language_slug.trim().is_empty() {
            return Err(AppError::validation("crawler.language_slug is empty"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(AppError::validation("cache.ttl_secs must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client and search behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// GraphQL endpoint URL
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Listing page size for prefix probing
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Hard cap on listing requests per prefix search
    #[serde(default = "defaults::max_page_requests")]
    pub max_page_requests: usize,

    /// Highest problem number the offset probes aim for
    #[serde(default = "defaults::probe_ceiling")]
    pub probe_ceiling: u64,

    /// Remote limit for keyword searches combined with a number prefix
    #[serde(default = "defaults::keyword_search_limit")]
    pub keyword_search_limit: usize,

    /// Language slug of the code template to extract
    #[serde(default = "defaults::language_slug")]
    pub language_slug: String,

    /// Display name of that language, as the remote tags it
    #[serde(default = "defaults::language_name")]
    pub language_name: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
            max_page_requests: defaults::max_page_requests(),
            probe_ceiling: defaults::probe_ceiling(),
            keyword_search_limit: defaults::keyword_search_limit(),
            language_slug: defaults::language_slug(),
            language_name: defaults::language_name(),
        }
    }
}

/// Result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached search results and records, in seconds
    #[serde(default = "defaults::cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::cache_ttl(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn endpoint() -> String {
        "https://leetcode.com/graphql/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> usize {
        200
    }
    pub fn max_page_requests() -> usize {
        8
    }
    pub fn probe_ceiling() -> u64 {
        4000
    }
    pub fn keyword_search_limit() -> usize {
        50
    }
    pub fn language_slug() -> String {
        "python3".into()
    }
    pub fn language_name() -> String {
        "Python3".into()
    }

    // Cache defaults
    pub fn cache_ttl() -> u64 {
        300
    }
}
