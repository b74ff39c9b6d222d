// src/services/crawler.rs

//! Top-level problem crawler.
//!
//! Parses free-form queries, dispatches to the search strategies, resolves
//! selections into full problem records, and caches both behind a TTL.

use std::sync::Arc;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::error::{AppError, Result};
use crate::models::{Config, ParsedQuery, ProblemRecord, ProblemSummary};
use crate::text::{normalize_description, unmask_definitions};
use crate::utils::title_to_slug;

use super::client::{GraphqlClient, QuestionDetail, Transport};
use super::search;

/// Service for searching and fetching problems.
pub struct ProblemCrawler {
    config: Arc<Config>,
    client: GraphqlClient,
    search_cache: TtlCache<Vec<ProblemSummary>>,
    record_cache: TtlCache<ProblemRecord>,
}

impl ProblemCrawler {
    /// Create a crawler over the production HTTP transport.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = GraphqlClient::new(&config.crawler)?;
        Ok(Self::assemble(config, client, Arc::new(SystemClock)))
    }

    /// Create a crawler over a custom transport and clock.
    pub fn with_transport(
        config: Arc<Config>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::assemble(config, GraphqlClient::from_transport(transport), clock)
    }

    fn assemble(config: Arc<Config>, client: GraphqlClient, clock: Arc<dyn Clock>) -> Self {
        let ttl = config.cache.ttl_secs;
        Self {
            client,
            search_cache: TtlCache::new(ttl, clock.clone()),
            record_cache: TtlCache::new(ttl, clock),
            config,
        }
    }

    /// Search for problems matching a free-form query.
    ///
    /// The query may be a bare number ("8"), a title ("two sum"), or the
    /// combined form ("1. Two Sum"). Results are ascending by problem
    /// number. Never fails: any remote failure is logged and degrades to an
    /// empty list, since a lookup box must not take the caller down.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<ProblemSummary> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let key = format!("search:{}:{}", limit, trimmed);
        if let Some(hit) = self.search_cache.get(&key) {
            return hit;
        }

        match self.dispatch_search(trimmed, limit).await {
            Ok(results) => {
                self.search_cache.insert(key, results.clone());
                results
            }
            Err(error) => {
                log::warn!("Search failed for '{}': {}", trimmed, error);
                Vec::new()
            }
        }
    }

    async fn dispatch_search(&self, query: &str, limit: usize) -> Result<Vec<ProblemSummary>> {
        let parsed = ParsedQuery::parse(query);
        let crawler_cfg = &self.config.crawler;

        match (parsed.number_prefix.as_deref(), parsed.keywords.as_deref()) {
            (Some(prefix), None) => {
                search::by_prefix(&self.client, crawler_cfg, prefix, limit).await
            }
            (Some(prefix), Some(keywords)) => {
                search::by_keywords_with_prefix(&self.client, crawler_cfg, keywords, prefix, limit)
                    .await
            }
            (None, Some(keywords)) => search::by_keywords(&self.client, keywords, limit).await,
            (None, None) => Ok(Vec::new()),
        }
    }

    /// Fetch the full record for a problem.
    ///
    /// Tries the provided slug first; when the remote reports no such
    /// entity and the title-derived slug differs, retries once with it.
    /// Fails with `NotFound` or `TemplateUnavailable`; transport failures
    /// on the primary attempt surface as-is.
    pub async fn fetch(
        &self,
        identifier: u32,
        title: &str,
        slug: Option<&str>,
    ) -> Result<ProblemRecord> {
        let derived = title_to_slug(title);
        let primary = slug.map(str::to_string).unwrap_or_else(|| derived.clone());

        if let Some(hit) = self.record_cache.get(&primary) {
            return Ok(hit);
        }

        let (detail, resolved_slug) = self
            .resolve_detail(identifier, title, &primary, &derived)
            .await?;
        let record = self.assemble_record(identifier, title, detail)?;

        self.record_cache.insert(resolved_slug.clone(), record.clone());
        if resolved_slug != primary {
            self.record_cache.insert(primary, record.clone());
        }
        Ok(record)
    }

    async fn resolve_detail(
        &self,
        identifier: u32,
        title: &str,
        primary: &str,
        derived: &str,
    ) -> Result<(QuestionDetail, String)> {
        if let Some(detail) = self.client.question_detail(primary).await? {
            return Ok((detail, primary.to_string()));
        }

        if derived != primary {
            // One retry with the title-derived slug; a transport failure
            // here folds into the not-found outcome.
            if let Ok(Some(detail)) = self.client.question_detail(derived).await {
                return Ok((detail, derived.to_string()));
            }
            return Err(AppError::not_found(title, identifier, derived));
        }

        Err(AppError::not_found(title, identifier, primary))
    }

    fn assemble_record(
        &self,
        identifier: u32,
        title: &str,
        detail: QuestionDetail,
    ) -> Result<ProblemRecord> {
        let crawler_cfg = &self.config.crawler;
        let snippet = detail
            .code_snippets
            .iter()
            .find(|s| {
                s.lang_slug == crawler_cfg.language_slug || s.lang == crawler_cfg.language_name
            })
            .ok_or_else(|| {
                AppError::template_unavailable(title, crawler_cfg.language_name.clone())
            })?;

        let description = normalize_description(detail.content.as_deref().unwrap_or_default());
        let resolved_id = detail.question_id.parse::<u32>().unwrap_or(identifier);

        Ok(ProblemRecord {
            identifier: resolved_id,
            title: detail.title.clone(),
            description,
            difficulty: detail.difficulty,
            code_template: unmask_definitions(&snippet.code),
        })
    }

    /// Drop all cached search results and records.
    pub fn invalidate_cache(&self) {
        self.search_cache.clear();
        self.record_cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    use crate::cache::testing::FakeClock;
    use crate::error::Result as AppResult;
    use crate::models::Difficulty;
    use crate::services::client::testing::*;

    use super::*;

    const TWO_SUM_CONTENT: &str = concat!(
        "<p>Given an array of integers <code>nums</code>, find two that sum ",
        "to <code>target</code>.</p>",
        "<p><strong>Example 1:</strong></p>",
        "<pre><strong>Input:</strong> nums = [2,7]\n<strong>Output:</strong> [0,1]</pre>",
        "<p><strong>Constraints:</strong></p>",
        "<ul><li><code>2 &lt;= nums.length</code></li></ul>",
    );

    const TWO_SUM_TEMPLATE: &str = "\
# Definition for a binary tree node.
# class TreeNode:
#     def __init__(self, val=0):
#         self.val = val
class Solution:
    def twoSum(self, nums: List[int], target: int) -> List[int]:
        pass
";

    fn harness(responses: Vec<AppResult<Value>>) -> (ProblemCrawler, Arc<FakeTransport>, Arc<FakeClock>) {
        let transport = Arc::new(FakeTransport::new(responses));
        let clock = Arc::new(FakeClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        let crawler = ProblemCrawler::with_transport(
            Arc::new(Config::default()),
            transport.clone(),
            clock.clone(),
        );
        (crawler, transport, clock)
    }

    fn two_sum_detail() -> Value {
        detail_response(
            "1",
            "Two Sum",
            TWO_SUM_CONTENT,
            vec![python_snippet(TWO_SUM_TEMPLATE)],
        )
    }

    #[tokio::test]
    async fn test_search_by_number_prefix() {
        let (crawler, transport, _) = harness(vec![
            Ok(page_response(vec![
                row("18", "4Sum", "4sum"),
                row("8", "String to Integer", "string-to-integer-atoi"),
                row("80", "Remove Duplicates II", "remove-duplicates-ii"),
            ])),
            Ok(page_response(vec![])),
        ]);

        let results = crawler.search("8", 10).await;
        let ids: Vec<&str> = results.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["8", "80"]);
        assert!(transport.call_count() >= 1);
    }

    #[tokio::test]
    async fn test_search_results_cached_within_ttl() {
        let (crawler, transport, clock) = harness(vec![
            Ok(page_response(vec![row("1", "Two Sum", "two-sum")])),
            Ok(page_response(vec![row("1", "Two Sum", "two-sum")])),
        ]);

        let first = crawler.search("two sum", 10).await;
        let calls_after_first = transport.call_count();
        let second = crawler.search("two sum", 10).await;

        assert_eq!(first, second);
        assert_eq!(transport.call_count(), calls_after_first);

        // Past the TTL the remote is asked again.
        clock.advance(301);
        crawler.search("two sum", 10).await;
        assert_eq!(transport.call_count(), calls_after_first + 1);
    }

    #[tokio::test]
    async fn test_search_different_limit_is_not_a_cache_hit() {
        let (crawler, transport, _) = harness(vec![
            Ok(page_response(vec![row("1", "Two Sum", "two-sum")])),
            Ok(page_response(vec![row("1", "Two Sum", "two-sum")])),
        ]);

        crawler.search("two sum", 10).await;
        crawler.search("two sum", 5).await;
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_search_swallows_remote_failure() {
        let (crawler, _, _) = harness(vec![Err(AppError::validation("scripted failure"))]);
        assert!(crawler.search("two sum", 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_not_cached() {
        let (crawler, transport, _) = harness(vec![
            Err(AppError::validation("scripted failure")),
            Ok(page_response(vec![row("1", "Two Sum", "two-sum")])),
        ]);

        assert!(crawler.search("two sum", 10).await.is_empty());
        let results = crawler.search("two sum", 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let (crawler, transport, _) = harness(vec![]);
        assert!(crawler.search("   ", 10).await.is_empty());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_prefix_with_keywords_falls_back() {
        let (crawler, _, _) = harness(vec![Ok(page_response(vec![row(
            "84",
            "Largest Rectangle in Histogram",
            "largest-rectangle-in-histogram",
        )]))]);

        // No id starts with "9"; title relevance wins over the prefix.
        let results = crawler.search("9. histogram", 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].identifier, "84");
    }

    #[tokio::test]
    async fn test_fetch_assembles_record() {
        let (crawler, transport, _) = harness(vec![Ok(two_sum_detail())]);

        let record = crawler.fetch(1, "Two Sum", None).await.unwrap();
        assert_eq!(record.identifier, 1);
        assert_eq!(record.title, "Two Sum");
        assert_eq!(record.difficulty, Difficulty::Easy);

        // Examples removed, constraints kept, entities decoded.
        assert!(!record.description.contains("Example"));
        assert!(!record.description.contains("Input:"));
        assert!(record.description.contains("Constraints:"));
        assert!(record.description.contains("2 <= nums.length"));

        // Definition block is live code; the solution stub is untouched.
        assert!(record.code_template.contains("\nclass TreeNode:"));
        assert!(record.code_template.contains("\n    def __init__(self, val=0):"));
        assert!(record.code_template.starts_with("# Definition for"));

        assert_eq!(
            transport.variables_of_call(0)["titleSlug"],
            Value::String("two-sum".into())
        );
    }

    #[tokio::test]
    async fn test_fetch_retries_with_derived_slug() {
        let (crawler, transport, _) = harness(vec![
            Ok(absent_detail_response()),
            Ok(two_sum_detail()),
        ]);

        let record = crawler
            .fetch(1, "Two Sum", Some("stale-slug"))
            .await
            .unwrap();
        assert_eq!(record.title, "Two Sum");
        assert_eq!(transport.call_count(), 2);
        assert_eq!(
            transport.variables_of_call(0)["titleSlug"],
            Value::String("stale-slug".into())
        );
        assert_eq!(
            transport.variables_of_call(1)["titleSlug"],
            Value::String("two-sum".into())
        );
    }

    #[tokio::test]
    async fn test_fetch_not_found_names_last_slug() {
        let (crawler, _, _) = harness(vec![
            Ok(absent_detail_response()),
            Ok(absent_detail_response()),
        ]);

        let error = crawler
            .fetch(1, "Two Sum", Some("stale-slug"))
            .await
            .unwrap_err();
        match error {
            AppError::NotFound {
                title,
                identifier,
                slug,
            } => {
                assert_eq!(title, "Two Sum");
                assert_eq!(identifier, 1);
                assert_eq!(slug, "two-sum");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found_without_fallback_candidate() {
        let (crawler, transport, _) = harness(vec![Ok(absent_detail_response())]);

        let error = crawler.fetch(1, "Two Sum", None).await.unwrap_err();
        assert!(matches!(error, AppError::NotFound { .. }));
        // Derived slug equals the attempted slug, so no retry happened.
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_template_unavailable() {
        let (crawler, _, _) = harness(vec![Ok(detail_response(
            "1",
            "Two Sum",
            "<p>desc</p>",
            vec![serde_json::json!({
                "lang": "C++", "langSlug": "cpp", "code": "class Solution {};"
            })],
        ))]);

        let error = crawler.fetch(1, "Two Sum", None).await.unwrap_err();
        assert!(matches!(error, AppError::TemplateUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_fetch_cached_within_ttl() {
        let (crawler, transport, clock) = harness(vec![
            Ok(two_sum_detail()),
            Ok(two_sum_detail()),
        ]);

        crawler.fetch(1, "Two Sum", None).await.unwrap();
        crawler.fetch(1, "Two Sum", None).await.unwrap();
        assert_eq!(transport.call_count(), 1);

        clock.advance(301);
        crawler.fetch(1, "Two Sum", None).await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_cache_forces_refetch() {
        let (crawler, transport, _) = harness(vec![
            Ok(two_sum_detail()),
            Ok(two_sum_detail()),
        ]);

        crawler.fetch(1, "Two Sum", None).await.unwrap();
        crawler.invalidate_cache();
        crawler.fetch(1, "Two Sum", None).await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_falls_back_to_caller_identifier() {
        let (crawler, _, _) = harness(vec![Ok(detail_response(
            "not-numeric",
            "Two Sum",
            "<p>desc</p>",
            vec![python_snippet("class Solution:\n    pass\n")],
        ))]);

        let record = crawler.fetch(42, "Two Sum", None).await.unwrap();
        assert_eq!(record.identifier, 42);
    }
}
