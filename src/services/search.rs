// src/services/search.rs

//! Problem search strategies.
//!
//! The listing endpoint supports only offset+limit pagination with keyword
//! filtering; there is no "starts-with" filter over problem numbers. Numeric
//! prefix lookups are reconstructed by probing computed offsets and
//! filtering the merged pages. This is a covering heuristic, not a complete
//! index: it relies on the listing being ordered by ascending number with
//! matching runs locally dense near the probed offsets.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{CrawlerConfig, ProblemSummary};

use super::client::{GraphqlClient, QuestionRow};

/// How far before a predicted run an offset probe lands.
const PROBE_LOOKBACK: u64 = 20;

fn summary_from_row(row: QuestionRow) -> ProblemSummary {
    ProblemSummary {
        identifier: row.frontend_question_id,
        title: row.title,
        canonical_slug: row.title_slug,
        difficulty: row.difficulty,
        paid_only: row.paid_only,
    }
}

/// Sort rows ascending by numeric identifier; unparseable identifiers last.
fn sort_by_identifier(rows: &mut [QuestionRow]) {
    rows.sort_by_key(|row| {
        row.frontend_question_id
            .parse::<u64>()
            .unwrap_or(u64::MAX)
    });
}

/// Page offsets likely to land just before runs of identifiers starting
/// with the prefix: the listing head, the prefix itself, and each
/// power-of-ten multiple up to the probe ceiling, each backed off by the
/// lookback. Deduplicated, ascending.
pub(crate) fn probe_offsets(prefix_value: u64, ceiling: u64) -> Vec<usize> {
    let mut offsets = vec![0, prefix_value.saturating_sub(PROBE_LOOKBACK)];

    let mut multiplier = 10u64;
    while prefix_value.saturating_mul(multiplier) <= ceiling {
        offsets.push((prefix_value * multiplier).saturating_sub(PROBE_LOOKBACK));
        multiplier *= 10;
    }

    offsets.sort_unstable();
    offsets.dedup();
    offsets.into_iter().map(|o| o as usize).collect()
}

/// Find all problems whose decimal number starts with `prefix`.
pub(crate) async fn by_prefix(
    client: &GraphqlClient,
    config: &CrawlerConfig,
    prefix: &str,
    limit: usize,
) -> Result<Vec<ProblemSummary>> {
    let Ok(prefix_value) = prefix.parse::<u64>() else {
        return Ok(Vec::new());
    };
    let offsets = probe_offsets(prefix_value, config.probe_ceiling);

    let mut rows: Vec<QuestionRow> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut requests = 0usize;

    // Sequential on purpose: an empty page means the probe ran past the end
    // of the listing, and every later offset would land there too.
    for skip in offsets {
        if requests >= config.max_page_requests {
            break;
        }
        let page = match client.question_page(None, skip, config.page_size).await {
            Ok(page) => page,
            Err(error) => {
                log::warn!("Prefix probe at offset {} failed: {}", skip, error);
                continue;
            }
        };
        requests += 1;

        if page.is_empty() {
            break;
        }
        for row in page {
            if seen.insert(row.frontend_question_id.clone()) {
                rows.push(row);
            }
        }
    }

    let mut matches: Vec<QuestionRow> = rows
        .into_iter()
        .filter(|row| row.frontend_question_id.starts_with(prefix))
        .collect();
    sort_by_identifier(&mut matches);
    matches.truncate(limit);
    Ok(matches.into_iter().map(summary_from_row).collect())
}

/// Keyword search at the caller's limit.
pub(crate) async fn by_keywords(
    client: &GraphqlClient,
    keywords: &str,
    limit: usize,
) -> Result<Vec<ProblemSummary>> {
    let mut rows = client.question_page(Some(keywords), 0, limit).await?;
    sort_by_identifier(&mut rows);
    rows.truncate(limit);
    Ok(rows.into_iter().map(summary_from_row).collect())
}

/// Keyword search narrowed by a number prefix.
///
/// When the prefix filter empties the result set, the unfiltered keyword
/// matches are returned instead: title relevance wins over the prefix rather
/// than reporting nothing.
pub(crate) async fn by_keywords_with_prefix(
    client: &GraphqlClient,
    config: &CrawlerConfig,
    keywords: &str,
    prefix: &str,
    limit: usize,
) -> Result<Vec<ProblemSummary>> {
    let rows = client
        .question_page(Some(keywords), 0, config.keyword_search_limit)
        .await?;

    let mut filtered: Vec<QuestionRow> = rows
        .iter()
        .filter(|row| row.frontend_question_id.starts_with(prefix))
        .cloned()
        .collect();
    if filtered.is_empty() {
        filtered = rows;
    }

    sort_by_identifier(&mut filtered);
    filtered.truncate(limit);
    Ok(filtered.into_iter().map(summary_from_row).collect())
}
