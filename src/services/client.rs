// src/services/client.rs

//! Remote GraphQL query client.
//!
//! Issues structured queries against the question-bank endpoint and returns
//! typed responses. One outbound request per invocation; retry and fallback
//! policy lives in the crawler, not here.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::Result;
use crate::models::{CrawlerConfig, Difficulty};
use crate::utils::http;

/// Query for a single problem's full detail by canonical slug.
const QUESTION_DETAIL_QUERY: &str = r#"
query questionContent($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    title
    content
    difficulty
    codeSnippets {
      lang
      langSlug
      code
    }
  }
}
"#;

/// Query for one page of the global problem listing.
const QUESTION_LIST_QUERY: &str = r#"
query problemsetQuestionList($categorySlug: String, $limit: Int, $skip: Int, $filters: QuestionListFilterInput) {
  problemsetQuestionList: questionList(
    categorySlug: $categorySlug
    limit: $limit
    skip: $skip
    filters: $filters
  ) {
    total: totalNum
    questions: data {
      difficulty
      frontendQuestionId: questionFrontendId
      paidOnly: isPaidOnly
      title
      titleSlug
    }
  }
}
"#;

/// Transport over the GraphQL POST endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one query document and return the raw response envelope.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value>;
}

/// Production transport backed by reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Full detail for a single problem.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    /// Backend question id as a decimal string
    pub question_id: String,

    /// Problem display title
    pub title: String,

    /// Hypertext description; absent for paid-tier problems
    #[serde(default)]
    pub content: Option<String>,

    /// Difficulty rating
    pub difficulty: Difficulty,

    /// Code skeletons, one per language
    #[serde(default)]
    pub code_snippets: Vec<CodeSnippet>,
}

/// A language-tagged code skeleton.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub lang: String,
    pub lang_slug: String,
    pub code: String,
}

/// One row of the problem listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRow {
    /// Frontend problem number as a decimal string
    pub frontend_question_id: String,

    pub title: String,
    pub title_slug: String,
    pub difficulty: Difficulty,

    #[serde(default)]
    pub paid_only: bool,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(default)]
    data: Option<DetailData>,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    #[serde(default)]
    question: Option<QuestionDetail>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Option<ListData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    #[serde(default)]
    problemset_question_list: Option<QuestionPage>,
}

#[derive(Debug, Deserialize)]
struct QuestionPage {
    #[allow(dead_code)]
    total: u64,
    #[serde(default)]
    questions: Vec<QuestionRow>,
}

/// Typed operations over a transport.
pub struct GraphqlClient {
    transport: Arc<dyn Transport>,
}

impl GraphqlClient {
    /// Create a client over the production HTTP transport.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::from_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over an arbitrary transport.
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch a problem's full detail by slug.
    ///
    /// `Ok(None)` means the remote answered but carried no such entity;
    /// the caller owns the decision of what absence means.
    pub async fn question_detail(&self, slug: &str) -> Result<Option<QuestionDetail>> {
        let value = self
            .transport
            .execute(QUESTION_DETAIL_QUERY, json!({ "titleSlug": slug }))
            .await?;
        let envelope: DetailEnvelope = serde_json::from_value(value)?;
        Ok(envelope.data.and_then(|d| d.question))
    }

    /// Fetch one page of the problem listing.
    ///
    /// An absent listing deserializes to an empty page.
    pub async fn question_page(
        &self,
        keywords: Option<&str>,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<QuestionRow>> {
        let filters = match keywords {
            Some(kw) => json!({ "searchKeywords": kw }),
            None => json!({}),
        };
        let variables = json!({
            "categorySlug": "",
            "limit": limit,
            "skip": skip,
            "filters": filters,
        });

        let value = self.transport.execute(QUESTION_LIST_QUERY, variables).await?;
        let envelope: ListEnvelope = serde_json::from_value(value)?;
        Ok(envelope
            .data
            .and_then(|d| d.problemset_question_list)
            .map(|page| page.questions)
            .unwrap_or_default())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted transport: pops one canned response per call and records
    /// every call for assertions.
    pub struct FakeTransport {
        responses: Mutex<VecDeque<Result<Value>>>,
        pub calls: Mutex<Vec<(String, Value)>>,
    }

    impl FakeTransport {
        pub fn new(responses: Vec<Result<Value>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn variables_of_call(&self, index: usize) -> Value {
            self.calls.lock().unwrap()[index].1.clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), variables));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({ "data": null })))
        }
    }

    pub fn row(id: &str, title: &str, slug: &str) -> Value {
        json!({
            "frontendQuestionId": id,
            "title": title,
            "titleSlug": slug,
            "difficulty": "Easy",
            "paidOnly": false,
        })
    }

    pub fn page_response(rows: Vec<Value>) -> Value {
        json!({
            "data": {
                "problemsetQuestionList": {
                    "total": rows.len(),
                    "questions": rows,
                }
            }
        })
    }

    pub fn detail_response(id: &str, title: &str, content: &str, snippets: Vec<Value>) -> Value {
        json!({
            "data": {
                "question": {
                    "questionId": id,
                    "title": title,
                    "content": content,
                    "difficulty": "Easy",
                    "codeSnippets": snippets,
                }
            }
        })
    }

    pub fn python_snippet(code: &str) -> Value {
        json!({ "lang": "Python3", "langSlug": "python3", "code": code })
    }

    pub fn absent_detail_response() -> Value {
        json!({ "data": { "question": null } })
    }
}
