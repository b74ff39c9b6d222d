//! Service layer for the crawler.
//!
//! This module contains the business logic for:
//! - Remote GraphQL access (`GraphqlClient`, `Transport`)
//! - Search strategies over the problem listing (`search`)
//! - Query resolution, record assembly, and caching (`ProblemCrawler`)

mod client;
mod crawler;
mod search;

pub use client::{CodeSnippet, GraphqlClient, HttpTransport, QuestionDetail, QuestionRow, Transport};
pub use crawler::ProblemCrawler;
