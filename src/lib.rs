// src/lib.rs

//! leetfetch crawler library.
//!
//! Resolves free-form problem queries against the LeetCode GraphQL endpoint
//! and assembles editor-ready problem records: a plain-text description with
//! the Examples section removed, plus a code template whose auxiliary type
//! definitions are un-commented.

pub mod cache;
pub mod error;
pub mod models;
pub mod services;
pub mod text;
pub mod utils;
