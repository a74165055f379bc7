use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Number of books the catalog returns per page.
pub const PAGE_SIZE: u64 = 32;

// ============================================================================
// Error Types
// ============================================================================

/// Errors from a single catalog page request.
///
/// The feed treats every variant the same way ("fetch failed"); the variants
/// exist so the log line says what actually went wrong.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
}

// ============================================================================
// Wire Types
// ============================================================================

/// One author record as returned by the catalog.
///
/// `name` is the raw catalog string, usually "Family, Given".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: String,
}

/// One catalog entry.
///
/// `formats` maps a MIME type (e.g. `text/html; charset=utf-8`) to a
/// download/view URL. Books are never mutated after they are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Book {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub formats: BTreeMap<String, String>,
}

/// A single page of search results.
///
/// `count` is the total number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookPage {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<Book>,
}

/// Parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Genre/topic filter. Empty means no filter.
    pub topic: String,
    /// Free-text search. Empty means no filter.
    pub search: String,
    /// 1-based page number.
    pub page: u64,
}

impl PageQuery {
    pub fn new(topic: impl Into<String>, search: impl Into<String>, page: u64) -> Self {
        Self {
            topic: topic.into(),
            search: search.into(),
            page,
        }
    }
}
