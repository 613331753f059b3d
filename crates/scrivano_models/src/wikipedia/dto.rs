//! MediaWiki API data transfer objects.
//!
//! Only the fields the research adapter reads are modeled; everything else
//! in the responses is ignored.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One hit returned by a full-text search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WikipediaSearchHit {
    /// Canonical page title
    title: String,
}

/// The `query` object of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WikipediaSearchQuery {
    /// Matching pages, best first
    #[serde(default)]
    search: Vec<WikipediaSearchHit>,
}

/// Response body for `action=query&list=search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WikipediaSearchResponse {
    /// Search results, absent when the query failed upstream
    #[serde(default)]
    query: Option<WikipediaSearchQuery>,
}

/// One page in an extract response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WikipediaPage {
    /// Page title
    #[serde(default)]
    title: Option<String>,
    /// Plain-text intro extract; absent for missing pages
    #[serde(default)]
    extract: Option<String>,
}

/// The `query` object of an extract response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WikipediaExtractQuery {
    /// Pages keyed by page id ("-1" marks a miss)
    #[serde(default)]
    pages: HashMap<String, WikipediaPage>,
}

/// Response body for `action=query&prop=extracts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WikipediaExtractResponse {
    /// Extract results, absent when the query failed upstream
    #[serde(default)]
    query: Option<WikipediaExtractQuery>,
}
