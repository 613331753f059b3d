//! Wikipedia research client.

use super::dto::{WikipediaExtractResponse, WikipediaSearchResponse};
use crate::WikipediaConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scrivano_error::{BackendError, ConfigError, ScrivanoResult};
use scrivano_interface::ResearchProvider;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// MediaWiki-backed research client.
///
/// Lookup is a two-call flow: a full-text search picks the best-matching
/// page, then the page's plain-text intro extract is fetched. "No page
/// matched" is a successful empty result, not an error.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: Client,
    api_url: String,
    sentences: u32,
}

impl WikipediaClient {
    /// Creates a new Wikipedia client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    #[instrument(skip(config), fields(api_url = %config.api_url))]
    pub fn new(config: &WikipediaConfig) -> ScrivanoResult<Self> {
        debug!("Creating new Wikipedia client");

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("scrivano/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            sentences: config.sentences,
        })
    }

    /// Classifies a send failure.
    fn classify_send_error(e: reqwest::Error) -> BackendError {
        error!(error = ?e, "Failed to send request to MediaWiki API");
        if e.is_timeout() {
            BackendError::timeout(format!("Request timed out: {e}"))
        } else {
            BackendError::network(format!("Request failed: {e}"))
        }
    }

    /// Classifies a non-success HTTP status.
    fn classify_status(status: StatusCode, body: String) -> BackendError {
        error!(status = %status, body = %body, "MediaWiki API returned error");
        match status {
            StatusCode::TOO_MANY_REQUESTS => BackendError::quota(format!("Status {status}: {body}")),
            _ => BackendError::network(format!("Status {status}: {body}")),
        }
    }

    /// Finds the best-matching page title for a query, if any.
    async fn search_title(&self, query: &str) -> Result<Option<String>, BackendError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, body));
        }

        let parsed: WikipediaSearchResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse search response");
            BackendError::network(format!("Failed to parse search response: {e}"))
        })?;

        Ok(parsed
            .query()
            .as_ref()
            .and_then(|q| q.search().first())
            .map(|hit| hit.title().clone()))
    }

    /// Fetches the plain-text intro extract of a page.
    async fn intro_extract(&self, title: &str) -> Result<String, BackendError> {
        let sentences = self.sentences.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exsentences", sentences.as_str()),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, body));
        }

        let parsed: WikipediaExtractResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse extract response");
            BackendError::network(format!("Failed to parse extract response: {e}"))
        })?;

        // One title requested, so at most one page carries an extract.
        let extract = parsed
            .query()
            .as_ref()
            .and_then(|q| q.pages().values().find_map(|page| page.extract().clone()))
            .unwrap_or_default();

        Ok(extract.trim().to_string())
    }
}

#[async_trait]
impl ResearchProvider for WikipediaClient {
    #[instrument(skip(self, query), fields(source = "wikipedia"))]
    async fn lookup(&self, query: &str) -> ScrivanoResult<String> {
        debug!("Searching Wikipedia");

        let Some(title) = self.search_title(query).await? else {
            debug!("No page matched the query");
            return Ok(String::new());
        };

        debug!(title = %title, "Fetching intro extract");
        let extract = self.intro_extract(&title).await?;
        Ok(extract)
    }

    fn source_name(&self) -> &'static str {
        "wikipedia"
    }
}
