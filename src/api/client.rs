//! HTTP transport for the search API
//!
//! Wraps a blocking reqwest client. Requests are executed on the fetch
//! worker thread, never on the thread that owns the widget, so a blocking
//! client keeps the transport simple without stalling the UI.

use super::error::FetchError;
use super::types::{Page, PageQuery};
use std::time::Duration;

/// Default API root
pub const DEFAULT_API_BASE: &str = "https://api.giphy.com/v1";

const USER_AGENT: &str = concat!("gifbox/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of result pages
///
/// Implemented by [`GiphyClient`] for live requests; tests supply scripted
/// sources. Implementations are called from the fetch worker thread.
pub trait PageSource: Send + Sync {
    /// Fetch one page of results
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] for transport failures, non-success status
    /// codes and undecodable bodies.
    fn fetch_page(&self, query: &PageQuery) -> Result<Page, FetchError>;
}

/// Live client for the GIPHY API
#[derive(Debug, Clone)]
pub struct GiphyClient {
    client: reqwest::blocking::Client,
    base: String,
    api_key: String,
}

impl GiphyClient {
    /// Create a client for the default API root
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_base(DEFAULT_API_BASE, api_key)
    }

    /// Create a client for a custom API root
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be built.
    pub fn with_base(base: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base: base.into(),
            api_key: api_key.into(),
        })
    }

    /// API root this client talks to
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl PageSource for GiphyClient {
    fn fetch_page(&self, query: &PageQuery) -> Result<Page, FetchError> {
        let url = query.url(&self.base, &self.api_key)?;
        tracing::debug!(
            endpoint = query.endpoint(),
            offset = query.offset,
            limit = query.limit,
            "requesting page"
        );

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        Page::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Library;

    #[test]
    fn test_client_keeps_base() {
        let client = GiphyClient::with_base("http://localhost:9", "KEY").unwrap();
        assert_eq!(client.base(), "http://localhost:9");
    }

    #[test]
    fn test_invalid_base_is_reported_before_sending() {
        let client = GiphyClient::with_base("::nope::", "KEY").unwrap();
        let query = PageQuery {
            library: Library::Gifs,
            query: "cats".to_string(),
            offset: 0,
            limit: 20,
            rating: "g".to_string(),
        };
        assert!(matches!(
            client.fetch_page(&query),
            Err(FetchError::InvalidRequest(_))
        ));
    }
}
