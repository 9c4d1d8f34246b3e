//! Jobwire HTTP Client
//!
//! A small, type-safe client for the Adzuna job-search API.
//!
//! One endpoint, one operation: run a search and hand back domain records.
//! There is no pagination, no retry, and no backoff; a failed fetch fails
//! the cycle that asked for it.
//!
//! # Example
//!
//! ```no_run
//! use jobwire_client::{AdzunaClient, JobSource, SearchCriteria};
//!
//! # async fn example() -> Result<(), jobwire_client::FetchError> {
//! let client = AdzunaClient::new(
//!     "https://api.adzuna.com/v1/api/jobs/us/search/1",
//!     "my-app-id",
//!     "my-app-key",
//! );
//!
//! let jobs = client.search(&SearchCriteria::default_feed()).await?;
//! println!("{} listing(s)", jobs.len());
//! # Ok(())
//! # }
//! ```

pub mod criteria;
pub mod error;

// Re-export commonly used types
pub use criteria::{LocationFilter, SearchCriteria};
pub use error::{FetchError, Result};
pub use jobwire_core::domain::job::JobRecord;

use async_trait::async_trait;
use jobwire_core::dto::search::SearchResponse;
use reqwest::Client;
use tracing::debug;

/// Anything the announcer can fetch job listings from.
///
/// The production implementation is [`AdzunaClient`]; tests substitute a
/// fake source so control flow can be exercised without a network.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch listings matching the given criteria.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<JobRecord>>;
}

/// HTTP client for the Adzuna job-search API
#[derive(Debug, Clone)]
pub struct AdzunaClient {
    /// Search endpoint URL, country and page baked in
    base_url: String,
    /// API application id (credential)
    app_id: String,
    /// API application key (credential)
    app_key: String,
    /// HTTP client instance
    client: Client,
}

impl AdzunaClient {
    /// Create a new client for the given search endpoint and credentials
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self::with_client(base_url, app_id, app_key, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            app_key: app_key.into(),
            client,
        }
    }

    /// Get the search endpoint URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl JobSource for AdzunaClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<JobRecord>> {
        let mut params = vec![
            ("app_id", self.app_id.clone()),
            ("app_key", self.app_key.clone()),
        ];
        params.extend(criteria.to_query_pairs());

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(FetchError::status(status.as_u16(), message));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!("Fetched {} job posting(s)", parsed.results.len());

        Ok(parsed.results.into_iter().map(JobRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AdzunaClient::new("http://localhost:8080", "id", "key");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = AdzunaClient::new("http://localhost:8080/", "id", "key");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = AdzunaClient::with_client("http://localhost:8080", "id", "key", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
