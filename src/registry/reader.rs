//! Per-endpoint RubyGems reader
//!
//! One reader per distinct registry endpoint, holding one HTTP client whose
//! connection pool is reused across every request to that endpoint. All
//! transport-level failures collapse into `RegistryError::SourceUnavailable`;
//! callers never see reqwest error types. A 404 for a gem is not a transport
//! failure: the endpoint answered, it just has no data for that gem.

use crate::error::RegistryError;
use crate::registry::{GemDocument, VersionRecord};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Request timeout; there are no retries, so a transient failure marks the
/// source unavailable for the rest of the run
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent header sent to registries
const DEFAULT_USER_AGENT: &str = concat!("gemfresh/", env!("CARGO_PKG_VERSION"));

/// Read access to one registry endpoint
#[async_trait]
pub trait RegistryReader: Send + Sync {
    /// Fetch the gem summary document
    async fn gem_info(&self, gem: &str) -> Result<GemDocument, RegistryError>;

    /// Fetch the version history document
    async fn version_history(&self, gem: &str) -> Result<Vec<VersionRecord>, RegistryError>;
}

/// Creates readers on first use of an endpoint
pub trait ReaderFactory: Send + Sync {
    /// Open a reader for the endpoint; a failure here counts as a transport
    /// failure for that endpoint
    fn open(&self, endpoint: &str) -> Result<Box<dyn RegistryReader>, RegistryError>;
}

/// HTTP reader for a single RubyGems endpoint
pub struct HttpReader {
    client: Client,
    endpoint: String,
}

impl HttpReader {
    /// Create a reader for the endpoint with default timeout and User-Agent
    pub fn connect(endpoint: &str) -> Result<Self, RegistryError> {
        Self::with_config(endpoint, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a reader with custom configuration
    pub fn with_config(
        endpoint: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::source_unavailable(endpoint, e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Build the URL for the gem summary document
    fn gem_url(&self, gem: &str) -> String {
        format!("{}/api/v1/gems/{}.json", self.endpoint, gem)
    }

    /// Build the URL for the version history document
    fn versions_url(&self, gem: &str) -> String {
        format!("{}/api/v1/versions/{}.json", self.endpoint, gem)
    }

    /// Perform a GET and decode the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        gem: &str,
    ) -> Result<T, RegistryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RegistryError::source_unavailable(&self.endpoint, e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::no_usable_data(gem, &self.endpoint));
        }
        if !response.status().is_success() {
            return Err(RegistryError::source_unavailable(
                &self.endpoint,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RegistryError::source_unavailable(&self.endpoint, e.to_string()))
    }
}

#[async_trait]
impl RegistryReader for HttpReader {
    async fn gem_info(&self, gem: &str) -> Result<GemDocument, RegistryError> {
        self.get_json(&self.gem_url(gem), gem).await
    }

    async fn version_history(&self, gem: &str) -> Result<Vec<VersionRecord>, RegistryError> {
        self.get_json(&self.versions_url(gem), gem).await
    }
}

/// Factory producing `HttpReader`s
pub struct HttpReaderFactory;

impl HttpReaderFactory {
    /// Creates a new factory
    pub fn new() -> Self {
        Self
    }
}

impl Default for HttpReaderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderFactory for HttpReaderFactory {
    fn open(&self, endpoint: &str) -> Result<Box<dyn RegistryReader>, RegistryError> {
        Ok(Box::new(HttpReader::connect(endpoint)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_layout() {
        let reader = HttpReader::connect("https://rubygems.org").unwrap();
        assert_eq!(
            reader.gem_url("rails"),
            "https://rubygems.org/api/v1/gems/rails.json"
        );
        assert_eq!(
            reader.versions_url("rails"),
            "https://rubygems.org/api/v1/versions/rails.json"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let reader = HttpReader::connect("https://rubygems.org/").unwrap();
        assert_eq!(
            reader.gem_url("rake"),
            "https://rubygems.org/api/v1/gems/rake.json"
        );
    }

    #[test]
    fn test_factory_opens_reader() {
        let factory = HttpReaderFactory::new();
        assert!(factory.open("https://rubygems.org").is_ok());
    }

    #[tokio::test]
    async fn test_gem_info_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/gems/rails.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "rails", "version": "7.0.4"}"#)
            .create_async()
            .await;

        let reader = HttpReader::connect(&server.url()).unwrap();
        let doc = reader.gem_info("rails").await.unwrap();
        assert_eq!(doc.version.as_deref(), Some("7.0.4"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_version_history_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/versions/rails.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"number": "7.0.4", "built_at": "2022-09-09T00:00:00Z", "prerelease": false},
                    {"number": "7.1.0.beta1", "built_at": null, "prerelease": true}
                ]"#,
            )
            .create_async()
            .await;

        let reader = HttpReader::connect(&server.url()).unwrap();
        let history = reader.version_history("rails").await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[1].prerelease);
        assert!(history[1].built_at.is_none());
    }

    #[tokio::test]
    async fn test_not_found_is_no_usable_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/gems/ghost.json")
            .with_status(404)
            .with_body("This rubygem could not be found.")
            .create_async()
            .await;

        let reader = HttpReader::connect(&server.url()).unwrap();
        let err = reader.gem_info("ghost").await.unwrap_err();
        assert!(matches!(err, RegistryError::NoUsableData { .. }));
        assert!(!err.is_transport_failure());
    }

    #[tokio::test]
    async fn test_server_error_is_source_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/gems/rails.json")
            .with_status(502)
            .create_async()
            .await;

        let reader = HttpReader::connect(&server.url()).unwrap();
        let err = reader.gem_info("rails").await.unwrap_err();
        assert!(err.is_transport_failure());
    }

    #[tokio::test]
    async fn test_malformed_body_is_source_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/versions/rails.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let reader = HttpReader::connect(&server.url()).unwrap();
        let err = reader.version_history("rails").await.unwrap_err();
        assert!(err.is_transport_failure());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_source_unavailable() {
        // Nothing listens on this port
        let reader = HttpReader::connect("http://127.0.0.1:1").unwrap();
        let err = reader.gem_info("rails").await.unwrap_err();
        assert!(err.is_transport_failure());
    }
}
