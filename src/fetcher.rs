use crate::ResolveError;
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

pub const DEFAULT_METADATA_ENDPOINT: &str = "https://open-apis.haxtheweb.org/api/website/metadata";
pub const DEFAULT_QUERY_PARAM: &str = "url";

const ENDPOINT_ENV: &str = "LINK_PREVIEW_ENDPOINT";
const QUERY_PARAM_ENV: &str = "LINK_PREVIEW_QUERY_PARAM";

/// Anything that can look up page metadata for a URL.
#[async_trait]
pub trait MetadataSource {
    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata, ResolveError>;
}

/// The `data` object of a metadata API response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct MetadataEnvelope {
    data: Map<String, Value>,
}

impl PageMetadata {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Parses a full response body. A body that is not JSON, or has no `data`
    /// object, is a parse failure.
    pub fn from_json(body: &str) -> Result<Self, ResolveError> {
        let envelope: MetadataEnvelope =
            serde_json::from_str(body).map_err(|e| ResolveError::Parse(e.to_string()))?;
        Ok(Self::new(envelope.data))
    }

    /// Returns the field only when it is a non-empty string.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.field(key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PageMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self { fields }
    }
}

/// Settings for the metadata API client.
///
/// # Examples
/// ```ignore
/// let config = FetcherConfig::default()
///     .with_endpoint("https://metadata.internal/api/website/metadata")
///     .with_timeout(Duration::from_secs(5));
/// let fetcher = MetadataFetcher::new_with_config(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub endpoint: String,
    pub query_param: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub headers: Option<HeaderMap>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_METADATA_ENDPOINT.to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            user_agent: "link_preview_card/0.1.0".to_string(),
            timeout: Duration::from_secs(10),
            headers: None,
        }
    }
}

impl FetcherConfig {
    /// Defaults, with the endpoint and parameter name taken from the
    /// environment when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            debug!(endpoint = %endpoint, "Using metadata endpoint from environment");
            config.endpoint = endpoint;
        }
        if let Ok(param) = std::env::var(QUERY_PARAM_ENV) {
            config.query_param = param;
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_query_param(mut self, param: impl Into<String>) -> Self {
        self.query_param = param.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// `<endpoint>?<param>=<percent-encoded url>`
    pub fn request_url(&self, url: &str) -> Result<Url, ResolveError> {
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[(self.query_param.as_str(), url)],
        )?)
    }
}

/// HTTP client for the metadata API.
#[derive(Clone)]
pub struct MetadataFetcher {
    client: Client,
    config: FetcherConfig,
}

impl MetadataFetcher {
    pub fn new() -> Result<Self, ResolveError> {
        debug!("MetadataFetcher initialized with default configuration");
        Self::new_with_config(FetcherConfig::from_env())
    }

    pub fn new_with_config(config: FetcherConfig) -> Result<Self, ResolveError> {
        let mut client_builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .pool_max_idle_per_host(10);

        if let Some(headers) = config.headers.clone() {
            client_builder = client_builder.default_headers(headers);
        }

        let client = client_builder.build().map_err(|e| {
            error!(error = %e, "Failed to create HTTP client");
            ResolveError::Network(e.to_string())
        })?;

        Ok(Self { client, config })
    }

    pub fn with_client(client: Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch(&self, url: &str) -> Result<PageMetadata, ResolveError> {
        let request_url = self.config.request_url(url)?;
        debug!(request = %request_url, "Requesting page metadata");

        let response = self.client.get(request_url).send().await.map_err(|e| {
            error!(error = %e, url = %url, "Failed to send metadata request");
            ResolveError::from_reqwest(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, url = %url, "Failed to read metadata response body");
            ResolveError::from_reqwest(e)
        })?;

        debug!(url = %url, content_length = body.len(), "Received metadata response");
        PageMetadata::from_json(&body)
    }
}

#[async_trait]
impl MetadataSource for MetadataFetcher {
    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata, ResolveError> {
        self.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_target() {
        let config = FetcherConfig::default();
        let url = config
            .request_url("https://example.com/a b?x=1&y=2")
            .unwrap();

        assert!(url.as_str().starts_with(DEFAULT_METADATA_ENDPOINT));
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, "https://example.com/a b?x=1&y=2");
        assert!(!url.query().unwrap().contains('&'));
    }

    #[test]
    fn test_custom_query_param() {
        let config = FetcherConfig::default()
            .with_endpoint("https://meta.test/lookup")
            .with_query_param("q");
        let url = config.request_url("https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://meta.test/lookup?q=https%3A%2F%2Fexample.com");
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = FetcherConfig::default().with_endpoint("not an endpoint");
        assert!(matches!(
            config.request_url("https://example.com"),
            Err(ResolveError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_parse_envelope() {
        let meta = PageMetadata::from_json(
            r#"{"data": {"og:title": "Example Domain", "description": "", "image": null}}"#,
        )
        .unwrap();
        assert_eq!(meta.field("og:title"), Some("Example Domain"));
        assert_eq!(meta.field("description"), None);
        assert_eq!(meta.field("image"), None);
        assert_eq!(meta.first_of(&["title", "og:title"]), Some("Example Domain"));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for body in ["<html></html>", "{}", r#"{"data": null}"#, r#"{"data": "x"}"#] {
            assert!(
                matches!(PageMetadata::from_json(body), Err(ResolveError::Parse(_))),
                "body should be rejected: {}",
                body
            );
        }
    }
}
