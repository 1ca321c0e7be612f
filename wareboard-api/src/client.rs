//! Main WarehouseClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::error::Error;

/// The main client for the warehouse REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use wareboard_api::WarehouseClient;
///
/// let client = WarehouseClient::builder()
///     .url("https://warehouse.example.com")
///     .build();
///
/// client.connect().await?;
/// ```
#[derive(Clone)]
pub struct WarehouseClient {
    inner: Arc<WarehouseClientInner>,
}

struct WarehouseClientInner {
    base_url: String,
    api_version: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl WarehouseClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> WarehouseClientBuilder<Missing> {
        WarehouseClientBuilder::new()
    }

    /// Validates connectivity to the warehouse backend.
    ///
    /// Makes a health request to verify the backend is reachable.
    pub async fn connect(&self) -> Result<HealthResponse, Error> {
        let value = self.get_json("/health", None).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::Api(ApiError::parse(format!("invalid health response: {e}"))))
    }

    /// Returns the base URL of the warehouse backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the API version being used.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    pub(crate) fn build_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}{}",
            self.inner.base_url.trim_end_matches('/'),
            self.inner.api_version,
            path
        )
    }

    /// Makes a GET request and parses the body as loosely-shaped JSON.
    ///
    /// This is the low-level request method used by all list and detail
    /// operations. There is deliberately no retry or backoff: callers decide
    /// when to re-request (for list pages, the next scroll event does).
    pub(crate) async fn get_json(&self, path: &str, query: Option<&str>) -> Result<Value, Error> {
        let mut url = self.build_url(path);
        if let Some(query) = query
            && !query.is_empty()
        {
            url.push('?');
            url.push_str(query);
        }

        let mut request = self
            .inner
            .http_client
            .get(&url)
            .header("Accept", "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        Self::into_json(response).await
    }

    /// Makes a POST request with a JSON body.
    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let url = self.build_url(path);

        let mut request = self
            .inner
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .json(body);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        Self::into_json(response).await
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, Error> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::Api(ApiError::from(e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(ApiError::http(status.as_u16(), body)))
        }
    }
}

/// Response from the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Backend status string ("ok" when healthy).
    pub status: String,
    /// Backend version, if reported.
    #[serde(default)]
    pub version: Option<String>,
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`WarehouseClient`].
///
/// Uses the typestate pattern to ensure the backend URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = WarehouseClient::builder()
///     .url("https://warehouse.example.com")
///     .api_version("v1")
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct WarehouseClientBuilder<Url> {
    url: Url,
    api_version: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl WarehouseClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            api_version: "v1".to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the warehouse backend URL.
    pub fn url(self, url: impl Into<String>) -> WarehouseClientBuilder<Set<String>> {
        WarehouseClientBuilder {
            url: Set(url.into()),
            api_version: self.api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for WarehouseClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> WarehouseClientBuilder<U> {
    /// Sets the API version to use.
    ///
    /// Defaults to `v1`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl WarehouseClientBuilder<Set<String>> {
    /// Builds the [`WarehouseClient`].
    ///
    /// This method is only available once `url` has been set.
    pub fn build(self) -> WarehouseClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().unwrap_or_default()
        });

        WarehouseClient {
            inner: Arc::new(WarehouseClientInner {
                base_url: self.url.0,
                api_version: self.api_version,
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
