//! HTTP transport for the NHL statistics API
//!
//! One call to [`NhlClient::request`] performs exactly one HTTP round trip.
//! Status codes in the 4xx and 5xx classes become [`NhlError::RequestFailed`];
//! everything else, redirects included, is treated as success.

use std::time::{Duration, Instant};

use reqwest::Method;
use tracing::debug;

use crate::error::{NhlError, Result};
use crate::response::Response;

/// Base URL of the NHL statistics API (without version segment)
pub const NHL_BASE_URL: &str = "https://statsapi.web.nhl.com/api";

/// Default API version
pub const DEFAULT_API_VERSION: u32 = 1;

/// User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("nhl-core/", env!("CARGO_PKG_VERSION"));

/// Configuration for the NHL HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root without version segment (default: [`NHL_BASE_URL`])
    pub base_url: String,
    /// API version, rendered as `/v{api_version}` (default: 1)
    pub api_version: u32,
    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: NHL_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION,
            timeout_secs: 60,
        }
    }
}

impl ClientConfig {
    /// Default configuration targeting a different API version.
    pub fn with_api_version(api_version: u32) -> Self {
        Self {
            api_version,
            ..Self::default()
        }
    }
}

/// HTTP client bound to one versioned API root
#[derive(Debug, Clone)]
pub struct NhlClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Versioned API root, e.g. `https://statsapi.web.nhl.com/api/v1`
    url: String,
}

impl NhlClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let url = format!(
            "{}/v{}",
            config.base_url.trim_end_matches('/'),
            config.api_version
        );

        Ok(Self { client, url })
    }

    /// Versioned API root all endpoints are joined onto.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Absolute URL for an endpoint fragment such as `teams?teamId=1`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.url, endpoint.trim_start_matches('/'))
    }

    /// Send a GET request to an endpoint.
    ///
    /// # Errors
    /// - `NhlError::HttpError` - network failure or timeout
    /// - `NhlError::RequestFailed` - server returned 4xx or 5xx
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        self.request(Method::GET, endpoint).await
    }

    /// Send a request with an arbitrary method to an endpoint.
    ///
    /// The body of a successful response is decoded as JSON; a missing or
    /// non-JSON body yields an empty mapping.
    pub async fn request(&self, method: Method, endpoint: &str) -> Result<Response> {
        let url = self.endpoint_url(endpoint);
        debug!(%method, %url, "sending request");

        let started = Instant::now();
        let response = self.client.request(method.clone(), &url).send().await?;
        let status = response.status();
        debug!(
            %method,
            %url,
            status = status.as_u16(),
            elapsed = ?started.elapsed(),
            "request completed"
        );

        if status.is_client_error() || status.is_server_error() {
            return Err(NhlError::RequestFailed {
                method,
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(Response::from_body(status.as_u16(), &body))
    }
}
