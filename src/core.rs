use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use super::config::ChConfig;
use super::error::{ChError, Result};

/// HTTP client for the Companies House public data API.
///
/// The client is the single entry point for talking to the registry. It holds
/// the Basic Authorization header built from the API key, a request timeout
/// and the base URL of the API, so tests can point it at a local server.
///
/// Requests are never retried. A failed request surfaces as one of the
/// [`ChError`] fetch variants:
///
/// ```text
/// send ──┬── timeout ────────────► ChError::Timeout
///        ├── connect failure ────► ChError::Connectivity
///        ├── other transport ────► ChError::Request
///        └── response ──┬── non-2xx ──► ChError::Http { status, body }
///                       └── 2xx ──────► body text
/// ```
///
/// # Examples
///
/// ```rust
/// # use chkit::CompaniesHouse;
/// let client = CompaniesHouse::new("my-api-key")?;
/// # Ok::<(), chkit::ChError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompaniesHouse {
    /// HTTP client with auth, accept and user agent headers preset
    pub(crate) client: reqwest::Client,

    /// Base URL for the public data API
    pub(crate) api_url: String,
}

impl CompaniesHouse {
    /// Creates a client with the default configuration: 30 second timeout and
    /// the live API base URL.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The raw API key issued by Companies House. It is sent as
    ///   the Basic auth user name with an empty password on every request and
    ///   is never logged.
    ///
    /// # Errors
    ///
    /// Returns `ChError::ConfigError` if the HTTP client cannot be built.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(api_key, ChConfig::default())
    }

    /// Creates a client with custom configuration settings.
    ///
    /// Use this to change the timeout or user agent, or to point the client
    /// at a different base URL such as a local test server.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The raw API key issued by Companies House
    /// * `config` - User agent, request timeout and base URLs
    ///
    /// # Errors
    ///
    /// Returns `ChError::ConfigError` if the API key or user agent cannot be
    /// used as a header value, or the HTTP client cannot be built.
    pub fn with_config(api_key: &str, config: ChConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&Self::authorization_header(api_key))
            .map_err(|e| ChError::ConfigError(format!("Invalid API key: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ChError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(CompaniesHouse {
            client,
            api_url: config.base_urls.api.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the Basic Authorization value for an API key.
    ///
    /// The registry uses the key as the user name with an empty password, so
    /// the encoded credential is `base64(key + ":")`.
    ///
    /// ```rust
    /// # use chkit::CompaniesHouse;
    /// assert_eq!(CompaniesHouse::authorization_header("abc"), "Basic YWJjOg==");
    /// ```
    pub fn authorization_header(api_key: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:", api_key)))
    }

    /// Fetches text content from a URL.
    ///
    /// Issues exactly one GET. Any 2xx status returns the body; any other
    /// status returns `ChError::Http` with the status code and the full body.
    pub async fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!(status = status.as_u16(), "HTTP error for {}", url);
            return Err(ChError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    /// Returns the base URL for the public data API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the URL of the advanced company search endpoint.
    pub fn advanced_search_url(&self) -> String {
        format!("{}/advanced-search/companies", self.api_url)
    }
}
