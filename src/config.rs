use std::path::PathBuf;
use std::time::Duration;

use super::error::{ChError, Result};

/// Configuration for the Companies House client
#[derive(Debug, Clone)]
pub struct ChConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Base URLs for the registry services
    pub base_urls: ChUrls,
}

/// Base URLs for the Companies House services
#[derive(Debug, Clone)]
pub struct ChUrls {
    /// Base URL for the public data API
    pub api: String,
}

impl Default for ChConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("chkit/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            base_urls: ChUrls::default(),
        }
    }
}

impl ChConfig {
    /// Creates a new ChConfig with custom settings
    ///
    /// ```rust
    /// use chkit::{ChConfig, ChUrls};
    /// use std::time::Duration;
    ///
    /// let config = ChConfig::new("my-tool/1.0", Duration::from_secs(10), None);
    /// assert_eq!(config.base_urls.api, ChUrls::default().api);
    /// ```
    pub fn new(user_agent: impl Into<String>, timeout: Duration, base_urls: Option<ChUrls>) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
            base_urls: base_urls.unwrap_or_default(),
        }
    }
}

impl Default for ChUrls {
    fn default() -> Self {
        Self {
            api: "https://api.company-information.service.gov.uk".to_string(),
        }
    }
}

/// The inputs of a single run, built once at startup.
///
/// Every field is validated by [`RunConfig::new`], so downstream stages can
/// rely on a non-empty location and at least one non-empty SIC code.
#[derive(Clone)]
pub struct RunConfig {
    /// Raw API key, sent as the Basic auth user name
    pub api_key: String,
    /// Free-text location filter
    pub location: String,
    /// SIC codes in the order they were given
    pub sic_codes: Vec<String>,
    /// Directory the report is written into
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("api_key", &"<redacted>")
            .field("location", &self.location)
            .field("sic_codes", &self.sic_codes)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl RunConfig {
    /// Validates raw configuration values.
    ///
    /// Each value is optional so it can come straight from an environment
    /// lookup or a command line flag. The output directory defaults to the
    /// working directory; use [`RunConfig::with_output_dir`] to change it.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The raw Companies House API key, not base64 encoded
    /// * `location` - Free-text location filter, e.g. "Manchester"
    /// * `sic_codes` - Comma-separated SIC codes, e.g. "62020, 62012". Entries
    ///   are trimmed and blank ones dropped
    ///
    /// # Errors
    ///
    /// Checks run in order: API key, location, SIC code string, SIC codes
    /// after trimming. The first failure is returned as
    /// [`ChError::MissingConfiguration`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use chkit::RunConfig;
    ///
    /// let config = RunConfig::new(
    ///     Some("key".to_string()),
    ///     Some("Leeds".to_string()),
    ///     Some(" 62020, ,62012".to_string()),
    /// )?;
    /// assert_eq!(config.sic_codes, vec!["62020", "62012"]);
    /// # Ok::<(), chkit::ChError>(())
    /// ```
    pub fn new(
        api_key: Option<String>,
        location: Option<String>,
        sic_codes: Option<String>,
    ) -> Result<Self> {
        let api_key = api_key.filter(|key| !key.is_empty()).ok_or_else(|| {
            ChError::MissingConfiguration(
                "API_KEY not set. Provide the raw API key (without encoding) via the environment or a .env file".to_string(),
            )
        })?;

        let location = location
            .filter(|location| !location.is_empty())
            .ok_or_else(|| {
                ChError::MissingConfiguration("LOCATION cannot be empty".to_string())
            })?;

        let raw_codes = sic_codes.filter(|codes| !codes.is_empty()).ok_or_else(|| {
            ChError::MissingConfiguration("SIC_CODES cannot be empty".to_string())
        })?;

        let sic_codes = parse_sic_codes(&raw_codes);
        if sic_codes.is_empty() {
            return Err(ChError::MissingConfiguration(
                "SIC_CODES cannot be empty after trimming".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            location,
            sic_codes,
            output_dir: PathBuf::from("."),
        })
    }

    /// Sets the directory the report is written into. It must already exist.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Splits a comma-separated SIC code list, trimming each entry and dropping
/// the empty ones. Order is preserved.
pub fn parse_sic_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(String::from)
        .collect()
}
