//! Advanced company search against the Companies House API.
//!
//! The advanced search endpoint filters the register by location, company
//! status and SIC codes. Only the first page of results is requested; its
//! size is capped by the `size` parameter (500 by default), while `hits`
//! reports how many companies matched in total.
//!
//! # Examples
//!
//! ```no_run
//! use chkit::{AdvancedSearchOptions, CompaniesHouse, SearchOperations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompaniesHouse::new("your-api-key")?;
//!
//!     let options = AdvancedSearchOptions::new("Manchester")
//!         .with_sic_codes(vec!["62020".to_string(), "62012".to_string()]);
//!
//!     let response = client.advanced_search(options).await?;
//!     for company in response.items.unwrap_or_default() {
//!         println!("{}", company.company_name.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

use super::CompaniesHouse;
use super::error::{ChError, Result, preview};
use super::traits::SearchOperations;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Company status filter sent with every search unless overridden
pub const DEFAULT_COMPANY_STATUS: &str = "active";

/// Results requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Response from the advanced company search endpoint
///
/// Only the fields the report reads are typed. Everything else the API sends
/// is kept untouched in `extra`, so an unexpected shape there never fails the
/// parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvancedSearchResponse {
    /// Total number of matching companies, which may exceed `items.len()`
    #[serde(default)]
    pub hits: Option<u64>,
    /// Companies on this page
    #[serde(default)]
    pub items: Option<Vec<CompanyItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdvancedSearchResponse {
    /// Number of company items on this page.
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// True when the API reports more hits than this page carries.
    pub fn is_partial(&self) -> bool {
        self.hits
            .is_some_and(|hits| (self.item_count() as u64) < hits)
    }
}

/// A company record from the search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyItem {
    #[serde(default)]
    pub company_name: Option<String>,
    /// `None` when the address is missing or `null`
    #[serde(default)]
    pub registered_office_address: Option<Address>,
    /// Remaining fields (`company_number`, `sic_codes`, ...) as sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompanyItem {
    /// Returns a top-level string field such as `company_number`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Registered office address.
///
/// Built from the raw JSON object. The well-known lines are pulled out as
/// text; `raw` keeps every key, including ones not listed here such as
/// `po_box` or `care_of`. An address is empty only when the object has no
/// keys at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Address {
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub premises: Option<String>,
    pub raw: Map<String, Value>,
}

impl From<Map<String, Value>> for Address {
    fn from(raw: Map<String, Value>) -> Self {
        let line = |key: &str| raw.get(key).and_then(value_text);
        Self {
            address_line_1: line("address_line_1"),
            address_line_2: line("address_line_2"),
            locality: line("locality"),
            postal_code: line("postal_code"),
            region: line("region"),
            country: line("country"),
            premises: line("premises"),
            raw,
        }
    }
}

impl Address {
    /// True when the address object had no keys.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Strings as is, `null` as absent, anything else in its JSON form.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Options for configuring an advanced company search
///
/// ```rust
/// use chkit::AdvancedSearchOptions;
///
/// let options = AdvancedSearchOptions::new("Leeds")
///     .with_sic_codes(vec!["62020".to_string()]);
///
/// assert_eq!(options.query_string().unwrap(),
///     "location=Leeds&company_status=active&size=500&sic_codes=62020");
/// ```
#[derive(Debug, Clone)]
pub struct AdvancedSearchOptions {
    /// Free-text location filter
    pub location: String,
    /// Company status filter
    pub company_status: String,
    /// Maximum number of items returned
    pub size: u32,
    /// Standard Industrial Classification codes, in order
    pub sic_codes: Vec<String>,
}

impl AdvancedSearchOptions {
    /// Creates options for a location with the default status and page size
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            company_status: DEFAULT_COMPANY_STATUS.to_string(),
            size: DEFAULT_PAGE_SIZE,
            sic_codes: Vec::new(),
        }
    }

    /// Sets the SIC codes to filter by
    pub fn with_sic_codes(mut self, sic_codes: Vec<String>) -> Self {
        self.sic_codes = sic_codes;
        self
    }

    /// Sets the company status filter
    pub fn with_company_status(mut self, status: impl Into<String>) -> Self {
        self.company_status = status.into();
        self
    }

    /// Sets the maximum number of results to return
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("location".to_string(), self.location.clone()),
            ("company_status".to_string(), self.company_status.clone()),
            ("size".to_string(), self.size.to_string()),
        ];

        if !self.sic_codes.is_empty() {
            params.push(("sic_codes".to_string(), self.sic_codes.join(",")));
        }

        params
    }

    /// Serialises the parameters into a URL query string.
    pub fn query_string(&self) -> Result<String> {
        let encoded = serde_urlencoded::to_string(self.to_query_params())
            .map_err(|e| ChError::InvalidQuery(e.to_string()))?;
        // Commas are legal in a query component and the API takes the SIC list unescaped.
        Ok(encoded.replace("%2C", ","))
    }
}

#[async_trait]
impl SearchOperations for CompaniesHouse {
    /// Performs a single advanced search request.
    ///
    /// Only the first page is fetched. The parsed body is returned as is.
    async fn advanced_search(&self, options: AdvancedSearchOptions) -> Result<AdvancedSearchResponse> {
        let url = format!("{}?{}", self.advanced_search_url(), options.query_string()?);
        tracing::info!("Requesting URL: {}", url);

        let body = self.get(&url).await?;
        parse_search_response(&body)
    }
}

/// Parses an advanced search response body.
pub fn parse_search_response(body: &str) -> Result<AdvancedSearchResponse> {
    serde_json::from_str(body).map_err(|source| ChError::Parse {
        source,
        preview: preview(body),
    })
}
