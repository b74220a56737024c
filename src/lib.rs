//! # chkit - registered office addresses from Companies House
//!
//! chkit queries the Companies House advanced search API for active companies
//! in a location that trade under a set of SIC codes, and writes their
//! registered office addresses to a text report.
//!
//! ## Features
//!
//! - **Typed search client** - Basic-auth client for the advanced search endpoint
//! - **Closed error set** - every fetch outcome is a variant of [`ChError`]
//! - **Address reports** - deterministic file names, skip logic for incomplete
//!   addresses, atomic writes
//!
//! ## Basic Usage
//!
//! ```no_run
//! use chkit::{ChConfig, RunConfig, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::new(
//!         Some("your-api-key".to_string()),
//!         Some("Manchester".to_string()),
//!         Some("62020,62012".to_string()),
//!     )?;
//!
//!     let summary = run(&config, ChConfig::default()).await?;
//!     println!("Wrote {} companies to {}", summary.stats.processed, summary.path.display());
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod report;
mod run;
mod search;
mod traits;

pub use config::{ChConfig, ChUrls, RunConfig, parse_sic_codes};
pub use core::CompaniesHouse;
pub use error::{ChError, Result};
pub use report::{
    BLOCK_SEPARATOR, FormattedReport, ReportOutcome, ReportStats, ReportSummary, format_report,
    report_filename, sanitize_component, write_report,
};
pub use run::{fetch_company_data, run, run_with};
pub use search::{
    Address, AdvancedSearchOptions, AdvancedSearchResponse, CompanyItem, DEFAULT_COMPANY_STATUS,
    DEFAULT_PAGE_SIZE, parse_search_response,
};
pub use traits::SearchOperations;

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
