//! Fetch-then-write pipeline for a single run.

use super::config::{ChConfig, RunConfig};
use super::core::CompaniesHouse;
use super::error::Result;
use super::report::{ReportSummary, write_report};
use super::search::{AdvancedSearchOptions, AdvancedSearchResponse};
use super::traits::SearchOperations;

/// Fetches the first page of active companies for the configured location
/// and SIC codes.
pub async fn fetch_company_data<S>(client: &S, config: &RunConfig) -> Result<AdvancedSearchResponse>
where
    S: SearchOperations + Sync,
{
    let options =
        AdvancedSearchOptions::new(config.location.clone()).with_sic_codes(config.sic_codes.clone());
    client.advanced_search(options).await
}

/// Runs one fetch and one report write with the given search client.
///
/// A failed fetch returns before anything is written.
pub async fn run_with<S>(client: &S, config: &RunConfig) -> Result<ReportSummary>
where
    S: SearchOperations + Sync,
{
    let response = fetch_company_data(client, config).await?;
    write_report(
        Some(&response),
        &config.location,
        &config.sic_codes,
        &config.output_dir,
    )
}

/// Builds a [`CompaniesHouse`] client from `client_config` and runs the
/// pipeline.
pub async fn run(config: &RunConfig, client_config: ChConfig) -> Result<ReportSummary> {
    let client = CompaniesHouse::with_config(&config.api_key, client_config)?;
    run_with(&client, config).await
}
