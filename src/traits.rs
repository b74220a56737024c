//! Trait definitions for registry operations.
//!
//! The `CompaniesHouse` client implements these. The pipeline in `run` is
//! generic over them, so tests can swap in a canned implementation.

use super::error::Result;
use super::search::{AdvancedSearchOptions, AdvancedSearchResponse};
use async_trait::async_trait;

/// Operations for searching the company register.
///
/// Only single-page queries are supported: the response carries the first
/// page of items plus the total hit count.
#[async_trait]
pub trait SearchOperations {
    /// Performs an advanced search and returns the parsed first page
    async fn advanced_search(&self, options: AdvancedSearchOptions) -> Result<AdvancedSearchResponse>;
}
