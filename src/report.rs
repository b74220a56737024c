//! Address report generation.
//!
//! Turns a search response into a plain text report of registered office
//! addresses, one block per company:
//!
//! ```text
//! ACME WIDGETS LTD
//! 1 High Street
//! Unit 4            <- only when address_line_2 is present
//! Leeds
//! LS1 1AA
//! ----
//! ```
//!
//! The file is named after the location and the first SIC code and is
//! replaced on every run. When no company has a usable address the file still
//! gets written, holding an explanatory message instead of address blocks.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{ChError, Result};
use super::search::{AdvancedSearchResponse, CompanyItem};

/// Line written after every address block
pub const BLOCK_SEPARATOR: &str = "----";

/// Which branch of report generation produced the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The response was absent or carried no items
    NoData,
    /// Items were returned but none had a usable address
    AllSkipped,
    /// At least one address block was written
    Written,
}

/// Counts gathered while formatting a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStats {
    pub outcome: ReportOutcome,
    pub processed: usize,
    pub skipped: usize,
    /// Items on the fetched page
    pub total_items: usize,
    /// Total hits reported by the API, when present
    pub hits: Option<u64>,
    /// The API reported more hits than the page carried, whichever branch
    /// produced the report
    pub partial: bool,
}

/// A formatted report body and its counts, not yet written.
#[derive(Debug, Clone)]
pub struct FormattedReport {
    pub body: String,
    pub stats: ReportStats,
}

/// Result of a successful report write
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub stats: ReportStats,
}

/// Replaces every non-alphanumeric character with an underscore.
pub fn sanitize_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Derives `<location>_<first code>.txt` with both parts sanitized.
pub fn report_filename(location: &str, first_sic_code: &str) -> String {
    format!(
        "{}_{}.txt",
        sanitize_component(location),
        sanitize_component(first_sic_code)
    )
}

/// Formats the report for a response.
///
/// `None` is treated like a response without items.
pub fn format_report(
    response: Option<&AdvancedSearchResponse>,
    location: &str,
    sic_codes: &[String],
) -> FormattedReport {
    let codes = sic_codes.join(", ");
    let hits = response.and_then(|r| r.hits);
    let partial = response.is_some_and(AdvancedSearchResponse::is_partial);

    let items = match response.and_then(|r| r.items.as_deref()) {
        Some(items) if !items.is_empty() => items,
        _ => {
            return FormattedReport {
                body: format!(
                    "No company data found for location '{}' and SIC code(s) '{}'.\n",
                    location, codes
                ),
                stats: ReportStats {
                    outcome: ReportOutcome::NoData,
                    processed: 0,
                    skipped: 0,
                    total_items: 0,
                    hits,
                    partial,
                },
            };
        }
    };

    let mut lines = Vec::new();
    let mut processed = 0;
    let mut skipped = 0;

    for company in items {
        match address_block(company) {
            Some(block) => {
                lines.extend(block);
                processed += 1;
            }
            None => skipped += 1,
        }
    }

    if processed == 0 {
        return FormattedReport {
            body: format!(
                "No companies with complete address data found for location '{}' and SIC code(s) '{}'.\nTotal records received: {}, Total skipped: {}\n",
                location,
                codes,
                items.len(),
                skipped
            ),
            stats: ReportStats {
                outcome: ReportOutcome::AllSkipped,
                processed,
                skipped,
                total_items: items.len(),
                hits,
                partial,
            },
        };
    }

    FormattedReport {
        body: lines.join("\n"),
        stats: ReportStats {
            outcome: ReportOutcome::Written,
            processed,
            skipped,
            total_items: items.len(),
            hits,
            partial,
        },
    }
}

/// Lines for one company, or `None` when it has to be skipped.
///
/// A company is skipped when its address is missing, null or empty, or when
/// name, first line, locality and postcode are all blank. The second address
/// line never decides either way.
fn address_block(company: &CompanyItem) -> Option<Vec<String>> {
    let address = company
        .registered_office_address
        .as_ref()
        .filter(|address| !address.is_empty())?;

    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    let name = field(&company.company_name);
    let line_1 = field(&address.address_line_1);
    let line_2 = field(&address.address_line_2);
    let locality = field(&address.locality);
    let postal_code = field(&address.postal_code);

    if name.is_empty() && line_1.is_empty() && locality.is_empty() && postal_code.is_empty() {
        return None;
    }

    let mut block = vec![name, line_1];
    if !line_2.is_empty() {
        block.push(line_2);
    }
    block.push(locality);
    block.push(postal_code);
    block.push(BLOCK_SEPARATOR.to_string());
    Some(block)
}

/// Formats and writes the report into `dir`.
///
/// The body goes to a temporary file in the same directory which is then
/// renamed over the target, so a failed write leaves any previous report
/// untouched.
///
/// # Errors
///
/// * `ChError::MissingConfiguration` - `sic_codes` is empty, so no file name
///   can be derived
/// * `ChError::FileWrite` - the file could not be created, written or renamed
pub fn write_report(
    response: Option<&AdvancedSearchResponse>,
    location: &str,
    sic_codes: &[String],
    dir: &Path,
) -> Result<ReportSummary> {
    let first_code = sic_codes.first().ok_or_else(|| {
        ChError::MissingConfiguration(
            "SIC codes list is empty, cannot generate filename".to_string(),
        )
    })?;
    let path = dir.join(report_filename(location, first_code));

    let report = format_report(response, location, sic_codes);
    match report.stats.outcome {
        ReportOutcome::NoData => tracing::info!(
            "No company items found for {} / {}",
            location,
            sic_codes.join(", ")
        ),
        ReportOutcome::AllSkipped => tracing::warn!(
            "All records were skipped due to missing address information for {} / {}",
            location,
            sic_codes.join(", ")
        ),
        ReportOutcome::Written if report.stats.partial => tracing::warn!(
            items = report.stats.total_items,
            hits = ?report.stats.hits,
            "Only a partial result set was retrieved; pagination would be needed for all results"
        ),
        ReportOutcome::Written => {}
    }

    persist(&path, report.body.as_bytes()).map_err(|source| {
        tracing::error!("Error writing to file {}: {}", path.display(), source);
        ChError::FileWrite {
            path: path.clone(),
            source,
        }
    })?;
    tracing::info!(path = %path.display(), outcome = ?report.stats.outcome, "Report written");

    Ok(ReportSummary {
        path,
        stats: report.stats,
    })
}

fn persist(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".chkit-");
    if let Some(permissions) = report_permissions(path) {
        builder.permissions(permissions);
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Mode for the new report: the existing file's, or 0644 for a fresh one.
#[cfg(unix)]
fn report_permissions(path: &Path) -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = fs::metadata(path)
        .map(|metadata| metadata.permissions())
        .unwrap_or_else(|_| Permissions::from_mode(0o644));
    Some(permissions)
}

#[cfg(not(unix))]
fn report_permissions(path: &Path) -> Option<Permissions> {
    fs::metadata(path).ok().map(|metadata| metadata.permissions())
}
