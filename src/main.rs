use std::path::PathBuf;
use std::process::ExitCode;

use chkit::{ChConfig, ReportOutcome, ReportSummary, RunConfig, run};
use clap::Parser;

/// Write the registered office addresses of active companies matching a
/// location and SIC codes to `<location>_<first code>.txt`.
#[derive(Debug, Parser)]
#[command(name = "chkit", version)]
struct Args {
    /// Raw Companies House API key (not base64 encoded).
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Location to search (e.g. "Manchester").
    #[arg(long, env = "LOCATION")]
    location: Option<String>,

    /// Comma-separated SIC codes (e.g. "62020,62012").
    #[arg(long, env = "SIC_CODES")]
    sic_codes: Option<String>,

    /// Directory the report is written into.
    #[arg(long, env = "OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match RunConfig::new(args.api_key, args.location, args.sic_codes) {
        Ok(config) => config.with_output_dir(args.output_dir),
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Example .env content: API_KEY=your_actual_api_key_without_encoding");
            return ExitCode::FAILURE;
        }
    };

    match run(&config, ChConfig::default()).await {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            tracing::error!("{}", e);
            println!("Could not retrieve or process company data. Please check previous error messages.");
        }
    }

    ExitCode::SUCCESS
}

fn print_summary(summary: &ReportSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

/// Operator-facing lines for a finished report.
fn summary_lines(summary: &ReportSummary) -> Vec<String> {
    let stats = &summary.stats;
    let path = summary.path.display();

    match stats.outcome {
        ReportOutcome::NoData => {
            vec![format!("Output file '{}' created with no data message.", path)]
        }
        ReportOutcome::AllSkipped => {
            vec![format!(
                "Output file '{}' created indicating all records skipped.",
                path
            )]
        }
        ReportOutcome::Written => {
            let mut lines = vec![
                format!("Addresses successfully written to {}", path),
                format!("Total companies processed and written: {}", stats.processed),
            ];
            if stats.skipped > 0 {
                lines.push(format!(
                    "Total companies skipped due to missing address: {}",
                    stats.skipped
                ));
            }
            lines.push(match stats.hits {
                Some(hits) => format!("Total hits reported by API: {}", hits),
                None => "Total hits reported by API: N/A".to_string(),
            });
            if stats.partial {
                lines.push(
                    "Note: The number of items on this page is less than total API hits.".to_string(),
                );
                lines.push(
                    "This might be due to the 'size' parameter limit per request. Pagination might be needed for all results."
                        .to_string(),
                );
            }
            lines
        }
    }
}
