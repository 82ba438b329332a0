//! JE Benford - command line entry point
//!
//! ```bash
//! je-benford --input je_samples.xlsx --output-dir outputs
//! ```

use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use je_benford::config::{DEFAULT_DATE_THRESHOLD, DEFAULT_NUMERIC_THRESHOLD};
use je_benford::{logging, AnalysisConfig};

#[derive(Parser, Debug)]
#[command(
    name = "je-benford",
    version,
    about = "Profile a journal-entry spreadsheet and run Benford's Law analysis"
)]
struct Cli {
    /// Path to the input spreadsheet (xlsx, xlsm, xlsb, xls, ods or csv)
    #[arg(long)]
    input: PathBuf,

    /// Directory to write output files (created if absent)
    #[arg(long)]
    output_dir: PathBuf,

    /// Worksheet to read. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// Share of non-null values that must be numbers for a numeric column
    #[arg(long, default_value_t = DEFAULT_NUMERIC_THRESHOLD)]
    numeric_threshold: f64,

    /// Share of non-null values that must be dates for a date-like column
    #[arg(long, default_value_t = DEFAULT_DATE_THRESHOLD)]
    date_threshold: f64,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for AnalysisConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output_dir: cli.output_dir,
            sheet: cli.sheet,
            numeric_threshold: cli.numeric_threshold,
            date_threshold: cli.date_threshold,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AnalysisConfig::from(cli);
    let outcome = je_benford::run(&config)
        .inspect_err(|e| error!(error = %e, "Analysis failed"))
        .with_context(|| format!("Failed to analyze {}", config.input.display()))?;

    info!(
        rows = outcome.summary.row_count,
        columns = outcome.summary.column_count,
        benford_columns = outcome.benford.results.len(),
        files = outcome.files.len(),
        "Done"
    );
    Ok(())
}
