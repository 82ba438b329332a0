//! JE Benford - Journal-entry spreadsheet profiling & Benford's Law analysis
//!
//! One run reads a single spreadsheet and writes a fixed set of reports:
//!
//! ```text
//! load → classify columns → summarize → Benford analysis → write files
//! ```

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod report;
pub mod stats;

use std::path::PathBuf;
use tracing::info;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, InputError, OutputError};

use data::{ColumnClassifier, DataLoader};
use report::ReportWriter;
use stats::{BenfordAnalyzer, BenfordReport, DatasetSummary, StatsCalculator};

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: DatasetSummary,
    pub benford: BenfordReport,
    pub files: Vec<PathBuf>,
}

/// Run the whole pipeline for one input file.
///
/// The input is fully loaded before the output directory is touched, so an
/// `InputError` never leaves partial output behind.
pub fn run(config: &AnalysisConfig) -> Result<RunOutcome, AnalysisError> {
    config.validate()?;

    let table = DataLoader::new(&config.input)
        .with_sheet(config.sheet.clone())
        .load()?;

    let classified = ColumnClassifier::new(config).classify_table(&table);
    for column in &classified {
        tracing::debug!(column = %column.name, kind = %column.kind, "Classified column");
    }

    let summary = StatsCalculator::summarize(&table, &classified);
    info!(
        numeric = summary.numeric.len(),
        dates = summary.dates.len(),
        "Column profiles computed"
    );

    let benford = BenfordAnalyzer::analyze(&table, &classified);

    let writer = ReportWriter::create(&config.output_dir)?;
    let files = writer.write_all(&summary, &benford)?;

    Ok(RunOutcome {
        summary,
        benford,
        files,
    })
}
