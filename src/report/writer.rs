//! Report Writer Module
//! Serializes profiles and Benford results into the output directory.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::charts::StaticChartRenderer;
use crate::error::OutputError;
use crate::stats::{BenfordReport, DatasetSummary};

pub const SUMMARY_TXT: &str = "je_samples_summary.txt";
pub const COLUMN_SUMMARY_CSV: &str = "column_summary.csv";
pub const NUMERIC_SUMMARY_CSV: &str = "numeric_summary.csv";
pub const DATE_SUMMARY_CSV: &str = "date_summary.csv";
pub const BENFORD_SUMMARY_CSV: &str = "benford_summary.csv";
pub const BENFORD_DETAIL_CSV: &str = "benford_digit_detail.csv";
pub const BENFORD_OVERALL_SVG: &str = "benford_overall.svg";
pub const BENFORD_MAD_SVG: &str = "benford_mad_by_column.svg";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const COLUMN_HEADERS: [&str; 5] = [
    "column",
    "non_null_count",
    "null_count",
    "unique_count",
    "dtype",
];
const NUMERIC_HEADERS: [&str; 8] = [
    "column", "count", "mean", "std", "min", "median", "max", "sum",
];
const DATE_HEADERS: [&str; 4] = ["column", "parsed_count", "min", "max"];
const BENFORD_SUMMARY_HEADERS: [&str; 8] = [
    "column",
    "total_values",
    "mad",
    "max_abs_deviation",
    "top_deviation_digit",
    "chi_square",
    "p_value",
    "is_significant",
];
const BENFORD_DETAIL_HEADERS: [&str; 6] = [
    "column",
    "digit",
    "count",
    "observed",
    "expected",
    "deviation",
];

#[derive(Serialize)]
struct ColumnSummaryRow<'a> {
    column: &'a str,
    non_null_count: usize,
    null_count: usize,
    unique_count: usize,
    dtype: &'static str,
}

#[derive(Serialize)]
struct NumericSummaryRow<'a> {
    column: &'a str,
    count: usize,
    mean: String,
    std: String,
    min: String,
    median: String,
    max: String,
    sum: String,
}

#[derive(Serialize)]
struct DateSummaryRow<'a> {
    column: &'a str,
    parsed_count: usize,
    min: String,
    max: String,
}

#[derive(Serialize)]
struct BenfordSummaryRow<'a> {
    column: &'a str,
    total_values: usize,
    mad: String,
    max_abs_deviation: String,
    top_deviation_digit: u8,
    chi_square: String,
    p_value: String,
    is_significant: bool,
}

#[derive(Serialize)]
struct DigitDetailRow<'a> {
    column: &'a str,
    digit: u8,
    count: usize,
    observed: String,
    expected: String,
    deviation: String,
}

/// Fixed-precision float text; NaN becomes an empty field.
fn fmt_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:.6}")
    }
}

/// Writes every report file into one output directory.
#[derive(Debug)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create the output directory (and parents) if needed.
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self, OutputError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| OutputError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// Write all text, CSV and chart outputs. Returns the paths written.
    pub fn write_all(
        &self,
        summary: &DatasetSummary,
        benford: &BenfordReport,
    ) -> Result<Vec<PathBuf>, OutputError> {
        let mut written = vec![
            self.write_summary_text(summary, benford)?,
            self.write_column_summary(summary)?,
            self.write_numeric_summary(summary)?,
            self.write_date_summary(summary)?,
            self.write_benford_summary(benford)?,
            self.write_benford_detail(benford)?,
        ];

        match &benford.overall {
            Some(overall) => {
                let overall_path = self.path(BENFORD_OVERALL_SVG);
                StaticChartRenderer::render_overall(overall, &overall_path)?;
                written.push(overall_path);

                let mad_path = self.path(BENFORD_MAD_SVG);
                StaticChartRenderer::render_mad_by_column(benford, &mad_path)?;
                written.push(mad_path);
            }
            None => warn!("No column qualified for Benford analysis, charts skipped"),
        }

        info!(
            output_dir = %self.output_dir.display(),
            files = written.len(),
            "Report written"
        );
        Ok(written)
    }

    pub fn write_summary_text(
        &self,
        summary: &DatasetSummary,
        benford: &BenfordReport,
    ) -> Result<PathBuf, OutputError> {
        let path = self.path(SUMMARY_TXT);
        let text = render_summary_text(summary, benford);
        fs::write(&path, text).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn write_column_summary(&self, summary: &DatasetSummary) -> Result<PathBuf, OutputError> {
        let rows = summary.columns.iter().map(|c| ColumnSummaryRow {
            column: &c.name,
            non_null_count: c.non_null_count,
            null_count: c.null_count,
            unique_count: c.unique_count,
            dtype: c.dtype.as_str(),
        });
        self.write_csv(COLUMN_SUMMARY_CSV, &COLUMN_HEADERS, rows)
    }

    pub fn write_numeric_summary(&self, summary: &DatasetSummary) -> Result<PathBuf, OutputError> {
        let rows = summary.numeric.iter().map(|n| NumericSummaryRow {
            column: &n.column,
            count: n.count,
            mean: fmt_float(n.mean),
            std: fmt_float(n.std),
            min: fmt_float(n.min),
            median: fmt_float(n.median),
            max: fmt_float(n.max),
            sum: fmt_float(n.sum),
        });
        self.write_csv(NUMERIC_SUMMARY_CSV, &NUMERIC_HEADERS, rows)
    }

    pub fn write_date_summary(&self, summary: &DatasetSummary) -> Result<PathBuf, OutputError> {
        let fmt_date = |d: Option<chrono::NaiveDateTime>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        let rows = summary.dates.iter().map(|d| DateSummaryRow {
            column: &d.column,
            parsed_count: d.parsed_count,
            min: fmt_date(d.min),
            max: fmt_date(d.max),
        });
        self.write_csv(DATE_SUMMARY_CSV, &DATE_HEADERS, rows)
    }

    pub fn write_benford_summary(&self, benford: &BenfordReport) -> Result<PathBuf, OutputError> {
        let rows = benford.results.iter().map(|r| BenfordSummaryRow {
            column: &r.column,
            total_values: r.total_values(),
            mad: fmt_float(r.mad),
            max_abs_deviation: fmt_float(r.max_abs_deviation),
            top_deviation_digit: r.top_deviation_digit,
            chi_square: fmt_float(r.chi_square),
            p_value: fmt_float(r.p_value),
            is_significant: r.is_significant,
        });
        self.write_csv(BENFORD_SUMMARY_CSV, &BENFORD_SUMMARY_HEADERS, rows)
    }

    pub fn write_benford_detail(&self, benford: &BenfordReport) -> Result<PathBuf, OutputError> {
        let rows = benford.results.iter().flat_map(|r| {
            let deviations = r.deviations();
            (0..9).map(move |i| DigitDetailRow {
                column: &r.column,
                digit: i as u8 + 1,
                count: r.distribution.counts[i],
                observed: fmt_float(r.observed[i]),
                expected: fmt_float(r.expected[i]),
                deviation: fmt_float(deviations[i]),
            })
        });
        self.write_csv(BENFORD_DETAIL_CSV, &BENFORD_DETAIL_HEADERS, rows)
    }

    /// Header row is always written, even with no records.
    fn write_csv<T: Serialize>(
        &self,
        name: &str,
        headers: &[&str],
        rows: impl IntoIterator<Item = T>,
    ) -> Result<PathBuf, OutputError> {
        let path = self.path(name);
        let csv_err = |source: csv::Error| OutputError::Csv {
            path: path.clone(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(csv_err)?;
        writer.write_record(headers).map_err(csv_err)?;
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Plain-text overview of the dataset and the Benford results.
pub fn render_summary_text(summary: &DatasetSummary, benford: &BenfordReport) -> String {
    let list = |names: &[&str]| {
        if names.is_empty() {
            "None".to_string()
        } else {
            names.join(", ")
        }
    };
    let numeric = summary.numeric_columns();
    let dates = summary.date_columns();

    let mut lines = vec![
        "JE Samples Summary".to_string(),
        "===================".to_string(),
        format!("Rows: {}", summary.row_count),
        format!("Columns: {}", summary.column_count),
        String::new(),
        format!("Numeric columns ({}): {}", numeric.len(), list(&numeric)),
        format!("Date columns ({}): {}", dates.len(), list(&dates)),
    ];

    if let Some((min, max)) = summary.overall_date_range() {
        lines.push(String::new());
        lines.push(format!(
            "Overall date range: {} to {}",
            min.format(DATE_FORMAT),
            max.format(DATE_FORMAT)
        ));
    }

    lines.push(String::new());
    match &benford.overall {
        Some(overall) => {
            lines.push(format!(
                "Benford analysis: {} columns, {} values",
                benford.results.len(),
                overall.total_values()
            ));
            lines.push(format!("Overall MAD: {}", fmt_float(overall.mad)));
            if let Some(top) = benford.most_deviant() {
                lines.push(format!(
                    "Highest MAD column: {} ({})",
                    top.column,
                    fmt_float(top.mad)
                ));
            }
        }
        None => lines.push("Benford analysis: no eligible numeric columns".to_string()),
    }

    lines.extend(
        [
            "",
            "Outputs:",
            "- column_summary.csv (row counts, nulls, uniques, dtypes)",
            "- numeric_summary.csv (descriptive stats for numeric columns)",
            "- date_summary.csv (min/max for date-like columns)",
            "- benford_summary.csv (MAD and chi-square per column)",
            "- benford_digit_detail.csv (observed vs expected per digit)",
        ]
        .map(String::from),
    );
    if benford.overall.is_some() {
        lines.push(format!(
            "- {BENFORD_OVERALL_SVG}, {BENFORD_MAD_SVG} (charts)"
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
