//! Run configuration.

use std::path::PathBuf;

use crate::error::AnalysisError;

/// Share of non-null values that must convert to numbers for a numeric column.
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.9;

/// Share of non-null values that must read as dates for a date-like column.
pub const DEFAULT_DATE_THRESHOLD: f64 = 0.8;

/// Everything one analysis run needs.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub sheet: Option<String>,
    pub numeric_threshold: f64,
    pub date_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("je_samples.xlsx"),
            output_dir: PathBuf::from("outputs"),
            sheet: None,
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
            date_threshold: DEFAULT_DATE_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Thresholds must lie in (0, 1].
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (name, value) in [
            ("numeric threshold", self.numeric_threshold),
            ("date threshold", self.date_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(AnalysisError::Config(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}
