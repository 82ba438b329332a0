//! Statistics Calculator Module
//! Handles per-column profiles: null/unique counts, descriptive stats and date ranges.

use chrono::NaiveDateTime;
use statrs::statistics::Statistics;
use std::cmp;
use tracing::debug;

use crate::data::{cell_as_date, ClassifiedColumn, ColumnKind, Table};

/// Counts and classifier tag for any column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: ColumnKind,
    pub non_null_count: usize,
    pub null_count: usize,
    pub unique_count: usize,
}

/// Descriptive statistics for a numeric column.
#[derive(Debug, Clone)]
pub struct NumericProfile {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
    pub sum: f64,
}

impl Default for NumericProfile {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            median: f64::NAN,
            max: f64::NAN,
            sum: 0.0,
        }
    }
}

/// Observed range of a date-like column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateProfile {
    pub column: String,
    pub parsed_count: usize,
    pub min: Option<NaiveDateTime>,
    pub max: Option<NaiveDateTime>,
}

/// Everything the summarizer derives from one table.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    pub numeric: Vec<NumericProfile>,
    pub dates: Vec<DateProfile>,
}

impl DatasetSummary {
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of(ColumnKind::Numeric)
    }

    pub fn date_columns(&self) -> Vec<&str> {
        self.columns_of(ColumnKind::DateLike)
    }

    fn columns_of(&self, kind: ColumnKind) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.dtype == kind)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Earliest min and latest max over all date-like columns.
    pub fn overall_date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.dates.iter().filter_map(|d| d.min).reduce(cmp::min)?;
        let max = self.dates.iter().filter_map(|d| d.max).reduce(cmp::max)?;
        Some((min, max))
    }
}

/// Handles descriptive statistics over a classified table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// Standard deviation is the sample estimate (N − 1); it is NaN for
    /// fewer than two values.
    pub fn compute_descriptive_stats(values: &[f64]) -> NumericProfile {
        let n = values.len();
        if n == 0 {
            return NumericProfile::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(cmp::Ordering::Equal));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        NumericProfile {
            column: String::new(),
            count: n,
            mean: values.mean(),
            std: values.std_dev(),
            min: sorted[0],
            median,
            max: sorted[n - 1],
            sum: values.iter().sum(),
        }
    }

    /// Min/max over the values of a date-like column that parse as dates.
    pub fn compute_date_range(values: impl IntoIterator<Item = NaiveDateTime>) -> DateProfile {
        let mut profile = DateProfile {
            column: String::new(),
            parsed_count: 0,
            min: None,
            max: None,
        };
        for dt in values {
            profile.parsed_count += 1;
            profile.min = Some(profile.min.map_or(dt, |m| cmp::min(m, dt)));
            profile.max = Some(profile.max.map_or(dt, |m| cmp::max(m, dt)));
        }
        profile
    }

    /// Profile every column, then numeric and date-like columns in table order.
    pub fn summarize(table: &Table, classified: &[ClassifiedColumn]) -> DatasetSummary {
        let mut columns = Vec::with_capacity(table.column_count());
        let mut numeric = Vec::new();
        let mut dates = Vec::new();

        for (column, class) in table.columns().iter().zip(classified) {
            columns.push(ColumnProfile {
                name: column.name().to_string(),
                dtype: class.kind,
                non_null_count: column.non_null_count(),
                null_count: column.null_count(),
                unique_count: column.unique_count(),
            });

            match class.kind {
                ColumnKind::Numeric => {
                    let values = column.numeric_values();
                    let skipped = column.non_null_count() - values.len();
                    if skipped > 0 {
                        debug!(column = column.name(), skipped, "Non-numeric values excluded");
                    }
                    let mut profile = Self::compute_descriptive_stats(&values);
                    profile.column = column.name().to_string();
                    numeric.push(profile);
                }
                ColumnKind::DateLike => {
                    let mut profile =
                        Self::compute_date_range(column.non_null().filter_map(cell_as_date));
                    let skipped = column.non_null_count() - profile.parsed_count;
                    if skipped > 0 {
                        debug!(column = column.name(), skipped, "Unparseable dates excluded");
                    }
                    profile.column = column.name().to_string();
                    dates.push(profile);
                }
                ColumnKind::Other => {}
            }
        }

        DatasetSummary {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns,
            numeric,
            dates,
        }
    }
}
