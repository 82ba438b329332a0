//! Column Classifier Module
//! Tags each column as numeric, date-like or other.

use std::fmt;

use super::table::{CellValue, Column, Table};
use crate::config::AnalysisConfig;

/// Integral values in this range are read as Excel date serials (1954–2064)
/// when deciding whether a numeric column holds dates.
pub const SERIAL_DETECT_RANGE: (f64, f64) = (20_000.0, 60_000.0);

/// Serials accepted when reading a date-like column (1900-01-01 to 2100-01-01).
pub const SERIAL_PARSE_RANGE: (f64, f64) = (1.0, 73_050.0);

/// Classifier tag for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKind {
    Numeric,
    DateLike,
    Other,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::DateLike => "date-like",
            ColumnKind::Other => "other",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind assigned to one column, by name.
#[derive(Debug, Clone)]
pub struct ClassifiedColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// Column classification with configurable thresholds.
pub struct ColumnClassifier {
    numeric_threshold: f64,
    date_threshold: f64,
}

impl ColumnClassifier {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            numeric_threshold: config.numeric_threshold,
            date_threshold: config.date_threshold,
        }
    }

    /// Classify every column of the table, in table order.
    pub fn classify_table(&self, table: &Table) -> Vec<ClassifiedColumn> {
        table
            .columns()
            .iter()
            .map(|column| ClassifiedColumn {
                name: column.name().to_string(),
                kind: self.classify(column),
            })
            .collect()
    }

    /// Date-like wins over numeric.
    pub fn classify(&self, column: &Column) -> ColumnKind {
        if is_date_name(column.name()) {
            return ColumnKind::DateLike;
        }

        let non_null = column.non_null_count();
        if non_null == 0 {
            return ColumnKind::Other;
        }

        let mut date_hits = 0usize;
        let mut numeric_hits = 0usize;
        for value in column.non_null() {
            match value.as_number() {
                Some(v) => {
                    numeric_hits += 1;
                    if is_plausible_serial(v) {
                        date_hits += 1;
                    }
                }
                None => {
                    if value.as_date().is_some() {
                        date_hits += 1;
                    }
                }
            }
        }

        let total = non_null as f64;
        if date_hits as f64 / total >= self.date_threshold {
            ColumnKind::DateLike
        } else if numeric_hits as f64 / total >= self.numeric_threshold {
            ColumnKind::Numeric
        } else {
            ColumnKind::Other
        }
    }
}

/// Case-insensitive "date" anywhere in the column name.
pub fn is_date_name(name: &str) -> bool {
    name.to_lowercase().contains("date")
}

/// Whole numbers in the serial detection window.
pub fn is_plausible_serial(value: f64) -> bool {
    value >= SERIAL_DETECT_RANGE.0
        && value <= SERIAL_DETECT_RANGE.1
        && (value - value.round()).abs() < 0.01
}

/// Calendar value of a cell inside a date-like column.
///
/// Text that is not a date string but reads as a number (`"45322"`) is
/// taken as a serial, matching how the classifier counted it.
pub fn cell_as_date(value: &CellValue) -> Option<chrono::NaiveDateTime> {
    match value {
        CellValue::Number(v) => super::parse::serial_to_datetime(*v, SERIAL_PARSE_RANGE),
        CellValue::Text(_) => value.as_date().or_else(|| {
            value
                .as_number()
                .and_then(|v| super::parse::serial_to_datetime(v, SERIAL_PARSE_RANGE))
        }),
        other => other.as_date(),
    }
}
