//! In-memory table of named columns.
//!
//! Cells keep the type they were read with; conversion to numbers or dates
//! happens later, per column, so a single bad cell never fails a load.

use chrono::NaiveDateTime;
use polars::prelude::*;
use std::collections::HashSet;

use super::parse::{parse_date_text, parse_number_text};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

/// Hashable view of a non-empty cell, used for distinct counting.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a numeric cell, mapping NaN to `Empty`.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            CellValue::Empty
        } else {
            CellValue::Number(value)
        }
    }

    /// Build a text cell, mapping blank strings to `Empty`.
    pub fn text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric reading of the cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Text(s) => parse_number_text(s),
            _ => None,
        }
    }

    /// Calendar reading of a non-numeric cell (native dates and date strings).
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            CellValue::Text(s) => parse_date_text(s),
            _ => None,
        }
    }

    fn key(&self) -> Option<CellKey<'_>> {
        match self {
            CellValue::Empty => None,
            // -0.0 and 0.0 count as the same value
            CellValue::Number(v) => Some(CellKey::Number((v + 0.0).to_bits())),
            CellValue::Text(s) => Some(CellKey::Text(s)),
            CellValue::Bool(b) => Some(CellKey::Bool(*b)),
            CellValue::DateTime(dt) => Some(CellKey::DateTime(*dt)),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn non_null(&self) -> impl Iterator<Item = &CellValue> {
        self.values.iter().filter(|v| !v.is_null())
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn non_null_count(&self) -> usize {
        self.len() - self.null_count()
    }

    /// Count of distinct non-null values.
    pub fn unique_count(&self) -> usize {
        self.values
            .iter()
            .filter_map(CellValue::key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// All values that convert to a finite number, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_number).collect()
    }
}

/// Rows × named columns. Shape is fixed once built.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build from header names and row-major cells.
    ///
    /// Short rows are padded with `Empty`. Rows wider than the header get
    /// extra positional column names. Header names are made unique.
    pub fn from_rows(mut headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width > headers.len() {
            headers.resize(width, String::new());
        }
        let headers = unique_headers(headers);
        let row_count = rows.len();
        let mut columns: Vec<Vec<CellValue>> = headers
            .iter()
            .map(|_| Vec::with_capacity(row_count))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        let columns = headers
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name, values))
            .collect();

        Self { columns, row_count }
    }

    /// Convert a polars `DataFrame` cell by cell.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, PolarsError> {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let headers = unique_headers(headers);

        let mut columns = Vec::with_capacity(df.width());
        for (name, col) in headers.into_iter().zip(df.get_columns()) {
            columns.push(Column::new(name, column_cells(col)?));
        }

        Ok(Self {
            columns,
            row_count: df.height(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }
}

fn column_cells(col: &polars::prelude::Column) -> Result<Vec<CellValue>, PolarsError> {
    let cells = match col.dtype() {
        DataType::Float32
        | DataType::Float64
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            let values = col.cast(&DataType::Float64)?;
            values
                .f64()?
                .into_iter()
                .map(|v| v.map(CellValue::number).unwrap_or(CellValue::Empty))
                .collect()
        }
        DataType::Boolean => col
            .as_materialized_series()
            .bool()?
            .into_iter()
            .map(|v| v.map(CellValue::Bool).unwrap_or(CellValue::Empty))
            .collect(),
        _ => {
            let values = col.cast(&DataType::String)?;
            values
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.map(CellValue::text).unwrap_or(CellValue::Empty))
                .collect()
        }
    };
    Ok(cells)
}

/// Trim headers, name blank ones by position and suffix duplicates.
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            let trimmed = raw.trim();
            let base = if trimmed.is_empty() {
                format!("Column{}", idx + 1)
            } else {
                trimmed.to_string()
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![num(1.0)], vec![num(2.0), CellValue::text("x")]],
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        let b = table.column("b").unwrap();
        assert_eq!(b.values()[0], CellValue::Empty);
        assert_eq!(b.values()[1], CellValue::Text("x".into()));
    }

    #[test]
    fn test_from_rows_widens_short_header() {
        let table = Table::from_rows(vec!["a".into()], vec![vec![num(1.0), num(2.0)]]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns()[1].name(), "Column2");
        assert_eq!(table.columns()[1].numeric_values(), vec![2.0]);
    }

    #[test]
    fn test_headers_blank_and_duplicate() {
        let table = Table::from_rows(
            vec![" Amount ".into(), "".into(), "Amount".into(), "Amount".into()],
            vec![],
        );
        let names: Vec<&str> = table.columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Amount", "Column2", "Amount.1", "Amount.2"]);
    }

    #[test]
    fn test_null_and_unique_counts() {
        let column = Column::new(
            "c",
            vec![
                num(1.0),
                num(1.0),
                CellValue::Empty,
                CellValue::text("  "),
                CellValue::text("a"),
                num(-0.0),
                num(0.0),
            ],
        );
        assert_eq!(column.null_count(), 2);
        assert_eq!(column.non_null_count(), 5);
        assert_eq!(column.null_count() + column.non_null_count(), column.len());
        assert_eq!(column.unique_count(), 3);
    }

    #[test]
    fn test_numeric_values_skip_unparseable() {
        let column = Column::new(
            "c",
            vec![
                num(10.0),
                CellValue::text("1,250.50"),
                CellValue::text("n/a"),
                CellValue::Bool(true),
                CellValue::number(f64::NAN),
            ],
        );
        assert_eq!(column.numeric_values(), vec![10.0, 1250.5]);
    }

    #[test]
    fn test_from_dataframe() {
        let df = polars::df!(
            "amount" => [Some(1.5), None, Some(3.0)],
            "memo" => [Some("a"), Some(""), None],
            "posted" => [true, false, true],
        )
        .unwrap();
        let table = Table::from_dataframe(&df).unwrap();
        assert_eq!(table.row_count(), 3);
        let amount = table.column("amount").unwrap();
        assert_eq!(amount.numeric_values(), vec![1.5, 3.0]);
        assert_eq!(table.column("memo").unwrap().null_count(), 2);
        assert_eq!(
            table.column("posted").unwrap().values()[1],
            CellValue::Bool(false)
        );
    }
}
