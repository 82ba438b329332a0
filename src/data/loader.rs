//! Spreadsheet Loader Module
//! Reads the first (or a named) worksheet with calamine, or a CSV file with Polars.

use calamine::{open_workbook_auto, Data, DataType as _, Reader};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::table::{CellValue, Table};
use crate::error::InputError;

/// Input formats the loader understands, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputFormat::Workbook),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

/// Handles spreadsheet loading into a [`Table`].
pub struct DataLoader {
    file_path: PathBuf,
    sheet: Option<String>,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            sheet: None,
        }
    }

    /// Read this worksheet instead of the first one. Ignored for CSV input.
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the input into a table with at least one row and one column.
    pub fn load(&self) -> Result<Table, InputError> {
        let path = self.file_path.as_path();
        if !path.is_file() {
            return Err(InputError::NotFound(path.to_path_buf()));
        }
        let format = InputFormat::from_path(path)
            .ok_or_else(|| InputError::UnsupportedFormat(path.to_path_buf()))?;

        let table = match format {
            InputFormat::Workbook => self.load_workbook()?,
            InputFormat::Csv => self.load_csv()?,
        };

        if table.is_empty() {
            return Err(InputError::Empty {
                rows: table.row_count(),
                columns: table.column_count(),
            });
        }

        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "Loaded input table"
        );
        Ok(table)
    }

    fn load_csv(&self) -> Result<Table, InputError> {
        // Infer over every row: a late text cell in a numeric-looking column
        // must stay a value, not turn into a null
        let df = LazyCsvReader::new(&self.file_path)
            .with_infer_schema_length(None)
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        debug!(rows = df.height(), columns = df.width(), "CSV parsed by polars");
        Ok(Table::from_dataframe(&df)?)
    }

    fn load_workbook(&self) -> Result<Table, InputError> {
        let path = self.file_path.as_path();
        let unreadable = |message: String| InputError::Unreadable {
            path: path.to_path_buf(),
            message,
        };

        let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
        let sheet_names = workbook.sheet_names();

        let index = match &self.sheet {
            Some(name) => sheet_names
                .iter()
                .position(|s| s == name)
                .ok_or_else(|| InputError::SheetNotFound(name.clone()))?,
            None => 0,
        };
        if let Some(name) = sheet_names.get(index) {
            debug!(sheet = %name, "Reading worksheet");
        }

        let range = workbook
            .worksheet_range_at(index)
            .ok_or_else(|| InputError::NoWorksheet(path.to_path_buf()))?
            .map_err(|e| unreadable(e.to_string()))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(header_text).collect(),
            None => Vec::new(),
        };
        let data_rows: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(cell_value).collect())
            .collect();

        Ok(Table::from_rows(headers, data_rows))
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::number(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::String(s) => CellValue::text(s),
        other => other
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::text(&other.to_string())),
    }
}
