//! Error types for loading, analysis and report writing.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the input spreadsheet. Always fatal, and always
/// raised before anything is written to the output directory.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported input format: {0} (expected xlsx, xlsm, xlsb, xls, ods or csv)")]
    UnsupportedFormat(PathBuf),
    #[error("Failed to read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Worksheet '{0}' not found")]
    SheetNotFound(String),
    #[error("No worksheet found in {0}")]
    NoWorksheet(PathBuf),
    #[error("Input table is empty ({rows} rows, {columns} columns)")]
    Empty { rows: usize, columns: usize },
}

/// Failures while writing report files.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to render chart {path}: {message}")]
    Chart { path: PathBuf, message: String },
}

/// Top-level error of a full analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}
