//! Data module - spreadsheet loading, cell parsing and column classification

mod classifier;
mod loader;
mod parse;
mod table;

pub use classifier::{
    cell_as_date, is_date_name, is_plausible_serial, ClassifiedColumn, ColumnClassifier,
    ColumnKind, SERIAL_DETECT_RANGE, SERIAL_PARSE_RANGE,
};
pub use loader::{DataLoader, InputFormat};
pub use parse::{parse_date_text, parse_number_text, serial_to_datetime};
pub use table::{CellValue, Column, Table};
