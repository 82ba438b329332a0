//! Report module - text, CSV and chart outputs

mod writer;

pub use writer::{
    render_summary_text, ReportWriter, BENFORD_DETAIL_CSV, BENFORD_MAD_SVG, BENFORD_OVERALL_SVG,
    BENFORD_SUMMARY_CSV, COLUMN_SUMMARY_CSV, DATE_SUMMARY_CSV, NUMERIC_SUMMARY_CSV, SUMMARY_TXT,
};
