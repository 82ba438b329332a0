//! Stats module - descriptive profiles and Benford's Law analysis

mod benford;
mod calculator;

pub use benford::{
    expected_frequencies, expected_frequency, leading_digit, mean_absolute_deviation,
    BenfordAnalyzer, BenfordReport, BenfordResult, DigitDistribution, OVERALL_LABEL,
    SIGNIFICANCE_THRESHOLD,
};
pub use calculator::{
    ColumnProfile, DatasetSummary, DateProfile, NumericProfile, StatsCalculator,
};
