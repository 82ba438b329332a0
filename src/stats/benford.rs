//! Benford Analysis Module
//! Leading-digit distributions, mean absolute deviation and χ² goodness of fit.

use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{debug, info};

use crate::data::{ClassifiedColumn, ColumnKind, Table};

/// Significance threshold for the χ² test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Label of the pooled distribution across all analyzed columns.
pub const OVERALL_LABEL: &str = "ALL";

/// Benford expected frequency of leading digit `d` (1..=9).
pub fn expected_frequency(digit: u8) -> f64 {
    (1.0 + 1.0 / f64::from(digit)).log10()
}

/// Expected frequencies for digits 1..=9, in digit order.
pub fn expected_frequencies() -> [f64; 9] {
    std::array::from_fn(|i| expected_frequency(i as u8 + 1))
}

/// First significant digit of `|value|`; `None` for zero and non-finite values.
pub fn leading_digit(value: f64) -> Option<u8> {
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    let mut v = value.abs();
    while v >= 10.0 {
        v /= 10.0;
    }
    while v < 1.0 {
        v *= 10.0;
    }
    let digit = v.floor() as u8;
    (1..=9).contains(&digit).then_some(digit)
}

/// Mean over the nine digits of |observed − expected|.
pub fn mean_absolute_deviation(observed: &[f64; 9]) -> f64 {
    let expected = expected_frequencies();
    observed
        .iter()
        .zip(expected.iter())
        .map(|(o, e)| (o - e).abs())
        .sum::<f64>()
        / 9.0
}

/// Leading-digit counts for one set of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitDistribution {
    pub counts: [usize; 9],
    pub total: usize,
}

impl DigitDistribution {
    pub fn from_values(values: &[f64]) -> Self {
        let mut dist = Self::default();
        for digit in values.iter().copied().filter_map(leading_digit) {
            dist.counts[usize::from(digit - 1)] += 1;
            dist.total += 1;
        }
        dist
    }

    /// Add another distribution's counts to this one.
    pub fn merge(&mut self, other: &DigitDistribution) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self.total += other.total;
    }

    /// Observed frequency per digit. All zeros when there are no values.
    pub fn observed(&self) -> [f64; 9] {
        if self.total == 0 {
            return [0.0; 9];
        }
        let total = self.total as f64;
        std::array::from_fn(|i| self.counts[i] as f64 / total)
    }

    /// Pearson χ² statistic of the counts against Benford expectations.
    pub fn chi_square(&self) -> f64 {
        let total = self.total as f64;
        self.counts
            .iter()
            .zip(expected_frequencies().iter())
            .map(|(&count, &p)| {
                let expected = p * total;
                (count as f64 - expected).powi(2) / expected
            })
            .sum()
    }
}

/// Benford comparison for one column (or the pooled overall distribution).
#[derive(Debug, Clone)]
pub struct BenfordResult {
    pub column: String,
    pub distribution: DigitDistribution,
    pub observed: [f64; 9],
    pub expected: [f64; 9],
    pub mad: f64,
    pub max_abs_deviation: f64,
    pub top_deviation_digit: u8,
    pub chi_square: f64,
    pub p_value: f64,
    pub is_significant: bool,
}

impl BenfordResult {
    pub fn total_values(&self) -> usize {
        self.distribution.total
    }

    /// Signed observed − expected per digit.
    pub fn deviations(&self) -> [f64; 9] {
        std::array::from_fn(|i| self.observed[i] - self.expected[i])
    }
}

/// Results for every analyzed column plus the pooled distribution.
#[derive(Debug, Clone, Default)]
pub struct BenfordReport {
    /// Sorted by MAD, highest first; ties by column name.
    pub results: Vec<BenfordResult>,
    pub overall: Option<BenfordResult>,
}

impl BenfordReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Column with the largest MAD.
    pub fn most_deviant(&self) -> Option<&BenfordResult> {
        self.results.first()
    }
}

/// Handles Benford's Law analysis over classified columns.
pub struct BenfordAnalyzer;

impl BenfordAnalyzer {
    /// Compare a distribution with Benford's Law. `None` when it has no values.
    pub fn evaluate(column: &str, distribution: DigitDistribution) -> Option<BenfordResult> {
        if distribution.total == 0 {
            return None;
        }

        let observed = distribution.observed();
        let expected = expected_frequencies();

        let mut max_abs_deviation = 0.0;
        let mut top_deviation_digit = 1u8;
        for (i, (o, e)) in observed.iter().zip(expected.iter()).enumerate() {
            let dev = (o - e).abs();
            if dev > max_abs_deviation {
                max_abs_deviation = dev;
                top_deviation_digit = i as u8 + 1;
            }
        }

        let chi_square = distribution.chi_square();
        let (p_value, is_significant) = Self::chi_square_test(chi_square);

        Some(BenfordResult {
            column: column.to_string(),
            mad: mean_absolute_deviation(&observed),
            observed,
            expected,
            max_abs_deviation,
            top_deviation_digit,
            chi_square,
            p_value,
            is_significant,
            distribution,
        })
    }

    /// Upper-tail p-value of χ² with 8 degrees of freedom.
    pub fn chi_square_test(statistic: f64) -> (f64, bool) {
        if let Ok(dist) = ChiSquared::new(8.0) {
            let p_value = dist.sf(statistic);
            (p_value, p_value <= SIGNIFICANCE_THRESHOLD)
        } else {
            (f64::NAN, false)
        }
    }

    pub fn analyze_column(column: &str, values: &[f64]) -> Option<BenfordResult> {
        Self::evaluate(column, DigitDistribution::from_values(values))
    }

    /// Analyze every numeric column. Date-like columns never take part.
    pub fn analyze(table: &Table, classified: &[ClassifiedColumn]) -> BenfordReport {
        let mut results = Vec::new();
        let mut pooled = DigitDistribution::default();

        for (column, class) in table.columns().iter().zip(classified) {
            if class.kind != ColumnKind::Numeric {
                continue;
            }
            let values = column.numeric_values();
            match Self::analyze_column(column.name(), &values) {
                Some(result) => {
                    debug!(
                        column = column.name(),
                        values = result.total_values(),
                        mad = result.mad,
                        "Benford distribution computed"
                    );
                    pooled.merge(&result.distribution);
                    results.push(result);
                }
                None => debug!(column = column.name(), "No usable leading digits, skipped"),
            }
        }

        results.sort_by(|a, b| b.mad.total_cmp(&a.mad).then_with(|| a.column.cmp(&b.column)));

        let overall = Self::evaluate(OVERALL_LABEL, pooled);
        if let Some(overall) = &overall {
            info!(
                columns = results.len(),
                values = overall.total_values(),
                mad = overall.mad,
                "Benford analysis complete"
            );
        }

        BenfordReport { results, overall }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data::{CellValue, ColumnClassifier};

    #[test]
    fn test_expected_frequencies() {
        let expected = expected_frequencies();
        assert!((expected[0] - 0.30103).abs() < 1e-5);
        assert!((expected[8] - 0.045757).abs() < 1e-6);
        assert!((expected.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_leading_digit() {
        assert_eq!(leading_digit(123.0), Some(1));
        assert_eq!(leading_digit(-987.65), Some(9));
        assert_eq!(leading_digit(0.0042), Some(4));
        assert_eq!(leading_digit(7.0), Some(7));
        assert_eq!(leading_digit(1e12), Some(1));
        assert_eq!(leading_digit(0.0), None);
        assert_eq!(leading_digit(f64::NAN), None);
        assert_eq!(leading_digit(f64::INFINITY), None);
    }

    #[test]
    fn test_column_frequencies() {
        let result = BenfordAnalyzer::analyze_column("Amount", &[123.0, 234.0, 345.0]).unwrap();
        assert_eq!(result.distribution.counts[..3], [1, 1, 1]);
        assert!((result.observed[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((result.observed.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(result.total_values(), 3);
    }

    #[test]
    fn test_zeros_are_discarded() {
        let result = BenfordAnalyzer::analyze_column("Amount", &[0.0, 0.0, 50.0]).unwrap();
        assert_eq!(result.total_values(), 1);
        assert_eq!(result.distribution.counts[4], 1);
        assert!(BenfordAnalyzer::analyze_column("Zeros", &[0.0, 0.0]).is_none());
        assert!(BenfordAnalyzer::analyze_column("Nothing", &[]).is_none());
    }

    #[test]
    fn test_mad_zero_only_for_exact_match() {
        let expected = expected_frequencies();
        assert_eq!(mean_absolute_deviation(&expected), 0.0);

        let mut shifted = expected;
        shifted[0] += 0.01;
        shifted[1] -= 0.01;
        assert!(mean_absolute_deviation(&shifted) > 0.0);
    }

    #[test]
    fn test_top_deviation_and_significance() {
        // Everything starts with 9: far from Benford
        let values: Vec<f64> = (0..200).map(|i| 900.0 + f64::from(i) / 4.0).collect();
        let result = BenfordAnalyzer::analyze_column("Skewed", &values).unwrap();
        assert_eq!(result.top_deviation_digit, 9);
        assert!((result.max_abs_deviation - (1.0 - expected_frequency(9))).abs() < 1e-12);
        assert!(result.is_significant);
        assert!(result.p_value < 1e-6);
        let dev = result.deviations();
        assert!(dev[0] < 0.0 && dev[8] > 0.0);
    }

    #[test]
    fn test_powers_of_two_have_small_mad() {
        // Powers of 2 follow Benford's Law closely
        let values: Vec<f64> = (0..500).map(|i| 2f64.powi(i % 60)).collect();
        let result = BenfordAnalyzer::analyze_column("Powers", &values).unwrap();
        assert!(result.mad < 0.02, "mad {}", result.mad);
    }

    #[test]
    fn test_analyze_excludes_date_columns_and_sorts() {
        let rows: Vec<Vec<CellValue>> = (1..=20)
            .map(|i| {
                vec![
                    CellValue::Number(f64::from(i) * 111.0),
                    CellValue::Number(45_000.0 + f64::from(i)),
                    CellValue::Number(900.0 + f64::from(i)),
                    CellValue::text("memo"),
                ]
            })
            .collect();
        let table = Table::from_rows(
            vec![
                "Debit".into(),
                "Transaction Date".into(),
                "Credit".into(),
                "Memo".into(),
            ],
            rows,
        );
        let classified =
            ColumnClassifier::new(&AnalysisConfig::default()).classify_table(&table);
        let report = BenfordAnalyzer::analyze(&table, &classified);

        let names: Vec<&str> = report.results.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(names, vec!["Credit", "Debit"]);
        assert!(report.results[0].mad >= report.results[1].mad);
        assert_eq!(report.most_deviant().unwrap().column, "Credit");

        let overall = report.overall.unwrap();
        assert_eq!(overall.column, OVERALL_LABEL);
        assert_eq!(overall.total_values(), 40);
        for result in &report.results {
            assert!((result.observed.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}
