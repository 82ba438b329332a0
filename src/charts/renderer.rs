//! Static Chart Renderer
//! Generates the Benford bar charts as SVG files with plotters.
//!
//! Layout (both charts):
//! 1. Title centered at the top
//! 2. Bars on a white background, one slot per category
//! 3. Category names under each slot, legend in the upper right

use plotters::prelude::*;
use std::path::Path;

use crate::error::OutputError;
use crate::stats::{BenfordReport, BenfordResult};

// Colors
const OBSERVED: RGBColor = RGBColor(27, 158, 119);
const EXPECTED: RGBColor = RGBColor(117, 112, 179);
const MAD: RGBColor = RGBColor(217, 95, 2);

const CHART_SIZE: (u32, u32) = (900, 450);

/// Fraction of a category slot covered by bars
const BAR_FILL: f64 = 0.7;

/// One named set of bar heights.
struct Series<'a> {
    name: &'a str,
    values: Vec<f64>,
    color: RGBColor,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Observed vs expected digit frequencies, pooled over all analyzed columns.
    pub fn render_overall(overall: &BenfordResult, path: &Path) -> Result<(), OutputError> {
        let labels: Vec<String> = (1..=9).map(|d| d.to_string()).collect();
        let series = [
            Series {
                name: "Observed",
                values: overall.observed.to_vec(),
                color: OBSERVED,
            },
            Series {
                name: "Expected",
                values: overall.expected.to_vec(),
                color: EXPECTED,
            },
        ];
        Self::draw_bar_chart(
            path,
            "Overall Benford Analysis (Observed vs Expected)",
            "Leading digit",
            "Frequency",
            &labels,
            &series,
        )
    }

    /// Per-column MAD, in report order (highest first).
    pub fn render_mad_by_column(report: &BenfordReport, path: &Path) -> Result<(), OutputError> {
        let labels: Vec<String> = report.results.iter().map(|r| r.column.clone()).collect();
        let series = [Series {
            name: "MAD",
            values: report.results.iter().map(|r| r.mad).collect(),
            color: MAD,
        }];
        Self::draw_bar_chart(
            path,
            "Benford MAD by Column (Higher = More Deviation)",
            "Column",
            "Mean absolute deviation",
            &labels,
            &series,
        )
    }

    fn draw_bar_chart(
        path: &Path,
        title: &str,
        x_desc: &str,
        y_desc: &str,
        labels: &[String],
        series: &[Series<'_>],
    ) -> Result<(), OutputError> {
        Self::try_draw_bar_chart(path, title, x_desc, y_desc, labels, series).map_err(|e| {
            OutputError::Chart {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
    }

    fn try_draw_bar_chart(
        path: &Path,
        title: &str,
        x_desc: &str,
        y_desc: &str,
        labels: &[String],
        series: &[Series<'_>],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let slots = labels.len().max(1);
        let y_max = Self::y_upper_bound(series);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..y_max)?;

        let label_for = |x: &f64| -> String {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_label_formatter(&label_for)
            .y_label_formatter(&|y| format!("{y:.3}"))
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()?;

        let bar_width = BAR_FILL / series.len().max(1) as f64;
        for (series_idx, s) in series.iter().enumerate() {
            let offset = -BAR_FILL / 2.0 + series_idx as f64 * bar_width;
            let color = s.color;
            chart
                .draw_series(s.values.iter().enumerate().map(|(i, &v)| {
                    let x0 = i as f64 + offset;
                    Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.filled())
                }))?
                .label(s.name)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// Tallest bar plus 10% headroom; a small positive default for all-zero data.
    fn y_upper_bound(series: &[Series<'_>]) -> f64 {
        let max = series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0f64, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            0.01
        }
    }
}
