//! Chart Composer
//! Turns region table rows into chart-ready series. No statistics are computed here.

use crate::data::{Region, RegionSeries};
use thiserror::Error;

/// Slice colors, in positive / negative / neutral order.
pub const PIE_COLORS: [[u8; 3]; 3] = [[0xff, 0x99, 0x99], [0x66, 0xb3, 0xff], [0x99, 0xff, 0x99]];

pub const PIE_LABELS: [&str; 3] = ["Positive", "Negative", "Neutral"];

/// Radial offset of each slice as a fraction of the radius. Positive stands out.
pub const PIE_EXPLODE: [f32; 3] = [0.1, 0.0, 0.0];

/// First slice starts here, measured counter-clockwise from the x axis.
pub const PIE_START_ANGLE_DEG: f32 = 140.0;

pub const TREND_X_LABEL: &str = "Month";
pub const TREND_Y_LABEL: &str = "Percentage";

#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("{region} has no data for month '{month}'")]
    NotFound { region: Region, month: String },
}

/// One month on the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub month: String,
    pub positive_rate: f64,
    pub negative_rate: f64,
}

/// Review counts of a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieBreakdown {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl PieBreakdown {
    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }

    pub fn values(&self) -> [u64; 3] {
        [self.positive, self.negative, self.neutral]
    }
}

/// A drawable pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: u64,
    /// Share of the total, 0-100.
    pub percentage: f64,
    pub color: [u8; 3],
    pub explode: f32,
}

impl PieSlice {
    /// Percentage label with one decimal, e.g. `71.5%`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

pub struct ChartComposer;

impl ChartComposer {
    /// Rate pairs for every month, in the table's own order.
    pub fn trend_series(series: &RegionSeries) -> Vec<TrendPoint> {
        series
            .rows
            .iter()
            .map(|row| TrendPoint {
                month: row.month.clone(),
                positive_rate: row.positive_rate,
                negative_rate: row.negative_rate,
            })
            .collect()
    }

    /// Counts of the row matching `month` exactly.
    pub fn pie_breakdown(series: &RegionSeries, month: &str) -> Result<PieBreakdown, ChartError> {
        let row = series.find_month(month).ok_or_else(|| ChartError::NotFound {
            region: series.region,
            month: month.to_string(),
        })?;

        Ok(PieBreakdown {
            positive: row.positive,
            negative: row.negative,
            neutral: row.neutral,
        })
    }

    pub fn pie_slices(breakdown: &PieBreakdown) -> Vec<PieSlice> {
        let total = breakdown.total();

        breakdown
            .values()
            .iter()
            .enumerate()
            .map(|(i, &value)| PieSlice {
                label: PIE_LABELS[i],
                value,
                percentage: if total == 0 {
                    0.0
                } else {
                    value as f64 / total as f64 * 100.0
                },
                color: PIE_COLORS[i],
                explode: PIE_EXPLODE[i],
            })
            .collect()
    }

    pub fn trend_caption(region: Region) -> String {
        format!("{} review trend", region)
    }

    pub fn pie_caption(month: &str) -> String {
        format!("{} review breakdown", month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MonthRow;

    fn row(month: &str, rates: (f64, f64), counts: (u64, u64, u64)) -> MonthRow {
        MonthRow {
            month: month.to_string(),
            positive_rate: rates.0,
            negative_rate: rates.1,
            positive: counts.0,
            negative: counts.1,
            neutral: counts.2,
        }
    }

    fn hongkong() -> RegionSeries {
        RegionSeries::new(
            Region::HongKong,
            vec![
                row("March", (75.0, 5.0), (150, 10, 40)),
                row("January", (71.5, 10.2), (143, 21, 36)),
                row("February", (68.0, 12.0), (102, 18, 30)),
            ],
        )
    }

    #[test]
    fn trend_preserves_source_order_and_rates() {
        let series = hongkong();
        let trend = ChartComposer::trend_series(&series);

        assert_eq!(trend.len(), series.rows.len());
        let months: Vec<&str> = trend.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["March", "January", "February"]);
        assert_eq!(trend[1].positive_rate, 71.5);
        assert_eq!(trend[1].negative_rate, 10.2);
    }

    #[test]
    fn breakdown_matches_source_row_for_every_month() {
        let series = hongkong();
        for row in &series.rows {
            let pie = ChartComposer::pie_breakdown(&series, &row.month).unwrap();
            assert_eq!(pie.values(), [row.positive, row.negative, row.neutral]);
            assert_eq!(pie.total(), row.total());
        }
    }

    #[test]
    fn unknown_month_is_not_found() {
        let err = ChartComposer::pie_breakdown(&hongkong(), "July").unwrap_err();
        assert_eq!(
            err,
            ChartError::NotFound {
                region: Region::HongKong,
                month: "July".to_string()
            }
        );
    }

    #[test]
    fn slices_carry_percentages_and_styling() {
        let slices = ChartComposer::pie_slices(&PieBreakdown {
            positive: 143,
            negative: 21,
            neutral: 36,
        });

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].label, "Positive");
        assert_eq!(slices[0].percentage_label(), "71.5%");
        assert_eq!(slices[1].percentage_label(), "10.5%");
        assert_eq!(slices[2].percentage_label(), "18.0%");
        assert_eq!(slices[0].explode, 0.1);
        assert_eq!(slices[1].color, [0x66, 0xb3, 0xff]);
    }

    #[test]
    fn empty_breakdown_has_zero_percentages() {
        let slices = ChartComposer::pie_slices(&PieBreakdown {
            positive: 0,
            negative: 0,
            neutral: 0,
        });
        assert!(slices.iter().all(|s| s.percentage == 0.0));
    }
}
