//! View Model
//! Pure mapping from (selection, data) to everything the dashboard shows.

use crate::charts::{
    ChartComposer, PieSlice, TrendPoint, PIE_START_ANGLE_DEG, TREND_X_LABEL, TREND_Y_LABEL,
};
use crate::config::DashboardConfig;
use crate::data::{
    DataContext, RecommendationTable, Region, ReviewSampler, DEFAULT_SAMPLE_LIMIT,
    DEFAULT_SAMPLE_SEED,
};
use crate::view::SelectionState;
use std::path::PathBuf;
use std::sync::Arc;

pub const DASHBOARD_TITLE: &str = "Disneyland Visit Guide";

/// Inputs to `render` that do not come from the user.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub sample_limit: usize,
    pub sample_seed: u64,
    pub banner_image: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            sample_seed: DEFAULT_SAMPLE_SEED,
            banner_image: None,
        }
    }
}

impl From<&DashboardConfig> for RenderOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            sample_limit: config.sample_limit,
            sample_seed: config.sample_seed,
            banner_image: Some(config.banner_path()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub caption: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub caption: String,
    pub slices: Vec<PieSlice>,
    pub start_angle_deg: f32,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.value))
    }
}

/// Everything one dashboard frame displays.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub title: &'static str,
    pub banner_image: Option<PathBuf>,
    pub regions: Vec<Region>,
    pub months: Vec<String>,
    pub selection: SelectionState,
    pub trend: TrendChart,
    pub pie: Option<PieChart>,
    /// Set when the pie cannot be drawn.
    pub notice: Option<String>,
    /// Numbered review lines, `"1. ..."`.
    pub reviews: Vec<String>,
    pub recommendations: Arc<RecommendationTable>,
}

/// Build the view for `state`. A month missing from the region is replaced by its first month.
pub fn render(state: &SelectionState, data: &DataContext, options: &RenderOptions) -> ViewModel {
    let selection = state.normalized(data);
    let series = data.series(selection.region);

    let trend = TrendChart {
        caption: ChartComposer::trend_caption(selection.region),
        x_label: TREND_X_LABEL,
        y_label: TREND_Y_LABEL,
        points: ChartComposer::trend_series(series),
    };

    let (pie, notice, reviews) = match selection.month.as_deref() {
        Some(month) => {
            let (pie, notice) = match ChartComposer::pie_breakdown(series, month) {
                Ok(breakdown) => (
                    Some(PieChart {
                        caption: ChartComposer::pie_caption(month),
                        slices: ChartComposer::pie_slices(&breakdown),
                        start_angle_deg: PIE_START_ANGLE_DEG,
                    }),
                    None,
                ),
                Err(e) => (None, Some(e.to_string())),
            };

            let reviews = ReviewSampler::sample(
                data.reviews(),
                selection.region,
                month,
                options.sample_limit,
                options.sample_seed,
            )
            .into_iter()
            .enumerate()
            .map(|(i, review)| format!("{}. {}", i + 1, review.text))
            .collect();

            (pie, notice, reviews)
        }
        None => (
            None,
            Some(format!("No monthly data for {}", selection.region)),
            Vec::new(),
        ),
    };

    ViewModel {
        title: DASHBOARD_TITLE,
        banner_image: options.banner_image.clone(),
        regions: Region::ALL.to_vec(),
        months: selection.month_domain(data),
        selection,
        trend,
        pie,
        notice,
        reviews,
        recommendations: data.recommendations(),
    }
}
