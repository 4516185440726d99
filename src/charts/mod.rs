//! Charts module - chart composition and rendering

mod composer;
mod plotter;
mod renderer;

pub use composer::{
    ChartComposer, PieSlice, TrendPoint, PIE_START_ANGLE_DEG, TREND_X_LABEL, TREND_Y_LABEL,
};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
