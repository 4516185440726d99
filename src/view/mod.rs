//! View module - selection state and the pure view model

mod model;
mod selection;

pub use model::{render, PieChart, RenderOptions, TrendChart, ViewModel};
pub use selection::SelectionState;
