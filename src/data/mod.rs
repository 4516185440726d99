//! Data module - CSV loading, typed tables and review sampling

mod loader;
pub(crate) mod model;
mod sampler;

pub use loader::DataLoader;
pub use model::{DataContext, RecommendationTable, Region, RegionSeries};
pub use sampler::{ReviewSampler, DEFAULT_SAMPLE_LIMIT, DEFAULT_SAMPLE_SEED};
