//! Review Sampler
//! Deterministic selection of reviews for a region-month.

use crate::data::model::{Region, Review};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Maximum number of reviews shown per selection.
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

/// Seed used when none is configured.
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

pub struct ReviewSampler;

impl ReviewSampler {
    /// Reviews of `region` in `month`, in file order.
    pub fn filter<'a>(reviews: &'a [Review], region: Region, month: &str) -> Vec<&'a Review> {
        let branch = region.branch();
        reviews
            .iter()
            .filter(|r| r.branch == branch && r.month == month)
            .collect()
    }

    /// Pick `min(limit, matches)` reviews.
    ///
    /// The matching indices are partially shuffled (Fisher-Yates, stopping after
    /// `limit` swaps) with a `StdRng` seeded from `seed`; the shuffled part is
    /// returned in shuffle order. Identical inputs always give identical output.
    pub fn sample<'a>(
        reviews: &'a [Review],
        region: Region,
        month: &str,
        limit: usize,
        seed: u64,
    ) -> Vec<&'a Review> {
        let filtered = Self::filter(reviews, region, month);
        let amount = limit.min(filtered.len());
        if amount == 0 {
            return Vec::new();
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..filtered.len()).collect();
        let (picked, _) = indices.partial_shuffle(&mut rng, amount);

        picked.iter().map(|&i| filtered[i]).collect()
    }
}
