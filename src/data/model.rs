//! Data Model
//! Typed in-memory tables shared read-only by every view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Prefix of the `Branch` column in the review table.
pub const BRANCH_PREFIX: &str = "Disneyland_";

/// Theme-park branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    California,
    HongKong,
    Paris,
}

impl Region {
    /// All regions in dropdown order.
    pub const ALL: [Region; 3] = [Region::California, Region::HongKong, Region::Paris];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::California => "California",
            Region::HongKong => "HongKong",
            Region::Paris => "Paris",
        }
    }

    /// Branch identifier as it appears in the review table.
    pub fn branch(self) -> String {
        format!("{}{}", BRANCH_PREFIX, self.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-aggregated sentiment figures for one region-month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: String,
    pub positive_rate: f64,
    pub negative_rate: f64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl MonthRow {
    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }
}

/// All months of one region, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSeries {
    pub region: Region,
    pub rows: Vec<MonthRow>,
}

impl RegionSeries {
    pub fn new(region: Region, rows: Vec<MonthRow>) -> Self {
        Self { region, rows }
    }

    /// Month labels in source order.
    pub fn months(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.month.clone()).collect()
    }

    pub fn find_month(&self, month: &str) -> Option<&MonthRow> {
        self.rows.iter().find(|row| row.month == month)
    }

    pub fn has_month(&self, month: &str) -> bool {
        self.find_month(month).is_some()
    }

    pub fn first_month(&self) -> Option<&str> {
        self.rows.first().map(|row| row.month.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub branch: String,
    pub month: String,
    pub text: String,
}

/// Precomputed recommendation table, kept as text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecommendationTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything loaded at startup. Immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct DataContext {
    california: RegionSeries,
    hongkong: RegionSeries,
    paris: RegionSeries,
    reviews: Vec<Review>,
    recommendations: Arc<RecommendationTable>,
}

impl DataContext {
    /// Build a context from per-region tables. Regions without a table get an empty series.
    pub fn new(
        series: Vec<RegionSeries>,
        reviews: Vec<Review>,
        recommendations: RecommendationTable,
    ) -> Self {
        let mut california = RegionSeries::new(Region::California, Vec::new());
        let mut hongkong = RegionSeries::new(Region::HongKong, Vec::new());
        let mut paris = RegionSeries::new(Region::Paris, Vec::new());

        for s in series {
            match s.region {
                Region::California => california = s,
                Region::HongKong => hongkong = s,
                Region::Paris => paris = s,
            }
        }

        Self {
            california,
            hongkong,
            paris,
            reviews,
            recommendations: Arc::new(recommendations),
        }
    }

    pub fn series(&self, region: Region) -> &RegionSeries {
        match region {
            Region::California => &self.california,
            Region::HongKong => &self.hongkong,
            Region::Paris => &self.paris,
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn recommendations(&self) -> Arc<RecommendationTable> {
        Arc::clone(&self.recommendations)
    }
}
