//! Selection State
//! Region and month currently chosen by the user.

use crate::data::{DataContext, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub region: Region,
    /// `None` only when the region has no rows.
    pub month: Option<String>,
}

impl SelectionState {
    /// First region, first month.
    pub fn new(data: &DataContext) -> Self {
        let region = Region::ALL[0];
        Self {
            region,
            month: data.series(region).first_month().map(str::to_string),
        }
    }

    /// Months selectable for the current region, in source order.
    pub fn month_domain(&self, data: &DataContext) -> Vec<String> {
        data.series(self.region).months()
    }

    /// Switch region. A month missing from the new region falls back to its first month.
    pub fn set_region(&mut self, region: Region, data: &DataContext) {
        self.region = region;
        self.fix_month(data);
    }

    /// Select `month` if the current region has it. Returns whether the selection changed.
    pub fn set_month(&mut self, month: &str, data: &DataContext) -> bool {
        if !data.series(self.region).has_month(month) {
            log::warn!("{} has no month '{}', keeping selection", self.region, month);
            return false;
        }
        if self.month.as_deref() == Some(month) {
            return false;
        }
        self.month = Some(month.to_string());
        true
    }

    /// Copy of this selection with a month that exists in the region.
    pub fn normalized(&self, data: &DataContext) -> Self {
        let mut state = self.clone();
        state.fix_month(data);
        state
    }

    fn fix_month(&mut self, data: &DataContext) {
        let series = data.series(self.region);
        let valid = self
            .month
            .as_deref()
            .map(|m| series.has_month(m))
            .unwrap_or(false);

        if !valid {
            let fallback = series.first_month().map(str::to_string);
            log::debug!(
                "{}: month {:?} unavailable, defaulting to {:?}",
                self.region,
                self.month,
                fallback
            );
            self.month = fallback;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MonthRow;
    use crate::data::{RecommendationTable, RegionSeries};

    fn series(region: Region, months: &[&str]) -> RegionSeries {
        RegionSeries::new(
            region,
            months
                .iter()
                .map(|m| MonthRow {
                    month: m.to_string(),
                    positive_rate: 50.0,
                    negative_rate: 10.0,
                    positive: 5,
                    negative: 1,
                    neutral: 4,
                })
                .collect(),
        )
    }

    fn data() -> DataContext {
        DataContext::new(
            vec![
                series(Region::California, &["June", "July", "August"]),
                series(Region::HongKong, &["January", "June"]),
                series(Region::Paris, &["April", "May", "June"]),
            ],
            Vec::new(),
            RecommendationTable::default(),
        )
    }

    #[test]
    fn starts_on_first_region_and_month() {
        let data = data();
        let state = SelectionState::new(&data);
        assert_eq!(state.region, Region::California);
        assert_eq!(state.month.as_deref(), Some("June"));
    }

    #[test]
    fn switching_region_defaults_missing_month() {
        let data = data();
        let mut state = SelectionState::new(&data);
        assert!(state.set_month("July", &data));

        state.set_region(Region::Paris, &data);
        let month = state.month.clone().unwrap();
        assert_ne!(month, "July");
        assert!(state.month_domain(&data).contains(&month));
        assert_eq!(month, "April");
    }

    #[test]
    fn switching_region_keeps_shared_month() {
        let data = data();
        let mut state = SelectionState::new(&data);
        state.set_region(Region::HongKong, &data);
        assert_eq!(state.month.as_deref(), Some("June"));
    }

    #[test]
    fn unknown_month_is_ignored() {
        let data = data();
        let mut state = SelectionState::new(&data);
        assert!(!state.set_month("December", &data));
        assert_eq!(state.month.as_deref(), Some("June"));
    }

    #[test]
    fn empty_region_has_no_month() {
        let data = DataContext::new(
            vec![series(Region::California, &["June"])],
            Vec::new(),
            RecommendationTable::default(),
        );
        let mut state = SelectionState::new(&data);
        state.set_region(Region::Paris, &data);
        assert_eq!(state.month, None);
        assert!(state.month_domain(&data).is_empty());
    }

    #[test]
    fn normalized_repairs_desynced_selection() {
        let data = data();
        let state = SelectionState {
            region: Region::HongKong,
            month: Some("August".to_string()),
        };
        assert_eq!(state.normalized(&data).month.as_deref(), Some("January"));
    }
}
