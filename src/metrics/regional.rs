//! Regional Delta Analyzer
//! Five-year population change per region, as an absolute difference and a
//! percentage rate.

use serde::Serialize;
use std::collections::HashMap;

use super::Observation;
use crate::data::NATIONAL;

/// Lookback window for the regional comparison.
const DELTA_YEARS: i64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RegionalDelta {
    pub region: String,
    pub new_population: f64,
    pub old_population: f64,
    /// `new_population - old_population`
    pub diff: f64,
    /// `diff / old_population * 100`
    pub rate: f64,
}

/// Both orderings the two bar charts need.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionalDeltaView {
    pub by_diff: Vec<RegionalDelta>,
    pub by_rate: Vec<RegionalDelta>,
}

impl RegionalDeltaView {
    pub fn is_empty(&self) -> bool {
        self.by_diff.is_empty()
    }
}

pub struct RegionalAnalyzer;

impl RegionalAnalyzer {
    /// Compare each region's population at the latest year against the year
    /// five before it.
    ///
    /// Inner-join semantics: a region missing from either snapshot is
    /// silently dropped. No rows at all in the past snapshot means the view
    /// degrades to empty instead of failing; insufficient history is not an
    /// error.
    pub fn five_year_deltas(rows: &[Observation]) -> RegionalDeltaView {
        let non_national: Vec<&Observation> =
            rows.iter().filter(|o| o.region != NATIONAL).collect();

        let Some(latest_year) = non_national.iter().map(|o| o.year).max() else {
            return RegionalDeltaView::default();
        };
        let past_year = latest_year - DELTA_YEARS;

        let mut past: HashMap<&str, f64> = HashMap::new();
        for o in &non_national {
            if o.year == past_year {
                past.insert(o.region.as_str(), o.population);
            }
        }
        if past.is_empty() {
            return RegionalDeltaView::default();
        }

        let mut records = Vec::new();
        for o in &non_national {
            if o.year != latest_year {
                continue;
            }
            let Some(&old_population) = past.get(o.region.as_str()) else {
                continue;
            };
            let diff = o.population - old_population;
            records.push(RegionalDelta {
                region: o.region.clone(),
                new_population: o.population,
                old_population,
                diff,
                rate: diff / old_population * 100.0,
            });
        }

        let mut by_diff = records.clone();
        by_diff.sort_by(|a, b| b.diff.partial_cmp(&a.diff).unwrap_or(std::cmp::Ordering::Equal));
        let mut by_rate = records;
        by_rate.sort_by(|a, b| b.rate.partial_cmp(&a.rate).unwrap_or(std::cmp::Ordering::Equal));

        RegionalDeltaView { by_diff, by_rate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(region: &str, year: i64, population: f64) -> Observation {
        Observation {
            region: region.to_string(),
            year,
            population,
            births: 0.0,
            deaths: 0.0,
        }
    }

    #[test]
    fn diff_and_rate_follow_their_definitions() {
        let rows = vec![obs("서울", 2015, 100.0), obs("서울", 2020, 150.0)];
        let view = RegionalAnalyzer::five_year_deltas(&rows);
        assert_eq!(view.by_diff.len(), 1);
        let rec = &view.by_diff[0];
        assert_eq!(rec.new_population, 150.0);
        assert_eq!(rec.old_population, 100.0);
        assert!((rec.diff - (rec.new_population - rec.old_population)).abs() < 1e-9);
        assert!((rec.rate - rec.diff / rec.old_population * 100.0).abs() < 1e-9);
        assert!((rec.rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn regions_missing_from_either_snapshot_are_dropped() {
        let rows = vec![
            obs("서울", 2015, 100.0),
            obs("서울", 2020, 150.0),
            // present only at the latest year
            obs("세종", 2020, 300.0),
            // present only at the past year
            obs("부산", 2015, 400.0),
        ];
        let view = RegionalAnalyzer::five_year_deltas(&rows);
        assert_eq!(view.by_diff.len(), 1);
        assert_eq!(view.by_diff[0].region, "서울");
    }

    #[test]
    fn orderings_are_independent() {
        let rows = vec![
            // diff 50, rate 50%
            obs("서울", 2015, 100.0),
            obs("서울", 2020, 150.0),
            // diff 60, rate 30%
            obs("부산", 2015, 200.0),
            obs("부산", 2020, 260.0),
        ];
        let view = RegionalAnalyzer::five_year_deltas(&rows);
        assert_eq!(view.by_diff[0].region, "부산");
        assert_eq!(view.by_rate[0].region, "서울");
    }

    #[test]
    fn empty_past_snapshot_degrades_to_empty_view() {
        let rows = vec![obs("서울", 2018, 100.0), obs("서울", 2020, 150.0)];
        let view = RegionalAnalyzer::five_year_deltas(&rows);
        assert!(view.is_empty());
    }

    #[test]
    fn national_aggregate_is_excluded() {
        let rows = vec![
            obs(NATIONAL, 2015, 1000.0),
            obs(NATIONAL, 2020, 1100.0),
            obs("서울", 2015, 100.0),
            obs("서울", 2020, 150.0),
        ];
        let view = RegionalAnalyzer::five_year_deltas(&rows);
        assert_eq!(view.by_diff.len(), 1);
        assert_eq!(view.by_diff[0].region, "서울");
    }
}
