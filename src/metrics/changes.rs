//! Year-over-Year Top-N
//! The largest single-year population changes across all regions.

use serde::Serialize;
use std::collections::HashMap;

use super::Observation;
use crate::data::NATIONAL;

#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    pub region: String,
    pub year: i64,
    pub population: f64,
    /// Population change against the region's previous observed year.
    pub delta: f64,
}

pub struct ChangeAnalyzer;

impl ChangeAnalyzer {
    /// Select the `n` largest year-over-year deltas across all non-national
    /// regions.
    ///
    /// Within each region the series is ordered by year ascending and each
    /// delta is taken against the previous observed year; the first observed
    /// year has no delta and is never a candidate (absent, not zero). Ties
    /// are broken by original table order, so equal deltas keep their
    /// relative input positions.
    pub fn top_changes(rows: &[Observation], n: usize) -> Vec<ChangeRecord> {
        let mut by_region: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, o) in rows.iter().enumerate() {
            if o.region != NATIONAL {
                by_region.entry(o.region.as_str()).or_default().push(idx);
            }
        }

        let mut candidates: Vec<(usize, ChangeRecord)> = Vec::new();
        for indices in by_region.values() {
            let mut ordered = indices.clone();
            ordered.sort_by_key(|&i| rows[i].year);
            for pair in ordered.windows(2) {
                let prev = &rows[pair[0]];
                let current = &rows[pair[1]];
                candidates.push((
                    pair[1],
                    ChangeRecord {
                        region: current.region.clone(),
                        year: current.year,
                        population: current.population,
                        delta: current.population - prev.population,
                    },
                ));
            }
        }

        candidates.sort_by(|a, b| {
            b.1.delta
                .partial_cmp(&a.1.delta)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        candidates.truncate(n);
        candidates.into_iter().map(|(_, record)| record).collect()
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
    fn delta_is_population_minus_previous_year() {
        let rows = vec![obs("A", 2019, 100.0), obs("A", 2020, 150.0)];
        let top = ChangeAnalyzer::top_changes(&rows, 100);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].year, 2020);
        assert!((top[0].delta - 50.0).abs() < 1e-9);
    }

    #[test]
    fn first_year_is_never_a_candidate() {
        // A's first year would beat every real delta if it were coerced to
        // its population value, and would tie if coerced to zero
        let rows = vec![
            obs("A", 2019, 100.0),
            obs("B", 2019, 50.0),
            obs("B", 2020, 49.0),
        ];
        let top = ChangeAnalyzer::top_changes(&rows, 100);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].region, "B");
        assert!((top[0].delta - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_original_table_order() {
        let rows = vec![
            obs("B", 2019, 10.0),
            obs("B", 2020, 15.0),
            obs("A", 2019, 20.0),
            obs("A", 2020, 25.0),
        ];
        let top = ChangeAnalyzer::top_changes(&rows, 100);
        assert_eq!(top.len(), 2);
        // both deltas are 5; B's 2020 row appears first in the table
        assert_eq!(top[0].region, "B");
        assert_eq!(top[1].region, "A");
    }

    #[test]
    fn selection_is_limited_to_n() {
        let mut rows = Vec::new();
        for year in 2000..2010 {
            rows.push(obs("A", year, year as f64));
        }
        let top = ChangeAnalyzer::top_changes(&rows, 3);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn national_aggregate_is_excluded() {
        let rows = vec![
            obs(NATIONAL, 2019, 1000.0),
            obs(NATIONAL, 2020, 9000.0),
            obs("A", 2019, 10.0),
            obs("A", 2020, 20.0),
        ];
        let top = ChangeAnalyzer::top_changes(&rows, 100);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].region, "A");
    }

    #[test]
    fn unsorted_input_is_ordered_by_year_within_region() {
        let rows = vec![
            obs("A", 2020, 150.0),
            obs("A", 2018, 90.0),
            obs("A", 2019, 100.0),
        ];
        let top = ChangeAnalyzer::top_changes(&rows, 100);
        assert_eq!(top.len(), 2);
        assert!((top[0].delta - 50.0).abs() < 1e-9); // 2020: 150 - 100
        assert!((top[1].delta - 10.0).abs() < 1e-9); // 2019: 100 - 90
    }
}
