//! Region×Year Pivot
//! Population matrix backing the stacked-area chart.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::Observation;
use crate::data::NATIONAL;

/// Year → region → population matrix.
///
/// Every non-national (region, year) pair of the cleaned table appears
/// exactly once; combinations absent from the source stay absent, and the
/// renderer stacks a missing cell as a zero-height segment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PivotTable {
    /// Ascending.
    pub years: Vec<i64>,
    /// Sorted; the stacking order of the area chart.
    pub regions: Vec<String>,
    cells: BTreeMap<i64, BTreeMap<String, f64>>,
}

impl PivotTable {
    pub fn value(&self, year: i64, region: &str) -> Option<f64> {
        self.cells.get(&year).and_then(|row| row.get(region)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.values().map(|row| row.len()).sum()
    }
}

pub struct PivotBuilder;

impl PivotBuilder {
    pub fn build(rows: &[Observation]) -> PivotTable {
        let mut cells: BTreeMap<i64, BTreeMap<String, f64>> = BTreeMap::new();
        let mut regions: BTreeSet<String> = BTreeSet::new();

        for o in rows {
            if o.region == NATIONAL {
                continue;
            }
            cells
                .entry(o.year)
                .or_default()
                .insert(o.region.clone(), o.population);
            regions.insert(o.region.clone());
        }

        PivotTable {
            years: cells.keys().copied().collect(),
            regions: regions.into_iter().collect(),
            cells,
        }
    }
}
