//! Metrics Engine
//! Computes every derived view the dashboard renders from one cleaned table.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

use super::{
    ChangeAnalyzer, ChangeRecord, ColumnStats, NationalTrend, Observation, PivotBuilder,
    PivotTable, RegionalAnalyzer, RegionalDeltaView, SchemaSummary, SummaryCalculator,
    TrendAnalyzer,
};

/// Number of year-over-year change records kept for the change table.
pub const TOP_CHANGES: usize = 100;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("no rows for the national aggregate region")]
    MissingNational,
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Everything the dashboard renders. Owned by the computation that produced
/// it and discarded when the next upload supersedes it; nothing here is
/// cached across sessions.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBundle {
    pub schema: SchemaSummary,
    pub describe: Vec<ColumnStats>,
    pub trend: NationalTrend,
    pub regional: RegionalDeltaView,
    pub top_changes: Vec<ChangeRecord>,
    pub pivot: PivotTable,
}

pub struct MetricsEngine;

impl MetricsEngine {
    /// Run the whole derivation pass over a cleaned table.
    ///
    /// The five views are independent of each other; the pass is a single
    /// synchronous walk with no shared mutable state between views.
    pub fn analyze(df: &DataFrame) -> Result<AnalysisBundle, MetricsError> {
        let rows = Observation::from_frame(df)?;
        Ok(AnalysisBundle {
            schema: SummaryCalculator::schema(df),
            describe: SummaryCalculator::describe(df),
            trend: TrendAnalyzer::project(&rows)?,
            regional: RegionalAnalyzer::five_year_deltas(&rows),
            top_changes: ChangeAnalyzer::top_changes(&rows, TOP_CHANGES),
            pivot: PivotBuilder::build(&rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataCleaner, BIRTHS, DEATHS, NATIONAL, POPULATION, REGION, YEAR};
    use polars::df;

    fn uploaded() -> DataFrame {
        df!(
            REGION => [NATIONAL, NATIONAL, "서울", "서울", "세종", "세종"],
            YEAR => [2015i64, 2020, 2015, 2020, 2015, 2020],
            POPULATION => ["51014947", "51829023", "9941000", "9668465", "-", "355831"],
            BIRTHS => ["438420", "272337", "83000", "47445", "-", "3500"],
            DEATHS => ["275895", "304948", "43000", "45522", "-", "1700"],
        )
        .unwrap()
    }

    #[test]
    fn full_pipeline_produces_all_views() {
        let cleaned = DataCleaner::clean(&uploaded()).unwrap();
        let bundle = MetricsEngine::analyze(&cleaned).unwrap();

        assert_eq!(bundle.schema.rows, 6);
        assert!(!bundle.describe.is_empty());
        assert_eq!(bundle.trend.points.len(), 2);
        assert_eq!(bundle.trend.projected_year, 2035);
        // both 서울 and 세종 have rows at 2015 and 2020
        assert_eq!(bundle.regional.by_diff.len(), 2);
        // one delta per non-national region with a prior year
        assert_eq!(bundle.top_changes.len(), 2);
        assert_eq!(bundle.pivot.cell_count(), 4);
    }

    #[test]
    fn sentinel_rows_flow_through_as_zero() {
        let cleaned = DataCleaner::clean(&uploaded()).unwrap();
        let bundle = MetricsEngine::analyze(&cleaned).unwrap();
        // 세종's 2015 population was the sentinel
        assert_eq!(bundle.pivot.value(2015, "세종"), Some(0.0));
    }

    #[test]
    fn analysis_without_national_rows_fails() {
        let df = df!(
            REGION => ["서울"],
            YEAR => [2020i64],
            POPULATION => ["100"],
            BIRTHS => ["1"],
            DEATHS => ["1"],
        )
        .unwrap();
        let cleaned = DataCleaner::clean(&df).unwrap();
        assert!(matches!(
            MetricsEngine::analyze(&cleaned),
            Err(MetricsError::MissingNational)
        ));
    }

    #[test]
    fn bundle_serializes_for_the_report() {
        let cleaned = DataCleaner::clean(&uploaded()).unwrap();
        let bundle = MetricsEngine::analyze(&cleaned).unwrap();
        let json = serde_json::to_value(&bundle).unwrap();
        for key in ["schema", "describe", "trend", "regional", "top_changes", "pivot"] {
            assert!(json.get(key).is_some(), "missing report key {key}");
        }
    }
}
