//! National Trend + Projection
//! Whole-country population by year, extrapolated to a fixed target year.

use serde::Serialize;

use super::{MetricsError, Observation};
use crate::data::NATIONAL;

/// Fixed target year for the population projection.
pub const PROJECTION_YEAR: i64 = 2035;

/// Trailing window for the natural-increase average: the last three observed
/// years, `year >= max_year - RECENT_YEARS`.
const RECENT_YEARS: i64 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i64,
    pub population: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NationalTrend {
    /// National series, ordered by year ascending.
    pub points: Vec<TrendPoint>,
    pub projected_year: i64,
    pub projected_population: f64,
    /// True when the last observed year is at or past the target year, so
    /// the "projection" points backwards into the observed range.
    pub is_backcast: bool,
}

/// Naive linear projection: the population at the last observed year plus
/// the trailing average annual natural increase (births − deaths) times the
/// number of years to the target. Treated as given business logic; a two-
/// point linear model is all this dashboard promises.
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Compute the national trend series and its projection.
    ///
    /// Precondition: the cleaned table carries at least one national-
    /// aggregate row. An upload without one is a contract violation and is
    /// surfaced as [`MetricsError::MissingNational`] rather than defaulted.
    pub fn project(rows: &[Observation]) -> Result<NationalTrend, MetricsError> {
        let mut national: Vec<&Observation> =
            rows.iter().filter(|o| o.region == NATIONAL).collect();
        if national.is_empty() {
            return Err(MetricsError::MissingNational);
        }
        national.sort_by_key(|o| o.year);

        let max_year = national[national.len() - 1].year;
        let last_population = national[national.len() - 1].population;

        let recent: Vec<&&Observation> = national
            .iter()
            .filter(|o| o.year >= max_year - RECENT_YEARS)
            .collect();
        let delta = recent
            .iter()
            .map(|o| o.births - o.deaths)
            .sum::<f64>()
            / recent.len() as f64;

        let projected_population =
            last_population + (PROJECTION_YEAR - max_year) as f64 * delta;

        Ok(NationalTrend {
            points: national
                .iter()
                .map(|o| TrendPoint {
                    year: o.year,
                    population: o.population,
                })
                .collect(),
            projected_year: PROJECTION_YEAR,
            projected_population,
            is_backcast: max_year >= PROJECTION_YEAR,
        })
    }
}
