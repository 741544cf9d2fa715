//! Typed row records extracted from the cleaned table.

use polars::prelude::*;
use serde::Serialize;

use crate::data::{BIRTHS, DEATHS, POPULATION, REGION, YEAR};

/// One observation: a single (region, year) row of the cleaned table.
/// At most one observation exists per (region, year) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub region: String,
    pub year: i64,
    pub population: f64,
    pub births: f64,
    pub deaths: f64,
}

impl Observation {
    /// Extract typed rows from a cleaned DataFrame.
    ///
    /// Row order is preserved; it is the tie-break order for the
    /// year-over-year top-N selection. Rows with a null region, year or
    /// population are skipped.
    pub fn from_frame(df: &DataFrame) -> PolarsResult<Vec<Observation>> {
        let region_col = df.column(REGION)?;
        let regions = region_col.as_materialized_series().str()?;
        let year_col = df.column(YEAR)?.cast(&DataType::Int64)?;
        let years = year_col.i64()?;
        let pop_col = df.column(POPULATION)?;
        let populations = pop_col.f64()?;
        let births_col = df.column(BIRTHS)?;
        let births = births_col.f64()?;
        let deaths_col = df.column(DEATHS)?;
        let deaths = deaths_col.f64()?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(region), Some(year), Some(population)) =
                (regions.get(i), years.get(i), populations.get(i))
            else {
                continue;
            };
            rows.push(Observation {
                region: region.to_string(),
                year,
                population,
                births: births.get(i).unwrap_or(0.0),
                deaths: deaths.get(i).unwrap_or(0.0),
            });
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn extracts_rows_in_table_order() {
        let df = df!(
            REGION => ["전국", "서울", "부산"],
            YEAR => [2020i64, 2020, 2020],
            POPULATION => [51829023.0, 9668465.0, 3391946.0],
            BIRTHS => [272337.0, 47445.0, 15058.0],
            DEATHS => [304948.0, 45522.0, 23210.0],
        )
        .unwrap();

        let rows = Observation::from_frame(&df).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].region, "전국");
        assert_eq!(rows[1].region, "서울");
        assert_eq!(rows[2].year, 2020);
        assert_eq!(rows[2].population, 3391946.0);
        assert_eq!(rows[0].births, 272337.0);
        assert_eq!(rows[0].deaths, 304948.0);
    }

    #[test]
    fn coerces_string_years() {
        let df = df!(
            REGION => ["서울"],
            YEAR => ["2019"],
            POPULATION => [100.0],
            BIRTHS => [1.0],
            DEATHS => [1.0],
        )
        .unwrap();

        let rows = Observation::from_frame(&df).unwrap();
        assert_eq!(rows[0].year, 2019);
    }
}
