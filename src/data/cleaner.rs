//! Data Cleaner Module
//! Sentinel substitution and numeric coercion for the uploaded table.

use polars::prelude::*;
use thiserror::Error;

use super::{NUMERIC_COLUMNS, REQUIRED_COLUMNS, SENTINEL};

#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("required column '{0}' is missing")]
    MissingColumn(String),
    #[error("column '{0}' contains a non-numeric value")]
    NonNumeric(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Two-stage cleaning of the uploaded table: sentinel substitution first,
/// numeric coercion second. Coercing before substituting would fail on
/// every sentinel cell.
///
/// The caller's frame is never mutated; cleaning works on a private copy.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean an uploaded table.
    ///
    /// Verifies the required columns, replaces the `"-"` sentinel with zero
    /// and coerces the three numeric columns to `Float64`. Idempotent:
    /// cleaning an already-clean table returns it unchanged.
    pub fn clean(df: &DataFrame) -> Result<DataFrame, DataFormatError> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(DataFormatError::MissingColumn(name.to_string()));
            }
        }

        let substituted = Self::substitute_sentinel(df)?;
        Self::coerce_numeric(substituted)
    }

    /// Replace every `"-"` cell with `"0"`, in every string column.
    ///
    /// The substitution covers the whole table, not just the three columns
    /// that are later coerced: a non-numeric field whose value happens to be
    /// `"-"` is zeroed as well. That matches the upstream dataset's
    /// missing-value policy; do not narrow it to the numeric columns.
    fn substitute_sentinel(df: &DataFrame) -> Result<DataFrame, DataFormatError> {
        let mut out = df.clone();

        for name in df.get_column_names_owned() {
            let column = df.column(name.as_str())?;
            if column.dtype() != &DataType::String {
                continue;
            }

            let ca = column.as_materialized_series().str()?;
            let replaced: Vec<Option<String>> = ca
                .into_iter()
                .map(|cell| {
                    cell.map(|v| {
                        if v == SENTINEL {
                            "0".to_string()
                        } else {
                            v.to_string()
                        }
                    })
                })
                .collect();

            out.with_column(Column::new(name.clone(), replaced))?;
        }

        Ok(out)
    }

    /// Cast the numeric columns to `Float64`.
    ///
    /// The cast is non-strict, so a cell that fails to parse becomes null;
    /// any null that was not already present before the cast is a value that
    /// was neither numeric nor the sentinel.
    fn coerce_numeric(mut df: DataFrame) -> Result<DataFrame, DataFormatError> {
        for name in NUMERIC_COLUMNS {
            let column = df.column(name)?;
            let nulls_before = column.null_count();
            let cast = column.cast(&DataType::Float64)?;
            if cast.null_count() > nulls_before {
                return Err(DataFormatError::NonNumeric(name.to_string()));
            }
            df.with_column(cast)?;
        }
        Ok(df)
    }
}
