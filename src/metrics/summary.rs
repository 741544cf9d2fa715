//! Summary Statistics
//! Schema overview and per-column descriptive statistics for the cleaned
//! table, the textual half of the dashboard's first view.

use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};

#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Shape and per-column type/null overview of the cleaned table.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaSummary {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

impl SchemaSummary {
    /// Render as an info-style text block for the summary tab.
    pub fn info_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} entries, {} columns\n\n",
            self.rows,
            self.columns.len()
        ));
        out.push_str(&format!(
            "{:<3} {:<16} {:>10}  {}\n",
            "#", "Column", "Non-Null", "Dtype"
        ));
        for (i, col) in self.columns.iter().enumerate() {
            out.push_str(&format!(
                "{:<3} {:<16} {:>10}  {}\n",
                i, col.name, col.non_null, col.dtype
            ));
        }
        out
    }
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Per-column schema overview of a table.
    pub fn schema(df: &DataFrame) -> SchemaSummary {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: col.len() - col.null_count(),
            })
            .collect();
        SchemaSummary {
            rows: df.height(),
            columns,
        }
    }

    /// Descriptive statistics for every numeric column.
    pub fn describe(df: &DataFrame) -> Vec<ColumnStats> {
        df.get_columns()
            .iter()
            .filter(|col| Self::is_numeric(col.dtype()))
            .filter_map(Self::column_stats)
            .collect()
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    fn column_stats(column: &Column) -> Option<ColumnStats> {
        let values: Vec<f64> = column
            .cast(&DataType::Float64)
            .ok()?
            .f64()
            .ok()?
            .into_iter()
            .flatten()
            .collect();
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mut data = Data::new(values);
        Some(ColumnStats {
            column: column.name().to_string(),
            count,
            mean: data.mean().unwrap_or(f64::NAN),
            std: data.std_dev().unwrap_or(f64::NAN),
            min: data.min(),
            q25: data.lower_quartile(),
            median: data.median(),
            q75: data.upper_quartile(),
            max: data.max(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn schema_counts_rows_and_nulls() {
        let df = df!(
            "지역" => [Some("전국"), Some("서울"), None],
            "인구" => [1.0, 2.0, 3.0],
        )
        .unwrap();
        let schema = SummaryCalculator::schema(&df);
        assert_eq!(schema.rows, 3);
        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.columns[0].non_null, 2);
        assert_eq!(schema.columns[1].non_null, 3);
    }

    #[test]
    fn describe_covers_numeric_columns_only() {
        let df = df!(
            "지역" => ["전국", "서울"],
            "연도" => [2019i64, 2020],
            "인구" => [100.0, 200.0],
        )
        .unwrap();
        let stats = SummaryCalculator::describe(&df);
        let names: Vec<&str> = stats.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(names, vec!["연도", "인구"]);
    }

    #[test]
    fn describe_computes_order_statistics() {
        let df = df!("값" => [1.0, 2.0, 3.0, 4.0]).unwrap();
        let stats = SummaryCalculator::describe(&df);
        let s = &stats[0];
        assert_eq!(s.count, 4);
        assert!((s.mean - 2.5).abs() < 1e-9);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert!((s.median - 2.5).abs() < 1e-9);
        assert!(s.q25 >= s.min && s.q25 <= s.median);
        assert!(s.q75 >= s.median && s.q75 <= s.max);
        assert!(s.std > 0.0);
    }

    #[test]
    fn nulls_are_dropped_from_the_sample() {
        let df = df!("값" => [Some(1.0), None, Some(3.0)]).unwrap();
        let stats = SummaryCalculator::describe(&df);
        assert_eq!(stats[0].count, 2);
        assert!((stats[0].mean - 2.0).abs() < 1e-9);
    }

    #[test]
    fn info_text_lists_every_column() {
        let df = df!("지역" => ["전국"], "인구" => [1.0]).unwrap();
        let text = SummaryCalculator::schema(&df).info_text();
        assert!(text.contains("지역"));
        assert!(text.contains("인구"));
        assert!(text.contains("1 entries"));
    }
}
