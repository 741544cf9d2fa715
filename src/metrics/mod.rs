//! Metrics module - derived views over the cleaned table

mod changes;
mod engine;
mod pivot;
mod records;
mod regional;
mod summary;
mod trend;

pub use changes::{ChangeAnalyzer, ChangeRecord};
pub use engine::{AnalysisBundle, MetricsEngine, MetricsError};
pub use pivot::{PivotBuilder, PivotTable};
pub use records::Observation;
pub use regional::{RegionalAnalyzer, RegionalDelta, RegionalDeltaView};
pub use summary::{ColumnInfo, ColumnStats, SchemaSummary, SummaryCalculator};
pub use trend::{NationalTrend, TrendAnalyzer, TrendPoint};
