//! Report Export Module
//! Writes the computed analysis bundle to a JSON report file.

use anyhow::Context;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::metrics::AnalysisBundle;

/// Serializes an analysis bundle for consumption outside the dashboard.
pub struct ReportWriter;

impl ReportWriter {
    /// Write the full bundle as pretty-printed JSON.
    pub fn write_json(bundle: &AnalysisBundle, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create report file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), bundle)
            .context("failed to serialize analysis report")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataCleaner, BIRTHS, DEATHS, NATIONAL, POPULATION, REGION, YEAR};
    use crate::metrics::MetricsEngine;
    use polars::df;

    #[test]
    fn writes_a_readable_report() {
        let df = df!(
            REGION => [NATIONAL, NATIONAL, "서울", "서울"],
            YEAR => [2019i64, 2020, 2019, 2020],
            POPULATION => ["51764822", "51829023", "9729107", "9668465"],
            BIRTHS => ["302676", "272337", "53000", "47445"],
            DEATHS => ["295110", "304948", "44000", "45522"],
        )
        .unwrap();
        let cleaned = DataCleaner::clean(&df).unwrap();
        let bundle = MetricsEngine::analyze(&cleaned).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        ReportWriter::write_json(&bundle, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("trend").is_some());
        assert_eq!(value["schema"]["rows"], 4);
    }

    #[test]
    fn unwritable_path_is_reported_with_context() {
        let df = df!(
            REGION => [NATIONAL],
            YEAR => [2020i64],
            POPULATION => ["100"],
            BIRTHS => ["1"],
            DEATHS => ["1"],
        )
        .unwrap();
        let cleaned = DataCleaner::clean(&df).unwrap();
        let bundle = MetricsEngine::analyze(&cleaned).unwrap();

        let err = ReportWriter::write_json(&bundle, Path::new("/nonexistent/report.json"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to create report file"));
    }
}
