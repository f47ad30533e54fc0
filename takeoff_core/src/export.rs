//! # Export
//!
//! Serializes takeoff results for download:
//!
//! - **CSV breakdown**: `activity_name,unit,quantity,material_summary`,
//!   header included, UTF-8, quantities to two decimals. Fields containing
//!   commas, quotes or line breaks are quoted (RFC 4180).
//! - **CSV comparison**: one row per metric, one column per scenario.
//! - **JSON report**: the config, the full estimate and headline metrics,
//!   stamped with the generation time.
//!
//! Files are written atomically: contents go to a `.tmp` sibling, are
//! synced to disk, then renamed over the target.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use takeoff_core::coefficients::CoefficientRegistry;
//! use takeoff_core::config::BuildingConfig;
//! use takeoff_core::export::write_breakdown_csv;
//! use takeoff_core::takeoff::compute;
//!
//! let estimate = compute(&BuildingConfig::new(120.0, 2, "Guatemala"), CoefficientRegistry::builtin())?;
//! write_breakdown_csv(&estimate.breakdown, Path::new("material_breakdown.csv"))?;
//! # Ok::<(), takeoff_core::errors::TakeoffError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comparison::ComparisonTable;
use crate::config::BuildingConfig;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::takeoff::{BreakdownRow, SummaryMetric, TakeoffEstimate};

/// Current schema version of the JSON report
pub const REPORT_VERSION: &str = "0.1.0";

/// Default file name for the breakdown download
pub const DEFAULT_CSV_FILE_NAME: &str = "material_breakdown.csv";

/// Header row of the breakdown CSV
pub const BREAKDOWN_HEADER: [&str; 4] = ["activity_name", "unit", "quantity", "material_summary"];

/// Self-describing JSON export of one takeoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffReport {
    /// Report schema version
    pub version: String,
    /// When the report was produced
    pub generated: DateTime<Utc>,
    /// The input that produced the estimate
    pub config: BuildingConfig,
    /// Headline totals, formatted
    pub summary: Vec<SummaryMetric>,
    pub estimate: TakeoffEstimate,
}

impl TakeoffReport {
    pub fn new(config: BuildingConfig, estimate: TakeoffEstimate) -> Self {
        TakeoffReport {
            version: REPORT_VERSION.to_string(),
            generated: Utc::now(),
            summary: estimate.totals.summary_metrics(),
            config,
            estimate,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> TakeoffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TakeoffError::serialization(e.to_string()))
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Render the breakdown table as CSV.
pub fn breakdown_to_csv(rows: &[BreakdownRow]) -> String {
    let mut out = csv_line(BREAKDOWN_HEADER);
    for row in rows {
        out.push_str(&csv_line([
            row.activity_name.clone(),
            row.unit.symbol().to_string(),
            format!("{:.2}", row.quantity),
            row.material_summary.clone(),
        ]));
    }
    out
}

/// Render a comparison table as CSV.
pub fn comparison_to_csv(table: &ComparisonTable) -> String {
    let header = ["metric".to_string(), "unit".to_string()]
        .into_iter()
        .chain(table.labels.iter().cloned());
    let mut out = csv_line(header);

    for row in &table.rows {
        let fields = [row.metric.clone(), row.unit.clone()]
            .into_iter()
            .chain(row.values.iter().map(|v| format!("{:.2}", v)));
        out.push_str(&csv_line(fields));
    }
    out
}

/// Write the breakdown CSV to `path`.
pub fn write_breakdown_csv(rows: &[BreakdownRow], path: &Path) -> TakeoffResult<()> {
    write_atomic(path, breakdown_to_csv(rows).as_bytes())
}

/// Write the comparison CSV to `path`.
pub fn write_comparison_csv(table: &ComparisonTable, path: &Path) -> TakeoffResult<()> {
    write_atomic(path, comparison_to_csv(table).as_bytes())
}

/// Write a JSON report to `path`.
pub fn write_report_json(report: &TakeoffReport, path: &Path) -> TakeoffResult<()> {
    write_atomic(path, report.to_json()?.as_bytes())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `path` through a synced temp file and a rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> TakeoffResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        TakeoffError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        TakeoffError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        TakeoffError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TakeoffError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::CoefficientRegistry;
    use crate::comparison::{compare, ScenarioInput};
    use crate::config::WindowMethod;
    use crate::takeoff::compute;
    use std::env::temp_dir;

    fn temp_export_path(name: &str) -> PathBuf {
        temp_dir().join(format!("takeoff_test_{}", name))
    }

    fn estimate_with_openings() -> (BuildingConfig, TakeoffEstimate) {
        let config = BuildingConfig::new(120.0, 2, "Guatemala")
            .with_rooms(3, 2)
            .with_openings(WindowMethod::AreaFactor);
        let estimate = compute(&config, CoefficientRegistry::builtin()).unwrap();
        (config, estimate)
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Slab"), "Slab");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_breakdown_csv_layout() {
        let (_, estimate) = estimate_with_openings();
        let csv = breakdown_to_csv(&estimate.breakdown);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "activity_name,unit,quantity,material_summary");
        assert_eq!(lines.len(), 1 + estimate.breakdown.len());
        assert!(lines[1].starts_with("Slab,m³,15.12,\"Cement 113.8 bags, Sand 7.56 m³"));
        assert!(lines[1].ends_with("Steel 1,285 kg\""));
        assert!(lines[6].starts_with("Doors (count),pc,6.00,"));
        assert!(lines[7].starts_with("Windows (count),pc,7.00,"));
    }

    #[test]
    fn test_comparison_csv() {
        let scenarios = vec![
            ScenarioInput::new("Guatemala", BuildingConfig::new(120.0, 2, "Guatemala")),
            ScenarioInput::new("Petén, north", BuildingConfig::new(120.0, 2, "Petén")),
        ];
        let table = compare(&scenarios, CoefficientRegistry::builtin()).unwrap();
        let csv = comparison_to_csv(&table);
        let mut lines = csv.lines();

        assert_eq!(lines.next().unwrap(), "metric,unit,Guatemala,\"Petén, north\"");
        assert!(lines.next().unwrap().starts_with("Cement,bags,"));
        assert_eq!(csv.lines().count(), 1 + table.rows.len());
    }

    #[test]
    fn test_write_csv_atomically() {
        let path = temp_export_path("breakdown.csv");
        let tmp_path = tmp_path_for(&path);
        let (_, estimate) = estimate_with_openings();

        write_breakdown_csv(&estimate.breakdown, &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path.exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, breakdown_to_csv(&estimate.breakdown));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(
            tmp_path_for(Path::new("/out/material_breakdown.csv")),
            Path::new("/out/material_breakdown.csv.tmp")
        );
    }

    #[test]
    fn test_report_json_roundtrip() {
        let (config, estimate) = estimate_with_openings();
        let report = TakeoffReport::new(config.clone(), estimate);
        let json = report.to_json().unwrap();

        assert!(json.contains("\"version\": \"0.1.0\""));
        let parsed: TakeoffReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.config, config);
        assert_eq!(parsed.summary.len(), 6);
        assert_eq!(parsed.estimate.openings, report.estimate.openings);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let (_, estimate) = estimate_with_openings();
        let err = write_breakdown_csv(&estimate.breakdown, Path::new("/nonexistent/dir/out.csv")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
