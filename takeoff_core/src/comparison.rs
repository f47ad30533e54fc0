//! # Scenario Comparison
//!
//! Runs the takeoff for several configurations side by side, for example
//! the same house in three regions. Each scenario is independent, so they
//! are computed in parallel against the shared read-only registry.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::coefficients::CoefficientRegistry;
//! use takeoff_core::comparison::{compare, ScenarioInput};
//! use takeoff_core::config::BuildingConfig;
//!
//! let scenarios: Vec<ScenarioInput> = ["Guatemala", "Quetzaltenango", "Petén"]
//!     .into_iter()
//!     .map(|region| ScenarioInput::new(region, BuildingConfig::new(120.0, 2, region)))
//!     .collect();
//!
//! let table = compare(&scenarios, CoefficientRegistry::builtin()).unwrap();
//! assert_eq!(table.labels, vec!["Guatemala", "Quetzaltenango", "Petén"]);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::coefficients::CoefficientRegistry;
use crate::config::BuildingConfig;
use crate::errors::TakeoffResult;
use crate::takeoff::{compute, TakeoffEstimate};

/// A labelled configuration to compare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Column heading; empty labels become "Config N"
    #[serde(default)]
    pub label: String,
    pub config: BuildingConfig,
}

impl ScenarioInput {
    pub fn new(label: impl Into<String>, config: BuildingConfig) -> Self {
        ScenarioInput {
            label: label.into(),
            config,
        }
    }
}

/// One metric across all scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: String,
    pub unit: String,
    /// One value per scenario, in input order
    pub values: Vec<f64>,
}

/// Side-by-side results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Scenario labels, in input order
    pub labels: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    /// Full estimate of each scenario
    pub estimates: Vec<TakeoffEstimate>,
}

impl ComparisonTable {
    /// Row by metric name
    pub fn row(&self, metric: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }
}

/// Compute every scenario and collect the results into a table.
///
/// # Errors
///
/// Fails if any scenario fails; which scenario's error is reported is
/// unspecified when several are invalid.
pub fn compare(scenarios: &[ScenarioInput], registry: &CoefficientRegistry) -> TakeoffResult<ComparisonTable> {
    let estimates: Vec<TakeoffEstimate> = scenarios
        .par_iter()
        .map(|scenario| compute(&scenario.config, registry))
        .collect::<TakeoffResult<_>>()?;

    tracing::debug!(scenarios = estimates.len(), "comparison computed");

    let labels = scenarios
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if s.label.trim().is_empty() {
                format!("Config {}", i + 1)
            } else {
                s.label.clone()
            }
        })
        .collect();

    Ok(ComparisonTable {
        labels,
        rows: comparison_rows(&estimates),
        estimates,
    })
}

fn comparison_rows(estimates: &[TakeoffEstimate]) -> Vec<ComparisonRow> {
    let row = |metric: &str, unit: &str, value: &dyn Fn(&TakeoffEstimate) -> f64| ComparisonRow {
        metric: metric.to_string(),
        unit: unit.to_string(),
        values: estimates.iter().map(value).collect(),
    };

    let mut rows = vec![
        row("Cement", "bags", &|e| e.totals.cement_bags),
        row("Sand", "m³", &|e| e.totals.sand_m3),
        row("Gravel", "m³", &|e| e.totals.gravel_m3),
        row("Steel", "kg", &|e| e.totals.steel_kg),
        row("Water", "L", &|e| e.totals.water_l),
        row("Blocks", "units", &|e| e.totals.block_count),
    ];

    for activity in Activity::ALL {
        rows.push(row(activity.display_name(), activity.unit().symbol(), &|e| {
            e.adjusted_quantity(activity)
        }));
    }

    if estimates.iter().any(|e| e.openings.is_some()) {
        rows.push(row("Doors", "pc", &|e| {
            e.openings.map_or(0.0, |o| f64::from(o.door_count))
        }));
        rows.push(row("Windows", "pc", &|e| {
            e.openings.map_or(0.0, |o| f64::from(o.window_count))
        }));
    }

    rows
}
