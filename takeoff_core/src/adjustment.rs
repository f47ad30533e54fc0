//! # Adjustment Stage
//!
//! Scales each raw quantity by its region multiplier, then adds waste:
//!
//! ```text
//! scaled   = raw · region_factor(region, activity)
//! adjusted = scaled · (1 + waste_fraction(activity))
//! ```
//!
//! The intermediate regionally scaled value is kept on [`ActivityQuantity`]
//! so a report can show both steps.

use serde::{Deserialize, Serialize};

use crate::activity::{Activity, QuantityUnit};
use crate::coefficients::CoefficientRegistry;
use crate::errors::TakeoffResult;
use crate::geometry::GeometryEstimate;

/// Quantity of one activity before and after adjustment.
///
/// For `column_beam` the combined column and beam volume is adjusted as a
/// single quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityQuantity {
    pub activity: Activity,
    pub unit: QuantityUnit,
    /// Quantity from the geometry estimator
    pub raw_quantity: f64,
    /// Region multiplier applied
    pub region_factor: f64,
    /// Waste fraction applied
    pub waste_fraction: f64,
    /// `raw_quantity · region_factor`
    pub scaled_quantity: f64,
    /// `scaled_quantity · (1 + waste_fraction)`
    pub adjusted_quantity: f64,
}

impl ActivityQuantity {
    /// Combined multiplier `region_factor · (1 + waste_fraction)`
    pub fn multiplier(&self) -> f64 {
        self.region_factor * (1.0 + self.waste_fraction)
    }
}

/// Adjust a single raw quantity.
///
/// # Errors
///
/// `UnknownActivity` if the waste table has no entry for `activity`.
pub fn adjust(
    raw_quantity: f64,
    region: &str,
    activity: Activity,
    registry: &CoefficientRegistry,
) -> TakeoffResult<f64> {
    Ok(adjust_activity(raw_quantity, region, activity, registry)?.adjusted_quantity)
}

/// Adjust a raw quantity and keep the intermediate values.
pub fn adjust_activity(
    raw_quantity: f64,
    region: &str,
    activity: Activity,
    registry: &CoefficientRegistry,
) -> TakeoffResult<ActivityQuantity> {
    let region_factor = registry.region_factor(region, activity);
    let waste_fraction = registry.waste_fraction(activity)?;
    let scaled_quantity = raw_quantity * region_factor;

    Ok(ActivityQuantity {
        activity,
        unit: activity.unit(),
        raw_quantity,
        region_factor,
        waste_fraction,
        scaled_quantity,
        adjusted_quantity: scaled_quantity * (1.0 + waste_fraction),
    })
}

/// Adjust every activity of a geometry estimate, in breakdown order.
pub fn adjust_all(
    geometry: &GeometryEstimate,
    region: &str,
    registry: &CoefficientRegistry,
) -> TakeoffResult<Vec<ActivityQuantity>> {
    Activity::ALL
        .into_iter()
        .map(|activity| adjust_activity(geometry.raw_quantity(activity), region, activity, registry))
        .collect()
}
