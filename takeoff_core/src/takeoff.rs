//! # Takeoff Aggregator
//!
//! Runs the whole pipeline for one building:
//!
//! ```text
//! BuildingConfig ─► geometry ─► adjustment ─► conversion ─► totals + breakdown
//!        └──────────────────────────► openings (when requested)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::coefficients::CoefficientRegistry;
//! use takeoff_core::config::BuildingConfig;
//! use takeoff_core::takeoff::compute;
//!
//! let config = BuildingConfig::new(120.0, 2, "Guatemala");
//! let estimate = compute(&config, CoefficientRegistry::builtin()).unwrap();
//!
//! println!("Cement: {:.1} bags", estimate.totals.cement_bags);
//! for row in &estimate.breakdown {
//!     println!("{} {:.2} {} - {}", row.activity_name, row.quantity, row.unit, row.material_summary);
//! }
//! ```

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::activity::{Activity, QuantityUnit};
use crate::adjustment::{adjust_all, ActivityQuantity};
use crate::coefficients::CoefficientRegistry;
use crate::config::BuildingConfig;
use crate::conversion::{concrete_to_materials, masonry_to_materials, ConcreteMaterials, MasonryMaterials};
use crate::errors::TakeoffResult;
use crate::format::grouped;
use crate::geometry::{self, GeometryEstimate};
use crate::openings::{estimate_openings, OpeningEstimate};

/// Project-wide material totals.
///
/// Cement and sand include masonry mortar. Gravel, water and steel come
/// from concrete only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialTotals {
    /// Cement (42.5 kg bags)
    pub cement_bags: f64,
    /// Sand (m³)
    pub sand_m3: f64,
    /// Gravel (m³)
    pub gravel_m3: f64,
    /// Water (L)
    pub water_l: f64,
    /// Reinforcing steel (kg)
    pub steel_kg: f64,
    /// Concrete blocks (units, not rounded)
    pub block_count: f64,
}

impl MaterialTotals {
    /// Headline figures for display, in the order a summary shows them.
    pub fn summary_metrics(&self) -> Vec<SummaryMetric> {
        vec![
            SummaryMetric::new("Cement", self.cement_bags, 1, "bags"),
            SummaryMetric::new("Blocks", self.block_count, 0, "units"),
            SummaryMetric::new("Sand", self.sand_m3, 2, "m³"),
            SummaryMetric::new("Gravel", self.gravel_m3, 2, "m³"),
            SummaryMetric::new("Steel", self.steel_kg, 0, "kg"),
            SummaryMetric::new("Water", self.water_l, 0, "L"),
        ]
    }
}

impl Add for MaterialTotals {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        MaterialTotals {
            cement_bags: self.cement_bags + rhs.cement_bags,
            sand_m3: self.sand_m3 + rhs.sand_m3,
            gravel_m3: self.gravel_m3 + rhs.gravel_m3,
            water_l: self.water_l + rhs.water_l,
            steel_kg: self.steel_kg + rhs.steel_kg,
            block_count: self.block_count + rhs.block_count,
        }
    }
}

impl AddAssign for MaterialTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for MaterialTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MaterialTotals::default(), Add::add)
    }
}

impl From<ConcreteMaterials> for MaterialTotals {
    fn from(m: ConcreteMaterials) -> Self {
        MaterialTotals {
            cement_bags: m.cement_bags,
            sand_m3: m.sand_m3,
            gravel_m3: m.gravel_m3,
            water_l: m.water_l,
            steel_kg: m.steel_kg,
            block_count: 0.0,
        }
    }
}

impl From<MasonryMaterials> for MaterialTotals {
    fn from(m: MasonryMaterials) -> Self {
        MaterialTotals {
            cement_bags: m.mortar_cement_bags,
            sand_m3: m.mortar_sand_m3,
            block_count: m.blocks,
            ..MaterialTotals::default()
        }
    }
}

/// A formatted headline figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetric {
    pub label: String,
    pub value: f64,
    /// Value with thousands grouping at display precision
    pub display: String,
    pub unit: String,
}

impl SummaryMetric {
    fn new(label: &str, value: f64, decimals: usize, unit: &str) -> Self {
        SummaryMetric {
            label: label.to_string(),
            value,
            display: grouped(value, decimals),
            unit: unit.to_string(),
        }
    }
}

/// Materials of one activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActivityMaterials {
    Concrete(ConcreteMaterials),
    Masonry(MasonryMaterials),
}

impl ActivityMaterials {
    /// Contribution to the project totals
    pub fn totals(&self) -> MaterialTotals {
        match *self {
            ActivityMaterials::Concrete(m) => m.into(),
            ActivityMaterials::Masonry(m) => m.into(),
        }
    }

    /// Short material list for a breakdown row
    pub fn summary(&self, activity: Activity) -> String {
        match self {
            ActivityMaterials::Concrete(m) => {
                let mut text = format!(
                    "Cement {} bags, Sand {} m³, Gravel {} m³",
                    grouped(m.cement_bags, 1),
                    grouped(m.sand_m3, 2),
                    grouped(m.gravel_m3, 2),
                );
                // subfloor concrete is unreinforced
                if activity != Activity::Subfloor {
                    text.push_str(&format!(", Steel {} kg", grouped(m.steel_kg, 0)));
                }
                text
            }
            ActivityMaterials::Masonry(m) => format!(
                "Blocks {} units, Mortar {} bags cement + {} m³ sand",
                grouped(m.blocks, 0),
                grouped(m.mortar_cement_bags, 1),
                grouped(m.mortar_sand_m3, 2),
            ),
        }
    }
}

/// Adjusted quantity and materials of one activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityTakeoff {
    pub quantity: ActivityQuantity,
    pub materials: ActivityMaterials,
}

impl ActivityTakeoff {
    /// Convert an adjusted quantity with the activity's recipe.
    pub fn convert(quantity: ActivityQuantity, registry: &CoefficientRegistry) -> Self {
        let amount = quantity.adjusted_quantity;
        let materials = match quantity.activity.recipe() {
            Some(kind) => ActivityMaterials::Concrete(concrete_to_materials(amount, registry.recipe(kind))),
            None => ActivityMaterials::Masonry(masonry_to_materials(amount, registry.masonry_recipe())),
        };
        ActivityTakeoff { quantity, materials }
    }

    pub fn activity(&self) -> Activity {
        self.quantity.activity
    }
}

/// One presentation-ready line of the breakdown table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Activity for material rows, `None` for door and window counts
    pub activity: Option<Activity>,
    pub activity_name: String,
    pub unit: QuantityUnit,
    pub quantity: f64,
    pub material_summary: String,
    /// This row's share of the project totals
    pub materials: MaterialTotals,
}

/// Everything computed for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffEstimate {
    pub geometry: GeometryEstimate,
    /// Per-activity quantities and materials, in breakdown order
    pub activities: Vec<ActivityTakeoff>,
    pub totals: MaterialTotals,
    pub breakdown: Vec<BreakdownRow>,
    /// Present only when the config requested openings
    pub openings: Option<OpeningEstimate>,
}

impl TakeoffEstimate {
    /// Activity entry by activity
    pub fn activity(&self, activity: Activity) -> Option<&ActivityTakeoff> {
        self.activities.iter().find(|a| a.activity() == activity)
    }

    /// Adjusted quantity of an activity, 0.0 if absent
    pub fn adjusted_quantity(&self, activity: Activity) -> f64 {
        self.activity(activity)
            .map_or(0.0, |a| a.quantity.adjusted_quantity)
    }
}

/// Sum activity materials into project totals.
pub fn aggregate(activities: &[ActivityTakeoff]) -> MaterialTotals {
    activities.iter().map(|a| a.materials.totals()).sum()
}

/// Build the breakdown table: activities in order, then doors and windows
/// when openings were estimated.
pub fn build_breakdown(activities: &[ActivityTakeoff], openings: Option<OpeningEstimate>) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = activities
        .iter()
        .map(|a| BreakdownRow {
            activity: Some(a.activity()),
            activity_name: a.activity().display_name().to_string(),
            unit: a.quantity.unit,
            quantity: a.quantity.adjusted_quantity,
            material_summary: a.materials.summary(a.activity()),
            materials: a.materials.totals(),
        })
        .collect();

    if let Some(openings) = openings {
        rows.push(count_row(
            "Doors (count)",
            openings.door_count,
            "Carpentry/metalwork per catalogue (not itemized)",
        ));
        rows.push(count_row(
            "Windows (count)",
            openings.window_count,
            "Glass/aluminium per catalogue (not itemized)",
        ));
    }

    rows
}

fn count_row(name: &str, count: u32, note: &str) -> BreakdownRow {
    BreakdownRow {
        activity: None,
        activity_name: name.to_string(),
        unit: QuantityUnit::Pieces,
        quantity: f64::from(count),
        material_summary: note.to_string(),
        materials: MaterialTotals::default(),
    }
}

/// Compute the takeoff for one configuration.
///
/// # Errors
///
/// * `InvalidConfig` - non-positive area, zero levels or a negative override
/// * `UnknownActivity` - the registry's waste table is incomplete
pub fn compute(config: &BuildingConfig, registry: &CoefficientRegistry) -> TakeoffResult<TakeoffEstimate> {
    config.validate()?;

    if !registry.is_known_region(&config.region) {
        tracing::debug!(region = %config.region, "unknown region, using neutral factors");
    }

    let geometry = geometry::estimate(config)?;
    let activities: Vec<ActivityTakeoff> = adjust_all(&geometry, &config.region, registry)?
        .into_iter()
        .map(|quantity| ActivityTakeoff::convert(quantity, registry))
        .collect();

    for a in &activities {
        tracing::debug!(
            activity = a.activity().key(),
            raw = a.quantity.raw_quantity,
            adjusted = a.quantity.adjusted_quantity,
            unit = a.quantity.unit.symbol(),
            "activity quantity"
        );
    }

    let totals = aggregate(&activities);
    let openings = config.include_openings.then(|| estimate_openings(config));
    let breakdown = build_breakdown(&activities, openings);

    Ok(TakeoffEstimate {
        geometry,
        activities,
        totals,
        breakdown,
        openings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowMethod;
    use crate::units::BAG_WEIGHT_KG;

    fn scenario(region: &str) -> TakeoffEstimate {
        compute(&BuildingConfig::new(120.0, 2, region), CoefficientRegistry::builtin()).unwrap()
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_scenario_guatemala() {
        let est = scenario("Guatemala");

        assert!(close(est.geometry.area_per_level.0, 60.0, 1e-9));
        assert!(close(est.geometry.perimeter.0, 30.98, 0.01));

        assert!(close(est.adjusted_quantity(Activity::Slab), 15.12, 1e-9));
        assert!(close(est.adjusted_quantity(Activity::Subfloor), 10.08, 1e-9));
        assert!(close(est.adjusted_quantity(Activity::Wall), 165.77, 0.01));
        assert!(close(est.adjusted_quantity(Activity::Footing), 9.76, 0.01));
        assert!(close(est.adjusted_quantity(Activity::ColumnBeam), 8.82, 1e-9));

        let slab = est.activity(Activity::Slab).unwrap();
        assert!(close(slab.quantity.raw_quantity, 14.4, 1e-9));
    }

    #[test]
    fn test_scenario_quetzaltenango_scales_by_region() {
        let base = scenario("Guatemala");
        let qtz = scenario("Quetzaltenango");
        let registry = CoefficientRegistry::builtin();

        for activity in Activity::ALL {
            let ratio = registry.region_factor("Quetzaltenango", activity)
                / registry.region_factor("Guatemala", activity);
            let expected = base.adjusted_quantity(activity) * ratio;
            assert!(close(qtz.adjusted_quantity(activity), expected, 1e-9));
            assert!(qtz.adjusted_quantity(activity) > base.adjusted_quantity(activity));
        }
    }

    #[test]
    fn test_totals_match_hand_calculation() {
        let est = scenario("Guatemala");
        let wall = est.adjusted_quantity(Activity::Wall);
        let footing = est.adjusted_quantity(Activity::Footing);

        let cement_kg = 320.0 * 15.12 + 280.0 * 10.08 + 300.0 * footing + 340.0 * 8.82 + 9.0 * wall;
        assert!(close(est.totals.cement_bags, cement_kg / BAG_WEIGHT_KG, 1e-9));

        let steel = 85.0 * 15.12 + 40.0 * footing + 110.0 * 8.82;
        assert!(close(est.totals.steel_kg, steel, 1e-9));

        let water = 180.0 * 15.12 + 170.0 * 10.08 + 175.0 * footing + 185.0 * 8.82;
        assert!(close(est.totals.water_l, water, 1e-9));

        let sand = 0.50 * 15.12 + 0.55 * 10.08 + 0.50 * footing + 0.48 * 8.82 + 0.018 * wall;
        assert!(close(est.totals.sand_m3, sand, 1e-9));

        assert!(close(est.totals.block_count, 12.5 * wall, 1e-9));
    }

    #[test]
    fn test_totals_reconstructed_from_breakdown() {
        for region in ["Guatemala", "Quetzaltenango", "Petén", "Izabal"] {
            for levels in 1..=3 {
                let config = BuildingConfig::new(180.0, levels, region)
                    .with_rooms(4, 2)
                    .with_openings(WindowMethod::AreaFactor);
                let est = compute(&config, CoefficientRegistry::builtin()).unwrap();
                let rebuilt: MaterialTotals = est.breakdown.iter().map(|row| row.materials).sum();

                let pairs = [
                    (rebuilt.cement_bags, est.totals.cement_bags),
                    (rebuilt.sand_m3, est.totals.sand_m3),
                    (rebuilt.gravel_m3, est.totals.gravel_m3),
                    (rebuilt.water_l, est.totals.water_l),
                    (rebuilt.steel_kg, est.totals.steel_kg),
                    (rebuilt.block_count, est.totals.block_count),
                ];
                for (a, b) in pairs {
                    assert!(close(a, b, 1e-9));
                    assert!(b >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_masonry_excluded_from_gravel_water_steel() {
        let est = scenario("Guatemala");
        let wall = est.breakdown.iter().find(|r| r.activity == Some(Activity::Wall)).unwrap();
        assert_eq!(wall.materials.gravel_m3, 0.0);
        assert_eq!(wall.materials.water_l, 0.0);
        assert_eq!(wall.materials.steel_kg, 0.0);
        assert!(wall.materials.block_count > 0.0);
    }

    #[test]
    fn test_unknown_region_equals_neutral() {
        // Guatemala's factors are all 1.0
        assert_eq!(scenario("Huehuetenango"), scenario("Guatemala"));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let config = BuildingConfig::new(240.0, 3, "Petén").with_rooms(5, 3).with_openings(WindowMethod::RoomBased);
        let registry = CoefficientRegistry::builtin();
        assert_eq!(compute(&config, registry).unwrap(), compute(&config, registry).unwrap());
    }

    #[test]
    fn test_breakdown_order_without_openings() {
        let est = scenario("Guatemala");
        let names: Vec<&str> = est.breakdown.iter().map(|r| r.activity_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Slab", "Subfloor", "Block walls", "Strip footings", "Columns + Beams"]
        );
        assert!(est.openings.is_none());
    }

    #[test]
    fn test_breakdown_with_openings() {
        let config = BuildingConfig::new(120.0, 2, "Guatemala")
            .with_rooms(3, 2)
            .with_openings(WindowMethod::AreaFactor);
        let est = compute(&config, CoefficientRegistry::builtin()).unwrap();

        assert_eq!(est.breakdown.len(), 7);
        let doors = &est.breakdown[5];
        let windows = &est.breakdown[6];
        assert_eq!(doors.activity_name, "Doors (count)");
        assert_eq!(doors.quantity, 6.0);
        assert_eq!(doors.unit, QuantityUnit::Pieces);
        assert_eq!(windows.quantity, 7.0);
        assert_eq!(est.openings, Some(OpeningEstimate { door_count: 6, window_count: 7 }));
    }

    #[test]
    fn test_material_summaries() {
        let est = scenario("Guatemala");
        let slab = &est.breakdown[0];
        // 320 × 15.12 / 42.5 = 113.8 bags; 85 × 15.12 = 1,285 kg
        assert_eq!(
            slab.material_summary,
            "Cement 113.8 bags, Sand 7.56 m³, Gravel 10.58 m³, Steel 1,285 kg"
        );

        let subfloor = &est.breakdown[1];
        assert!(!subfloor.material_summary.contains("Steel"));

        let wall = &est.breakdown[2];
        assert!(wall.material_summary.starts_with("Blocks 2,072 units, Mortar 35.1 bags cement"));
    }

    #[test]
    fn test_summary_metrics() {
        let est = scenario("Guatemala");
        let metrics = est.totals.summary_metrics();
        let labels: Vec<&str> = metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Cement", "Blocks", "Sand", "Gravel", "Steel", "Water"]);
        assert_eq!(metrics[0].value, est.totals.cement_bags);
        assert_eq!(metrics[1].unit, "units");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let registry = CoefficientRegistry::builtin();
        assert!(compute(&BuildingConfig::new(0.0, 2, "Guatemala"), registry).is_err());
        assert!(compute(&BuildingConfig::new(120.0, 0, "Guatemala"), registry).is_err());
    }

    #[test]
    fn test_incomplete_waste_table_fails() {
        let mut registry = CoefficientRegistry::default();
        registry.waste.0.remove(&Activity::ColumnBeam);
        let err = compute(&BuildingConfig::new(120.0, 2, "Guatemala"), &registry).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_ACTIVITY");
    }
}
