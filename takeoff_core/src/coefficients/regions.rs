//! Regional multipliers and waste fractions.
//!
//! Region factors approximate department-level variance in material
//! consumption. Any region name is accepted: an unknown region, or an
//! activity missing from a known region, gets the neutral factor 1.0.
//! The waste table, on the other hand, must cover every activity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::errors::{TakeoffError, TakeoffResult};

/// Multiplier applied when a region or activity has no entry
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Per-activity multipliers for one region
pub type ActivityFactors = BTreeMap<Activity, f64>;

/// Region name → per-activity multiplier.
///
/// ## TOML Example
///
/// ```toml
/// [regions.Quetzaltenango]
/// slab = 1.05
/// subfloor = 1.05
/// wall = 1.08
/// footing = 1.02
/// column_beam = 1.06
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionFactors(pub BTreeMap<String, ActivityFactors>);

impl RegionFactors {
    /// Multiplier for `activity` in `region`, 1.0 when either is unknown.
    pub fn factor(&self, region: &str, activity: Activity) -> f64 {
        self.0
            .get(region)
            .and_then(|factors| factors.get(&activity))
            .copied()
            .unwrap_or(NEUTRAL_FACTOR)
    }

    /// Whether the region has an entry
    pub fn contains(&self, region: &str) -> bool {
        self.0.contains_key(region)
    }

    /// Known region names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Multipliers must be finite and positive.
    pub fn validate(&self) -> TakeoffResult<()> {
        for (region, factors) in &self.0 {
            for (activity, &value) in factors {
                if !value.is_finite() || value <= 0.0 {
                    return Err(TakeoffError::invalid_coefficient(
                        format!("regions.{}", region),
                        activity.key(),
                        value.to_string(),
                        "Region multipliers must be positive",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for RegionFactors {
    fn default() -> Self {
        let table = [
            ("Guatemala", [1.00, 1.00, 1.00, 1.00, 1.00]),
            ("Quetzaltenango", [1.05, 1.05, 1.08, 1.02, 1.06]),
            ("Petén", [0.98, 0.98, 0.95, 0.97, 0.96]),
        ];

        let regions = table
            .into_iter()
            .map(|(name, values)| {
                let factors: ActivityFactors = Activity::ALL.into_iter().zip(values).collect();
                (name.to_string(), factors)
            })
            .collect();

        RegionFactors(regions)
    }
}

/// Activity → waste fraction, applied as `1 + fraction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WasteTable(pub BTreeMap<Activity, f64>);

impl WasteTable {
    /// Waste fraction for an activity.
    ///
    /// # Errors
    ///
    /// `TakeoffError::UnknownActivity` if the table has no entry for it.
    pub fn fraction(&self, activity: Activity) -> TakeoffResult<f64> {
        self.0
            .get(&activity)
            .copied()
            .ok_or_else(|| TakeoffError::unknown_activity(activity.key()))
    }

    /// Every activity must be present with a finite, non-negative fraction.
    pub fn validate(&self) -> TakeoffResult<()> {
        for activity in Activity::ALL {
            let value = self.fraction(activity)?;
            if !value.is_finite() || value < 0.0 {
                return Err(TakeoffError::invalid_coefficient(
                    "waste",
                    activity.key(),
                    value.to_string(),
                    "Waste fractions must be non-negative",
                ));
            }
        }
        Ok(())
    }
}

impl Default for WasteTable {
    fn default() -> Self {
        WasteTable(
            [
                (Activity::Slab, 0.05),
                (Activity::Subfloor, 0.05),
                (Activity::Wall, 0.07),
                (Activity::Footing, 0.05),
                (Activity::ColumnBeam, 0.05),
            ]
            .into_iter()
            .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_region_factor() {
        let regions = RegionFactors::default();
        assert_eq!(regions.factor("Quetzaltenango", Activity::Wall), 1.08);
        assert_eq!(regions.factor("Petén", Activity::ColumnBeam), 0.96);
    }

    #[test]
    fn test_unknown_region_is_neutral() {
        let regions = RegionFactors::default();
        for activity in Activity::ALL {
            assert_eq!(regions.factor("Escuintla", activity), NEUTRAL_FACTOR);
        }
        // lookups are exact
        assert_eq!(regions.factor("guatemala ", Activity::Slab), NEUTRAL_FACTOR);
    }

    #[test]
    fn test_missing_activity_is_neutral() {
        let mut regions = RegionFactors::default();
        regions
            .0
            .insert("Izabal".to_string(), [(Activity::Wall, 1.1)].into_iter().collect());
        assert_eq!(regions.factor("Izabal", Activity::Wall), 1.1);
        assert_eq!(regions.factor("Izabal", Activity::Slab), NEUTRAL_FACTOR);
    }

    #[test]
    fn test_names_sorted() {
        let regions = RegionFactors::default();
        let names: Vec<_> = regions.names().collect();
        assert_eq!(names, vec!["Guatemala", "Petén", "Quetzaltenango"]);
    }

    #[test]
    fn test_non_positive_multiplier_rejected() {
        let mut regions = RegionFactors::default();
        regions
            .0
            .insert("Bad".to_string(), [(Activity::Slab, 0.0)].into_iter().collect());
        assert!(regions.validate().is_err());
    }

    #[test]
    fn test_waste_lookup() {
        let waste = WasteTable::default();
        assert_eq!(waste.fraction(Activity::Wall).unwrap(), 0.07);
        assert!(waste.validate().is_ok());
    }

    #[test]
    fn test_incomplete_waste_table() {
        let mut waste = WasteTable::default();
        waste.0.remove(&Activity::Footing);
        let err = waste.fraction(Activity::Footing).unwrap_err();
        assert_eq!(err, TakeoffError::unknown_activity("footing"));
        assert!(waste.validate().is_err());
    }
}
