//! # Geometry Estimator
//!
//! Derives raw (unadjusted) quantities for every activity from the floor
//! area, level count and geometry parameters.
//!
//! The footprint is modelled as a square: each level has area
//! `A / levels` and perimeter `4·√(A / levels)`.
//!
//! ```text
//! slab        = (A / n) · t_slab · n
//! subfloor    = A · t_subfloor                 (ground level only)
//! wall        = P · h_wall · n
//! footing     = P · b_footing · h_footing
//! column_beam = (f_column + f_beam) · A · n
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::config::BuildingConfig;
//! use takeoff_core::geometry::estimate;
//!
//! let geometry = estimate(&BuildingConfig::new(120.0, 2, "Guatemala")).unwrap();
//! assert!((geometry.slab_volume.0 - 14.4).abs() < 1e-9);
//! assert!((geometry.perimeter.0 - 30.98).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::config::{BuildingConfig, GeometryParams};
use crate::errors::TakeoffResult;
use crate::units::{CubicMeters, Meters, SquareMeters};

/// Floor used in place of a non-positive area before taking the square root
pub const MIN_AREA_M2: f64 = 1e-6;

/// Perimeter of a square footprint of the given area.
pub fn perimeter(area_per_level: SquareMeters) -> Meters {
    Meters(area_per_level.0.max(MIN_AREA_M2).sqrt() * 4.0)
}

/// Slab concrete over all levels
pub fn slab_volume(area_per_level: SquareMeters, thickness: Meters, levels: u32) -> CubicMeters {
    area_per_level * thickness * f64::from(levels)
}

/// Ground-level subfloor concrete. Uses the total area regardless of the
/// level count.
pub fn subfloor_volume(total_area: SquareMeters, thickness: Meters) -> CubicMeters {
    total_area * thickness
}

/// Block wall area along the perimeter of every level
pub fn wall_area(perimeter: Meters, wall_height: Meters, levels: u32) -> SquareMeters {
    perimeter * wall_height * f64::from(levels)
}

/// Strip footing concrete under the perimeter
pub fn footing_volume(perimeter: Meters, width: Meters, height: Meters) -> CubicMeters {
    perimeter * width * height
}

/// Column and beam concrete, from per-m² volume factors
pub fn column_beam_volume(total_area: SquareMeters, levels: u32, geometry: &GeometryParams) -> CubicMeters {
    let factor = geometry.column_factor_m3_per_m2 + geometry.beam_factor_m3_per_m2;
    CubicMeters(factor * total_area.0 * f64::from(levels))
}

/// Raw quantities for one building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryEstimate {
    /// Floor area of one level (m²)
    pub area_per_level: SquareMeters,
    /// Perimeter of one level (m)
    pub perimeter: Meters,
    /// Slab concrete (m³)
    pub slab_volume: CubicMeters,
    /// Subfloor concrete (m³)
    pub subfloor_volume: CubicMeters,
    /// Block wall area (m²)
    pub wall_area: SquareMeters,
    /// Footing concrete (m³)
    pub footing_volume: CubicMeters,
    /// Column + beam concrete (m³)
    pub column_beam_volume: CubicMeters,
}

impl GeometryEstimate {
    /// Raw quantity of an activity in its own unit (m³ or m²)
    pub fn raw_quantity(&self, activity: Activity) -> f64 {
        match activity {
            Activity::Slab => self.slab_volume.value(),
            Activity::Subfloor => self.subfloor_volume.value(),
            Activity::Wall => self.wall_area.value(),
            Activity::Footing => self.footing_volume.value(),
            Activity::ColumnBeam => self.column_beam_volume.value(),
        }
    }
}

/// Estimate raw quantities for a configuration.
///
/// Only the level count is checked here (it divides the area); range
/// validation of the other inputs belongs to [`BuildingConfig::validate`].
///
/// # Errors
///
/// `InvalidConfig` when `levels` is zero.
pub fn estimate(config: &BuildingConfig) -> TakeoffResult<GeometryEstimate> {
    let geometry = &config.geometry;
    let levels = config.levels;
    let total_area = SquareMeters(config.area_m2);
    let area_per_level = SquareMeters(config.area_per_level()?);
    let perimeter = perimeter(area_per_level);

    Ok(GeometryEstimate {
        area_per_level,
        perimeter,
        slab_volume: slab_volume(area_per_level, Meters(geometry.slab_thickness_m), levels),
        subfloor_volume: subfloor_volume(total_area, Meters(geometry.subfloor_thickness_m)),
        wall_area: wall_area(perimeter, Meters(geometry.wall_height_m), levels),
        footing_volume: footing_volume(
            perimeter,
            Meters(geometry.footing_width_m),
            Meters(geometry.footing_height_m),
        ),
        column_beam_volume: column_beam_volume(total_area, levels, geometry),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_perimeter_of_square() {
        assert!((perimeter(SquareMeters(100.0)).0 - 40.0).abs() < TOL);
        assert!((perimeter(SquareMeters(60.0)).0 - 4.0 * 60.0_f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn test_perimeter_guards_non_positive_area() {
        let p = perimeter(SquareMeters(-5.0));
        assert!((p.0 - 4.0 * MIN_AREA_M2.sqrt()).abs() < TOL);
        assert!(p.0 > 0.0);
    }

    #[test]
    fn test_perimeter_monotonic() {
        // grows with total area, shrinks with more levels
        let by_area: Vec<f64> = [50.0, 100.0, 200.0, 400.0]
            .iter()
            .map(|&a| estimate(&BuildingConfig::new(a, 2, "Guatemala")).unwrap().perimeter.0)
            .collect();
        assert!(by_area.windows(2).all(|w| w[0] < w[1]));

        let by_levels: Vec<f64> = [1, 2, 3, 4]
            .iter()
            .map(|&n| estimate(&BuildingConfig::new(240.0, n, "Guatemala")).unwrap().perimeter.0)
            .collect();
        assert!(by_levels.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_default_two_level_house() {
        let g = estimate(&BuildingConfig::new(120.0, 2, "Guatemala")).unwrap();

        assert!((g.area_per_level.0 - 60.0).abs() < TOL);
        // P = 4√60 = 30.984
        assert!((g.perimeter.0 - 30.984).abs() < 0.001);
        assert!((g.slab_volume.0 - 14.4).abs() < TOL);
        assert!((g.subfloor_volume.0 - 9.6).abs() < TOL);
        // 30.984 × 2.5 × 2 = 154.92
        assert!((g.wall_area.0 - 154.92).abs() < 0.01);
        // 30.984 × 0.5 × 0.6 = 9.295
        assert!((g.footing_volume.0 - 9.295).abs() < 0.001);
        assert!((g.column_beam_volume.0 - 8.4).abs() < TOL);
    }

    #[test]
    fn test_subfloor_ignores_levels() {
        let one = estimate(&BuildingConfig::new(120.0, 1, "Guatemala")).unwrap();
        let three = estimate(&BuildingConfig::new(120.0, 3, "Guatemala")).unwrap();
        assert_eq!(one.subfloor_volume, three.subfloor_volume);
    }

    #[test]
    fn test_slab_volume_independent_of_split() {
        // (A/n)·t·n = A·t for any n
        for levels in 1..=5 {
            let g = estimate(&BuildingConfig::new(150.0, levels, "Guatemala")).unwrap();
            assert!((g.slab_volume.0 - 150.0 * 0.12).abs() < TOL);
        }
    }

    #[test]
    fn test_geometry_overrides() {
        let geometry = GeometryParams {
            wall_height_m: 3.0,
            column_factor_m3_per_m2: 0.0,
            beam_factor_m3_per_m2: 0.0,
            ..GeometryParams::default()
        };
        let config = BuildingConfig::new(100.0, 1, "Guatemala").with_geometry(geometry);
        let g = estimate(&config).unwrap();
        assert!((g.wall_area.0 - 40.0 * 3.0).abs() < TOL);
        assert_eq!(g.column_beam_volume.0, 0.0);
    }

    #[test]
    fn test_zero_levels_fails() {
        let err = estimate(&BuildingConfig::new(120.0, 0, "Guatemala")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_raw_quantity_lookup() {
        let g = estimate(&BuildingConfig::new(120.0, 2, "Guatemala")).unwrap();
        assert_eq!(g.raw_quantity(Activity::Wall), g.wall_area.0);
        assert_eq!(g.raw_quantity(Activity::ColumnBeam), g.column_beam_volume.0);
    }
}
