//! # Material Conversion
//!
//! Turns an adjusted concrete volume or wall area into raw materials using
//! a recipe. Cement is reported in 42.5 kg bags; everything else in the
//! recipe's own unit.
//!
//! Conversions are linear in the input and do not guard against negative
//! quantities: a negative volume yields negative materials.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::coefficients::Recipe;
//! use takeoff_core::conversion::concrete_to_materials;
//!
//! let m = concrete_to_materials(10.0, &Recipe::GENERAL);
//! // 320 kg/m³ × 10 m³ / 42.5 kg
//! assert!((m.cement_bags - 75.294).abs() < 0.001);
//! assert_eq!(m.steel_kg, 850.0);
//! ```

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::coefficients::{MasonryRecipe, Recipe};
use crate::units::{CementBags, Kilograms};

/// Materials for a volume of concrete
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcreteMaterials {
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
}

impl Add for ConcreteMaterials {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        ConcreteMaterials {
            cement_bags: self.cement_bags + rhs.cement_bags,
            sand_m3: self.sand_m3 + rhs.sand_m3,
            gravel_m3: self.gravel_m3 + rhs.gravel_m3,
            water_l: self.water_l + rhs.water_l,
            steel_kg: self.steel_kg + rhs.steel_kg,
        }
    }
}

/// Materials for an area of block wall
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MasonryMaterials {
    /// Concrete blocks (units, not rounded)
    pub blocks: f64,
    /// Mortar cement (42.5 kg bags)
    pub mortar_cement_bags: f64,
    /// Mortar sand (m³)
    pub mortar_sand_m3: f64,
}

/// Convert a concrete volume (m³) into materials.
pub fn concrete_to_materials(volume_m3: f64, recipe: &Recipe) -> ConcreteMaterials {
    let cement: CementBags = Kilograms(recipe.cement_kg_per_m3 * volume_m3).into();
    ConcreteMaterials {
        cement_bags: cement.value(),
        sand_m3: recipe.sand_m3_per_m3 * volume_m3,
        gravel_m3: recipe.gravel_m3_per_m3 * volume_m3,
        water_l: recipe.water_l_per_m3 * volume_m3,
        steel_kg: recipe.steel_kg_per_m3 * volume_m3,
    }
}

/// Convert a wall area (m²) into blocks and mortar.
pub fn masonry_to_materials(wall_area_m2: f64, recipe: &MasonryRecipe) -> MasonryMaterials {
    let mortar_cement: CementBags = Kilograms(recipe.mortar_cement_kg_per_m2 * wall_area_m2).into();
    MasonryMaterials {
        blocks: recipe.blocks_per_m2 * wall_area_m2,
        mortar_cement_bags: mortar_cement.value(),
        mortar_sand_m3: recipe.mortar_sand_m3_per_m2 * wall_area_m2,
    }
}
