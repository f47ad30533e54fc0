//! Concrete and masonry recipes.
//!
//! A recipe gives the material consumed per unit of work: per m³ of
//! concrete, or per m² of block wall. Values are demonstration figures for
//! residential work in Guatemala and can be overridden from a coefficient
//! file.

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// Material consumption per cubic metre of concrete.
///
/// ## JSON Example
///
/// ```json
/// {
///   "cement_kg_per_m3": 320.0,
///   "sand_m3_per_m3": 0.5,
///   "gravel_m3_per_m3": 0.7,
///   "water_l_per_m3": 180.0,
///   "steel_kg_per_m3": 85.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Cement (kg per m³)
    pub cement_kg_per_m3: f64,
    /// Sand (m³ per m³)
    pub sand_m3_per_m3: f64,
    /// Gravel (m³ per m³)
    pub gravel_m3_per_m3: f64,
    /// Water (L per m³)
    pub water_l_per_m3: f64,
    /// Reinforcing steel (kg per m³)
    pub steel_kg_per_m3: f64,
}

impl Recipe {
    /// General-purpose concrete (slabs)
    pub const GENERAL: Recipe = Recipe {
        cement_kg_per_m3: 320.0,
        sand_m3_per_m3: 0.50,
        gravel_m3_per_m3: 0.70,
        water_l_per_m3: 180.0,
        steel_kg_per_m3: 85.0,
    };

    /// Structural concrete (columns and beams)
    pub const STRUCTURAL: Recipe = Recipe {
        cement_kg_per_m3: 340.0,
        sand_m3_per_m3: 0.48,
        gravel_m3_per_m3: 0.72,
        water_l_per_m3: 185.0,
        steel_kg_per_m3: 110.0,
    };

    /// Footing concrete
    pub const FOOTING: Recipe = Recipe {
        cement_kg_per_m3: 300.0,
        sand_m3_per_m3: 0.50,
        gravel_m3_per_m3: 0.70,
        water_l_per_m3: 175.0,
        steel_kg_per_m3: 40.0,
    };

    /// Unreinforced subfloor concrete
    pub const SUBFLOOR: Recipe = Recipe {
        cement_kg_per_m3: 280.0,
        sand_m3_per_m3: 0.55,
        gravel_m3_per_m3: 0.65,
        water_l_per_m3: 170.0,
        steel_kg_per_m3: 0.0,
    };

    /// Check that every factor is finite and non-negative.
    pub fn validate(&self, name: &str) -> TakeoffResult<()> {
        let fields = [
            ("cement_kg_per_m3", self.cement_kg_per_m3),
            ("sand_m3_per_m3", self.sand_m3_per_m3),
            ("gravel_m3_per_m3", self.gravel_m3_per_m3),
            ("water_l_per_m3", self.water_l_per_m3),
            ("steel_kg_per_m3", self.steel_kg_per_m3),
        ];
        for (field, value) in fields {
            check_non_negative(&format!("recipes.{}", name), field, value)?;
        }
        Ok(())
    }
}

/// Which concrete recipe to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    /// General concrete for slabs
    General,
    /// Structural concrete for columns and beams
    Structural,
    /// Footing concrete
    Footing,
    /// Subfloor concrete (no steel)
    Subfloor,
}

impl RecipeKind {
    /// All recipe kinds
    pub const ALL: [RecipeKind; 4] = [
        RecipeKind::General,
        RecipeKind::Structural,
        RecipeKind::Footing,
        RecipeKind::Subfloor,
    ];

    /// Key used in coefficient files
    pub fn key(&self) -> &'static str {
        match self {
            RecipeKind::General => "general",
            RecipeKind::Structural => "structural",
            RecipeKind::Footing => "footing",
            RecipeKind::Subfloor => "subfloor",
        }
    }
}

/// The four concrete recipes.
///
/// Missing recipes in a coefficient file fall back to the built-in ones;
/// a recipe that is present must list every factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcreteRecipes {
    pub general: Recipe,
    pub structural: Recipe,
    pub footing: Recipe,
    pub subfloor: Recipe,
}

impl ConcreteRecipes {
    /// Look up a recipe by kind
    pub fn get(&self, kind: RecipeKind) -> &Recipe {
        match kind {
            RecipeKind::General => &self.general,
            RecipeKind::Structural => &self.structural,
            RecipeKind::Footing => &self.footing,
            RecipeKind::Subfloor => &self.subfloor,
        }
    }

    pub fn validate(&self) -> TakeoffResult<()> {
        for kind in RecipeKind::ALL {
            self.get(kind).validate(kind.key())?;
        }
        Ok(())
    }
}

impl Default for ConcreteRecipes {
    fn default() -> Self {
        ConcreteRecipes {
            general: Recipe::GENERAL,
            structural: Recipe::STRUCTURAL,
            footing: Recipe::FOOTING,
            subfloor: Recipe::SUBFLOOR,
        }
    }
}

/// Material consumption per square metre of block wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasonryRecipe {
    /// Concrete blocks per m²
    pub blocks_per_m2: f64,
    /// Mortar cement (kg per m²)
    pub mortar_cement_kg_per_m2: f64,
    /// Mortar sand (m³ per m²)
    pub mortar_sand_m3_per_m2: f64,
}

impl MasonryRecipe {
    /// Standard block wall
    pub const BLOCK_WALL: MasonryRecipe = MasonryRecipe {
        blocks_per_m2: 12.5,
        mortar_cement_kg_per_m2: 9.0,
        mortar_sand_m3_per_m2: 0.018,
    };

    pub fn validate(&self) -> TakeoffResult<()> {
        check_non_negative("masonry", "blocks_per_m2", self.blocks_per_m2)?;
        check_non_negative("masonry", "mortar_cement_kg_per_m2", self.mortar_cement_kg_per_m2)?;
        check_non_negative("masonry", "mortar_sand_m3_per_m2", self.mortar_sand_m3_per_m2)
    }
}

impl Default for MasonryRecipe {
    fn default() -> Self {
        MasonryRecipe::BLOCK_WALL
    }
}

fn check_non_negative(table: &str, key: &str, value: f64) -> TakeoffResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TakeoffError::invalid_coefficient(
            table,
            key,
            value.to_string(),
            "Recipe factors must be finite and non-negative",
        ));
    }
    Ok(())
}
