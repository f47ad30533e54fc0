//! # Coefficient Registry
//!
//! Fixed tables the takeoff engine reads from: concrete recipes, the
//! masonry recipe, regional multipliers and waste fractions.
//!
//! The registry is plain data. The built-in tables are built once per
//! process ([`CoefficientRegistry::builtin`]) and every engine entry point
//! takes the registry by reference, so alternative tables can be injected
//! without touching global state.
//!
//! ## Coefficient Files
//!
//! A TOML file can replace any section. Missing sections keep their
//! built-in values:
//!
//! ```toml
//! [waste]
//! slab = 0.05
//! subfloor = 0.05
//! wall = 0.10
//! footing = 0.05
//! column_beam = 0.05
//!
//! [regions."Alta Verapaz"]
//! wall = 1.04
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::activity::Activity;
//! use takeoff_core::coefficients::CoefficientRegistry;
//!
//! let registry = CoefficientRegistry::builtin();
//! assert_eq!(registry.region_factor("Quetzaltenango", Activity::Wall), 1.08);
//! assert_eq!(registry.region_factor("Atlantis", Activity::Wall), 1.0);
//! assert_eq!(registry.waste_fraction(Activity::Wall).unwrap(), 0.07);
//! ```

pub mod recipes;
pub mod regions;

pub use recipes::{ConcreteRecipes, MasonryRecipe, Recipe, RecipeKind};
pub use regions::{ActivityFactors, RegionFactors, WasteTable, NEUTRAL_FACTOR};

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::errors::{TakeoffError, TakeoffResult};

static BUILTIN: Lazy<CoefficientRegistry> = Lazy::new(CoefficientRegistry::default);

/// All coefficient tables used by a takeoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoefficientRegistry {
    /// Concrete recipes
    pub recipes: ConcreteRecipes,
    /// Block wall recipe
    pub masonry: MasonryRecipe,
    /// Region multipliers
    pub regions: RegionFactors,
    /// Waste fractions
    pub waste: WasteTable,
}

impl CoefficientRegistry {
    /// Shared built-in tables
    pub fn builtin() -> &'static CoefficientRegistry {
        &BUILTIN
    }

    /// Concrete recipe by kind
    pub fn recipe(&self, kind: RecipeKind) -> &Recipe {
        self.recipes.get(kind)
    }

    /// Block wall recipe
    pub fn masonry_recipe(&self) -> &MasonryRecipe {
        &self.masonry
    }

    /// Region multiplier; 1.0 for an unknown region or activity. Never fails.
    pub fn region_factor(&self, region: &str, activity: Activity) -> f64 {
        self.regions.factor(region, activity)
    }

    /// Waste fraction for an activity.
    ///
    /// # Errors
    ///
    /// `TakeoffError::UnknownActivity` when the waste table lacks the activity.
    pub fn waste_fraction(&self, activity: Activity) -> TakeoffResult<f64> {
        self.waste.fraction(activity)
    }

    /// Whether `region` has its own factors
    pub fn is_known_region(&self, region: &str) -> bool {
        self.regions.contains(region)
    }

    /// Known region names, sorted
    pub fn regions(&self) -> Vec<&str> {
        self.regions.names().collect()
    }

    /// Check every table against its invariants.
    pub fn validate(&self) -> TakeoffResult<()> {
        self.recipes.validate()?;
        self.masonry.validate()?;
        self.regions.validate()?;
        self.waste.validate()
    }

    /// Parse and validate a TOML coefficient file's contents.
    pub fn from_toml_str(contents: &str) -> TakeoffResult<Self> {
        let registry: CoefficientRegistry =
            toml::from_str(contents).map_err(|e| TakeoffError::serialization(e.to_string()))?;
        registry.validate()?;
        Ok(registry)
    }

    /// Parse and validate coefficients from JSON.
    pub fn from_json_str(contents: &str) -> TakeoffResult<Self> {
        let registry: CoefficientRegistry =
            serde_json::from_str(contents).map_err(|e| TakeoffError::serialization(e.to_string()))?;
        registry.validate()?;
        Ok(registry)
    }

    /// Load a coefficient file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> TakeoffResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TakeoffError::file_error("read coefficients", path.display().to_string(), e.to_string())
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let registry = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };

        tracing::debug!(path = %path.display(), regions = registry.regions.0.len(), "loaded coefficient file");
        Ok(registry)
    }

    /// Render the tables as TOML, a starting point for a coefficient file.
    pub fn to_toml_string(&self) -> TakeoffResult<String> {
        toml::to_string_pretty(self).map_err(|e| TakeoffError::serialization(e.to_string()))
    }
}
