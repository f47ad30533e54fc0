//! # Building Configuration
//!
//! The input to a takeoff: floor area, level count, region and optional
//! room counts and geometry overrides. One `BuildingConfig` is built per
//! request and never mutated during a computation.
//!
//! ## JSON Example
//!
//! Only `area_m2` and `levels` are required:
//!
//! ```json
//! {
//!   "area_m2": 120.0,
//!   "levels": 2,
//!   "region": "Quetzaltenango",
//!   "room_count": 3,
//!   "bathroom_count": 2,
//!   "include_openings": true,
//!   "window_method": "room_based",
//!   "geometry": { "wall_height_m": 2.7 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// Region used when none is given
pub const DEFAULT_REGION: &str = "Guatemala";

/// Default windows per m² of total floor area
pub const DEFAULT_WINDOW_FACTOR_PER_M2: f64 = 0.06;

/// How windows are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMethod {
    /// `round(total_area × window_factor_per_m2)`
    #[default]
    AreaFactor,
    /// One window per room and per bathroom
    RoomBased,
}

impl WindowMethod {
    /// All window methods for UI selection
    pub const ALL: [WindowMethod; 2] = [WindowMethod::AreaFactor, WindowMethod::RoomBased];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            WindowMethod::AreaFactor => "Per m² (factor)",
            WindowMethod::RoomBased => "Per room",
        }
    }
}

impl std::fmt::Display for WindowMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Geometric parameters of the simplified building model.
///
/// Every field has a default; a config file only lists the ones it
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Wall height per level (m)
    pub wall_height_m: f64,
    /// Slab thickness (m)
    pub slab_thickness_m: f64,
    /// Subfloor thickness (m)
    pub subfloor_thickness_m: f64,
    /// Strip footing width (m)
    pub footing_width_m: f64,
    /// Strip footing height (m)
    pub footing_height_m: f64,
    /// Column concrete per m² of floor per level (m³/m²)
    pub column_factor_m3_per_m2: f64,
    /// Beam concrete per m² of floor per level (m³/m²)
    pub beam_factor_m3_per_m2: f64,
}

impl Default for GeometryParams {
    fn default() -> Self {
        GeometryParams {
            wall_height_m: 2.5,
            slab_thickness_m: 0.12,
            subfloor_thickness_m: 0.08,
            footing_width_m: 0.50,
            footing_height_m: 0.60,
            column_factor_m3_per_m2: 0.020,
            beam_factor_m3_per_m2: 0.015,
        }
    }
}

impl GeometryParams {
    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("wall_height_m", self.wall_height_m),
            ("slab_thickness_m", self.slab_thickness_m),
            ("subfloor_thickness_m", self.subfloor_thickness_m),
            ("footing_width_m", self.footing_width_m),
            ("footing_height_m", self.footing_height_m),
            ("column_factor_m3_per_m2", self.column_factor_m3_per_m2),
            ("beam_factor_m3_per_m2", self.beam_factor_m3_per_m2),
        ]
    }

    /// Every parameter must be finite and non-negative.
    pub fn validate(&self) -> TakeoffResult<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(TakeoffError::invalid_config(
                    format!("geometry.{}", field),
                    value.to_string(),
                    "Geometry parameters must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// One takeoff request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    /// Total built floor area over all levels (m²)
    pub area_m2: f64,

    /// Number of levels
    pub levels: u32,

    /// Region (department) name; unknown names use neutral factors
    #[serde(default = "default_region")]
    pub region: String,

    /// Bedrooms and other rooms
    #[serde(default)]
    pub room_count: u32,

    /// Bathrooms
    #[serde(default)]
    pub bathroom_count: u32,

    /// Whether door and window counts are requested
    #[serde(default)]
    pub include_openings: bool,

    /// How windows are counted
    #[serde(default)]
    pub window_method: WindowMethod,

    /// Windows per m² of total area for [`WindowMethod::AreaFactor`]
    #[serde(default = "default_window_factor")]
    pub window_factor_per_m2: f64,

    /// Geometry overrides
    #[serde(default)]
    pub geometry: GeometryParams,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_window_factor() -> f64 {
    DEFAULT_WINDOW_FACTOR_PER_M2
}

impl BuildingConfig {
    /// Create a config with default geometry and no openings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use takeoff_core::config::BuildingConfig;
    ///
    /// let config = BuildingConfig::new(120.0, 2, "Guatemala");
    /// assert_eq!(config.area_per_level().unwrap(), 60.0);
    /// ```
    pub fn new(area_m2: f64, levels: u32, region: impl Into<String>) -> Self {
        BuildingConfig {
            area_m2,
            levels,
            region: region.into(),
            room_count: 0,
            bathroom_count: 0,
            include_openings: false,
            window_method: WindowMethod::default(),
            window_factor_per_m2: DEFAULT_WINDOW_FACTOR_PER_M2,
            geometry: GeometryParams::default(),
        }
    }

    /// Set room and bathroom counts
    pub fn with_rooms(mut self, room_count: u32, bathroom_count: u32) -> Self {
        self.room_count = room_count;
        self.bathroom_count = bathroom_count;
        self
    }

    /// Request door and window counts using `method`
    pub fn with_openings(mut self, method: WindowMethod) -> Self {
        self.include_openings = true;
        self.window_method = method;
        self
    }

    /// Set the windows-per-m² factor
    pub fn with_window_factor(mut self, factor: f64) -> Self {
        self.window_factor_per_m2 = factor;
        self
    }

    /// Replace the geometry parameters
    pub fn with_geometry(mut self, geometry: GeometryParams) -> Self {
        self.geometry = geometry;
        self
    }

    /// Engine preconditions: positive area, at least one level, sane
    /// geometry and window factor.
    pub fn validate(&self) -> TakeoffResult<()> {
        if !self.area_m2.is_finite() || self.area_m2 <= 0.0 {
            return Err(TakeoffError::invalid_config(
                "area_m2",
                self.area_m2.to_string(),
                "Area must be positive",
            ));
        }
        if self.levels == 0 {
            return Err(TakeoffError::invalid_config(
                "levels",
                self.levels.to_string(),
                "At least one level is required",
            ));
        }
        if !self.window_factor_per_m2.is_finite() || self.window_factor_per_m2 < 0.0 {
            return Err(TakeoffError::invalid_config(
                "window_factor_per_m2",
                self.window_factor_per_m2.to_string(),
                "Window factor cannot be negative",
            ));
        }
        self.geometry.validate()
    }

    /// Floor area of one level, `area_m2 / levels`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when `levels` is zero.
    pub fn area_per_level(&self) -> TakeoffResult<f64> {
        if self.levels == 0 {
            return Err(TakeoffError::invalid_config(
                "levels",
                "0",
                "At least one level is required",
            ));
        }
        Ok(self.area_m2 / f64::from(self.levels))
    }

    /// Parse a config from JSON
    pub fn from_json_str(contents: &str) -> TakeoffResult<Self> {
        serde_json::from_str(contents).map_err(|e| TakeoffError::serialization(e.to_string()))
    }
}
