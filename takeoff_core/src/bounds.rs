//! # Input Bounds
//!
//! Ranges the front end accepts before handing a config to the engine.
//! The engine itself only requires a positive area and at least one level;
//! these tighter limits keep the simplified model within the building
//! sizes it was calibrated for.

use serde::{Deserialize, Serialize};

use crate::config::BuildingConfig;
use crate::errors::{TakeoffError, TakeoffResult};

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &str, value: f64) -> TakeoffResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(TakeoffError::out_of_bounds(field, value, self.min, self.max))
        }
    }
}

/// Accepted input ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub area_m2: Range,
    pub levels: Range,
    pub room_count: Range,
    pub bathroom_count: Range,
    pub window_factor_per_m2: Range,
}

impl Default for InputBounds {
    fn default() -> Self {
        InputBounds {
            area_m2: Range::new(20.0, 1000.0),
            levels: Range::new(1.0, 5.0),
            room_count: Range::new(0.0, 20.0),
            bathroom_count: Range::new(0.0, 20.0),
            window_factor_per_m2: Range::new(0.0, 0.20),
        }
    }
}

impl InputBounds {
    /// Check a config against the bounds. Room, bathroom and window inputs
    /// are only checked when openings are requested.
    pub fn check(&self, config: &BuildingConfig) -> TakeoffResult<()> {
        self.area_m2.check("area_m2", config.area_m2)?;
        self.levels.check("levels", f64::from(config.levels))?;
        if config.include_openings {
            self.room_count.check("room_count", f64::from(config.room_count))?;
            self.bathroom_count
                .check("bathroom_count", f64::from(config.bathroom_count))?;
            self.window_factor_per_m2
                .check("window_factor_per_m2", config.window_factor_per_m2)?;
        }
        Ok(())
    }
}
