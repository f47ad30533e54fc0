//! # takeoff_core - Material Quantity Takeoff Engine
//!
//! `takeoff_core` estimates construction materials (cement, sand, gravel,
//! steel, water, blocks, doors, windows) for a residential building from a
//! few high-level inputs: floor area, level count and region.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Explicit coefficients**: Recipe and factor tables are passed in, never global
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Pipeline
//!
//! ```text
//! BuildingConfig
//!   └─ geometry      raw volumes and areas (square footprint)
//!   └─ adjustment    × region factor × (1 + waste)
//!   └─ conversion    recipes → cement bags, sand, gravel, water, steel, blocks
//!   └─ takeoff       totals + breakdown rows (+ door/window counts)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::{compute, BuildingConfig, CoefficientRegistry};
//!
//! let config = BuildingConfig::new(120.0, 2, "Quetzaltenango");
//! let estimate = compute(&config, CoefficientRegistry::builtin()).unwrap();
//!
//! let json = serde_json::to_string_pretty(&estimate.totals).unwrap();
//! println!("{}", json);
//! ```
//!
//! ## Modules
//!
//! - [`coefficients`] - Recipes, region factors and waste tables
//! - [`config`] - Building configuration and geometry parameters
//! - [`geometry`] - Raw quantity estimation
//! - [`adjustment`] - Region and waste adjustment
//! - [`conversion`] - Recipe-based material conversion
//! - [`takeoff`] - The full pipeline, totals and breakdown
//! - [`openings`] - Door and window counts
//! - [`comparison`] - Several configurations side by side
//! - [`export`] - CSV and JSON export
//! - [`bounds`] - Front-end input ranges
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod activity;
pub mod adjustment;
pub mod bounds;
pub mod coefficients;
pub mod comparison;
pub mod config;
pub mod conversion;
pub mod errors;
pub mod export;
pub mod format;
pub mod geometry;
pub mod openings;
pub mod takeoff;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use activity::{Activity, QuantityUnit};
pub use coefficients::CoefficientRegistry;
pub use comparison::{compare, ComparisonTable, ScenarioInput};
pub use config::{BuildingConfig, GeometryParams, WindowMethod};
pub use errors::{TakeoffError, TakeoffResult};
pub use takeoff::{compute, BreakdownRow, MaterialTotals, TakeoffEstimate};
