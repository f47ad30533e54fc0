//! # Unit Types
//!
//! Type-safe wrappers for the metric units used in a quantity takeoff.
//! They keep lengths, areas and volumes apart in the geometry code while
//! serializing as plain numbers.
//!
//! ## Units
//!
//! - Length: metres (m)
//! - Area: square metres (m²)
//! - Volume: cubic metres (m³)
//! - Mass: kilograms (kg), reported for cement in 42.5 kg bags
//! - Liquid volume: litres (L)
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{CementBags, Kilograms, Meters, SquareMeters};
//!
//! let side = Meters(10.0);
//! let floor: SquareMeters = side * side;
//! assert_eq!(floor.0, 100.0);
//!
//! let bags: CementBags = Kilograms(85.0).into();
//! assert_eq!(bags.0, 2.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard cement bag weight in kilograms
pub const BAG_WEIGHT_KG: f64 = 42.5;

// ============================================================================
// Geometric Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Mul<Meters> for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Material Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Cement quantity in standard 42.5 kg bags
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CementBags(pub f64);

/// Liquid volume in litres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl From<Kilograms> for CementBags {
    fn from(kg: Kilograms) -> Self {
        CementBags(kg.0 / BAG_WEIGHT_KG)
    }
}

impl From<CementBags> for Kilograms {
    fn from(bags: CementBags) -> Self {
        Kilograms(bags.0 * BAG_WEIGHT_KG)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(CementBags);
impl_arithmetic!(Liters);
