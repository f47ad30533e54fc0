//! # Construction Activities
//!
//! The closed set of work items (activities) a takeoff is broken into,
//! and the units their quantities are measured in.
//!
//! | Activity     | Measured as | Converted with        |
//! |--------------|-------------|-----------------------|
//! | Slab         | m³          | general concrete      |
//! | Subfloor     | m³          | subfloor concrete     |
//! | Wall         | m²          | block masonry         |
//! | Footing      | m³          | footing concrete      |
//! | ColumnBeam   | m³          | structural concrete   |

use serde::{Deserialize, Serialize};

use crate::coefficients::RecipeKind;

/// A construction activity with its own geometry, region factor and waste.
///
/// Serializes as its snake_case key (`"slab"`, `"column_beam"`, ...), which
/// is also the key used in coefficient files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Horizontal concrete slab, every level
    Slab,
    /// Ground-contact concrete layer under the first level
    Subfloor,
    /// Block masonry walls along the perimeter
    Wall,
    /// Continuous strip footing under the perimeter walls
    Footing,
    /// Columns and beams, estimated together from area factors
    ColumnBeam,
}

impl Activity {
    /// All activities in breakdown order
    pub const ALL: [Activity; 5] = [
        Activity::Slab,
        Activity::Subfloor,
        Activity::Wall,
        Activity::Footing,
        Activity::ColumnBeam,
    ];

    /// Key used in coefficient tables and serialized output
    pub fn key(&self) -> &'static str {
        match self {
            Activity::Slab => "slab",
            Activity::Subfloor => "subfloor",
            Activity::Wall => "wall",
            Activity::Footing => "footing",
            Activity::ColumnBeam => "column_beam",
        }
    }

    /// Display name for tables and exports
    pub fn display_name(&self) -> &'static str {
        match self {
            Activity::Slab => "Slab",
            Activity::Subfloor => "Subfloor",
            Activity::Wall => "Block walls",
            Activity::Footing => "Strip footings",
            Activity::ColumnBeam => "Columns + Beams",
        }
    }

    /// Unit the activity quantity is measured in
    pub fn unit(&self) -> QuantityUnit {
        match self {
            Activity::Wall => QuantityUnit::SquareMeters,
            _ => QuantityUnit::CubicMeters,
        }
    }

    /// Concrete recipe for this activity, `None` for masonry
    pub fn recipe(&self) -> Option<RecipeKind> {
        match self {
            Activity::Slab => Some(RecipeKind::General),
            Activity::Subfloor => Some(RecipeKind::Subfloor),
            Activity::Wall => None,
            Activity::Footing => Some(RecipeKind::Footing),
            Activity::ColumnBeam => Some(RecipeKind::Structural),
        }
    }

    /// Parse an activity from its key
    pub fn from_key(key: &str) -> Option<Activity> {
        Activity::ALL.into_iter().find(|a| a.key() == key)
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Unit of a breakdown quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    /// Volume (m³)
    CubicMeters,
    /// Area (m²)
    SquareMeters,
    /// Counted pieces (doors, windows)
    Pieces,
}

impl QuantityUnit {
    /// Unit symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            QuantityUnit::CubicMeters => "m³",
            QuantityUnit::SquareMeters => "m²",
            QuantityUnit::Pieces => "pc",
        }
    }
}

impl std::fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
