//! # Opening Estimator
//!
//! Counts doors and windows from the room program.
//!
//! - Doors: one per room, one per bathroom, plus the main entrance.
//! - Windows: either `round(area × factor)` or one per room and bathroom.
//!
//! Area-factor counts round half to even, so 4.5 windows becomes 4 and
//! 5.5 becomes 6.

use serde::{Deserialize, Serialize};

use crate::config::{BuildingConfig, WindowMethod};

/// Estimated door and window counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpeningEstimate {
    pub door_count: u32,
    pub window_count: u32,
}

/// Doors: rooms + bathrooms + the main entrance
pub fn door_count(room_count: u32, bathroom_count: u32) -> u32 {
    room_count.saturating_add(bathroom_count).saturating_add(1)
}

/// Windows for the chosen method
pub fn window_count(
    method: WindowMethod,
    area_m2: f64,
    window_factor_per_m2: f64,
    room_count: u32,
    bathroom_count: u32,
) -> u32 {
    match method {
        WindowMethod::AreaFactor => {
            let windows = (area_m2 * window_factor_per_m2).round_ties_even();
            // float-to-int casts saturate; negatives clamp to zero
            windows.max(0.0) as u32
        }
        WindowMethod::RoomBased => room_count.saturating_add(bathroom_count),
    }
}

/// Estimate openings for a configuration, whether or not the config
/// requests them.
pub fn estimate_openings(config: &BuildingConfig) -> OpeningEstimate {
    OpeningEstimate {
        door_count: door_count(config.room_count, config.bathroom_count),
        window_count: window_count(
            config.window_method,
            config.area_m2,
            config.window_factor_per_m2,
            config.room_count,
            config.bathroom_count,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doors_include_entrance() {
        assert_eq!(door_count(0, 0), 1);
        assert_eq!(door_count(3, 2), 6);
        assert_eq!(door_count(20, 20), 41);
    }

    #[test]
    fn test_doors_independent_of_window_method() {
        let base = BuildingConfig::new(120.0, 2, "Guatemala").with_rooms(4, 1);
        let by_area = estimate_openings(&base.clone().with_openings(WindowMethod::AreaFactor));
        let by_room = estimate_openings(&base.with_openings(WindowMethod::RoomBased));
        assert_eq!(by_area.door_count, 6);
        assert_eq!(by_room.door_count, 6);
    }

    #[test]
    fn test_windows_by_area() {
        // 120 × 0.06 = 7.2
        assert_eq!(window_count(WindowMethod::AreaFactor, 120.0, 0.06, 3, 2), 7);
        // 1000 × 0.2 = 200
        assert_eq!(window_count(WindowMethod::AreaFactor, 1000.0, 0.2, 0, 0), 200);
        assert_eq!(window_count(WindowMethod::AreaFactor, 500.0, 0.0, 5, 5), 0);
    }

    #[test]
    fn test_windows_round_half_to_even() {
        assert_eq!(window_count(WindowMethod::AreaFactor, 45.0, 0.1, 0, 0), 4);
        assert_eq!(window_count(WindowMethod::AreaFactor, 55.0, 0.1, 0, 0), 6);
        assert_eq!(window_count(WindowMethod::AreaFactor, 25.0, 0.1, 0, 0), 2);
    }

    #[test]
    fn test_windows_by_room() {
        assert_eq!(window_count(WindowMethod::RoomBased, 120.0, 0.06, 3, 2), 5);
        assert_eq!(window_count(WindowMethod::RoomBased, 120.0, 0.06, 0, 0), 0);
    }

    #[test]
    fn test_estimate_from_config() {
        let config = BuildingConfig::new(200.0, 2, "Guatemala")
            .with_rooms(3, 2)
            .with_openings(WindowMethod::AreaFactor);
        assert_eq!(
            estimate_openings(&config),
            OpeningEstimate {
                door_count: 6,
                window_count: 12,
            }
        );
    }
}
