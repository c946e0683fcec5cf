//! Metric/imperial conversion for the distance-bearing quantities.
//!
//! Distance and speed scale linearly with the kilometre/mile factor; pace is
//! time per unit distance and therefore scales with its inverse. Time is
//! always minutes and has no unit-system dependency.

use crate::config::{KM_TO_MILES, MILES_TO_KM};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit system the calculator is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// The other unit system.
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    pub fn speed_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }

    pub fn pace_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "min/km",
            UnitSystem::Imperial => "min/mi",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

/// Linear factor applied to a distance going `from` → `to`.
#[inline]
fn linear_factor(from: UnitSystem, to: UnitSystem) -> f64 {
    match (from, to) {
        (UnitSystem::Metric, UnitSystem::Imperial) => KM_TO_MILES,
        (UnitSystem::Imperial, UnitSystem::Metric) => MILES_TO_KM,
        _ => 1.0,
    }
}

/// Convert a distance between unit systems.
pub fn convert_distance(distance: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    distance * linear_factor(from, to)
}

/// Convert a speed between unit systems.
pub fn convert_speed(speed: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    speed * linear_factor(from, to)
}

/// Convert a pace between unit systems.
///
/// Pace is inversely proportional to the unit length, so the linear factor
/// divides instead of multiplying.
pub fn convert_pace(pace: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    pace / linear_factor(from, to)
}
