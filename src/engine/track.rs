//! Track-lap mode: distance pinned to one 400 m lap, time entered in seconds.

use super::{Derivation, Field, Quantities};
use crate::config::{LAP_DISTANCE_KM, SECONDS_PER_MINUTE};
use crate::units::{convert_distance, UnitSystem};

/// Length of one lap in the given unit system.
pub fn lap_distance(units: UnitSystem) -> f64 {
    convert_distance(LAP_DISTANCE_KM, UnitSystem::Metric, units)
}

#[inline]
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

#[inline]
pub fn minutes_to_seconds(minutes: f64) -> f64 {
    minutes * SECONDS_PER_MINUTE
}

/// Snapshot with the distance set to one lap.
pub fn pin_lap(q: Quantities, units: UnitSystem) -> Quantities {
    Quantities {
        distance: lap_distance(units),
        ..q
    }
}

/// The distance is fixed while lapping, so it cannot be the derived group.
/// With distance selected, a lap time edit derives pace and speed and any
/// other edit derives the lap time.
pub fn effective_derivation(derivation: Derivation, edited: Field) -> Derivation {
    match (derivation, edited) {
        (Derivation::Distance, Field::Time) => Derivation::PaceSpeed,
        (Derivation::Distance, _) => Derivation::Time,
        (other, _) => other,
    }
}
