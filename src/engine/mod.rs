//! Field-dependency recalculation.
//!
//! Keeps pace, speed, distance and time mutually consistent. The user picks
//! which group is derived ([`Derivation`]); every edit produces a fresh
//! [`Quantities`] snapshot where that group has been recomputed from the
//! others. Degenerate inputs leave the derived group untouched.

pub mod track;

use crate::config::{DEFAULT_DISTANCE, DEFAULT_PACE, DEFAULT_SPEED, DEFAULT_TIME};
use crate::pace::{
    distance_from_pace_time, pace_from_time_distance, pace_to_speed, speed_to_pace,
    time_from_pace_distance,
};
use crate::units::{convert_distance, convert_pace, convert_speed, UnitSystem};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Snapshot of the four linked quantities.
///
/// `pace` is minutes per distance unit, `speed` distance units per hour,
/// `distance` in distance units and `time` in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantities {
    pub pace: f64,
    pub speed: f64,
    pub distance: f64,
    pub time: f64,
}

impl Default for Quantities {
    fn default() -> Self {
        Self {
            pace: DEFAULT_PACE,
            speed: DEFAULT_SPEED,
            distance: DEFAULT_DISTANCE,
            time: DEFAULT_TIME,
        }
    }
}

impl Quantities {
    /// Read a single field.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Pace => self.pace,
            Field::Speed => self.speed,
            Field::Distance => self.distance,
            Field::Time => self.time,
        }
    }

    /// Copy of `self` with one field replaced.
    pub fn with(self, field: Field, value: f64) -> Self {
        let mut next = self;
        match field {
            Field::Pace => next.pace = value,
            Field::Speed => next.speed = value,
            Field::Distance => next.distance = value,
            Field::Time => next.time = value,
        }
        next
    }
}

/// Which group of fields is computed rather than entered.
///
/// Pace and speed are never derived independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Derivation {
    #[serde(rename = "pace-speed")]
    PaceSpeed,
    #[default]
    #[serde(rename = "distance")]
    Distance,
    #[serde(rename = "time")]
    Time,
}

impl Derivation {
    pub const ALL: [Derivation; 3] = [Derivation::PaceSpeed, Derivation::Distance, Derivation::Time];

    pub fn as_str(self) -> &'static str {
        match self {
            Derivation::PaceSpeed => "pace-speed",
            Derivation::Distance => "distance",
            Derivation::Time => "time",
        }
    }

    /// Whether `field` belongs to the derived group.
    pub fn derives(self, field: Field) -> bool {
        matches!(
            (self, field),
            (Derivation::PaceSpeed, Field::Pace | Field::Speed)
                | (Derivation::Distance, Field::Distance)
                | (Derivation::Time, Field::Time)
        )
    }
}

/// One of the four quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Pace,
    Speed,
    Distance,
    Time,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Pace => "pace",
            Field::Speed => "speed",
            Field::Distance => "distance",
            Field::Time => "time",
        }
    }
}

/// Unknown selector or field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectorError(pub String);

impl fmt::Display for ParseSelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown field or derivation name: {:?}", self.0)
    }
}

impl std::error::Error for ParseSelectorError {}

impl FromStr for Derivation {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Derivation::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseSelectorError(s.to_string()))
    }
}

impl FromStr for Field {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pace" => Ok(Field::Pace),
            "speed" => Ok(Field::Speed),
            "distance" => Ok(Field::Distance),
            "time" => Ok(Field::Time),
            _ => Err(ParseSelectorError(s.to_string())),
        }
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produce a consistent snapshot after `edited` changed.
///
/// 1. An edit to pace or speed always re-syncs its sibling.
/// 2. The group selected by `derivation` is recomputed when its inputs are
///    positive; otherwise it keeps its previous value.
///
/// Reapplying with the same `edited` on the result changes nothing.
pub fn recalculate(quantities: Quantities, derivation: Derivation, edited: Field) -> Quantities {
    let mut q = quantities;

    match edited {
        Field::Pace => q.speed = pace_to_speed(q.pace),
        Field::Speed => q.pace = speed_to_pace(q.speed),
        Field::Distance | Field::Time => {}
    }

    match derivation {
        Derivation::PaceSpeed => {
            if q.distance > 0.0 && q.time > 0.0 {
                q.pace = pace_from_time_distance(q.time, q.distance);
                q.speed = pace_to_speed(q.pace);
            }
        }
        Derivation::Distance => {
            if q.pace > 0.0 && q.time > 0.0 {
                q.distance = distance_from_pace_time(q.pace, q.time);
            }
        }
        Derivation::Time => {
            if q.pace > 0.0 && q.distance > 0.0 {
                q.time = time_from_pace_distance(q.pace, q.distance);
            }
        }
    }

    debug!(
        "Recalculated after {} edit (derived: {}): {:?} -> {:?}",
        edited, derivation, quantities, q
    );
    q
}

/// Convert the distance-bearing fields when the unit system is toggled.
///
/// Time is in minutes regardless of unit system and is left as is.
pub fn convert_quantities(q: Quantities, from: UnitSystem, to: UnitSystem) -> Quantities {
    Quantities {
        pace: convert_pace(q.pace, from, to),
        speed: convert_speed(q.speed, from, to),
        distance: convert_distance(q.distance, from, to),
        time: q.time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(pace: f64, speed: f64, distance: f64, time: f64) -> Quantities {
        Quantities { pace, speed, distance, time }
    }

    #[test]
    fn test_derive_pace_speed_after_distance_edit() {
        let out = recalculate(q(5.0, 12.0, 8.0, 50.0), Derivation::PaceSpeed, Field::Distance);
        assert_eq!(out, q(6.25, 9.6, 8.0, 50.0));
    }

    #[test]
    fn test_derive_distance_after_pace_edit() {
        let out = recalculate(q(4.0, 12.0, 10.0, 50.0), Derivation::Distance, Field::Pace);
        assert_eq!(out, q(4.0, 15.0, 12.5, 50.0));
    }

    #[test]
    fn test_derive_time_after_speed_edit() {
        let out = recalculate(q(5.0, 10.0, 10.0, 50.0), Derivation::Time, Field::Speed);
        assert_eq!(out, q(6.0, 10.0, 10.0, 60.0));
    }

    #[test]
    fn test_sibling_sync_ignores_derivation() {
        // Pace is derived, but a speed edit still resyncs pace first.
        let out = recalculate(q(5.0, 15.0, 0.0, 50.0), Derivation::PaceSpeed, Field::Speed);
        assert_eq!(out.pace, 4.0);
        assert_eq!(out.speed, 15.0);
    }

    #[test]
    fn test_degenerate_inputs_are_no_ops() {
        let start = q(0.0, 0.0, 10.0, 0.0);
        assert_eq!(recalculate(start, Derivation::Distance, Field::Time), start);
        assert_eq!(recalculate(start, Derivation::PaceSpeed, Field::Distance), start);

        let no_distance = q(5.0, 12.0, 0.0, 50.0);
        assert_eq!(recalculate(no_distance, Derivation::Time, Field::Distance), no_distance);
    }

    #[test]
    fn test_zero_pace_edit_zeroes_speed() {
        let out = recalculate(q(0.0, 12.0, 10.0, 50.0), Derivation::Time, Field::Pace);
        assert_eq!(out.speed, 0.0);
        assert_eq!(out.time, 50.0);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let cases = [
            (q(5.0, 12.0, 8.0, 50.0), Derivation::PaceSpeed, Field::Distance),
            (q(4.5, 0.0, 10.0, 50.0), Derivation::Distance, Field::Pace),
            (q(5.0, 11.0, 21.0975, 50.0), Derivation::Time, Field::Speed),
            (q(7.0, 0.0, 3.0, 0.0), Derivation::Time, Field::Time),
        ];
        for (start, derivation, edited) in cases {
            let once = recalculate(start, derivation, edited);
            let twice = recalculate(once, derivation, edited);
            assert_eq!(once, twice, "{:?} {:?}", derivation, edited);
        }
    }

    #[test]
    fn test_convert_quantities_keeps_time() {
        let metric = Quantities::default();
        let imperial = convert_quantities(metric, UnitSystem::Metric, UnitSystem::Imperial);
        assert_eq!(imperial.time, metric.time);
        assert!((imperial.distance - 6.21371).abs() < 1e-9);
        assert!(imperial.pace > metric.pace);
        assert!(imperial.speed < metric.speed);
    }

    #[test]
    fn test_names_parse_and_display() {
        assert_eq!("pace-speed".parse::<Derivation>(), Ok(Derivation::PaceSpeed));
        assert_eq!("time".parse::<Derivation>(), Ok(Derivation::Time));
        assert_eq!("speed".parse::<Field>(), Ok(Field::Speed));
        assert!("pace".parse::<Derivation>().is_err());
        assert_eq!(Derivation::Distance.to_string(), "distance");
        assert_eq!(Derivation::default(), Derivation::Distance);
    }

    #[test]
    fn test_derives() {
        assert!(Derivation::PaceSpeed.derives(Field::Speed));
        assert!(!Derivation::PaceSpeed.derives(Field::Time));
        assert!(Derivation::Time.derives(Field::Time));
    }

    #[test]
    fn test_with_replaces_one_field() {
        let base = Quantities::default();
        let next = base.with(Field::Distance, 21.1);
        assert_eq!(next.distance, 21.1);
        assert_eq!(next.get(Field::Time), base.time);
    }
}
