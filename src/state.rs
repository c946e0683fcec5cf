//! Immutable calculator state and its transitions.
//!
//! The browser shell keeps one [`AppState`] in a reducer; every user action
//! produces a new snapshot through [`AppState::apply`].

use crate::config::{DISTANCE_DECIMALS, SPEED_DECIMALS};
use crate::engine::{convert_quantities, recalculate, track, Derivation, Field, Quantities};
use crate::pace::{format_pace, format_time, parse_pace, parse_time};
use crate::units::UnitSystem;
use crate::utils::{format_decimal, format_lap_seconds, parse_lap_seconds, parse_positive_decimal};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::functional::Reducible;

/// Everything the calculator shows, as one value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub quantities: Quantities,
    pub derivation: Derivation,
    pub units: UnitSystem,
    pub track_lap: bool,
}

/// User intents dispatched by the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// New text in one field, already normalized by its input controller.
    Edit { field: Field, text: String },
    SetDerivation(Derivation),
    SetUnits(UnitSystem),
    SetTrackLap(bool),
}

impl AppState {
    /// Derivation actually used for an edit, accounting for the pinned lap.
    pub fn effective_derivation(&self, edited: Field) -> Derivation {
        if self.track_lap {
            track::effective_derivation(self.derivation, edited)
        } else {
            self.derivation
        }
    }

    /// Whether the field is computed and should be shown read-only.
    pub fn is_derived(&self, field: Field) -> bool {
        if self.track_lap && self.derivation == Derivation::Distance {
            return field == Field::Distance;
        }
        self.derivation.derives(field)
    }

    /// Value entered in `field`, or `None` when the edit should be ignored.
    pub fn parse_field(&self, field: Field, text: &str) -> Option<f64> {
        let parsed = match field {
            Field::Pace => Some(parse_pace(text)),
            Field::Time if self.track_lap => parse_lap_seconds(text).ok(),
            Field::Time => Some(parse_time(text)),
            Field::Speed => parse_positive_decimal(text, "Speed").ok(),
            Field::Distance => parse_positive_decimal(text, "Distance").ok(),
        };
        parsed.filter(|v| *v > 0.0)
    }

    pub fn apply(&self, action: Action) -> AppState {
        match action {
            Action::Edit { field, text } => self.edit(field, &text),
            Action::SetDerivation(derivation) => AppState { derivation, ..*self },
            Action::SetUnits(units) => self.with_units(units),
            Action::SetTrackLap(on) => self.with_track_lap(on),
        }
    }

    fn edit(&self, field: Field, text: &str) -> AppState {
        if self.track_lap && field == Field::Distance {
            debug!("Distance is pinned to one lap, ignoring {:?}", text);
            return *self;
        }
        let Some(value) = self.parse_field(field, text) else {
            debug!("Ignoring {} edit {:?}", field, text);
            return *self;
        };

        let quantities = recalculate(
            self.quantities.with(field, value),
            self.effective_derivation(field),
            field,
        );
        AppState { quantities, ..*self }
    }

    fn with_units(&self, units: UnitSystem) -> AppState {
        if units == self.units {
            return *self;
        }
        info!("Switching units {} -> {}", self.units, units);
        let mut quantities = convert_quantities(self.quantities, self.units, units);
        if self.track_lap {
            quantities = track::pin_lap(quantities, units);
        }
        AppState {
            quantities,
            units,
            ..*self
        }
    }

    fn with_track_lap(&self, on: bool) -> AppState {
        if on == self.track_lap {
            return *self;
        }
        info!("Track-lap mode {}", if on { "on" } else { "off" });
        if !on {
            return AppState {
                track_lap: false,
                ..*self
            };
        }

        let next = AppState {
            track_lap: true,
            ..*self
        };
        let pinned = track::pin_lap(self.quantities, self.units);
        let quantities = recalculate(
            pinned,
            next.effective_derivation(Field::Distance),
            Field::Distance,
        );
        AppState { quantities, ..next }
    }

    /// Display text for a field.
    pub fn display(&self, field: Field) -> String {
        let q = &self.quantities;
        match field {
            Field::Pace => format_pace(q.pace),
            Field::Speed => format_decimal(q.speed, SPEED_DECIMALS),
            Field::Distance => format_decimal(q.distance, DISTANCE_DECIMALS),
            Field::Time if self.track_lap => format_lap_seconds(q.time),
            Field::Time => format_time(q.time),
        }
    }
}

impl Reducible for AppState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
