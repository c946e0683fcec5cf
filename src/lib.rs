//! Running pace calculator core.
//!
//! Pure pace/speed/distance/time math, metric/imperial conversion, the
//! recalculation engine that keeps the four quantities consistent, and the
//! two keystroke controllers used by the calculator's text fields.

use log::warn;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod input;
pub mod pace;
pub mod state;
pub mod units;
pub mod utils;

pub use engine::{convert_quantities, recalculate, Derivation, Field, Quantities};
pub use input::{Key, KeyInput, KeyOutcome, NumericInput, SegmentedTimeInput, TimeMask};
pub use pace::{
    distance_from_pace_time, format_pace, format_time, pace_from_time_distance, pace_to_speed,
    parse_pace, parse_time, speed_to_pace, time_from_pace_distance, TimeParseError,
};
pub use state::{Action, AppState};
pub use units::{convert_distance, convert_pace, convert_speed, UnitSystem};

/// JavaScript entry point for the recalculation engine.
///
/// # Arguments
/// * `quantities_js` - Serialized `{pace, speed, distance, time}` object
/// * `derivation` - `"pace-speed"`, `"distance"` or `"time"`
/// * `edited` - Name of the field the user just changed
///
/// # Returns
/// The recalculated tuple, or the input unchanged when the names are unknown.
#[wasm_bindgen(js_name = recalculate)]
pub fn recalculate_js(quantities_js: JsValue, derivation: &str, edited: &str) -> JsValue {
    let quantities: Quantities = match serde_wasm_bindgen::from_value(quantities_js.clone()) {
        Ok(q) => q,
        Err(e) => {
            warn!("Failed to deserialize quantities: {}", e);
            return quantities_js;
        }
    };

    let (derivation, edited) = match (derivation.parse::<Derivation>(), edited.parse::<Field>()) {
        (Ok(d), Ok(f)) => (d, f),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Recalculation skipped: {}", e);
            return quantities_js;
        }
    };

    serde_wasm_bindgen::to_value(&recalculate(quantities, derivation, edited)).unwrap_or(quantities_js)
}
