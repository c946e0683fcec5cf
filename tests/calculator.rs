//! End-to-end flows through the public API: keystrokes into the field
//! controllers, their change notifications into the application state.

use pace_calculator::input::{
    Key, KeyInput, KeyOutcome, NumericInput, SegmentedTimeInput, TimeMask,
};
use pace_calculator::{
    convert_distance, format_pace, pace_to_speed, parse_pace, parse_time, recalculate, Action,
    AppState, Derivation, Field, Quantities, UnitSystem,
};
use std::cell::RefCell;
use std::rc::Rc;

fn type_keys(field: &mut SegmentedTimeInput, keys: &str) {
    for c in keys.chars() {
        field.handle_key(&KeyInput::new(Key::Char(c)));
    }
}

#[test]
fn speed_recalculation_and_time_parsing() {
    assert_eq!(pace_to_speed(5.0), 12.0);
    assert_eq!(pace_to_speed(0.0), 0.0);
    assert_eq!(pace_to_speed(-1.0), 0.0);

    let out = recalculate(
        Quantities { pace: 5.0, speed: 12.0, distance: 8.0, time: 50.0 },
        Derivation::PaceSpeed,
        Field::Distance,
    );
    assert_eq!(out, Quantities { pace: 6.25, speed: 9.6, distance: 8.0, time: 50.0 });

    assert_eq!(parse_time("01:30:00"), 90.0);
    assert_eq!(parse_time("1:2:3:4"), 0.0);
    assert_eq!(parse_time(""), 0.0);
}

#[test]
fn pace_typed_into_segmented_field_updates_state() {
    let state = Rc::new(RefCell::new(AppState::default()));
    let sink = state.clone();
    let mut pace = SegmentedTimeInput::new(TimeMask::MinutesSeconds).with_listener(move |text| {
        let next = sink.borrow().apply(Action::Edit {
            field: Field::Pace,
            text: text.to_string(),
        });
        *sink.borrow_mut() = next;
    });

    pace.sync(&state.borrow().display(Field::Pace));
    pace.focus();
    type_keys(&mut pace, "4");
    assert_eq!(pace.text(), "04:00");
    type_keys(&mut pace, "3");
    assert_eq!(pace.text(), "04:30");

    // Distance is derived by default: 50 min at 4:30/km
    let snapshot = *state.borrow();
    assert_eq!(snapshot.quantities.pace, 4.5);
    assert!((snapshot.quantities.distance - 50.0 / 4.5).abs() < 1e-9);
    assert_eq!(snapshot.display(Field::Distance), "11.11");
}

#[test]
fn numeric_field_ignores_partial_input_until_valid() {
    let state = Rc::new(RefCell::new(
        AppState::default().apply(Action::SetDerivation(Derivation::Time)),
    ));
    let sink = state.clone();
    let mut distance = NumericInput::new(2).with_listener(move |text| {
        let next = sink.borrow().apply(Action::Edit {
            field: Field::Distance,
            text: text.to_string(),
        });
        *sink.borrow_mut() = next;
    });

    distance.sync("10.00");
    distance.focus();
    assert_eq!(
        distance.handle_key(&KeyInput::new(Key::Char('2'))),
        KeyOutcome::Handled
    );
    assert_eq!(state.borrow().quantities.time, 10.0);

    // Browser inserts "1", then a comma is typed
    distance.on_input("21", 2);
    distance.handle_key(&KeyInput::new(Key::Char(',')));
    assert_eq!(distance.text(), "21.");
    distance.on_input("21.0975", 7);
    assert_eq!(distance.text(), "21.09");

    let q = state.borrow().quantities;
    assert_eq!(q.distance, 21.09);
    assert!((q.time - 5.0 * 21.09).abs() < 1e-9);
    assert_eq!(state.borrow().display(Field::Time), "01:45:27");
}

#[test]
fn numeric_truncates_extra_decimals() {
    let mut speed = NumericInput::new(2);
    speed.on_input("12.4567", 7);
    assert_eq!(speed.text(), "12.45");
}

#[test]
fn segmented_paste_is_corrected() {
    let mut time = SegmentedTimeInput::new(TimeMask::HoursMinutesSeconds);
    assert!(time.set_value("3:25:07"));
    assert_eq!(time.text(), "03:25:07");
    assert_eq!(parse_time(time.text()), 3.0 * 60.0 + 25.0 + 7.0 / 60.0);
}

#[test]
fn pace_text_round_trips() {
    for seconds in 0..60u32 {
        let v = 6.0 + seconds as f64 / 60.0;
        assert!((parse_pace(&format_pace(v)) - v).abs() < 1e-9);
    }
}

#[test]
fn unit_toggle_round_trip_keeps_distance() {
    let metric = AppState::default();
    let there = metric.apply(Action::SetUnits(UnitSystem::Imperial));
    let back = there.apply(Action::SetUnits(UnitSystem::Metric));
    assert!((back.quantities.distance - metric.quantities.distance).abs() < 1e-4);
    assert_eq!(back.quantities.time, metric.quantities.time);
    assert!(
        (convert_distance(metric.quantities.distance, UnitSystem::Metric, UnitSystem::Imperial)
            - there.quantities.distance)
            .abs()
            < 1e-12
    );
}

#[test]
fn state_serializes_with_wire_names() {
    let json = serde_json::to_value(AppState::default()).unwrap();
    assert_eq!(json["derivation"], "distance");
    assert_eq!(json["units"], "metric");
    assert_eq!(json["quantities"]["pace"], 5.0);

    let pace_speed = serde_json::to_value(Derivation::PaceSpeed).unwrap();
    assert_eq!(pace_speed, "pace-speed");

    let back: Quantities =
        serde_json::from_str(r#"{"pace":5.0,"speed":12.0,"distance":10.0,"time":50.0}"#).unwrap();
    assert_eq!(back, Quantities::default());
}

#[test]
fn slow_track_pace_saturates_in_pace_field() {
    let state = AppState::default()
        .apply(Action::SetDerivation(Derivation::PaceSpeed))
        .apply(Action::SetTrackLap(true));
    assert_eq!(state.quantities.pace, 125.0);
    assert_eq!(state.display(Field::Pace), "125:00");

    let mut pace = SegmentedTimeInput::new(TimeMask::MinutesSeconds);
    pace.sync(&state.display(Field::Pace));
    assert_eq!(pace.text(), "99:59");
}
