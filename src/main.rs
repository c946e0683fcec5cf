//! Browser entry point for the pace calculator.
//! Wires the application state reducer to the field components.

use pace_calculator::config::{DISTANCE_DECIMALS, LAP_SECONDS_DECIMALS, SPEED_DECIMALS};
use pace_calculator::input::TimeMask;
use pace_calculator::{Action, AppState, Field};
use yew::prelude::*;

mod components;
mod hooks;

use components::{DerivationPicker, ModeToggles, NumberField, TimeField};

/// Primary application component holding the calculator state.
#[function_component(App)]
fn app() -> Html {
    let state = use_reducer(AppState::default);

    let on_edit = |field: Field| {
        let dispatcher = state.dispatcher();
        Callback::from(move |text: String| dispatcher.dispatch(Action::Edit { field, text }))
    };
    let on_derivation = {
        let dispatcher = state.dispatcher();
        Callback::from(move |d| dispatcher.dispatch(Action::SetDerivation(d)))
    };
    let on_units = {
        let dispatcher = state.dispatcher();
        Callback::from(move |u| dispatcher.dispatch(Action::SetUnits(u)))
    };
    let on_track_lap = {
        let dispatcher = state.dispatcher();
        Callback::from(move |on| dispatcher.dispatch(Action::SetTrackLap(on)))
    };

    let units = state.units;

    html! {
        <div class="calculator">
            <h1>{ "Running Pace Calculator" }</h1>

            <ModeToggles
                units={units}
                track_lap={state.track_lap}
                on_units={on_units}
                on_track_lap={on_track_lap}
            />

            <DerivationPicker
                value={state.derivation}
                track_lap={state.track_lap}
                onchange={on_derivation}
            />

            <div class="form-row">
                <TimeField
                    id="pace"
                    label="Pace"
                    unit={units.pace_label()}
                    mask={TimeMask::MinutesSeconds}
                    value={state.display(Field::Pace)}
                    readonly={state.is_derived(Field::Pace)}
                    on_change={on_edit(Field::Pace)}
                />
                <NumberField
                    id="speed"
                    label="Speed"
                    unit={units.speed_label()}
                    decimals={SPEED_DECIMALS}
                    value={state.display(Field::Speed)}
                    readonly={state.is_derived(Field::Speed)}
                    on_change={on_edit(Field::Speed)}
                />
            </div>

            <div class="form-row">
                if state.track_lap {
                    <NumberField
                        key="lap-time"
                        id="lap-time"
                        label="Lap time"
                        unit="s"
                        decimals={LAP_SECONDS_DECIMALS}
                        value={state.display(Field::Time)}
                        readonly={state.is_derived(Field::Time)}
                        on_change={on_edit(Field::Time)}
                    />
                } else {
                    <NumberField
                        key="distance"
                        id="distance"
                        label="Distance"
                        unit={units.distance_label()}
                        decimals={DISTANCE_DECIMALS}
                        value={state.display(Field::Distance)}
                        readonly={state.is_derived(Field::Distance)}
                        on_change={on_edit(Field::Distance)}
                    />
                    <TimeField
                        key="time"
                        id="time"
                        label="Time"
                        unit="h:m:s"
                        mask={TimeMask::HoursMinutesSeconds}
                        value={state.display(Field::Time)}
                        readonly={state.is_derived(Field::Time)}
                        on_change={on_edit(Field::Time)}
                    />
                }
            </div>
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
