//! Yew view components for the calculator page.
//!
//! Field components own their input controller through
//! [`use_controlled_field`]; everything else is stateless and renders from
//! props.

use crate::hooks::{use_controlled_field, ControlledField};
use pace_calculator::input::{NumericInput, SegmentedTimeInput, TimeMask};
use pace_calculator::{Derivation, UnitSystem};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimeFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub unit: AttrValue,
    pub mask: TimeMask,
    /// Display computed by the application state.
    pub value: String,
    #[prop_or_default]
    pub readonly: bool,
    pub on_change: Callback<String>,
}

#[derive(Properties, PartialEq)]
pub struct NumberFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub unit: AttrValue,
    pub decimals: usize,
    /// Display computed by the application state.
    pub value: String,
    #[prop_or_default]
    pub readonly: bool,
    pub on_change: Callback<String>,
}

/// Labelled text input wired to a controller.
fn render_field(
    id: &AttrValue,
    label: &AttrValue,
    unit: &AttrValue,
    readonly: bool,
    inputmode: &'static str,
    control: &ControlledField,
) -> Html {
    html! {
        <div class="form-group">
            <label for={id.clone()}>{ label.clone() }</label>
            <div class="input-with-unit">
                <input
                    type="text"
                    inputmode={inputmode}
                    autocomplete="off"
                    id={id.clone()}
                    ref={control.node.clone()}
                    readonly={readonly}
                    class={classes!(readonly.then_some("derived"))}
                    onkeydown={control.onkeydown.clone()}
                    oninput={control.oninput.clone()}
                    onfocus={control.onfocus.clone()}
                    onblur={control.onblur.clone()}
                />
                <span class="unit">{ unit.clone() }</span>
            </div>
        </div>
    }
}

/// Segmented `HH:MM:SS` / `MM:SS` input.
#[function_component(TimeField)]
pub fn time_field(props: &TimeFieldProps) -> Html {
    let mask = props.mask;
    let control = use_controlled_field(
        move || SegmentedTimeInput::new(mask),
        props.value.clone(),
        props.on_change.clone(),
    );
    render_field(&props.id, &props.label, &props.unit, props.readonly, "numeric", &control)
}

/// Decimal input limited to `decimals` fractional digits.
#[function_component(NumberField)]
pub fn number_field(props: &NumberFieldProps) -> Html {
    let decimals = props.decimals;
    let control = use_controlled_field(
        move || NumericInput::new(decimals),
        props.value.clone(),
        props.on_change.clone(),
    );
    render_field(&props.id, &props.label, &props.unit, props.readonly, "decimal", &control)
}

/// Radio group choosing which quantity is calculated.
#[derive(Properties, PartialEq)]
pub struct DerivationPickerProps {
    pub value: Derivation,
    pub track_lap: bool,
    pub onchange: Callback<Derivation>,
}

fn derivation_label(derivation: Derivation, track_lap: bool) -> &'static str {
    match derivation {
        Derivation::PaceSpeed => "Pace & speed",
        Derivation::Distance if track_lap => "Lap time (distance fixed)",
        Derivation::Distance => "Distance",
        Derivation::Time => "Time",
    }
}

#[function_component(DerivationPicker)]
pub fn derivation_picker(props: &DerivationPickerProps) -> Html {
    html! {
        <fieldset class="derivation-picker">
            <legend>{ "Calculate:" }</legend>
            { Derivation::ALL.iter().map(|&derivation| {
                let onchange = props.onchange.reform(move |_: Event| derivation);
                html! {
                    <label>
                        <input type="radio"
                            name="derivation"
                            value={derivation.as_str()}
                            checked={props.value == derivation}
                            {onchange}
                        />
                        { derivation_label(derivation, props.track_lap) }
                    </label>
                }
            }).collect::<Html>() }
        </fieldset>
    }
}

/// Unit system and track-lap toggles.
#[derive(Properties, PartialEq)]
pub struct ModeTogglesProps {
    pub units: UnitSystem,
    pub track_lap: bool,
    pub on_units: Callback<UnitSystem>,
    pub on_track_lap: Callback<bool>,
}

#[function_component(ModeToggles)]
pub fn mode_toggles(props: &ModeTogglesProps) -> Html {
    let imperial = props.units == UnitSystem::Imperial;
    let on_units = {
        let units = props.units;
        props.on_units.reform(move |_: Event| units.toggled())
    };
    let on_track_lap = {
        let track_lap = props.track_lap;
        props.on_track_lap.reform(move |_: Event| !track_lap)
    };

    html! {
        <div class="form-row mode-toggles">
            <label class="checkbox-label">
                <input type="checkbox" checked={imperial} onchange={on_units} />
                { "Imperial units" }
            </label>
            <label class="checkbox-label">
                <input type="checkbox" checked={props.track_lap} onchange={on_track_lap} />
                { "Track lap (400 m)" }
            </label>
        </div>
    }
}
