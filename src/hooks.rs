use log::debug;
use pace_calculator::input::{FieldController, Key, KeyInput, KeyOutcome, Modifiers};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Event handlers and node ref wiring one input controller to an `<input>`.
#[derive(Clone)]
pub struct ControlledField {
    /// Must be attached to the `<input>` element as its `ref`.
    pub node: NodeRef,
    pub onkeydown: Callback<KeyboardEvent>,
    pub oninput: Callback<InputEvent>,
    pub onfocus: Callback<FocusEvent>,
    pub onblur: Callback<FocusEvent>,
}

fn caret_range(input: &HtmlInputElement) -> (usize, usize) {
    let start = input.selection_start().ok().flatten().unwrap_or(0) as usize;
    let end = input.selection_end().ok().flatten().unwrap_or(start as u32) as usize;
    (start, end)
}

/// Copy the controller's text and caret into the DOM element.
fn write_back(input: &HtmlInputElement, controller: &dyn FieldController) {
    input.set_value(controller.text());
    let selection = controller.selection();
    if input
        .set_selection_range(selection.start as u32, selection.end as u32)
        .is_err()
    {
        debug!("Input does not support selection ranges");
    }
}

/// Custom hook keeping a field controller alive across renders.
///
/// `value` is the display computed by the application state; it is pushed
/// into the element whenever it changes while the field is not focused, so
/// typing is never overwritten by its own recalculated display.
#[hook]
pub fn use_controlled_field<C, F>(
    init: F,
    value: String,
    on_change: Callback<String>,
) -> ControlledField
where
    C: FieldController + 'static,
    F: FnOnce() -> C,
{
    let node = use_node_ref();
    let latest = use_mut_ref(|| on_change.clone());
    *latest.borrow_mut() = on_change;
    let controller = {
        let latest = latest.clone();
        use_mut_ref(move || {
            let mut controller = init();
            controller.set_listener(Box::new(move |text: &str| {
                // Release the cell before emitting; the emit may re-render.
                let on_change = latest.borrow().clone();
                on_change.emit(text.to_string());
            }));
            controller
        })
    };
    let focused = use_mut_ref(|| false);

    {
        let controller = controller.clone();
        let node = node.clone();
        let focused = focused.clone();
        use_effect_with(value, move |value| {
            if !*focused.borrow() {
                let mut controller = controller.borrow_mut();
                controller.sync(value);
                if let Some(input) = node.cast::<HtmlInputElement>() {
                    input.set_value(controller.text());
                }
            }
        });
    }

    let onkeydown = {
        let controller = controller.clone();
        let node = node.clone();
        Callback::from(move |e: KeyboardEvent| {
            let Some(input) = node.cast::<HtmlInputElement>() else {
                return;
            };
            let key = KeyInput::with_modifiers(
                Key::from_dom(&e.key()),
                Modifiers {
                    ctrl: e.ctrl_key(),
                    meta: e.meta_key(),
                    alt: e.alt_key(),
                    shift: e.shift_key(),
                },
            );

            let mut controller = controller.borrow_mut();
            let (start, end) = caret_range(&input);
            controller.set_selection(start, end);
            let outcome = controller.handle_key(&key);
            if outcome.prevents_default() {
                e.prevent_default();
            }
            if outcome == KeyOutcome::Handled {
                write_back(&input, &*controller);
            }
        })
    };

    let oninput = {
        let controller = controller.clone();
        let node = node.clone();
        Callback::from(move |_: InputEvent| {
            let Some(input) = node.cast::<HtmlInputElement>() else {
                return;
            };
            let (caret, _) = caret_range(&input);
            let mut controller = controller.borrow_mut();
            if controller.on_content(&input.value(), caret) {
                write_back(&input, &*controller);
            }
        })
    };

    let onfocus = {
        let controller = controller.clone();
        let node = node.clone();
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| {
            *focused.borrow_mut() = true;
            controller.borrow_mut().focus();
            if let Some(input) = node.cast::<HtmlInputElement>() {
                input.select();
            }
        })
    };

    let onblur = {
        let controller = controller.clone();
        let node = node.clone();
        Callback::from(move |_: FocusEvent| {
            *focused.borrow_mut() = false;
            let mut controller = controller.borrow_mut();
            if controller.blur() {
                if let Some(input) = node.cast::<HtmlInputElement>() {
                    input.set_value(controller.text());
                }
            }
        })
    };

    ControlledField {
        node,
        onkeydown,
        oninput,
        onfocus,
        onblur,
    }
}
