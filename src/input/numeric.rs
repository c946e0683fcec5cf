//! Free-form decimal field with at most one separator and a bounded number
//! of decimal places.
//!
//! Keydown filtering keeps obviously invalid keys out; everything that
//! reaches the content (typed or pasted) is cleaned again by
//! [`NumericInput::on_input`].

use super::{ChangeListener, FieldState, Key, KeyInput, KeyOutcome, Selection};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());

/// Clean raw field content into digits with at most one `.` and at most
/// `max_decimals` fractional digits. Zero decimals drops the separator.
pub fn normalize_decimal(raw: &str, max_decimals: usize) -> String {
    let swapped = raw.replace(',', ".");
    let stripped = NON_NUMERIC.replace_all(&swapped, "");

    match stripped.split_once('.') {
        None => stripped.to_string(),
        Some((whole, _)) if max_decimals == 0 => whole.to_string(),
        Some((whole, rest)) => {
            let fraction: String = rest.chars().filter(|c| *c != '.').take(max_decimals).collect();
            format!("{}.{}", whole, fraction)
        }
    }
}

/// Controller for a numeric field.
pub struct NumericInput {
    max_decimals: usize,
    field: FieldState,
    listener: Option<ChangeListener>,
}

impl NumericInput {
    pub fn new(max_decimals: usize) -> Self {
        Self {
            max_decimals,
            field: FieldState::default(),
            listener: None,
        }
    }

    /// Install the callback notified after every content change.
    pub fn set_listener(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn with_listener(mut self, listener: impl FnMut(&str) + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn text(&self) -> &str {
        &self.field.text
    }

    pub fn selection(&self) -> Selection {
        self.field.selection
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.field.set_selection(Selection::range(start, end));
    }

    pub fn focus(&mut self) {
        self.field.select_all();
    }

    fn has_separator(&self) -> bool {
        self.field.text.contains(['.', ','])
    }

    fn accepts_separator(&self) -> bool {
        self.max_decimals > 0 && !self.has_separator()
    }

    pub fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        if input.is_edit_shortcut() {
            return KeyOutcome::PassThrough;
        }
        if input.modifiers.command() {
            return KeyOutcome::Suppress;
        }

        match input.key {
            Key::Char(c) if c.is_ascii_digit() => {
                if self.field.is_fully_selected() {
                    self.field.text = c.to_string();
                    self.field.set_selection(Selection::caret(1));
                    self.notify();
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::PassThrough
                }
            }
            Key::Char(',') if self.accepts_separator() => {
                self.insert_separator();
                KeyOutcome::Handled
            }
            Key::Char('.') if self.accepts_separator() => KeyOutcome::PassThrough,
            Key::Backspace | Key::Delete | Key::Escape | Key::Enter => KeyOutcome::PassThrough,
            ref key if key.is_navigation() => KeyOutcome::PassThrough,
            _ => KeyOutcome::Suppress,
        }
    }

    /// Replace the selection with a `.` and run normal content cleanup.
    fn insert_separator(&mut self) {
        let chars: Vec<char> = self.field.text.chars().collect();
        let Selection { start, end } = self.field.selection;
        let mut next: String = chars[..start].iter().collect();
        next.push('.');
        next.extend(&chars[end..]);
        self.on_input(&next, start + 1);
    }

    /// Clean content produced by native editing or paste.
    ///
    /// Returns `true` when the cleaned text differs from `raw` and the host
    /// has to write it back.
    pub fn on_input(&mut self, raw: &str, caret: usize) -> bool {
        let cleaned = normalize_decimal(raw, self.max_decimals);
        let rewritten = cleaned != raw;
        if rewritten {
            debug!("Numeric field cleaned {:?} -> {:?}", raw, cleaned);
        }
        self.field.text = cleaned;
        self.field.set_selection(Selection::caret(caret));
        self.notify();
        rewritten
    }

    /// Reformat to exactly `max_decimals` places when the content parses.
    ///
    /// Returns `true` when the display changed.
    pub fn blur(&mut self) -> bool {
        let Ok(value) = self.field.text.parse::<f64>() else {
            return false;
        };
        let formatted = format!("{:.*}", self.max_decimals, value);
        if formatted == self.field.text {
            return false;
        }
        self.field.text = formatted;
        let len = self.field.len();
        self.field.set_selection(Selection::caret(len));
        true
    }

    /// Refresh the display from a value computed elsewhere, without notifying.
    pub fn sync(&mut self, text: &str) {
        self.field.text = normalize_decimal(text, self.max_decimals);
        let len = self.field.len();
        self.field.set_selection(Selection::caret(len));
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.field.text);
        }
    }
}
