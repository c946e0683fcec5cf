//! Fixed-width digit mask (`HH:MM:SS` or `MM:SS`).
//!
//! The field always shows a complete mask. Typing overwrites the digit under
//! the caret and advances; Backspace zeroes the digit before the caret
//! without shifting the rest. Native text editing never touches the field;
//! pasted or programmatic values are normalized by [`SegmentedTimeInput::set_value`].

use super::{ChangeListener, FieldState, Key, KeyInput, KeyOutcome, Selection};
use crate::config::{HOURS_MASK_DEFAULT, MINUTES_MASK_DEFAULT};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

const SEPARATOR: &str = ":";
const DIGITS_PER_GROUP: usize = 2;

/// Layout of a segmented time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeMask {
    /// `HH:MM:SS`, used for durations.
    HoursMinutesSeconds,
    /// `MM:SS`, used for paces.
    MinutesSeconds,
}

impl TimeMask {
    pub fn digit_count(self) -> usize {
        match self {
            TimeMask::HoursMinutesSeconds => 6,
            TimeMask::MinutesSeconds => 4,
        }
    }

    /// Display restored by Delete or by Backspace over a selection.
    pub fn default_text(self) -> &'static str {
        match self {
            TimeMask::HoursMinutesSeconds => HOURS_MASK_DEFAULT,
            TimeMask::MinutesSeconds => MINUTES_MASK_DEFAULT,
        }
    }

    fn groups(self) -> usize {
        self.digit_count() / DIGITS_PER_GROUP
    }

    /// Largest value the mask can show: `99:59` or `99:59:59`.
    pub fn max_digits(self) -> Vec<char> {
        let mut digits = vec!['9'; self.digit_count()];
        for group in 1..self.groups() {
            digits[group * DIGITS_PER_GROUP] = '5';
        }
        digits
    }

    /// Join a full digit string into `NN:NN[:NN]`.
    pub fn format(self, digits: &[char]) -> String {
        digits
            .chunks(DIGITS_PER_GROUP)
            .map(|group| group.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Reduce arbitrary text to exactly `digit_count` digits.
    ///
    /// Non-digits are dropped, short input is left-padded with zeros and
    /// long input keeps its trailing digits.
    pub fn normalize_digits(self, raw: &str) -> Vec<char> {
        let n = self.digit_count();
        let stripped = NON_DIGIT.replace_all(raw, "");
        let digits: Vec<char> = stripped.chars().collect();
        let skip = digits.len().saturating_sub(n);
        let mut out = vec!['0'; n - (digits.len() - skip)];
        out.extend_from_slice(&digits[skip..]);
        out
    }

    /// Caret offset in the display just before digit `index`.
    pub fn caret_for_digit(self, index: usize) -> usize {
        let index = index.min(self.digit_count());
        let separators = (index / DIGITS_PER_GROUP).min(self.groups() - 1);
        index + separators
    }

    /// Number of digits in `text` before caret offset `caret`.
    pub fn digit_for_caret(self, text: &str, caret: usize) -> usize {
        text.chars()
            .take(caret)
            .filter(|c| c.is_ascii_digit())
            .count()
    }
}

/// Controller for a segmented time field.
pub struct SegmentedTimeInput {
    mask: TimeMask,
    field: FieldState,
    listener: Option<ChangeListener>,
}

impl SegmentedTimeInput {
    pub fn new(mask: TimeMask) -> Self {
        Self {
            mask,
            field: FieldState::new(mask.default_text()),
            listener: None,
        }
    }

    /// Install the callback notified after every mutation.
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

    /// Mirror the host's caret/selection before forwarding a keystroke.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.field.set_selection(Selection::range(start, end));
    }

    /// Select everything so the next digit replaces the value.
    pub fn focus(&mut self) {
        self.field.select_all();
    }

    pub fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        if input.key.is_navigation() || input.is_edit_shortcut() {
            return KeyOutcome::PassThrough;
        }

        match input.key {
            Key::Char(c) if c.is_ascii_digit() && !input.modifiers.command() => self.type_digit(c),
            Key::Backspace => self.backspace(),
            Key::Delete => {
                self.reset();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Suppress,
        }
    }

    /// Normalize a pasted or programmatically assigned value and notify.
    ///
    /// Returns `true` when the display was rewritten.
    pub fn set_value(&mut self, raw: &str) -> bool {
        let formatted = self.mask.format(&self.mask.normalize_digits(raw));
        let changed = formatted != self.field.text;
        if changed {
            debug!("Segmented field corrected {:?} -> {:?}", raw, formatted);
            let caret = self.field.selection.start.min(formatted.chars().count());
            self.field.text = formatted;
            self.field.set_selection(Selection::caret(caret));
        }
        self.notify();
        changed
    }

    /// Refresh the display from a value computed elsewhere, without notifying.
    ///
    /// Values wider than the mask saturate at its maximum instead of losing
    /// their leading digits.
    pub fn sync(&mut self, text: &str) {
        let width = NON_DIGIT.replace_all(text, "").len();
        let digits = if width > self.mask.digit_count() {
            debug!("{:?} does not fit the mask, showing its maximum", text);
            self.mask.max_digits()
        } else {
            self.mask.normalize_digits(text)
        };
        self.field.text = self.mask.format(&digits);
        let len = self.field.len();
        self.field.set_selection(Selection::caret(len));
    }

    fn digits(&self) -> Vec<char> {
        self.mask.normalize_digits(&self.field.text)
    }

    fn type_digit(&mut self, digit: char) -> KeyOutcome {
        let n = self.mask.digit_count();

        if self.field.is_fully_selected() {
            let mut digits = vec!['0'; n];
            digits[DIGITS_PER_GROUP - 1] = digit;
            self.commit(&digits, DIGITS_PER_GROUP);
            return KeyOutcome::Handled;
        }

        let index = self
            .mask
            .digit_for_caret(&self.field.text, self.field.selection.start);
        if index >= n {
            return KeyOutcome::Suppress;
        }

        let mut digits = self.digits();
        digits[index] = digit;
        self.commit(&digits, index + 1);
        KeyOutcome::Handled
    }

    fn backspace(&mut self) -> KeyOutcome {
        if self.field.selection.is_range() {
            self.reset();
            return KeyOutcome::Handled;
        }

        let index = self
            .mask
            .digit_for_caret(&self.field.text, self.field.selection.start);
        if index == 0 {
            return KeyOutcome::Suppress;
        }

        let mut digits = self.digits();
        digits[index - 1] = '0';
        self.commit(&digits, index - 1);
        KeyOutcome::Handled
    }

    fn reset(&mut self) {
        self.field.text = self.mask.default_text().to_string();
        self.field.set_selection(Selection::caret(0));
        self.notify();
    }

    fn commit(&mut self, digits: &[char], caret_digit: usize) {
        self.field.text = self.mask.format(digits);
        let caret = self.mask.caret_for_digit(caret_digit);
        self.field.set_selection(Selection::caret(caret));
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.field.text);
        }
    }
}
