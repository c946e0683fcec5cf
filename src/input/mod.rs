//! Keystroke-intercepting controllers for the calculator's text fields.
//!
//! Each controller owns the display text and caret of one field. The host
//! forwards key events (translated into [`KeyInput`]) and content changes;
//! the controller answers with a [`KeyOutcome`] telling the host whether to
//! let the native edit through, swallow it, or write back the controller's
//! own text. Every mutation is reported through the change listener before
//! the call returns.

pub mod numeric;
pub mod segmented;

pub use numeric::NumericInput;
pub use segmented::{SegmentedTimeInput, TimeMask};

/// Callback invoked with the field's new display text after a mutation.
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// Caret/selection range in character offsets. `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn is_range(&self) -> bool {
        self.start != self.end
    }

    fn clamped(self, len: usize) -> Self {
        Self::range(self.start.min(len), self.end.min(len))
    }
}

/// Display text plus caret of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub text: String,
    pub selection: Selection,
}

impl FieldState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: Selection::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::range(0, self.len());
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.len());
    }

    /// Non-empty content with every character selected.
    pub fn is_fully_selected(&self) -> bool {
        !self.is_empty() && self.selection.start == 0 && self.selection.end >= self.len()
    }
}

/// Modifier keys held during a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Logical key, as reported by the DOM `KeyboardEvent.key` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Tab,
    Escape,
    Enter,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Other(String),
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            "Enter" => Key::Enter,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(key.to_string()),
                }
            }
        }
    }

    /// Caret and focus movement keys.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowLeft
                | Key::ArrowRight
                | Key::ArrowUp
                | Key::ArrowDown
                | Key::Home
                | Key::End
                | Key::Tab
        )
    }
}

/// A keystroke with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Clipboard, undo and select-all shortcuts.
    pub fn is_edit_shortcut(&self) -> bool {
        match self.key {
            Key::Char(c) if self.modifiers.command() => {
                matches!(c.to_ascii_lowercase(), 'a' | 'c' | 'v' | 'x' | 'z')
            }
            _ => false,
        }
    }
}

/// What the host should do with the native keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the browser apply its default behaviour.
    PassThrough,
    /// Drop the keystroke; nothing changed.
    Suppress,
    /// Drop the keystroke and write back the controller's text and caret.
    Handled,
}

impl KeyOutcome {
    pub fn prevents_default(self) -> bool {
        !matches!(self, KeyOutcome::PassThrough)
    }
}

/// Common surface the host uses to drive either controller.
pub trait FieldController {
    fn text(&self) -> &str;
    fn selection(&self) -> Selection;
    fn set_selection(&mut self, start: usize, end: usize);
    fn set_listener(&mut self, listener: ChangeListener);
    fn focus(&mut self);
    fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome;
    /// Content changed outside keydown (paste, drop, native edit).
    /// Returns `true` when the host must write the text back.
    fn on_content(&mut self, raw: &str, caret: usize) -> bool;
    /// Returns `true` when the display changed.
    fn blur(&mut self) -> bool;
    fn sync(&mut self, text: &str);
}

impl FieldController for SegmentedTimeInput {
    fn text(&self) -> &str {
        SegmentedTimeInput::text(self)
    }

    fn selection(&self) -> Selection {
        SegmentedTimeInput::selection(self)
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        SegmentedTimeInput::set_selection(self, start, end)
    }

    fn set_listener(&mut self, listener: ChangeListener) {
        SegmentedTimeInput::set_listener(self, listener)
    }

    fn focus(&mut self) {
        SegmentedTimeInput::focus(self)
    }

    fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        SegmentedTimeInput::handle_key(self, input)
    }

    fn on_content(&mut self, raw: &str, _caret: usize) -> bool {
        self.set_value(raw)
    }

    fn blur(&mut self) -> bool {
        false
    }

    fn sync(&mut self, text: &str) {
        SegmentedTimeInput::sync(self, text)
    }
}

impl FieldController for NumericInput {
    fn text(&self) -> &str {
        NumericInput::text(self)
    }

    fn selection(&self) -> Selection {
        NumericInput::selection(self)
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        NumericInput::set_selection(self, start, end)
    }

    fn set_listener(&mut self, listener: ChangeListener) {
        NumericInput::set_listener(self, listener)
    }

    fn focus(&mut self) {
        NumericInput::focus(self)
    }

    fn handle_key(&mut self, input: &KeyInput) -> KeyOutcome {
        NumericInput::handle_key(self, input)
    }

    fn on_content(&mut self, raw: &str, caret: usize) -> bool {
        self.on_input(raw, caret)
    }

    fn blur(&mut self) -> bool {
        NumericInput::blur(self)
    }

    fn sync(&mut self, text: &str) {
        NumericInput::sync(self, text)
    }
}
