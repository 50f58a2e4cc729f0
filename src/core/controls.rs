//! Generic form controls
//!
//! Data models for the interactive controls composed into the equation
//! form. Rendering is the host's job; these structs only carry the state
//! the core needs to keep consistent (values, enabled flags, cursor).

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::input::{InputEvent, Key};

/// Identity of a control inside the form, used for focus routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Optional live structured-editing surface
    LiveEditor,
    /// Raw equation text field
    EquationField,
    /// Inline/block display mode switch
    DisplayToggle,
    /// Commit button
    Save,
    /// Discard button
    Cancel,
}

/// Push button with a label, optional icon hint, and an enabled gate
#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub icon: Option<&'static str>,
    enabled: bool,
}

impl Button {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: None,
            enabled: true,
        }
    }

    pub fn with_icon(label: &str, icon: &'static str) -> Self {
        Self {
            label: label.to_string(),
            icon: Some(icon),
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Boolean switch with a label
#[derive(Debug, Clone)]
pub struct Toggle {
    pub label: String,
    is_on: bool,
}

impl Toggle {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            is_on: false,
        }
    }

    pub fn set_on(&mut self, on: bool) {
        self.is_on = on;
    }

    pub fn flip(&mut self) {
        self.is_on = !self.is_on;
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }
}

/// Static caption (used for the preview heading)
#[derive(Debug, Clone)]
pub struct Label {
    pub text: String,
}

impl Label {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Single-line text field with grapheme-aware cursor motion.
///
/// The cursor is a byte offset that always sits on a grapheme cluster
/// boundary, so combined characters and emoji move as single units.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    pub placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: &str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the whole value, cursor moved to the end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor byte offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal cell width of the current value
    pub fn display_width(&self) -> usize {
        UnicodeWidthStr::width(self.value.as_str())
    }

    /// Process an editing key. Returns true when the event was consumed.
    pub fn handle_key(&mut self, event: &InputEvent) -> bool {
        match &event.key {
            Key::Backspace => {
                self.delete_backward();
                true
            }
            Key::Delete => {
                self.delete_forward();
                true
            }
            Key::Left => {
                self.cursor_left();
                true
            }
            Key::Right => {
                self.cursor_right();
                true
            }
            Key::Home | Key::Ctrl('a') => {
                self.cursor_home();
                true
            }
            Key::End | Key::Ctrl('e') => {
                self.cursor_end();
                true
            }
            Key::Ctrl('k') => {
                self.value.truncate(self.cursor);
                true
            }
            Key::Char(c) if !event.ctrl && !event.alt => {
                self.insert_char(*c);
                true
            }
            _ => false,
        }
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete the grapheme before the cursor
    pub fn delete_backward(&mut self) {
        let start = self.prev_boundary();
        if let Some(start) = start {
            self.value.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    /// Delete the grapheme at the cursor
    pub fn delete_forward(&mut self) {
        let end = self.next_boundary();
        if let Some(end) = end {
            self.value.replace_range(self.cursor..end, "");
        }
    }

    /// Move the cursor one grapheme left
    pub fn cursor_left(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.cursor = start;
        }
    }

    /// Move the cursor one grapheme right
    pub fn cursor_right(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.cursor = end;
        }
    }

    /// Byte offset of the grapheme boundary before the cursor
    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .grapheme_indices(true)
            .last()
            .map(|(idx, _)| idx)
    }

    /// Byte offset of the grapheme boundary after the cursor
    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.value.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_enabled_gate() {
        let mut save = Button::with_icon("Save", "check");
        assert!(save.is_enabled());
        save.set_enabled(false);
        assert!(!save.is_enabled());
        assert_eq!(save.icon, Some("check"));
    }

    #[test]
    fn test_toggle_flip() {
        let mut toggle = Toggle::new("Display mode");
        assert!(!toggle.is_on());
        toggle.flip();
        assert!(toggle.is_on());
        toggle.set_on(false);
        assert!(!toggle.is_on());
    }

    #[test]
    fn test_text_input_editing() {
        let mut field = TextInput::new("Insert equation in TeX format");

        for c in "x^2".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value(), "x^2");
        assert_eq!(field.cursor(), 3);

        field.cursor_left();
        field.cursor_left();
        field.insert_char('y');
        assert_eq!(field.value(), "xy^2");

        field.delete_backward();
        assert_eq!(field.value(), "x^2");
    }

    #[test]
    fn test_text_input_grapheme_motion() {
        let mut field = TextInput::new("");
        field.set_value("a\u{0301}b"); // 'a' + combining acute, then 'b'

        field.cursor_left();
        field.cursor_left();
        // One step back over 'b', one over the full combined cluster
        assert_eq!(field.cursor(), 0);

        field.delete_forward();
        assert_eq!(field.value(), "b");
    }

    #[test]
    fn test_text_input_handle_key() {
        let mut field = TextInput::new("");
        assert!(field.handle_key(&InputEvent::plain(Key::Char('a'))));
        assert!(field.handle_key(&InputEvent::plain(Key::Char('b'))));
        assert!(field.handle_key(&InputEvent::ctrl('a')));
        assert_eq!(field.cursor(), 0);
        assert!(field.handle_key(&InputEvent::ctrl('k')));
        assert_eq!(field.value(), "");

        // Enter is not an editing key, the form owns it
        assert!(!field.handle_key(&InputEvent::plain(Key::Enter)));
    }

    #[test]
    fn test_display_width() {
        let mut field = TextInput::new("");
        field.set_value("ab");
        assert_eq!(field.display_width(), 2);
        field.set_value("あ"); // double-width
        assert_eq!(field.display_width(), 2);
    }
}
