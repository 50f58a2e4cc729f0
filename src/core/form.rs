//! Equation Authoring Form
//!
//! Owns the interactive controls of the popup (text field, display-mode
//! toggle, save/cancel buttons, and the optional live-editor surface and
//! preview renderer) and keeps one logical equation value consistent
//! across all of them. Structure is fixed at build time: the set of child
//! controls, and therefore the focus ring, never changes afterwards.

use log::trace;

use crate::core::controls::{Button, ControlId, Label, TextInput, Toggle};
use crate::core::delimiters::strip_delimiters;
use crate::core::focus::FocusRing;
use crate::core::input::{InputEvent, Key};
use crate::core::render::{LiveEditorSurface, PreviewRenderer};

/// Result of routing a key event into the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum FormEvent {
    /// User requested commit (save activated or Enter in the field)
    Submit,
    /// User requested discard (Esc anywhere, or cancel activated)
    Cancel,
    /// Event consumed by the form, suppress the host default
    Handled,
    /// Event not for the form
    Ignored,
}

/// Builds an [`EquationForm`] with a fixed child-control list.
///
/// Capabilities are structural: handing a renderer or a live-editor
/// surface to the builder adds the matching child (and, for the live
/// editor, the leading focus-ring slot). There is no way to add or remove
/// either after `build`.
#[derive(Default)]
pub struct EquationFormBuilder {
    preview: Option<Box<dyn PreviewRenderer>>,
    live_editor: Option<Box<dyn LiveEditorSurface>>,
}

impl EquationFormBuilder {
    pub fn new() -> Self {
        Self {
            preview: None,
            live_editor: None,
        }
    }

    /// Enable the rendered preview
    pub fn preview(mut self, renderer: Box<dyn PreviewRenderer>) -> Self {
        self.preview = Some(renderer);
        self
    }

    /// Enable the live structured-editing surface
    pub fn live_editor(mut self, surface: Box<dyn LiveEditorSurface>) -> Self {
        self.live_editor = Some(surface);
        self
    }

    pub fn build(self) -> EquationForm {
        // Child order doubles as focus order: the live surface, when
        // present, sits in front and is focused first on open
        let mut ring = Vec::with_capacity(5);
        if self.live_editor.is_some() {
            ring.push(ControlId::LiveEditor);
        }
        ring.push(ControlId::EquationField);
        ring.push(ControlId::DisplayToggle);
        ring.push(ControlId::Save);
        ring.push(ControlId::Cancel);

        let preview_label = self
            .preview
            .as_ref()
            .map(|_| Label::new("Equation preview"));

        let mut save_button = Button::with_icon("Save", "check");
        save_button.set_enabled(false); // empty equation at rest

        EquationForm {
            field: TextInput::new("Insert equation in TeX format."),
            display_toggle: Toggle::new("Display mode"),
            save_button,
            cancel_button: Button::with_icon("Cancel", "cancel"),
            preview_label,
            preview: self.preview,
            live_editor: self.live_editor,
            focus: FocusRing::new(ring),
        }
    }
}

/// The equation-authoring form managed by the panel controller
pub struct EquationForm {
    field: TextInput,
    display_toggle: Toggle,
    save_button: Button,
    cancel_button: Button,
    preview_label: Option<Label>,
    preview: Option<Box<dyn PreviewRenderer>>,
    live_editor: Option<Box<dyn LiveEditorSurface>>,
    focus: FocusRing,
}

impl EquationForm {
    /// The canonical equation text (the text-field value)
    pub fn equation(&self) -> &str {
        self.field.value()
    }

    /// Replace the canonical equation text and resynchronize every
    /// dependent control and renderer
    pub fn set_equation(&mut self, text: &str) {
        self.field.set_value(text);
        self.sync_from_field();
    }

    /// Current display-mode toggle state
    pub fn display_mode(&self) -> bool {
        self.display_toggle.is_on()
    }

    /// Set the display mode explicitly (seeding path). Updates the
    /// preview's mode but never re-runs delimiter detection.
    pub fn set_display_mode(&mut self, display: bool) {
        self.display_toggle.set_on(display);
        if let Some(preview) = &mut self.preview {
            preview.set_display_mode(display);
        }
    }

    /// Whether the save control currently accepts activation
    pub fn save_enabled(&self) -> bool {
        self.save_button.is_enabled()
    }

    /// Save button state, for hosts that render it
    pub fn save_button(&self) -> &Button {
        &self.save_button
    }

    /// Cancel button state, for hosts that render it
    pub fn cancel_button(&self) -> &Button {
        &self.cancel_button
    }

    /// Preview caption, present only when the preview capability is on
    pub fn preview_label(&self) -> Option<&Label> {
        self.preview_label.as_ref()
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    pub fn has_live_editor(&self) -> bool {
        self.live_editor.is_some()
    }

    /// The control currently holding focus
    pub fn focused(&self) -> ControlId {
        self.focus.current()
    }

    /// Number of controls in the focus ring
    pub fn focus_ring_len(&self) -> usize {
        self.focus.len()
    }

    /// Focus the first control in the ring (panel-open path)
    pub fn focus_first(&mut self) {
        self.focus.focus_first();
    }

    /// Advance focus forward, wrapping
    pub fn focus_next(&mut self) {
        self.focus.focus_next();
    }

    /// Advance focus backward, wrapping
    pub fn focus_prev(&mut self) {
        self.focus.focus_prev();
    }

    /// Input event from the live-editor surface.
    ///
    /// The surface emits pre-normalized text, so the value becomes the
    /// canonical equation verbatim: no delimiter pass, no toggle change.
    /// The preview and the save gate are re-evaluated.
    pub fn live_editor_input(&mut self, value: &str) {
        self.field.set_value(value);
        let trimmed = self.field.value().trim().to_string();
        if let Some(preview) = &mut self.preview {
            preview.set_equation(&trimmed);
        }
        self.save_button.set_enabled(!trimmed.is_empty());
    }

    /// Route a key event to the focused control.
    ///
    /// Esc is reported as `Cancel` from anywhere inside the form so the
    /// caller can close the panel and suppress the host's own Esc
    /// handling. Tab and Shift-Tab cycle the focus ring.
    pub fn handle_key(&mut self, event: &InputEvent) -> FormEvent {
        if event.key == Key::Esc {
            return FormEvent::Cancel;
        }

        if event.key == Key::Tab {
            if event.shift {
                self.focus.focus_prev();
            } else {
                self.focus.focus_next();
            }
            return FormEvent::Handled;
        }

        match self.focus.current() {
            ControlId::EquationField => match &event.key {
                Key::Enter => {
                    self.sync_from_field();
                    if self.save_button.is_enabled() {
                        FormEvent::Submit
                    } else {
                        FormEvent::Handled
                    }
                }
                _ => {
                    if self.field.handle_key(event) {
                        self.sync_from_field();
                        FormEvent::Handled
                    } else {
                        FormEvent::Ignored
                    }
                }
            },
            ControlId::DisplayToggle => match &event.key {
                Key::Enter | Key::Char(' ') => {
                    self.flip_display_mode();
                    FormEvent::Handled
                }
                _ => FormEvent::Ignored,
            },
            ControlId::Save => match &event.key {
                Key::Enter | Key::Char(' ') => {
                    if self.save_button.is_enabled() {
                        FormEvent::Submit
                    } else {
                        FormEvent::Handled
                    }
                }
                _ => FormEvent::Ignored,
            },
            ControlId::Cancel => match &event.key {
                Key::Enter | Key::Char(' ') => FormEvent::Cancel,
                _ => FormEvent::Ignored,
            },
            // The live surface is a host-owned widget; its keystrokes never
            // reach the core, only its input events do
            ControlId::LiveEditor => FormEvent::Ignored,
        }
    }

    /// Flip the display toggle. Writes the preview's mode; never reads or
    /// re-runs delimiter inference.
    pub fn flip_display_mode(&mut self) {
        self.display_toggle.flip();
        let display = self.display_toggle.is_on();
        if let Some(preview) = &mut self.preview {
            preview.set_display_mode(display);
        }
    }

    /// Popup size hint in cells, derived from the current content
    pub fn preferred_size(&self) -> (u16, u16) {
        let width = self.field.display_width().max(24) as u16 + 4;
        let mut height = 4; // field, toggle, buttons, padding
        if self.preview.is_some() {
            height += 2; // caption + rendered line
        }
        if self.live_editor.is_some() {
            height += 1;
        }
        (width, height)
    }

    /// Synchronization pass, run on every field edit and on seeding:
    /// trim, strip delimiters, overwrite field and toggle on a hit,
    /// propagate to the renderers, and gate the save button.
    fn sync_from_field(&mut self) {
        let trimmed = self.field.value().trim().to_string();
        let stripped = strip_delimiters(&trimmed);

        let equation = match stripped.display {
            Some(display) => {
                trace!(
                    "delimiters stripped: display={} equation={:?}",
                    display, stripped.equation
                );
                self.field.set_value(&stripped.equation);
                self.display_toggle.set_on(display);
                if let Some(preview) = &mut self.preview {
                    preview.set_display_mode(display);
                }
                stripped.equation
            }
            None => trimmed,
        };

        if let Some(preview) = &mut self.preview {
            preview.set_equation(&equation);
        }
        if let Some(live) = &mut self.live_editor {
            live.set_equation(&equation);
        }
        self.save_button.set_enabled(!equation.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Recording preview shared between the form and the test
    #[derive(Default)]
    struct PreviewLog {
        equations: Vec<String>,
        display: Vec<bool>,
    }

    struct SharedPreview(Rc<RefCell<PreviewLog>>);

    impl PreviewRenderer for SharedPreview {
        fn set_equation(&mut self, equation: &str) {
            self.0.borrow_mut().equations.push(equation.to_string());
        }
        fn set_display_mode(&mut self, display: bool) {
            self.0.borrow_mut().display.push(display);
        }
    }

    struct SharedLiveEditor(Rc<RefCell<Vec<String>>>);

    impl LiveEditorSurface for SharedLiveEditor {
        fn set_equation(&mut self, equation: &str) {
            self.0.borrow_mut().push(equation.to_string());
        }
    }

    fn plain_form() -> EquationForm {
        EquationFormBuilder::new().build()
    }

    fn type_text(form: &mut EquationForm, text: &str) {
        for c in text.chars() {
            let _ = form.handle_key(&InputEvent::plain(Key::Char(c)));
        }
    }

    #[test]
    fn test_save_gate_follows_equation_text() {
        let mut form = plain_form();
        assert!(!form.save_enabled());

        type_text(&mut form, "x");
        assert!(form.save_enabled());

        let _ = form.handle_key(&InputEvent::plain(Key::Backspace));
        assert!(!form.save_enabled());

        // Whitespace-only text does not enable save
        type_text(&mut form, "   ");
        assert!(!form.save_enabled());
    }

    #[test]
    fn test_typing_delimited_text_strips_and_sets_toggle() {
        let mut form = plain_form();
        type_text(&mut form, "\\[a+b\\]");

        assert_eq!(form.equation(), "a+b");
        assert!(form.display_mode());
        assert!(form.save_enabled());
    }

    #[test]
    fn test_pasted_dollar_fences_strip() {
        // A whole delimited string arriving at once (paste, seeding) is
        // resolved in a single pass
        let mut form = plain_form();
        form.set_equation("$$a+b$$");

        assert_eq!(form.equation(), "a+b");
        assert!(form.display_mode());
    }

    #[test]
    fn test_seeding_sets_field_and_toggle() {
        let mut form = plain_form();
        form.set_equation("x^2");
        form.set_display_mode(true);

        assert_eq!(form.equation(), "x^2");
        assert!(form.display_mode());
        assert!(form.save_enabled());
    }

    #[test]
    fn test_toggle_flip_does_not_rerun_detection() {
        let log = Rc::new(RefCell::new(PreviewLog::default()));
        let mut form = EquationFormBuilder::new()
            .preview(Box::new(SharedPreview(log.clone())))
            .build();

        form.set_equation("\\[x\\]");
        assert_eq!(form.equation(), "x");
        assert!(form.display_mode());

        form.flip_display_mode();
        assert!(!form.display_mode());
        // The stripped equation text is untouched by the flip
        assert_eq!(form.equation(), "x");
        assert_eq!(log.borrow().display.last(), Some(&false));
    }

    #[test]
    fn test_preview_receives_equation_updates() {
        let log = Rc::new(RefCell::new(PreviewLog::default()));
        let mut form = EquationFormBuilder::new()
            .preview(Box::new(SharedPreview(log.clone())))
            .build();

        form.set_equation("a");
        type_text(&mut form, "b");

        let equations = &log.borrow().equations;
        assert_eq!(equations.last().map(|s| s.as_str()), Some("ab"));
    }

    #[test]
    fn test_live_editor_input_becomes_canonical() {
        let pushed = Rc::new(RefCell::new(Vec::new()));
        let mut form = EquationFormBuilder::new()
            .live_editor(Box::new(SharedLiveEditor(pushed.clone())))
            .build();

        form.live_editor_input("y=mx+b");
        assert_eq!(form.equation(), "y=mx+b");
        assert!(form.save_enabled());

        // Verbatim path: a fence-looking value is NOT stripped
        form.live_editor_input("$z$");
        assert_eq!(form.equation(), "$z$");
    }

    #[test]
    fn test_set_equation_pushes_into_live_editor() {
        let pushed = Rc::new(RefCell::new(Vec::new()));
        let mut form = EquationFormBuilder::new()
            .live_editor(Box::new(SharedLiveEditor(pushed.clone())))
            .build();

        form.set_equation("x^2");
        assert_eq!(pushed.borrow().last().map(|s| s.as_str()), Some("x^2"));
    }

    #[test]
    fn test_escape_reports_cancel_from_any_control() {
        let mut form = plain_form();
        type_text(&mut form, "x");
        for _ in 0..form.focus_ring_len() {
            form.focus_next();
            assert_eq!(
                form.handle_key(&InputEvent::plain(Key::Esc)),
                FormEvent::Cancel
            );
        }
    }

    #[test]
    fn test_tab_cycles_and_shift_tab_reverses() {
        let mut form = plain_form();
        form.focus_first();
        assert_eq!(form.focused(), ControlId::EquationField);

        let _ = form.handle_key(&InputEvent::plain(Key::Tab));
        assert_eq!(form.focused(), ControlId::DisplayToggle);

        let _ = form.handle_key(&InputEvent::shifted(Key::Tab));
        assert_eq!(form.focused(), ControlId::EquationField);

        let _ = form.handle_key(&InputEvent::shifted(Key::Tab));
        assert_eq!(form.focused(), ControlId::Cancel);
    }

    #[test]
    fn test_enter_in_field_submits_only_when_nonempty() {
        let mut form = plain_form();
        form.focus_first();
        assert_eq!(
            form.handle_key(&InputEvent::plain(Key::Enter)),
            FormEvent::Handled
        );

        type_text(&mut form, "a+b");
        assert_eq!(
            form.handle_key(&InputEvent::plain(Key::Enter)),
            FormEvent::Submit
        );
    }

    #[test]
    fn test_save_and_cancel_activation() {
        let mut form = plain_form();
        type_text(&mut form, "a");

        assert!(form.focus(ControlId::Save));
        assert_eq!(
            form.handle_key(&InputEvent::plain(Key::Enter)),
            FormEvent::Submit
        );

        assert!(form.focus(ControlId::Cancel));
        assert_eq!(
            form.handle_key(&InputEvent::plain(Key::Char(' '))),
            FormEvent::Cancel
        );
    }

    #[test]
    fn test_ring_membership_without_live_editor() {
        let form = plain_form();
        assert_eq!(form.focus_ring_len(), 4);
        assert!(!form.has_live_editor());
    }

    impl EquationForm {
        // test-only direct focus jump
        fn focus(&mut self, id: ControlId) -> bool {
            self.focus.focus(id)
        }
    }
}
