//! Renderer capabilities consumed by the equation form
//!
//! Both the typeset preview and the live structured-editing surface are
//! opaque to the core: string in, change notification out. The host hands
//! concrete implementations to the form builder; the core never loads or
//! drives a rendering engine itself.

/// A component that typesets the equation for reference while editing.
///
/// The form pushes every resolved equation change into the renderer and
/// flips its display mode when the toggle changes. Rendering failures are
/// the renderer's own concern and are not surfaced to the form.
pub trait PreviewRenderer {
    /// Replace the rendered equation source
    fn set_equation(&mut self, equation: &str);

    /// Switch between block and inline typesetting
    fn set_display_mode(&mut self, display: bool);
}

/// An optional structured input widget for authoring the equation.
///
/// The form pushes canonical text into the surface via `set_equation`.
/// Input travels the other way as host-dispatched events: when the surface
/// changes, the host calls `EquationForm::live_editor_input` with the new
/// value, which is taken verbatim (the surface emits pre-normalized text,
/// never fence-wrapped).
pub trait LiveEditorSurface {
    /// Replace the surface's equation value
    fn set_equation(&mut self, equation: &str);
}
