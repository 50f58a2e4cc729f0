//! Cyclic focus ring for the equation form
//!
//! The ring's membership is fixed when the form is built and never changes
//! afterwards; only the current position moves. Advancing past the last
//! control wraps to the first and vice versa.

use crate::core::controls::ControlId;

/// Ordered, cyclic set of focusable controls
#[derive(Debug, Clone)]
pub struct FocusRing {
    order: Vec<ControlId>,
    current: usize,
}

impl FocusRing {
    /// Build a ring from the form's child order.
    ///
    /// The order must be non-empty; the form always contains at least the
    /// field and its buttons.
    pub fn new(order: Vec<ControlId>) -> Self {
        debug_assert!(!order.is_empty());
        Self { order, current: 0 }
    }

    /// The control that currently holds focus
    pub fn current(&self) -> ControlId {
        self.order[self.current]
    }

    /// Number of controls in the ring
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True when the given control is a ring member
    pub fn contains(&self, id: ControlId) -> bool {
        self.order.contains(&id)
    }

    /// Return focus to the first control (used when the panel opens)
    pub fn focus_first(&mut self) {
        self.current = 0;
    }

    /// Advance focus forward, wrapping past the end
    pub fn focus_next(&mut self) {
        self.current = (self.current + 1) % self.order.len();
    }

    /// Advance focus backward, wrapping past the start
    pub fn focus_prev(&mut self) {
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or(self.order.len() - 1);
    }

    /// Move focus directly to a member control.
    /// Returns false (focus unchanged) when the control is not a member.
    pub fn focus(&mut self, id: ControlId) -> bool {
        match self.order.iter().position(|&c| c == id) {
            Some(pos) => {
                self.current = pos;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_ring() -> FocusRing {
        FocusRing::new(vec![
            ControlId::LiveEditor,
            ControlId::EquationField,
            ControlId::DisplayToggle,
            ControlId::Save,
            ControlId::Cancel,
        ])
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut ring = full_ring();
        let start = ring.current();
        for _ in 0..ring.len() {
            ring.focus_next();
        }
        assert_eq!(ring.current(), start);
    }

    #[test]
    fn test_backward_from_first_wraps_to_last() {
        let mut ring = full_ring();
        ring.focus_first();
        ring.focus_prev();
        assert_eq!(ring.current(), ControlId::Cancel);
        ring.focus_next();
        assert_eq!(ring.current(), ControlId::LiveEditor);
    }

    #[test]
    fn test_focus_member_and_non_member() {
        let mut ring = FocusRing::new(vec![
            ControlId::EquationField,
            ControlId::DisplayToggle,
            ControlId::Save,
            ControlId::Cancel,
        ]);
        assert!(ring.focus(ControlId::Save));
        assert_eq!(ring.current(), ControlId::Save);

        // Live editor was not built into this form
        assert!(!ring.focus(ControlId::LiveEditor));
        assert_eq!(ring.current(), ControlId::Save);
    }

    #[test]
    fn test_live_editor_first_when_present() {
        let mut ring = full_ring();
        ring.focus_first();
        assert_eq!(ring.current(), ControlId::LiveEditor);
    }
}
