//! Panel Lifecycle Controller
//!
//! Drives the equation popup through its Closed/Open transitions: seeding
//! the form from the external command on open, committing through the
//! command on submit, and converging every dismissal path (Esc, click
//! outside, cancel) on one close routine. The form itself is long-lived;
//! open and close only change its membership in the shared panel stack.

use log::debug;

use crate::config::MathConfig;
use crate::core::command::EquationCommand;
use crate::core::form::{EquationForm, FormEvent};
use crate::core::input::{InputEvent, KeyOutcome};
use crate::core::panel::{Anchor, Rect, StackedPanel, SubscriptionId, ViewId};

/// Name of the popup stack this feature contributes to
pub const EQUATION_STACK: &str = "equation";

/// Host document surface capabilities consumed by the controller
pub trait DocumentHost {
    /// Anchor point derived from the current selection range. Read once
    /// per open transition, never re-derived while the panel stays open.
    fn selection_anchor(&self) -> Anchor;

    /// Return keyboard focus to the document surface
    fn focus_editing_surface(&mut self);

    /// Register for document-update notifications
    fn subscribe_updates(&mut self) -> SubscriptionId;

    /// Drop a document-update registration.
    /// Returns false when the id was not subscribed.
    fn unsubscribe_updates(&mut self, id: SubscriptionId) -> bool;
}

/// Controller owning the popup's lifecycle state.
///
/// `Open` is not stored as a flag: the panel stack's membership of the
/// form view is the single source of truth, which keeps repeated triggers
/// from multiple sources (toolbar, keystroke) naturally idempotent.
pub struct PanelController {
    form: EquationForm,
    view: ViewId,
    output_format: String,
    force_output_format: bool,
    visibility_sub: Option<SubscriptionId>,
    document_sub: Option<SubscriptionId>,
}

impl PanelController {
    /// Wrap a built form. The view identity comes from the shared panel
    /// and stays fixed for the controller's lifetime.
    pub fn new(form: EquationForm, view: ViewId, config: &MathConfig) -> Self {
        Self {
            form,
            view,
            output_format: config.output_format.clone(),
            force_output_format: config.force_output_format,
            visibility_sub: None,
            document_sub: None,
        }
    }

    pub fn form(&self) -> &EquationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EquationForm {
        &mut self.form
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Open iff the form view is a stack member
    pub fn is_open(&self, panel: &StackedPanel) -> bool {
        panel.has_view(self.view)
    }

    /// Open transition: seed the form from the command's committed state,
    /// add the view to the stack at an anchor captured now, show the
    /// stack, and focus the first control.
    ///
    /// Silently refused while the command is disabled; a no-op when
    /// already open. Returns true when the panel actually opened.
    pub fn open(
        &mut self,
        panel: &mut StackedPanel,
        command: &dyn EquationCommand,
        host: &mut dyn DocumentHost,
    ) -> bool {
        if !command.is_enabled() {
            debug!("equation panel open refused: command disabled");
            return false;
        }
        if panel.has_view(self.view) {
            debug!("equation panel open ignored: already open");
            return false;
        }

        // Ephemeral form state: always re-seeded from the committed value
        let value = command.value().unwrap_or_default();
        let display = command.display().unwrap_or(false);
        self.form.set_equation(&value);
        self.form.set_display_mode(display);

        let anchor = host.selection_anchor();
        let (width, height) = self.form.preferred_size();
        panel.add(self.view, EQUATION_STACK, Rect::below_anchor(anchor, width, height));
        panel.show_stack(EQUATION_STACK);
        self.form.focus_first();

        self.visibility_sub = Some(panel.visibility.subscribe());
        self.document_sub = Some(host.subscribe_updates());
        debug!("equation panel opened at anchor ({}, {})", anchor.x, anchor.y);
        true
    }

    /// Close transition shared by Esc, click-outside, and cancel: remove
    /// the view from the stack, drop both listener subscriptions, and
    /// return focus to the document. A no-op when already closed.
    pub fn close(&mut self, panel: &mut StackedPanel, host: &mut dyn DocumentHost) -> bool {
        if !panel.has_view(self.view) {
            return false;
        }
        panel.remove(self.view);
        if panel.visible_view().is_none() {
            panel.hide();
        }
        if let Some(id) = self.visibility_sub.take() {
            panel.visibility.unsubscribe(id);
        }
        if let Some(id) = self.document_sub.take() {
            host.unsubscribe_updates(id);
        }
        host.focus_editing_surface();
        debug!("equation panel closed");
        true
    }

    /// Submit transition: invoke the external command with the form's
    /// resolved values, then run the close path. A no-op when closed.
    pub fn submit(
        &mut self,
        panel: &mut StackedPanel,
        command: &mut dyn EquationCommand,
        host: &mut dyn DocumentHost,
    ) -> bool {
        if !panel.has_view(self.view) {
            return false;
        }
        debug!(
            "committing equation (display={}): {:?}",
            self.form.display_mode(),
            self.form.equation()
        );
        command.execute(
            self.form.equation(),
            self.form.display_mode(),
            &self.output_format,
            self.force_output_format,
        );
        self.close(panel, host)
    }

    /// Route a key event while the panel is open. Submit/cancel results
    /// from the form run the matching transition; `Handled` tells the
    /// caller to suppress the host's default action.
    pub fn handle_key(
        &mut self,
        event: &InputEvent,
        panel: &mut StackedPanel,
        command: &mut dyn EquationCommand,
        host: &mut dyn DocumentHost,
    ) -> KeyOutcome {
        if !self.is_open(panel) {
            return KeyOutcome::PassThrough;
        }
        match self.form.handle_key(event) {
            FormEvent::Submit => {
                self.submit(panel, command, host);
                KeyOutcome::Handled
            }
            FormEvent::Cancel => {
                self.close(panel, host);
                KeyOutcome::Handled
            }
            FormEvent::Handled => KeyOutcome::Handled,
            FormEvent::Ignored => KeyOutcome::PassThrough,
        }
    }

    /// Click at host coordinates. A click outside the popup rectangle
    /// while open closes the panel, same as Esc. Returns true when the
    /// click closed the panel.
    pub fn handle_click(
        &mut self,
        x: u16,
        y: u16,
        panel: &mut StackedPanel,
        host: &mut dyn DocumentHost,
    ) -> bool {
        if !self.is_open(panel) {
            return false;
        }
        let inside = panel
            .view_rect(self.view)
            .is_some_and(|rect| rect.contains(x, y));
        if inside {
            return false;
        }
        self.close(panel, host)
    }

    /// Panel visibility notification from the host. Acted on only while
    /// our subscription is live: when another feature's stack took the
    /// panel over, stop owning the stack and close.
    pub fn on_visibility_changed(&mut self, panel: &mut StackedPanel, host: &mut dyn DocumentHost) {
        let Some(id) = self.visibility_sub else {
            return;
        };
        if !panel.visibility.is_active(id) {
            return;
        }
        if panel.visible_view() != Some(self.view) {
            debug!("equation panel lost the stack, closing");
            self.close(panel, host);
        }
    }

    /// Document-update notification from the host. While open, a change
    /// that disables the command (selection no longer permits an
    /// equation) dismisses the panel.
    pub fn on_document_updated(
        &mut self,
        panel: &mut StackedPanel,
        command: &dyn EquationCommand,
        host: &mut dyn DocumentHost,
    ) {
        if self.document_sub.is_none() || !self.is_open(panel) {
            return;
        }
        if !command.is_enabled() {
            debug!("command disabled by document update, closing panel");
            self.close(panel, host);
        }
    }
}
