//! Equation Popup Plugin
//!
//! The integration point a host embeds: builds the long-lived form from
//! the configuration's capability flags, registers the scoped key
//! binding, exposes the toolbar affordance, and routes host events to the
//! controller. Init and teardown bracket the whole feature; open/close
//! cycles in between never rebuild any of it.

use log::debug;

use crate::config::MathConfig;
use crate::core::command::EquationCommand;
use crate::core::controller::{DocumentHost, PanelController};
use crate::core::controls::Button;
use crate::core::form::EquationFormBuilder;
use crate::core::input::{InputEvent, Keymap, KeyOutcome};
use crate::core::panel::StackedPanel;
use crate::core::render::{LiveEditorSurface, PreviewRenderer};

/// Action name bound to the open keystroke
pub const OPEN_ACTION: &str = "open-equation-panel";

/// Default open binding (Ctrl+M)
pub const OPEN_BINDING: &str = "^M";

/// The equation popup feature, wired once per editing session
pub struct MathPlugin {
    config: MathConfig,
    controller: PanelController,
    keymap: Keymap,
    toolbar_button: Button,
}

impl MathPlugin {
    /// Initialize the feature: build the form (capabilities resolved here,
    /// fixed afterwards), allocate its panel view, and register the open
    /// keystroke. The renderer and live-editor surface are used only when
    /// the matching config switch is on.
    pub fn init(
        config: MathConfig,
        panel: &mut StackedPanel,
        preview: Option<Box<dyn PreviewRenderer>>,
        live_editor: Option<Box<dyn LiveEditorSurface>>,
    ) -> Self {
        let mut builder = EquationFormBuilder::new();
        if config.enable_preview {
            if let Some(renderer) = preview {
                builder = builder.preview(renderer);
            }
        }
        if config.live_editing_enabled() {
            if let Some(surface) = live_editor {
                builder = builder.live_editor(surface);
            }
        }
        let form = builder.build();
        let view = panel.allocate_view();

        let mut keymap = Keymap::new();
        if let Err(e) = keymap.bind(OPEN_BINDING, OPEN_ACTION) {
            debug!("failed to register open binding: {}", e);
        }

        let mut toolbar_button = Button::with_icon("Insert equation", "math");
        toolbar_button.set_enabled(false);

        debug!(
            "equation plugin initialized (engine={}, preview={}, live_editor={})",
            config.engine,
            config.enable_preview,
            config.live_editing_enabled()
        );

        Self {
            controller: PanelController::new(form, view, &config),
            config,
            keymap,
            toolbar_button,
        }
    }

    pub fn config(&self) -> &MathConfig {
        &self.config
    }

    pub fn controller(&self) -> &PanelController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PanelController {
        &mut self.controller
    }

    /// Toolbar affordance state, a read-only mirror of the command
    pub fn toolbar_button(&self) -> &Button {
        &self.toolbar_button
    }

    /// Re-read the command's enabled state into the toolbar button.
    /// Hosts call this from their command-state change notifications.
    pub fn refresh_toolbar(&mut self, command: &dyn EquationCommand) {
        self.toolbar_button.set_enabled(command.is_enabled());
    }

    /// Toolbar activation: run the open transition
    pub fn toolbar_activated(
        &mut self,
        panel: &mut StackedPanel,
        command: &dyn EquationCommand,
        host: &mut dyn DocumentHost,
    ) -> bool {
        self.controller.open(panel, command, host)
    }

    /// Route a key event. While the panel is open the form gets first
    /// refusal; while closed, only the registered open binding fires.
    /// The open keystroke is always reported handled so the host default
    /// for the chord stays suppressed even when opening is refused.
    pub fn handle_key(
        &mut self,
        event: &InputEvent,
        panel: &mut StackedPanel,
        command: &mut dyn EquationCommand,
        host: &mut dyn DocumentHost,
    ) -> KeyOutcome {
        if self.controller.is_open(panel) {
            let outcome = self.controller.handle_key(event, panel, command, host);
            if outcome == KeyOutcome::PassThrough && self.keymap.lookup(event) == Some(OPEN_ACTION)
            {
                // Re-triggering open while already open stays a no-op
                return KeyOutcome::Handled;
            }
            return outcome;
        }
        match self.keymap.lookup(event) {
            Some(OPEN_ACTION) => {
                self.controller.open(panel, command, host);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::PassThrough,
        }
    }

    /// Route a click at host coordinates (click-outside dismissal)
    pub fn handle_click(
        &mut self,
        x: u16,
        y: u16,
        panel: &mut StackedPanel,
        host: &mut dyn DocumentHost,
    ) -> bool {
        self.controller.handle_click(x, y, panel, host)
    }

    /// Panel visibility notification from the host
    pub fn on_visibility_changed(&mut self, panel: &mut StackedPanel, host: &mut dyn DocumentHost) {
        self.controller.on_visibility_changed(panel, host);
    }

    /// Document-update notification from the host
    pub fn on_document_updated(
        &mut self,
        panel: &mut StackedPanel,
        command: &dyn EquationCommand,
        host: &mut dyn DocumentHost,
    ) {
        self.controller.on_document_updated(panel, command, host);
    }

    /// Tear the feature down: close the panel if open and unregister
    /// every key binding this plugin registered
    pub fn teardown(&mut self, panel: &mut StackedPanel, host: &mut dyn DocumentHost) {
        self.controller.close(panel, host);
        let removed = self.keymap.unbind_action(OPEN_ACTION);
        debug!("equation plugin torn down, {} binding(s) removed", removed);
    }
}
