//! This module constitutes the core, headless, and backend-agnostic engine of the
//! equation popup. It manages the authoring form, the shared panel stack, focus
//! routing, delimiter normalization, and the lifecycle controller that binds user
//! intent (keystroke, toolbar, click-outside) to open/close/commit transitions.

pub mod command;
pub mod controller;
pub mod controls;
pub mod delimiters;
pub mod focus;
pub mod form;
pub mod input;
pub mod panel;
pub mod plugin;
pub mod render;
