//! External command capability for the equation popup
//!
//! The host document engine owns the actual equation attribute and the
//! edit that writes it. The popup only reads the command's reactive state
//! (`enabled`, `value`, `display`) and invokes `execute` on commit; it
//! never validates or retries the edit itself.

/// Capability trait for the host's equation command.
///
/// The popup treats this as the single admission check and the single
/// mutation path:
///
/// - Opening is refused (silently) while `is_enabled()` is false
/// - The form is re-seeded from `value()`/`display()` on every open
/// - Submit calls `execute` exactly once, as one atomic edit
pub trait EquationCommand {
    /// Whether the command can currently run (selection permits an equation)
    fn is_enabled(&self) -> bool;

    /// Committed equation text at the current selection, if any
    fn value(&self) -> Option<String>;

    /// Committed display mode at the current selection, if any
    fn display(&self) -> Option<bool>;

    /// Perform the document mutation
    fn execute(
        &mut self,
        equation: &str,
        display_mode: bool,
        output_format: &str,
        force_output_format: bool,
    );
}
