// Configuration module
// Construction-time configuration surface for the equation popup

use std::collections::HashMap;

/// Full configuration for the equation popup feature.
///
/// Supplied once when the plugin is constructed and fixed for the session.
/// Renderer-specific options are carried opaquely and handed to the
/// renderer untouched.
#[derive(Debug, Clone)]
pub struct MathConfig {
    /// Identifier of the math rendering engine (e.g. "katex", "mathjax")
    pub engine: String,
    /// Whether the rendering engine is loaded lazily by the host
    pub lazy_load: bool,
    /// Output markup format handed to the command on commit
    pub output_format: String,
    /// Whether the output format is forced regardless of engine defaults
    pub force_output_format: bool,
    /// Whether the form includes a rendered preview
    pub enable_preview: bool,
    /// Class hooks applied to the preview element by the host
    pub preview_class_hooks: Vec<String>,
    /// Class hooks applied to the popup element by the host
    pub popup_class_hooks: Vec<String>,
    /// Live structured-editing surface settings (None = disabled)
    pub live_editor: Option<LiveEditorConfig>,
    /// Opaque options passed through to the renderer
    pub renderer_options: HashMap<String, ConfigValue>,
}

/// Settings for the optional live-editing surface
#[derive(Debug, Clone, Default)]
pub struct LiveEditorConfig {
    /// Class hooks applied to the live-editor element by the host
    pub class_hooks: Vec<String>,
    /// Opaque options passed through to the live-editor widget
    pub options: HashMap<String, ConfigValue>,
}

/// Typed opaque value for pass-through options
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            engine: "katex".to_string(),
            lazy_load: false,
            output_format: "script".to_string(),
            force_output_format: false,
            enable_preview: true,
            preview_class_hooks: Vec::new(),
            popup_class_hooks: Vec::new(),
            live_editor: None,
            renderer_options: HashMap::new(),
        }
    }
}

impl MathConfig {
    /// Set an opaque renderer option
    pub fn set_renderer_option<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.renderer_options.insert(key.to_string(), value.into());
    }

    /// Get an opaque renderer option
    pub fn renderer_option(&self, key: &str) -> Option<&ConfigValue> {
        self.renderer_options.get(key)
    }

    /// True when the live-editing surface is configured on
    pub fn live_editing_enabled(&self) -> bool {
        self.live_editor.is_some()
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Str(s)
    }
}
