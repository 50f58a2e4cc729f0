use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Native key representation for the popup widget
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "C-{}", c),
            Key::Alt(c) => write!(f, "M-{}", c),
            Key::Esc => write!(f, "ESC"),
            Key::Enter => write!(f, "RET"),
            Key::Backspace => write!(f, "BS"),
            Key::Tab => write!(f, "TAB"),
            Key::Delete => write!(f, "DEL"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::Up => write!(f, "↑"),
            Key::Down => write!(f, "↓"),
            Key::Left => write!(f, "←"),
            Key::Right => write!(f, "→"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Handle Ctrl notation: ^M or C-m
        if s.starts_with('^') && s.len() == 2 {
            let c = s.chars().nth(1).unwrap();
            return Ok(Key::Ctrl(c.to_ascii_lowercase()));
        }

        if s.starts_with("C-") && s.len() > 2 {
            let c = s.chars().nth(2).unwrap();
            return Ok(Key::Ctrl(c.to_ascii_lowercase()));
        }

        // Handle Alt/Meta notation: M-x
        if s.starts_with("M-") && s.len() > 2 {
            let c = s.chars().nth(2).unwrap().to_ascii_lowercase();
            return Ok(Key::Alt(c));
        }

        // Handle special keys
        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RET" => Ok(Key::Enter),
            "TAB" => Ok(Key::Tab),
            "BACKSPACE" | "BS" => Ok(Key::Backspace),
            "ESC" => Ok(Key::Esc),
            "DELETE" | "DEL" => Ok(Key::Delete),
            "HOME" => Ok(Key::Home),
            "END" => Ok(Key::End),
            "UP" => Ok(Key::Up),
            "DOWN" => Ok(Key::Down),
            "LEFT" => Ok(Key::Left),
            "RIGHT" => Ok(Key::Right),
            _ => {
                // Handle single raw character, preserving case
                if s.chars().count() == 1 {
                    let c = s.chars().next().unwrap();
                    return Ok(Key::Char(c));
                }

                Err(format!("Unknown key: {}", s))
            }
        }
    }
}

/// Native input event representation for the popup widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl InputEvent {
    /// Plain key press with no modifiers
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
            ctrl: false,
        }
    }

    /// Ctrl-modified character press
    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Ctrl(c),
            shift: false,
            alt: false,
            ctrl: true,
        }
    }

    /// Shift-modified key press
    pub fn shifted(key: Key) -> Self {
        Self {
            key,
            shift: true,
            alt: false,
            ctrl: false,
        }
    }
}

/// Whether a handler consumed a key event.
///
/// `Handled` tells the caller to suppress the host's default action for
/// the key; `PassThrough` leaves the event to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum KeyOutcome {
    Handled,
    PassThrough,
}

/// Normalized key input for binding lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyInput {
    pub fn from_event(event: &InputEvent) -> Self {
        // Normalize character keys to lowercase so caps lock state does not
        // affect binding matching
        let normalized_key = match &event.key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            Key::Alt(c) => Key::Alt(c.to_ascii_lowercase()),
            Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
            other => other.clone(),
        };

        Self {
            key: normalized_key,
            shift: event.shift,
            ctrl: event.ctrl,
            alt: event.alt,
        }
    }

    /// Parse a binding string like "^M" or "S-Tab" into a KeyInput
    pub fn parse(s: &str) -> Option<Self> {
        let mut key_str = s;
        let mut shift = false;

        if let Some(rest) = s.strip_prefix("S-") {
            shift = true;
            key_str = rest;
        }

        Key::from_str(key_str).ok().map(|k| {
            let ctrl = matches!(k, Key::Ctrl(_));
            let alt = matches!(k, Key::Alt(_));
            Self {
                key: k,
                shift,
                ctrl,
                alt,
            }
        })
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "C-")?;
        }
        if self.alt {
            write!(f, "M-")?;
        }
        if self.shift {
            write!(f, "S-")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Key-binding registry scoped to one component's lifetime.
///
/// Bindings are registered when the owning component initializes and must
/// be unregistered on teardown. Lookups are single-chord: the popup never
/// owns multi-key sequences, those stay with the host.
#[derive(Default)]
pub struct Keymap {
    bindings: HashMap<KeyInput, String>,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a key notation string to a named action.
    ///
    /// Returns an error for unparseable notation; an existing binding for
    /// the same key is replaced.
    pub fn bind(&mut self, notation: &str, action: &str) -> Result<(), String> {
        let key = KeyInput::parse(notation).ok_or_else(|| format!("Unknown key: {}", notation))?;
        self.bindings.insert(key, action.to_string());
        Ok(())
    }

    /// Remove every binding that maps to the given action.
    /// Returns the number of bindings removed.
    pub fn unbind_action(&mut self, action: &str) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, a| a != action);
        before - self.bindings.len()
    }

    /// Look up the action bound to an input event
    pub fn lookup(&self, event: &InputEvent) -> Option<&str> {
        let key = KeyInput::from_event(event);
        self.bindings.get(&key).map(|s| s.as_str())
    }

    /// Number of live bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
