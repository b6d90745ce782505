//! Generic input event types forwarded by the host.

use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Hosts map their native key events to these values. Character keys keep
/// their case because notation triggers are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Regular character key (letters, digits, punctuation)
    Char(char),
    Backspace,
    /// Return/Enter key
    Return,
    Escape,
    Tab,
    /// Space bar
    Space,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Resolves a key name as used in config files and event scripts.
    ///
    /// Named keys are case-insensitive; any other single character becomes
    /// [`Key::Char`] with its case preserved.
    pub fn from_name(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(if c == ' ' { Key::Space } else { Key::Char(c) });
        }

        match name.to_ascii_lowercase().as_str() {
            "backspace" => Some(Key::Backspace),
            "return" | "enter" => Some(Key::Return),
            "escape" | "esc" => Some(Key::Escape),
            "tab" => Some(Key::Tab),
            "space" => Some(Key::Space),
            _ => None,
        }
    }
}

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Primary button (left mouse, touch, pen tip)
    #[default]
    Primary,
    /// Secondary button (right mouse); cancels the current interaction
    Secondary,
    /// Middle button (unused)
    Middle,
}

/// MIDI capability reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidiAccess {
    /// Not reported yet
    #[default]
    Unknown,
    Granted,
    /// The user or platform refused access
    Denied,
    /// The host has no MIDI support at all
    Unsupported,
}
