//! Keybinding configuration types and parsing.
//!
//! Only the reserved editor actions are bindable. Every other key either
//! feeds the text-entry flow or is looked up as a notation trigger, so a
//! binding on a trigger character shadows that symbol.

use crate::input::events::Key;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Remove the most recently placed symbol
    UndoLast,
    /// Move the insertion cursor to the next line
    LineBreak,
    /// Abort the current interaction and leave any tool mode
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeybindingError {
    #[error("empty keybinding string")]
    Empty,
    #[error("unknown key '{0}'")]
    Unknown(String),
    #[error("duplicate keybinding '{binding}' assigned to both {first:?} and {second:?}")]
    Duplicate {
        binding: String,
        first: Action,
        second: Action,
    },
}

/// A single bound key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: Key,
}

impl KeyBinding {
    /// Parse a keybinding string like "Backspace", "Enter", or "z".
    ///
    /// Named keys are case-insensitive; single characters are matched
    /// exactly, so "z" and "Z" are different bindings.
    pub fn parse(s: &str) -> Result<Self, KeybindingError> {
        if s.is_empty() {
            return Err(KeybindingError::Empty);
        }
        let trimmed = s.trim();
        let name = if trimmed.is_empty() { s } else { trimmed };

        match Key::from_name(name) {
            Some(Key::Unknown) | None => Err(KeybindingError::Unknown(s.to_string())),
            Some(key) => Ok(Self { key }),
        }
    }
}

/// Configuration for the reserved keys.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// undo_last = ["Backspace"]
/// line_break = ["Return"]
/// cancel = ["Escape"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo_last")]
    pub undo_last: Vec<String>,

    #[serde(default = "default_line_break")]
    pub line_break: Vec<String>,

    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo_last: default_undo_last(),
            line_break: default_line_break(),
            cancel: default_cancel(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keys to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, KeybindingError> {
        let mut map = HashMap::new();

        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), KeybindingError> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(first) = map.insert(binding, action) {
                return Err(KeybindingError::Duplicate {
                    binding: binding_str.to_string(),
                    first,
                    second: action,
                });
            }
            Ok(())
        };

        let groups = [
            (&self.undo_last, Action::UndoLast),
            (&self.line_break, Action::LineBreak),
            (&self.cancel, Action::Cancel),
        ];
        for (bindings, action) in groups {
            for binding_str in bindings {
                insert_binding(binding_str, action)?;
            }
        }

        Ok(map)
    }
}

fn default_undo_last() -> Vec<String> {
    vec!["Backspace".to_string()]
}

fn default_line_break() -> Vec<String> {
    vec!["Return".to_string()]
}

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(KeyBinding::parse("Enter").unwrap().key, Key::Return);
        assert_eq!(KeyBinding::parse("esc").unwrap().key, Key::Escape);
        assert_eq!(KeyBinding::parse(" Tab ").unwrap().key, Key::Tab);
        assert_eq!(KeyBinding::parse(" ").unwrap().key, Key::Space);
    }

    #[test]
    fn test_parse_characters_are_case_sensitive() {
        assert_eq!(KeyBinding::parse("z").unwrap().key, Key::Char('z'));
        assert_ne!(KeyBinding::parse("z").unwrap(), KeyBinding::parse("Z").unwrap());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(KeyBinding::parse(""), Err(KeybindingError::Empty));
        assert!(matches!(
            KeyBinding::parse("Ctrl+Z"),
            Err(KeybindingError::Unknown(_))
        ));
    }

    #[test]
    fn test_build_action_map() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(
            map.get(&KeyBinding { key: Key::Backspace }),
            Some(&Action::UndoLast)
        );
        assert_eq!(
            map.get(&KeyBinding { key: Key::Return }),
            Some(&Action::LineBreak)
        );
        assert_eq!(
            map.get(&KeyBinding { key: Key::Escape }),
            Some(&Action::Cancel)
        );
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let config = KeybindingsConfig {
            line_break: vec!["Enter".to_string()],
            cancel: vec!["Return".to_string()],
            ..KeybindingsConfig::default()
        };

        let err = config.build_action_map().unwrap_err();
        assert_eq!(
            err,
            KeybindingError::Duplicate {
                binding: "Return".to_string(),
                first: Action::LineBreak,
                second: Action::Cancel,
            }
        );
        assert!(err.to_string().starts_with("duplicate keybinding"));
    }
}
