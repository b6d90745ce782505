//! Replayable input scripts.
//!
//! A script is a JSON array of host events (key presses, pointer gestures,
//! MIDI bytes, tool-picker selections, host flags) fed to an
//! [`InputState`] in order. The CLI uses it to drive the router headlessly.

use crate::input::events::{Key, MidiAccess, PointerButton};
use crate::input::signal::ToolSignal;
use crate::input::state::InputState;
use crate::input::tool::ToolSelection;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// A single key, by name (`"c"`, `"Backspace"`, `"Return"`)
    Key { key: String },
    /// Each character of `text` as a key press
    Type { text: String },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerLeave,
    /// Raw MIDI message bytes
    Midi { bytes: Vec<u8> },
    /// Published on the tool signal; applied before the next event
    Tool { selection: ToolSelection },
    KeyboardInput { enabled: bool },
    MidiAccess { access: MidiAccess },
    MidiInput { enabled: bool },
    Modal { open: bool },
    TextFocus { focused: bool },
    NewPage,
    SwitchPage { index: usize },
    Tempo { bpm: u32 },
    KeySignature { value: String },
    TimeSignature { value: String },
    UndoStroke,
    ClearInk,
    ClearPage,
}

/// Reads a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse script {}", path.display()))
}

/// Feeds `events` to `state` in order.
///
/// Tool selections go through `signal`, so they take effect when the router
/// handles its next event, exactly as with a live tool picker.
pub fn run(state: &mut InputState, signal: &ToolSignal, events: &[ScriptEvent]) {
    for (index, event) in events.iter().enumerate() {
        log::debug!("Script event {}: {:?}", index + 1, event);
        apply(state, signal, event);
    }
    state.sync_tool_signal();
}

fn apply(state: &mut InputState, signal: &ToolSignal, event: &ScriptEvent) {
    match event {
        ScriptEvent::Key { key } => {
            let key = Key::from_name(key).unwrap_or_else(|| {
                log::warn!("Unknown key name '{key}' in script");
                Key::Unknown
            });
            state.on_key_press(key);
        }
        ScriptEvent::Type { text } => {
            for c in text.chars() {
                state.on_key_press(if c == ' ' { Key::Space } else { Key::Char(c) });
            }
        }
        ScriptEvent::PointerDown { x, y, button } => state.on_pointer_down(*button, *x, *y),
        ScriptEvent::PointerMove { x, y } => state.on_pointer_move(*x, *y),
        ScriptEvent::PointerUp { x, y, button } => state.on_pointer_up(*button, *x, *y),
        ScriptEvent::PointerLeave => state.on_pointer_leave(),
        ScriptEvent::Midi { bytes } => state.on_midi_message(bytes),
        ScriptEvent::Tool { selection } => signal.publish(*selection),
        ScriptEvent::KeyboardInput { enabled } => state.set_keyboard_input(*enabled),
        ScriptEvent::MidiAccess { access } => state.set_midi_access(*access),
        ScriptEvent::MidiInput { enabled } => {
            // The router already reported the failure
            let _ = state.set_midi_input(*enabled);
        }
        ScriptEvent::Modal { open } => state.set_modal_open(*open),
        ScriptEvent::TextFocus { focused } => state.set_text_focus(*focused),
        ScriptEvent::NewPage => {
            state.add_page();
        }
        ScriptEvent::SwitchPage { index } => {
            state.switch_page(*index);
        }
        ScriptEvent::Tempo { bpm } => state.set_tempo(*bpm),
        ScriptEvent::KeySignature { value } => state.set_key_signature(value.clone()),
        ScriptEvent::TimeSignature { value } => state.set_time_signature(value.clone()),
        ScriptEvent::UndoStroke => state.undo_stroke(),
        ScriptEvent::ClearInk => state.clear_ink(),
        ScriptEvent::ClearPage => state.clear_page(),
    }
}
