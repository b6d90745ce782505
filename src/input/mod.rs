//! Input routing and the interaction state machine.
//!
//! This module turns host keyboard, pointer, and MIDI events into page
//! mutations. It tracks the active tool mode and which sequential input
//! sources are switched on, and decides for every event whether it places
//! a symbol, drives a drawing gesture, drags an element, or is ignored.

pub mod events;
pub mod signal;
pub mod state;
pub mod tool;

pub use events::{Key, MidiAccess, PointerButton};
pub use signal::{ToolSignal, ToolSubscription};
pub use state::{DragState, InputError, InputState, InteractionState};
pub use tool::{ToolMode, ToolSelection};
