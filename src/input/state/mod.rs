mod canvas;
mod core;
mod drag;
mod editing;
mod keyboard;
mod midi;
mod pointer;
mod render;
#[cfg(test)]
mod tests;

pub use core::{InputError, InputState, InteractionState};
pub use drag::DragState;
