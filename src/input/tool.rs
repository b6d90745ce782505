//! Tool modes and tool-picker selections.

use crate::page::ArticulationKind;
use serde::{Deserialize, Serialize};

/// Exclusive interaction mode. Any mode other than `None` suppresses
/// keyboard and MIDI symbol placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// No tool: clicks place the selected notation, sources may place symbols
    #[default]
    None,
    /// Freehand pen on the ink overlay
    Pen,
    /// Eraser on the ink overlay (also removes articulations it touches)
    Eraser,
    /// Straight line elements
    Line,
    /// Next click opens the text-entry flow
    TextPending,
    /// Next click places this articulation
    ArticulationPending(ArticulationKind),
}

impl ToolMode {
    pub fn is_active(self) -> bool {
        self != ToolMode::None
    }

    /// Pen, eraser, and line route pointer input to the drawing subsystem.
    pub fn routes_to_canvas(self) -> bool {
        matches!(self, ToolMode::Pen | ToolMode::Eraser | ToolMode::Line)
    }
}

/// A selection published by the tool picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolSelection {
    /// Deselect everything
    None,
    Pen,
    Eraser,
    Line,
    Text,
    Articulation { kind: ArticulationKind },
    /// Select a notation symbol for click placement
    Notation { trigger: char },
}

impl ToolSelection {
    /// Tool mode this selection switches to. Notation selections leave tool
    /// mode off so clicks place symbols.
    pub fn mode(self) -> ToolMode {
        match self {
            ToolSelection::None | ToolSelection::Notation { .. } => ToolMode::None,
            ToolSelection::Pen => ToolMode::Pen,
            ToolSelection::Eraser => ToolMode::Eraser,
            ToolSelection::Line => ToolMode::Line,
            ToolSelection::Text => ToolMode::TextPending,
            ToolSelection::Articulation { kind } => ToolMode::ArticulationPending(kind),
        }
    }
}
