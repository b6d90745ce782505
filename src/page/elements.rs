//! Elements placed on a page.

use crate::draw::Color;
use crate::util::Point;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page-unique element identifier, allocated in creation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A notation symbol placed on the sheet. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSymbol {
    pub id: ElementId,
    /// Trigger character resolving to the symbol in the registry
    pub trigger: char,
    pub x: f64,
    pub y: f64,
    /// Line the symbol was placed on (auxiliary)
    #[serde(default)]
    pub stave: usize,
    /// Octave of the MIDI note that placed it, if any (auxiliary)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub octave: Option<i8>,
}

impl PlacedSymbol {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Free text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub id: ElementId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl TextElement {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Style flags that can be toggled on a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
}

/// Articulation marks offered by the tool picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArticulationKind {
    Staccato,
    Accent,
    Tenuto,
    Marcato,
    Fermata,
    Trill,
    Mordent,
    Turn,
}

impl ArticulationKind {
    pub const ALL: [ArticulationKind; 8] = [
        ArticulationKind::Staccato,
        ArticulationKind::Accent,
        ArticulationKind::Tenuto,
        ArticulationKind::Marcato,
        ArticulationKind::Fermata,
        ArticulationKind::Trill,
        ArticulationKind::Mordent,
        ArticulationKind::Turn,
    ];

    /// Display symbol drawn at the articulation centre.
    pub fn symbol(self) -> &'static str {
        match self {
            ArticulationKind::Staccato => "\u{2022}",
            ArticulationKind::Accent => ">",
            ArticulationKind::Tenuto => "\u{2212}",
            ArticulationKind::Marcato => "^",
            ArticulationKind::Fermata => "\u{1D110}",
            ArticulationKind::Trill => "tr",
            ArticulationKind::Mordent => "\u{2307}",
            ArticulationKind::Turn => "\u{223D}",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArticulationKind::Staccato => "staccato",
            ArticulationKind::Accent => "accent",
            ArticulationKind::Tenuto => "tenuto",
            ArticulationKind::Marcato => "marcato",
            ArticulationKind::Fermata => "fermata",
            ArticulationKind::Trill => "trill",
            ArticulationKind::Mordent => "mordent",
            ArticulationKind::Turn => "turn",
        }
    }
}

/// An articulation mark. `(x, y)` is its centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticulationElement {
    pub id: ElementId,
    pub kind: ArticulationKind,
    pub symbol: String,
    pub x: f64,
    pub y: f64,
}

impl ArticulationElement {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A straight line drawn with the line tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    pub id: ElementId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Color,
    pub thickness: f64,
}

impl LineElement {
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Moves both endpoints so the start lands on `to`.
    pub fn translate_start_to(&mut self, to: Point) {
        let dx = to.x - self.x1;
        let dy = to.y - self.y1;
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }
}
