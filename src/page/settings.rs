//! Per-page score metadata: tempo, key and time signature, and where their labels sit.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// One of the three draggable metadata labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    TimeSignature,
    KeySignature,
    Tempo,
}

impl LabelKind {
    pub const ALL: [LabelKind; 3] = [
        LabelKind::TimeSignature,
        LabelKind::KeySignature,
        LabelKind::Tempo,
    ];
}

/// Top-left anchors of the metadata labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPositions {
    pub time_signature: Point,
    pub key_signature: Point,
    pub tempo: Point,
}

impl Default for LabelPositions {
    fn default() -> Self {
        Self {
            time_signature: Point::new(110.0, 180.0),
            key_signature: Point::new(170.0, 120.0),
            tempo: Point::new(820.0, 120.0),
        }
    }
}

impl LabelPositions {
    pub fn get(&self, kind: LabelKind) -> Point {
        match kind {
            LabelKind::TimeSignature => self.time_signature,
            LabelKind::KeySignature => self.key_signature,
            LabelKind::Tempo => self.tempo,
        }
    }

    pub fn set(&mut self, kind: LabelKind, position: Point) {
        match kind {
            LabelKind::TimeSignature => self.time_signature = position,
            LabelKind::KeySignature => self.key_signature = position,
            LabelKind::Tempo => self.tempo = position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Beats per minute
    pub tempo: u32,
    pub key_signature: String,
    pub time_signature: String,
    pub labels: LabelPositions,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            tempo: 120,
            key_signature: "C major".to_string(),
            time_signature: "4/4".to_string(),
            labels: LabelPositions::default(),
        }
    }
}

impl PageSettings {
    /// Text shown for a label.
    pub fn label_text(&self, kind: LabelKind) -> String {
        match kind {
            LabelKind::TimeSignature => self.time_signature.clone(),
            LabelKind::KeySignature => self.key_signature.clone(),
            LabelKind::Tempo => format!("\u{2669} = {}", self.tempo),
        }
    }
}
