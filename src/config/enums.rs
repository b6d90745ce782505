//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "black"
///
/// # Custom RGB color (0-255 per component)
/// color = [32, 64, 160]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black, gray
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a [`Color`].
    ///
    /// Unknown names fall back to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using fallback", name);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::rgb(
                *r as f64 / 255.0,
                *g as f64 / 255.0,
                *b as f64 / 255.0,
            ),
        }
    }

    /// Converts the specification to a [`Color`], falling back to black.
    pub fn to_color(&self) -> Color {
        self.to_color_or(BLACK)
    }
}

/// Whether project files are gzip-compressed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionCompression {
    /// Compress once the JSON exceeds the configured threshold
    #[default]
    Auto,
    On,
    Off,
}
