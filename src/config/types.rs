//! Configuration type definitions.

use super::enums::{ColorSpec, SessionCompression};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scoresheet geometry.
///
/// Coordinates are canvas units; the canvas is rendered 1:1 at scale 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SheetConfig {
    /// Canvas width (valid range: 400 - 4000)
    #[serde(default = "default_sheet_width")]
    pub width: f64,

    /// Canvas height (valid range: 400 - 6000)
    #[serde(default = "default_sheet_height")]
    pub height: f64,

    /// Inset applied when placing symbols by clicking
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// X where sequential placement starts on every line
    #[serde(default = "default_left_boundary")]
    pub left_boundary: f64,

    /// Sequential placement wraps when a symbol would cross this X
    #[serde(default = "default_right_boundary")]
    pub right_boundary: f64,

    /// Horizontal advance after each sequential placement (valid range: 10 - 200)
    #[serde(default = "default_increment")]
    pub increment: f64,

    /// Y positions of the insertion lines, top to bottom
    #[serde(default = "default_line_positions")]
    pub line_positions: Vec<f64>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            width: default_sheet_width(),
            height: default_sheet_height(),
            margin: default_margin(),
            left_boundary: default_left_boundary(),
            right_boundary: default_right_boundary(),
            increment: default_increment(),
            line_positions: default_line_positions(),
        }
    }
}

/// Freehand pen and line tool defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PenConfig {
    /// Stroke color - a named color or an RGB array like `[0, 0, 128]`
    #[serde(default = "default_pen_color")]
    pub color: ColorSpec,

    /// Stroke thickness (valid range: 1.0 - 20.0)
    #[serde(default = "default_pen_thickness")]
    pub thickness: f64,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            color: default_pen_color(),
            thickness: default_pen_thickness(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Eraser radius (valid range: 2.0 - 100.0)
    #[serde(default = "default_eraser_radius")]
    pub radius: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            radius: default_eraser_radius(),
        }
    }
}

/// Text element defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Font family for text elements and labels (e.g., "Sans", "Serif")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size for new text elements (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Font family used for notation glyphs; needs Unicode music symbol coverage
    #[serde(default = "default_notation_font")]
    pub notation_font: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            notation_font: default_notation_font(),
        }
    }
}

/// Distances used when picking an element to drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HitTestConfig {
    #[serde(default = "default_articulation_radius")]
    pub articulation_radius: f64,

    #[serde(default = "default_symbol_radius")]
    pub symbol_radius: f64,

    /// Maximum pointer distance from a line
    #[serde(default = "default_line_tolerance")]
    pub line_tolerance: f64,

    /// Font size of the tempo/key/time labels
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            articulation_radius: default_articulation_radius(),
            symbol_radius: default_symbol_radius(),
            line_tolerance: default_line_tolerance(),
            label_font_size: default_label_font_size(),
        }
    }
}

/// Sequential input sources enabled at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Place symbols from typed trigger characters
    #[serde(default)]
    pub keyboard_enabled: bool,

    /// Place symbols from MIDI note-on messages (requires host MIDI access)
    #[serde(default)]
    pub midi_enabled: bool,
}

/// PNG/PDF export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Page background color
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Draw light guide lines under each insertion line
    #[serde(default = "default_staff_guides")]
    pub staff_guides: bool,

    /// Output scale relative to canvas units (valid range: 0.25 - 4.0)
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Font size used for notation glyphs
    #[serde(default = "default_symbol_font_size")]
    pub symbol_font_size: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            staff_guides: default_staff_guides(),
            scale: default_scale(),
            symbol_font_size: default_symbol_font_size(),
        }
    }
}

/// Project file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    /// Compression mode: auto, on, off
    #[serde(default)]
    pub compress: SessionCompression,

    /// Size above which `auto` compresses (KiB)
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Largest project file that will be written or read (MiB)
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Keep the previous file as `<name>.bak` when saving
    #[serde(default = "default_keep_backup")]
    pub keep_backup: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            compress: SessionCompression::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
            keep_backup: default_keep_backup(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_sheet_width() -> f64 {
    1100.0
}

fn default_sheet_height() -> f64 {
    1400.0
}

fn default_margin() -> f64 {
    20.0
}

fn default_left_boundary() -> f64 {
    170.0
}

fn default_right_boundary() -> f64 {
    1000.0
}

fn default_increment() -> f64 {
    50.0
}

fn default_line_positions() -> Vec<f64> {
    (0..11).map(|i| 200.0 + 100.0 * i as f64).collect()
}

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_pen_thickness() -> f64 {
    2.0
}

fn default_eraser_radius() -> f64 {
    10.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_size() -> f64 {
    16.0
}

fn default_notation_font() -> String {
    "Noto Music".to_string()
}

fn default_articulation_radius() -> f64 {
    15.0
}

fn default_symbol_radius() -> f64 {
    24.0
}

fn default_line_tolerance() -> f64 {
    6.0
}

fn default_label_font_size() -> f64 {
    18.0
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_staff_guides() -> bool {
    true
}

fn default_scale() -> f64 {
    1.0
}

fn default_symbol_font_size() -> f64 {
    40.0
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_keep_backup() -> bool {
    true
}
