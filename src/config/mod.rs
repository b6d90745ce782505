//! Configuration file support for scorescribe.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/scorescribe/config.toml`. Settings include sheet geometry,
//! tool defaults, hit-test distances, export appearance, and project file handling.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::{ColorSpec, SessionCompression};
pub use keybindings::{Action, KeyBinding, KeybindingError, KeybindingsConfig};
pub use types::{
    EraserConfig, ExportConfig, HitTestConfig, InputConfig, PenConfig, SessionConfig,
    SheetConfig, TextConfig,
};

use crate::notation::NotationRegistry;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [sheet]
/// left_boundary = 170.0
/// right_boundary = 1000.0
/// increment = 50.0
///
/// [pen]
/// color = "black"
/// thickness = 2.0
///
/// [input]
/// keyboard_enabled = true
///
/// [keybindings]
/// undo_last = ["Backspace"]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Sheet geometry and insertion lines
    #[serde(default)]
    pub sheet: SheetConfig,

    /// Pen and line tool defaults
    #[serde(default)]
    pub pen: PenConfig,

    #[serde(default)]
    pub eraser: EraserConfig,

    /// Text element defaults and fonts
    #[serde(default)]
    pub text: TextConfig,

    /// Drag pick distances
    #[serde(default)]
    pub hit_test: HitTestConfig,

    /// Sequential input sources enabled at startup
    #[serde(default)]
    pub input: InputConfig,

    /// PNG/PDF export appearance
    #[serde(default)]
    pub export: ExportConfig,

    /// Project file compression and limits
    #[serde(default)]
    pub session: SessionConfig,

    /// Reserved key bindings
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `sheet.width`: 400 - 4000, `sheet.height`: 400 - 6000
    /// - `sheet.increment`: 10 - 200
    /// - `sheet.left_boundary` < `sheet.right_boundary`, both inside the sheet and
    ///   at least the widest symbol apart
    /// - `sheet.line_positions`: non-empty, sorted, inside the sheet
    /// - `pen.thickness`: 1.0 - 20.0
    /// - `eraser.radius`: 2.0 - 100.0
    /// - `text.font_size`: 8.0 - 72.0
    /// - `export.scale`: 0.25 - 4.0
    pub fn validate_and_clamp(&mut self) {
        let sheet = &mut self.sheet;

        clamp_field("sheet.width", &mut sheet.width, 400.0, 4000.0);
        clamp_field("sheet.height", &mut sheet.height, 400.0, 6000.0);
        clamp_field("sheet.margin", &mut sheet.margin, 0.0, sheet.width / 4.0);
        clamp_field("sheet.increment", &mut sheet.increment, 10.0, 200.0);
        clamp_field(
            "sheet.left_boundary",
            &mut sheet.left_boundary,
            0.0,
            sheet.width,
        );
        clamp_field(
            "sheet.right_boundary",
            &mut sheet.right_boundary,
            0.0,
            sheet.width,
        );

        if sheet.left_boundary >= sheet.right_boundary {
            let defaults = SheetConfig::default();
            warn!(
                "sheet.left_boundary {:.1} is not left of right_boundary {:.1}, using defaults",
                sheet.left_boundary, sheet.right_boundary
            );
            sheet.left_boundary = defaults.left_boundary.min(sheet.width);
            sheet.right_boundary = defaults.right_boundary.min(sheet.width);
        }

        let widest = NotationRegistry::builtin().max_width();
        if sheet.right_boundary - sheet.left_boundary < widest {
            warn!(
                "sheet boundaries {:.1}-{:.1} are narrower than the widest symbol ({:.1}), widening",
                sheet.left_boundary, sheet.right_boundary, widest
            );
            sheet.right_boundary = (sheet.left_boundary + widest).min(sheet.width);
            sheet.left_boundary = sheet.left_boundary.min(sheet.right_boundary - widest);
        }

        let height = sheet.height;
        let before = sheet.line_positions.len();
        sheet
            .line_positions
            .retain(|y| y.is_finite() && (0.0..=height).contains(y));
        if sheet.line_positions.len() != before {
            warn!(
                "Dropped {} sheet.line_positions outside 0-{:.0}",
                before - sheet.line_positions.len(),
                height
            );
        }
        if sheet.line_positions.is_empty() {
            warn!("sheet.line_positions is empty, using defaults");
            sheet.line_positions = SheetConfig::default().line_positions;
        }
        if !sheet.line_positions.is_sorted() {
            warn!("sheet.line_positions is not sorted top to bottom, sorting");
            sheet.line_positions.sort_by(f64::total_cmp);
        }

        clamp_field("pen.thickness", &mut self.pen.thickness, 1.0, 20.0);
        clamp_field("eraser.radius", &mut self.eraser.radius, 2.0, 100.0);
        clamp_field("text.font_size", &mut self.text.font_size, 8.0, 72.0);

        let hit = &mut self.hit_test;
        clamp_field(
            "hit_test.articulation_radius",
            &mut hit.articulation_radius,
            1.0,
            100.0,
        );
        clamp_field("hit_test.symbol_radius", &mut hit.symbol_radius, 1.0, 100.0);
        clamp_field("hit_test.line_tolerance", &mut hit.line_tolerance, 1.0, 50.0);
        clamp_field(
            "hit_test.label_font_size",
            &mut hit.label_font_size,
            8.0,
            72.0,
        );

        clamp_field("export.scale", &mut self.export.scale, 0.25, 4.0);
        clamp_field(
            "export.symbol_font_size",
            &mut self.export.symbol_font_size,
            8.0,
            144.0,
        );

        if self.session.max_file_size_mb == 0 {
            warn!("session.max_file_size_mb must be positive, using 1");
            self.session.max_file_size_mb = 1;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/scorescribe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("scorescribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `config_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists there or it cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64) {
    if !value.is_finite() {
        warn!("Invalid {name} {value}, using {min:.1}");
        *value = min;
    } else if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.1}, clamping to {min:.1}-{max:.1} range");
        *value = value.clamp(min, max);
    }
}
