//! TOML-based chart configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock chart: seed 42, 8 in × 8 in at 64 dpi written to `chart.png`.
//!
//! ```toml
//! output = "chart.png"
//! seed = 42
//!
//! [model]
//! weekend_start = "Fri"
//!
//! [style]
//! palette = "yl-gn-bu"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ValidationError};
use crate::model::ScoreModel;
use crate::noise::DEFAULT_SEED;
use crate::palette::Palette;

/// Largest canvas side accepted, in pixels.
pub const MAX_CANVAS_PX: u32 = 8192;

/// Display metadata handed to the exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_x_label")]
    pub x_label: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    #[serde(default = "default_colorbar_label")]
    pub colorbar_label: String,
    #[serde(default)]
    pub palette: Palette,
    /// Canvas width in inches
    #[serde(default = "default_inches")]
    pub width_in: u32,
    /// Canvas height in inches
    #[serde(default = "default_inches")]
    pub height_in: u32,
    /// Pixels per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// White separator between cells, in pixels
    #[serde(default = "default_cell_border")]
    pub cell_border_px: u32,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub model: ScoreModel,
    #[serde(default)]
    pub style: ChartStyle,
}

// Default functions
fn default_title() -> String {
    "Customer Engagement Heatmap".into()
}
fn default_x_label() -> String {
    "Hour of Day".into()
}
fn default_y_label() -> String {
    "Day of Week".into()
}
fn default_colorbar_label() -> String {
    "Engagement Score".into()
}
fn default_inches() -> u32 {
    8
}
fn default_dpi() -> u32 {
    64
}
fn default_cell_border() -> u32 {
    1
}
fn default_output() -> PathBuf {
    PathBuf::from("chart.png")
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: default_title(),
            x_label: default_x_label(),
            y_label: default_y_label(),
            colorbar_label: default_colorbar_label(),
            palette: Palette::default(),
            width_in: default_inches(),
            height_in: default_inches(),
            dpi: default_dpi(),
            cell_border_px: default_cell_border(),
        }
    }
}

impl ChartStyle {
    /// Canvas size in pixels: inches × dpi on each axis.
    pub fn canvas_px(&self) -> (u32, u32) {
        (
            self.width_in.saturating_mul(self.dpi),
            self.height_in.saturating_mul(self.dpi),
        )
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if either canvas side is zero or larger
    /// than [`MAX_CANVAS_PX`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (w, h) = self.canvas_px();
        for (field, px) in [("style.width_in", w), ("style.height_in", h)] {
            if px == 0 {
                return Err(ValidationError::invalid(field, "canvas side is 0 pixels"));
            }
            if px > MAX_CANVAS_PX {
                return Err(ValidationError::invalid(
                    field,
                    format!("canvas side {px}px exceeds {MAX_CANVAS_PX}px"),
                ));
            }
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            seed: default_seed(),
            model: ScoreModel::default(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML text.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from `path` if given, otherwise return defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Write to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyExists`] when the file exists and
    /// `overwrite` is false, or [`ConfigError::SaveFailed`] on write errors.
    pub fn save_to(&self, path: &Path, overwrite: bool) -> Result<(), ConfigError> {
        if path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate the output path, the score model and the canvas.
    ///
    /// The bitmap backend picks its encoder from the file extension, so
    /// anything but `.png` is rejected here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output.as_os_str().is_empty() {
            return Err(ValidationError::invalid("output", "path is empty"));
        }
        let is_png = self
            .output
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(ValidationError::invalid(
                "output",
                format!("'{}' must have a .png extension", self.output.display()),
            ));
        }
        self.model.validate()?;
        self.style.validate()
    }
}
