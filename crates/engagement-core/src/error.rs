//! Core error types for engagement-core.
//!
//! Table generation itself is infallible; these errors cover configuration,
//! table reshaping and the PNG export step.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for engagement-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Rendering/export errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Refusing to overwrite an existing file
    #[error("Configuration file already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// A day/hour cell has no record
    #[error("Missing score for {day} {hour:02}:00")]
    MissingCell { day: chrono::Weekday, hour: u8 },

    /// A day/hour cell has more than one record
    #[error("Duplicate score for {day} {hour:02}:00")]
    DuplicateCell { day: chrono::Weekday, hour: u8 },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Rendering/export errors.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Parent directory of the output path does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),

    /// Drawing backend failure (encoding, file write)
    #[error("Drawing backend failed: {0}")]
    Backend(String),

    /// Label font could not be loaded
    #[error("Font unavailable: {0}")]
    Font(String),

    /// Written image does not have the requested size
    #[error(
        "Output image is {}x{}, expected {}x{}",
        .actual.0, .actual.1, .expected.0, .expected.1
    )]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Failed to read back the written image
    #[error("Failed to inspect output image: {0}")]
    Image(String),
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
