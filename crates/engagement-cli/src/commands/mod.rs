pub mod config;
pub mod render;
pub mod table;

use std::path::Path;

use engagement_core::ChartConfig;

/// Load the config file if one was given, otherwise defaults.
pub fn load_config(path: Option<&Path>) -> Result<ChartConfig, Box<dyn std::error::Error>> {
    let config = ChartConfig::load_or_default(path)?;
    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "loaded config file");
    }
    Ok(config)
}
