use std::path::{Path, PathBuf};

use clap::Subcommand;
use engagement_core::ChartConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration to a file
    Init {
        /// Destination path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Check a configuration without rendering
    Validate,
}

pub fn run(
    config_path: Option<&Path>,
    action: ConfigAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = super::load_config(config_path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { path, force } => {
            ChartConfig::default().save_to(&path, force)?;
            println!("wrote default config to {}", path.display());
        }
        ConfigAction::Validate => {
            let config = super::load_config(config_path)?;
            config.validate()?;
            println!("ok");
        }
    }
    Ok(())
}
