use std::path::Path;

use clap::{Args, ValueEnum};
use engagement_core::pipeline;

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormat {
    /// Days, hours and a 7x24 score matrix
    Json,
    /// Text heatmap
    Ascii,
    /// One JSON object per cell, row-major
    Records,
}

#[derive(Args)]
pub struct TableArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = TableFormat::Json)]
    pub format: TableFormat,
    /// Noise seed
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(config_path: Option<&Path>, args: TableArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let table = pipeline::build_table(&config)?;

    match args.format {
        TableFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        TableFormat::Ascii => {
            print!("{}", table.render_ascii());
        }
        TableFormat::Records => {
            println!("{}", serde_json::to_string_pretty(&table.to_records())?);
        }
    }
    Ok(())
}
