use std::path::{Path, PathBuf};

use clap::Args;
use engagement_core::{pipeline, Palette};

#[derive(Args, Default)]
pub struct RenderArgs {
    /// Output PNG path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Noise seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Color palette (yl-gn-bu, blues, viridis)
    #[arg(long)]
    pub palette: Option<Palette>,
}

pub fn run(config_path: Option<&Path>, args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;

    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(palette) = args.palette {
        config.style.palette = palette;
    }

    let report = pipeline::run(&config)?;
    println!("{}", report.summary);
    Ok(())
}
