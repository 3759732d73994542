mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use log::info;
use lumen_core::load_description;
use lumen_renderer::{ImageBuffer, Scene};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    info!("Starting Lumen {}", env!("CARGO_PKG_VERSION"));

    let mut description = load_description(&args.file)
        .with_context(|| format!("Failed to load scene {}", args.file.display()))?;
    if let Some(multiplier) = args.aa_multiplier {
        description.options.aa_multiplier = multiplier;
    }

    let scene = Scene::from_description(&description)
        .with_context(|| format!("Failed to build scene {}", args.file.display()))?;

    let mut image = ImageBuffer::new(args.width, args.height);
    scene.render(&mut image);

    output::save_image(&image, &args.output)?;

    Ok(())
}
