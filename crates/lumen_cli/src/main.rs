mod cli;
mod logger;
mod scene_file;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{Camera, ImageBuffer};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Args;
use scene_file::SceneDescription;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the render thread pool")?;
    }

    let description = match &args.scene {
        Some(path) => {
            log::info!("Loading scene {}", path.display());
            SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?
        }
        None => {
            log::info!("No scene given, using the built-in scene");
            SceneDescription::builtin()
        }
    };
    let world = description.build().context("Invalid scene")?;

    let settings = description.camera.clone().merged_with(args.camera_overrides());
    let mut camera = settings.apply(Camera::new());

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    let image = if args.single_threaded {
        camera.render(&world, &mut StdRng::seed_from_u64(seed))?
    } else {
        camera.render_parallel(&world, seed)?
    };

    save_image(&image, &args.output)?;
    log::info!("Saved {}", args.output.display());
    Ok(())
}

fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba())
        .context("Pixel buffer does not match the image size")?;
    image::DynamicImage::ImageRgba8(rgba)
        .to_rgb8()
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}
