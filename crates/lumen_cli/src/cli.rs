use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::scene_file::CameraSettings;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render a scene of spheres with a recursive ray tracer")]
pub struct Args {
    /// JSON scene description (uses the built-in scene when omitted)
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output image; the format follows the extension (.png, .ppm, ...)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image width divided by image height
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    /// Number of samples per pixel
    #[arg(short = 's', long)]
    pub samples: Option<u32>,

    /// Maximum number of bounces per sample
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the random number generator (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of worker threads (defaults to one per core)
    #[arg(long, conflicts_with = "single_threaded")]
    pub threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long)]
    pub single_threaded: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Camera settings given on the command line; unset flags stay `None`.
    pub fn camera_overrides(&self) -> CameraSettings {
        CameraSettings {
            aspect_ratio: self.aspect_ratio,
            image_width: self.width,
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            ..CameraSettings::default()
        }
    }
}
