use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::scenes::ScenePreset;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
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
#[command(name = "rtow")]
#[command(about = "Render a sphere scene with a CPU path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "cover")]
    pub scene: ScenePreset,

    /// JSON file overriding any camera field of the scene preset
    #[arg(long, value_name = "FILE")]
    pub camera: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image width over height
    #[arg(long)]
    pub aspect_ratio: Option<f64>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the random generator; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path: `-` for PPM on stdout, or a `.ppm` / `.png` file
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
