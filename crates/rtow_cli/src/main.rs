use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rtow_renderer::{render, render_ppm, save_png, Camera};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

mod cli;
mod scenes;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Scene {:?}, seed {}", args.scene, seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let scene = args.scene.build(&mut rng);
    let mut camera = scene.camera;
    if let Some(path) = &args.camera {
        camera = load_camera(camera, path)?;
    }
    apply_overrides(&mut camera, &args);

    let mut progress = io::stderr().lock();

    match args.output.as_str() {
        "-" => {
            let mut out = BufWriter::new(io::stdout().lock());
            render_ppm(&mut camera, &scene.world, &mut out, &mut progress, &mut rng)?;
        }
        path if has_extension(path, "ppm") => {
            let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
            let mut out = BufWriter::new(file);
            render_ppm(&mut camera, &scene.world, &mut out, &mut progress, &mut rng)?;
            log::info!("Image saved as {path}");
        }
        path if has_extension(path, "png") => {
            let image = render(&mut camera, &scene.world, &mut progress, &mut rng)?;
            save_png(&image, Path::new(path))?;
        }
        path => bail!("Unsupported output {path:?}: expected '-', a .ppm or a .png path"),
    }

    Ok(())
}

fn has_extension(path: &str, ext: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Overlay the fields present in a JSON file onto `base`.
fn load_camera(base: Camera, path: &Path) -> Result<Camera> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read camera file {}", path.display()))?;
    overlay_camera(base, &text)
        .with_context(|| format!("Invalid camera file {}", path.display()))
}

fn overlay_camera(base: Camera, json: &str) -> Result<Camera> {
    let overrides: Value = serde_json::from_str(json)?;
    let Value::Object(overrides) = overrides else {
        bail!("expected a JSON object");
    };

    let mut merged = serde_json::to_value(&base)?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            if !fields.contains_key(&key) {
                bail!("unknown camera field {key:?}");
            }
            fields.insert(key, value);
        }
    }
    Ok(serde_json::from_value(merged)?)
}

fn apply_overrides(camera: &mut Camera, args: &Args) {
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(aspect_ratio) = args.aspect_ratio {
        camera.aspect_ratio = aspect_ratio;
    }
    if let Some(samples) = args.samples {
        camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        camera.max_depth = max_depth;
    }
}
