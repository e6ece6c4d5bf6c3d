//! Image buffer and file output.
//!
//! Two encodings share the same gamma and quantization rules from
//! [`crate::color`]: plain-text PPM (`P3`) and PNG through the `image` crate.

use crate::color::{to_rgb8, write_color};
use crate::error::RenderResult;
use rtow_math::Color;
use std::io::Write;
use std::path::Path;

/// Row-major buffer of linear colors, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Gamma-corrected 8-bit RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| to_rgb8(*c)).collect()
    }
}

/// Write a plain-text PPM: `P3`, dimensions, 255, then one `r g b` line per pixel.
pub fn write_ppm(image: &ImageBuffer, out: &mut dyn Write) -> RenderResult<()> {
    writeln!(out, "P3\n{} {}\n255", image.width, image.height)?;
    for color in &image.pixels {
        write_color(out, *color)?;
    }
    out.flush()?;
    Ok(())
}

/// Save as an 8-bit PNG.
pub fn save_png(image: &ImageBuffer, path: &Path) -> RenderResult<()> {
    let rgb = image::RgbImage::from_fn(image.width, image.height, |x, y| {
        image::Rgb(to_rgb8(image.get(x, y)))
    });
    rgb.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("Image saved as {}", path.display());
    Ok(())
}
