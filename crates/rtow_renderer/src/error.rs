//! Errors reported by the render entry points.

use rtow_math::MathError;
use thiserror::Error;

/// Errors that can occur while setting up or writing a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid camera configuration: {0}")]
    Configuration(String),

    #[error("Degenerate camera framing: {0}")]
    Domain(#[from] MathError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
