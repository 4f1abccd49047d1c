//! Errors reported before a render starts.

use thiserror::Error;

/// Camera configurations that cannot produce an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("image width must be at least 1 pixel")]
    ZeroImageWidth,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("image of {width}x{height} pixels exceeds the size limit")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("viewport height must be positive and finite, got {0}")]
    InvalidViewportHeight(f32),

    #[error("focal length must be positive and finite, got {0}")]
    InvalidFocalLength(f32),

    #[error("max depth {depth} exceeds the bounce limit of {limit}")]
    DepthTooLarge { depth: u32, limit: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
