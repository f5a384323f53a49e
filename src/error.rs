use thiserror::Error;

/// A rejected render configuration. Raised before any iteration starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas size must be positive")]
    CanvasSize,
    #[error("side length must be positive, got {0}")]
    SideLength(f64),
    #[error("cutoff must be greater than 1, got {0}")]
    Cutoff(f64),
    #[error("maximum iteration count must be positive")]
    MaxIterations,
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("failed to allocate {bytes} bytes for the pixel buffer")]
    Allocation { bytes: usize },
    #[error("pixel ({x}, {y}) is outside the {size}x{size} canvas")]
    OutOfBounds { x: u32, y: u32, size: u32 },
    #[error("buffer is {buffer}x{buffer} but the viewport canvas is {canvas}x{canvas}")]
    BufferSize { buffer: u32, canvas: u32 },
    #[error("failed to export image: {0}")]
    Export(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
