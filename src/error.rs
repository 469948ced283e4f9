//! Typed errors for the pixelation and palette pipeline.

use thiserror::Error;

/// Unified error type for the image pipeline.
///
/// `NoColorsFound` is a recoverable degenerate case: callers that can render
/// an empty palette should do so instead of aborting.
#[derive(Debug, Error)]
pub enum PixelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("no colors found: every pixel was filtered out")]
    NoColorsFound,

    #[error("block size {block_size} failed: {source}")]
    Pipeline {
        block_size: u32,
        #[source]
        source: Box<PixelError>,
    },
}

impl From<image::ImageError> for PixelError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => PixelError::UnsupportedFormat(e.to_string()),
            other => PixelError::Decode(other.to_string()),
        }
    }
}
