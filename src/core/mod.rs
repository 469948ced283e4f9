//! Core library functions for pixelsmith

pub mod buffer;
pub mod codec;
pub mod colorlib;
pub mod palette;
pub mod pipeline;
pub mod pixelate;

pub use buffer::{PixelBuffer, Rgba};
pub use colorlib::ColorLib;
