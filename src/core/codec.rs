//! Decode/encode seam between raw image bytes and the pixel buffer model.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, RgbaImage};

use crate::core::buffer::{PixelBuffer, Rgba};
use crate::error::PixelError;

/// Decode image bytes into an RGBA pixel buffer.
///
/// Images with more than `max_pixels` samples are downscaled (aspect
/// preserved) before conversion, so the pipeline never sees an unbounded
/// buffer. Unknown container formats fail with `UnsupportedFormat`.
pub fn decode(bytes: &[u8], max_pixels: u64) -> Result<PixelBuffer, PixelError> {
    let img = image::load_from_memory(bytes)?;
    let img = bound_size(img, max_pixels);

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let data = rgba
        .pixels()
        .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
        .collect();

    PixelBuffer::new(width, height, data)
}

/// Downscale images above the pixel bound.
fn bound_size(img: DynamicImage, max_pixels: u64) -> DynamicImage {
    let total = img.width() as u64 * img.height() as u64;
    if total <= max_pixels {
        return img;
    }

    let scale = (max_pixels as f64 / total as f64).sqrt();
    let width = ((img.width() as f64 * scale) as u32).max(1);
    let height = ((img.height() as f64 * scale) as u32).max(1);

    img.resize(width, height, image::imageops::FilterType::Triangle)
}

/// Encode a pixel buffer as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, PixelError> {
    let mut raw = Vec::with_capacity(buffer.pixel_count() * 4);
    for p in buffer.pixels() {
        raw.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }

    let img = RgbaImage::from_raw(buffer.width(), buffer.height(), raw).ok_or_else(|| {
        PixelError::Decode("pixel buffer does not match its dimensions".to_string())
    })?;

    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;

    Ok(out)
}

/// Wrap encoded PNG bytes as an inline data URI.
pub fn to_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip() {
        let data = vec![
            Rgba::new(255, 0, 0, 255),
            Rgba::new(0, 255, 0, 255),
            Rgba::new(0, 0, 255, 255),
            Rgba::new(12, 34, 56, 78),
        ];
        let buffer = PixelBuffer::new(2, 2, data).unwrap();

        let png = encode_png(&buffer).unwrap();
        let decoded = decode(&png, u64::MAX).unwrap();

        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_undecodable_bytes_are_rejected() {
        let result = decode(b"definitely not an image", u64::MAX);
        assert!(matches!(
            result,
            Err(PixelError::UnsupportedFormat(_)) | Err(PixelError::Decode(_))
        ));
    }

    #[test]
    fn test_oversized_images_are_downscaled() {
        let buffer = PixelBuffer::filled(100, 100, Rgba::new(50, 60, 70, 255)).unwrap();
        let png = encode_png(&buffer).unwrap();

        let decoded = decode(&png, 2_500).unwrap();
        assert!(decoded.pixel_count() <= 2_500);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn test_data_uri_prefix() {
        let uri = to_data_uri(&[1, 2, 3]);
        assert!(uri.starts_with("data:image/png;base64,"));
    }
}
