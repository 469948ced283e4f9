//! Dominant color extraction.
//!
//! Colors are clustered greedily in HSL space: a sampled pixel joins the
//! first cluster whose anchor color sits within the combined perceptual
//! distance, otherwise it starts a new cluster. Clusters are ranked by pixel
//! count and emitted as centroid swatches.

use palette::{Hsl, IntoColor, Srgb};

use crate::config::PALETTE_CAP;
use crate::core::buffer::PixelBuffer;
use crate::core::colorlib::ColorLib;
use crate::error::PixelError;
use crate::models::{Palette, Swatch};

/// Tuning for palette extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    /// Cap on pixels fed to clustering; larger buffers are strided.
    pub max_sample_pixels: usize,
    /// Combined distance below which two colors merge into one swatch.
    pub distance_threshold: f32,
    /// Hue axis weight.
    pub hue_distance: f32,
    /// Saturation axis weight.
    pub saturation_distance: f32,
    /// Lightness axis weight.
    pub lightness_distance: f32,
    /// Pixels with alpha below this are ignored as non-representative.
    pub alpha_minimum: u8,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_sample_pixels: 64_000,
            distance_threshold: 0.1,
            hue_distance: 0.0833,
            saturation_distance: 0.2,
            lightness_distance: 0.2,
            alpha_minimum: 250,
        }
    }
}

/// One color cluster being accumulated.
///
/// The anchor is the first color that opened the cluster and is what later
/// pixels are measured against, which keeps clustering independent of the
/// running mean.
struct Cluster {
    anchor: Hsl,
    sum_r: u64,
    sum_g: u64,
    sum_b: u64,
    count: u64,
}

/// Extract a weight-ranked palette of visually distinct colors.
///
/// Deterministic: the same buffer and options always produce the same
/// swatches in the same order. Fails with `NoColorsFound` when the alpha
/// filter leaves nothing to cluster.
pub fn extract_palette(
    buffer: &PixelBuffer,
    options: &ExtractOptions,
) -> Result<Palette, PixelError> {
    if options.max_sample_pixels == 0 {
        return Err(PixelError::InvalidArgument(
            "maxSamplePixels must be positive".into(),
        ));
    }

    let valid: Vec<_> = buffer
        .pixels()
        .filter(|p| p.a >= options.alpha_minimum)
        .collect();

    if valid.is_empty() {
        return Err(PixelError::NoColorsFound);
    }

    // Uniform stride bounds the clustering cost without cropping any region.
    let stride = valid.len().div_ceil(options.max_sample_pixels);

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut sampled: u64 = 0;

    for pixel in valid.iter().step_by(stride) {
        let hsl = to_hsl(pixel.r, pixel.g, pixel.b);
        sampled += 1;

        let found = clusters
            .iter_mut()
            .find(|c| distance(&c.anchor, &hsl, options) < options.distance_threshold);

        match found {
            Some(cluster) => {
                cluster.sum_r += pixel.r as u64;
                cluster.sum_g += pixel.g as u64;
                cluster.sum_b += pixel.b as u64;
                cluster.count += 1;
            }
            None => clusters.push(Cluster {
                anchor: hsl,
                sum_r: pixel.r as u64,
                sum_g: pixel.g as u64,
                sum_b: pixel.b as u64,
                count: 1,
            }),
        }
    }

    // Stable sort: clusters of equal weight keep first-seen order.
    clusters.sort_by(|a, b| b.count.cmp(&a.count));
    clusters.truncate(PALETTE_CAP);

    Ok(clusters
        .into_iter()
        .map(|c| {
            let round = |sum: u64| ((sum + c.count / 2) / c.count) as u8;
            Swatch {
                hex: ColorLib::rgb_to_hex((round(c.sum_r), round(c.sum_g), round(c.sum_b))),
                weight: c.count as f32 / sampled as f32,
            }
        })
        .collect())
}

fn to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0).into_color()
}

/// Combined perceptual distance: weighted mean of the normalized
/// hue/saturation/lightness deltas, with the axis weights normalized to
/// sum 1.
fn distance(a: &Hsl, b: &Hsl, options: &ExtractOptions) -> f32 {
    let dh = {
        let raw = (a.hue.into_positive_degrees() - b.hue.into_positive_degrees()).abs();
        raw.min(360.0 - raw) / 180.0
    };
    let ds = (a.saturation - b.saturation).abs();
    let dl = (a.lightness - b.lightness).abs();

    let total = options.hue_distance + options.saturation_distance + options.lightness_distance;

    (dh * options.hue_distance + ds * options.saturation_distance + dl * options.lightness_distance)
        / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::Rgba;

    #[test]
    fn test_solid_color_yields_single_swatch() {
        let buffer = PixelBuffer::filled(16, 16, Rgba::new(255, 0, 0, 255)).unwrap();
        let palette = extract_palette(&buffer, &ExtractOptions::default()).unwrap();

        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].hex, "#ff0000");
        assert!((palette[0].weight - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fully_transparent_buffer_has_no_colors() {
        let buffer = PixelBuffer::filled(8, 8, Rgba::new(255, 0, 0, 0)).unwrap();
        assert!(matches!(
            extract_palette(&buffer, &ExtractOptions::default()),
            Err(PixelError::NoColorsFound)
        ));
    }

    #[test]
    fn test_translucent_pixels_are_filtered() {
        // Alpha 128 sits below the default minimum of 250.
        let buffer = PixelBuffer::filled(8, 8, Rgba::new(255, 0, 0, 128)).unwrap();
        assert!(matches!(
            extract_palette(&buffer, &ExtractOptions::default()),
            Err(PixelError::NoColorsFound)
        ));
    }

    #[test]
    fn test_distinct_colors_ranked_by_weight() {
        let mut data = vec![Rgba::new(0, 0, 255, 255); 48];
        data.extend(vec![Rgba::new(255, 0, 0, 255); 16]);
        let buffer = PixelBuffer::new(8, 8, data).unwrap();

        let palette = extract_palette(&buffer, &ExtractOptions::default()).unwrap();

        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0].hex, "#0000ff");
        assert_eq!(palette[1].hex, "#ff0000");
        assert!(palette[0].weight > palette[1].weight);
    }

    #[test]
    fn test_near_identical_grays_merge() {
        let mut data = vec![Rgba::new(120, 120, 120, 255); 32];
        data.extend(vec![Rgba::new(124, 124, 124, 255); 32]);
        let buffer = PixelBuffer::new(8, 8, data).unwrap();

        let palette = extract_palette(&buffer, &ExtractOptions::default()).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].hex, "#7a7a7a");
    }

    #[test]
    fn test_black_and_white_stay_distinct() {
        let mut data = vec![Rgba::new(0, 0, 0, 255); 32];
        data.extend(vec![Rgba::new(255, 255, 255, 255); 32]);
        let buffer = PixelBuffer::new(8, 8, data).unwrap();

        let palette = extract_palette(&buffer, &ExtractOptions::default()).unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let data = (0..64)
            .map(|i| Rgba::new((i * 4) as u8, 128, (255 - i * 3) as u8, 255))
            .collect::<Vec<_>>();
        let buffer = PixelBuffer::new(8, 8, data).unwrap();
        let options = ExtractOptions::default();

        let first = extract_palette(&buffer, &options).unwrap();
        let second = extract_palette(&buffer, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_subsampling_keeps_dominant_color() {
        let buffer = PixelBuffer::filled(64, 64, Rgba::new(10, 200, 30, 255)).unwrap();
        let options = ExtractOptions {
            max_sample_pixels: 100,
            ..ExtractOptions::default()
        };

        let palette = extract_palette(&buffer, &options).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].hex, "#0ac81e");
    }

    #[test]
    fn test_palette_is_capped() {
        // 16 strongly separated hues at full saturation.
        let mut data = Vec::new();
        for i in 0..16u32 {
            let hsl = Hsl::new(i as f32 * 22.5, 1.0, 0.5);
            let rgb: Srgb = hsl.into_color();
            let pixel = Rgba::new(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
                255,
            );
            data.extend(vec![pixel; 4]);
        }
        let buffer = PixelBuffer::new(8, 8, data).unwrap();

        let palette = extract_palette(&buffer, &ExtractOptions::default()).unwrap();
        assert!(palette.len() <= PALETTE_CAP);
    }
}
