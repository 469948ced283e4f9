//! Pipeline orchestration: pixelate at every block size, extract palettes.

use rayon::prelude::*;
use tracing::debug;

use crate::core::buffer::PixelBuffer;
use crate::core::codec;
use crate::core::palette::{extract_palette, ExtractOptions};
use crate::core::pixelate::pixelate;
use crate::error::PixelError;
use crate::models::{MosaicResult, Palette, PipelineOutput};

/// Run the full pipeline over a decoded buffer.
///
/// Block sizes are independent of each other, so they are processed on the
/// rayon pool; the output order always matches the input list. The first
/// failing block size aborts the run.
pub fn run(
    buffer: &PixelBuffer,
    block_sizes: &[u32],
    options: &ExtractOptions,
) -> Result<PipelineOutput, PixelError> {
    let original_palette = palette_or_empty(extract_palette(buffer, options))?;

    let results = block_sizes
        .par_iter()
        .map(|&size| build_mosaic(buffer, size, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PipelineOutput {
        original_palette,
        results,
    })
}

/// Pixelate at one block size, extract its palette, and encode it.
fn build_mosaic(
    buffer: &PixelBuffer,
    size: u32,
    options: &ExtractOptions,
) -> Result<MosaicResult, PixelError> {
    let pixelated = pixelate(buffer, size).map_err(|e| pipeline_err(size, e))?;
    let palette =
        palette_or_empty(extract_palette(&pixelated, options)).map_err(|e| pipeline_err(size, e))?;
    let image = codec::encode_png(&pixelated).map_err(|e| pipeline_err(size, e))?;

    debug!("block size {size}: {} swatches", palette.len());

    Ok(MosaicResult {
        block_size: size,
        image,
        palette,
    })
}

/// Treat the degenerate no-colors case as an empty palette.
fn palette_or_empty(result: Result<Palette, PixelError>) -> Result<Palette, PixelError> {
    match result {
        Err(PixelError::NoColorsFound) => Ok(Vec::new()),
        other => other,
    }
}

fn pipeline_err(block_size: u32, source: PixelError) -> PixelError {
    PixelError::Pipeline {
        block_size,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::Rgba;

    #[test]
    fn test_results_follow_block_size_order() {
        let buffer = PixelBuffer::filled(12, 12, Rgba::new(40, 80, 120, 255)).unwrap();
        let output = run(&buffer, &[2, 3, 4], &ExtractOptions::default()).unwrap();

        let sizes: Vec<u32> = output.results.iter().map(|r| r.block_size).collect();
        assert_eq!(sizes, vec![2, 3, 4]);
    }

    #[test]
    fn test_solid_red_end_to_end() {
        let buffer = PixelBuffer::filled(16, 16, Rgba::new(255, 0, 0, 255)).unwrap();
        let output = run(&buffer, &[2, 4], &ExtractOptions::default()).unwrap();

        assert_eq!(output.original_palette.len(), 1);
        assert_eq!(output.original_palette[0].hex, "#ff0000");

        for result in &output.results {
            assert_eq!(result.palette.len(), 1);
            assert_eq!(result.palette[0].hex, "#ff0000");

            // Pixelating a uniform image changes nothing.
            let rendition = codec::decode(&result.image, u64::MAX).unwrap();
            assert_eq!(rendition, buffer);
        }
    }

    #[test]
    fn test_invalid_block_size_fails_fast_with_context() {
        let buffer = PixelBuffer::filled(8, 8, Rgba::new(1, 2, 3, 255)).unwrap();
        let err = run(&buffer, &[2, 0, 4], &ExtractOptions::default()).unwrap_err();

        match err {
            PixelError::Pipeline { block_size, source } => {
                assert_eq!(block_size, 0);
                assert!(matches!(*source, PixelError::InvalidArgument(_)));
            }
            other => panic!("expected pipeline error, got {other:?}"),
        }
    }

    #[test]
    fn test_transparent_image_yields_empty_palettes() {
        let buffer = PixelBuffer::filled(8, 8, Rgba::new(9, 9, 9, 0)).unwrap();
        let output = run(&buffer, &[2], &ExtractOptions::default()).unwrap();

        assert!(output.original_palette.is_empty());
        assert!(output.results[0].palette.is_empty());
    }
}
