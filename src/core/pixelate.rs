//! Block-average pixelation.

use crate::core::buffer::{PixelBuffer, Rgba};
use crate::error::PixelError;

/// Replace every non-overlapping `size x size` block with its mean color.
///
/// Remainder blocks at the right and bottom edges average only the pixels
/// they actually contain. Alpha is averaged like the color channels, so
/// translucent regions stay translucent. Output dimensions equal input
/// dimensions; a block size of 1 is the identity transform.
pub fn pixelate(buffer: &PixelBuffer, size: u32) -> Result<PixelBuffer, PixelError> {
    if size < 1 {
        return Err(PixelError::InvalidArgument(format!(
            "block size must be >= 1, got {size}"
        )));
    }

    if size == 1 {
        return Ok(buffer.clone());
    }

    let (width, height) = (buffer.width(), buffer.height());
    let mut out = buffer.clone();

    for block_y in (0..height).step_by(size as usize) {
        for block_x in (0..width).step_by(size as usize) {
            let block_w = size.min(width - block_x);
            let block_h = size.min(height - block_y);
            let mean = block_mean(buffer, block_x, block_y, block_w, block_h);

            for y in block_y..block_y + block_h {
                for x in block_x..block_x + block_w {
                    out.set(x, y, mean);
                }
            }
        }
    }

    Ok(out)
}

/// Per-channel rounded arithmetic mean of one block.
fn block_mean(buffer: &PixelBuffer, x0: u32, y0: u32, w: u32, h: u32) -> Rgba {
    let mut sum_r: u64 = 0;
    let mut sum_g: u64 = 0;
    let mut sum_b: u64 = 0;
    let mut sum_a: u64 = 0;

    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let p = buffer.get(x, y);
            sum_r += p.r as u64;
            sum_g += p.g as u64;
            sum_b += p.b as u64;
            sum_a += p.a as u64;
        }
    }

    let count = w as u64 * h as u64;
    let round = |sum: u64| ((sum + count / 2) / count) as u8;

    Rgba::new(round(sum_r), round(sum_g), round(sum_b), round(sum_a))
}
