//! Pipeline output models

use crate::models::Palette;

/// One pixelated rendition with its palette.
#[derive(Debug, Clone)]
pub struct MosaicResult {
    /// Edge length of the averaging block.
    pub block_size: u32,
    /// PNG-encoded rendition.
    pub image: Vec<u8>,
    /// Dominant colors of the rendition.
    pub palette: Palette,
}

/// Full pipeline output: the original image's palette plus one result per
/// block size, in configured list order.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub original_palette: Palette,
    pub results: Vec<MosaicResult>,
}
