//! Serializers for converting pipeline output to API responses.
//!
//! The swatch text color lives here rather than in the pipeline: it is a
//! derived display property, recomputed at serialization time.

use serde::Serialize;

use crate::core::codec;
use crate::core::colorlib::ColorLib;
use crate::error::PixelError;
use crate::models::{MosaicResult, Palette, PipelineOutput, Swatch};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwatchResponse {
    pub hex: String,
    pub weight: f32,
    /// Black or white, whichever is legible on the swatch.
    pub text_color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicResponse {
    pub block_size: u32,
    /// Inline `data:image/png;base64` rendition.
    pub image: String,
    pub palette: Vec<SwatchResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub original_palette: Vec<SwatchResponse>,
    pub results: Vec<MosaicResponse>,
}

/// Build the `/upload` response payload.
pub fn serialize_output(output: &PipelineOutput) -> Result<UploadResponse, PixelError> {
    Ok(UploadResponse {
        original_palette: serialize_palette(&output.original_palette)?,
        results: output
            .results
            .iter()
            .map(serialize_mosaic)
            .collect::<Result<_, _>>()?,
    })
}

fn serialize_mosaic(result: &MosaicResult) -> Result<MosaicResponse, PixelError> {
    Ok(MosaicResponse {
        block_size: result.block_size,
        image: codec::to_data_uri(&result.image),
        palette: serialize_palette(&result.palette)?,
    })
}

fn serialize_palette(palette: &Palette) -> Result<Vec<SwatchResponse>, PixelError> {
    palette.iter().map(serialize_swatch).collect()
}

fn serialize_swatch(swatch: &Swatch) -> Result<SwatchResponse, PixelError> {
    Ok(SwatchResponse {
        hex: swatch.hex.clone(),
        weight: swatch.weight,
        text_color: ColorLib::text_color(&swatch.hex)?.to_string(),
    })
}
