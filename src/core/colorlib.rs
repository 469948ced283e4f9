//! Hex color helpers and the brightness classifier.

use crate::error::PixelError;

/// Luma value below which a color is classified as dark.
const DARK_LUMA_CUTOFF: u32 = 120;

/// Color helpers for swatch formatting and legibility checks.
pub struct ColorLib;

impl ColorLib {
    /// Convert RGB to a `#rrggbb` hex string.
    pub fn rgb_to_hex(rgb: (u8, u8, u8)) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
    }

    /// Parse a hex color string into RGB channels.
    ///
    /// The leading `#` is optional and digits may be any case. Anything else
    /// is rejected rather than guessed at.
    pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), PixelError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PixelError::InvalidArgument(format!(
                "malformed hex color: {hex:?}"
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| {
                PixelError::InvalidArgument(format!("malformed hex color {hex:?}: {e}"))
            })
        };

        Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Broadcast luma approximation, 0-255.
    pub fn luma(hex: &str) -> Result<u32, PixelError> {
        let (r, g, b) = Self::hex_to_rgb(hex)?;
        Ok((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000)
    }

    /// Whether a color reads as dark (luma below 120).
    pub fn is_dark(hex: &str) -> Result<bool, PixelError> {
        Ok(Self::luma(hex)? < DARK_LUMA_CUTOFF)
    }

    /// Contrasting text color: white on dark swatches, black otherwise.
    pub fn text_color(hex: &str) -> Result<&'static str, PixelError> {
        Ok(if Self::is_dark(hex)? {
            "#ffffff"
        } else {
            "#000000"
        })
    }
}
