//! Palette swatch models

use serde::{Deserialize, Serialize};

/// One representative color with the fraction of sampled pixels it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    /// Color as `#rrggbb`.
    pub hex: String,
    /// Fraction of sampled pixels in this swatch's cluster, 0-1.
    pub weight: f32,
}

/// Swatches ordered by descending weight.
pub type Palette = Vec<Swatch>;
