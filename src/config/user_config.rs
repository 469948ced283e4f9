//! User configuration for pixelsmith
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{bail, Context, Result};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{Paths, DEFAULT_BLOCK_SIZES, MIN_BLOCK_SIZE};
use crate::core::palette::ExtractOptions;

static USER_CONFIG: OnceCell<Arc<RwLock<UserConfig>>> = OnceCell::new();

/// User configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Block sizes to render, in display order
    #[serde(default = "default_block_sizes")]
    pub block_sizes: Vec<u32>,

    /// Cap on pixels considered during palette extraction
    #[serde(default = "default_max_sample_pixels")]
    pub max_sample_pixels: usize,

    /// Combined perceptual distance below which two colors merge
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f32,

    /// Hue weight in the perceptual distance
    #[serde(default = "default_hue_distance")]
    pub hue_distance: f32,

    /// Saturation weight in the perceptual distance
    #[serde(default = "default_saturation_distance")]
    pub saturation_distance: f32,

    /// Lightness weight in the perceptual distance
    #[serde(default = "default_lightness_distance")]
    pub lightness_distance: f32,

    /// Minimum alpha for a pixel to count toward the palette
    #[serde(default = "default_alpha_minimum")]
    pub alpha_minimum: u8,

    /// Uploads above this pixel count are downscaled before processing
    #[serde(default = "default_max_image_pixels")]
    pub max_image_pixels: u64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            block_sizes: default_block_sizes(),
            max_sample_pixels: default_max_sample_pixels(),
            distance_threshold: default_distance_threshold(),
            hue_distance: default_hue_distance(),
            saturation_distance: default_saturation_distance(),
            lightness_distance: default_lightness_distance(),
            alpha_minimum: default_alpha_minimum(),
            max_image_pixels: default_max_image_pixels(),
        }
    }
}

impl UserConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&settings_path, content).context("Failed to write settings file")?;

        Ok(())
    }

    /// Get the global config instance
    pub fn global() -> Arc<RwLock<UserConfig>> {
        USER_CONFIG
            .get_or_init(|| {
                let config = UserConfig::load().unwrap_or_default();
                Arc::new(RwLock::new(config))
            })
            .clone()
    }

    /// Check configured values that serde defaults cannot guarantee
    pub fn validate(&self) -> Result<()> {
        if self.block_sizes.is_empty() {
            bail!("blockSizes must not be empty");
        }
        if let Some(bad) = self.block_sizes.iter().find(|&&s| s < MIN_BLOCK_SIZE) {
            bail!("block size {bad} is below the minimum of {MIN_BLOCK_SIZE}");
        }
        if self.max_sample_pixels == 0 {
            bail!("maxSamplePixels must be positive");
        }
        if self.max_image_pixels == 0 {
            bail!("maxImagePixels must be positive");
        }
        Ok(())
    }

    /// Extraction tuning derived from the settings
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_sample_pixels: self.max_sample_pixels,
            distance_threshold: self.distance_threshold,
            hue_distance: self.hue_distance,
            saturation_distance: self.saturation_distance,
            lightness_distance: self.lightness_distance,
            alpha_minimum: self.alpha_minimum,
        }
    }
}

// Default value functions for serde

fn default_block_sizes() -> Vec<u32> {
    DEFAULT_BLOCK_SIZES.to_vec()
}

fn default_max_sample_pixels() -> usize {
    64_000
}

fn default_distance_threshold() -> f32 {
    0.1
}

fn default_hue_distance() -> f32 {
    0.0833
}

fn default_saturation_distance() -> f32 {
    0.2
}

fn default_lightness_distance() -> f32 {
    0.2
}

// ~98% opacity; anything more transparent is unrepresentative
fn default_alpha_minimum() -> u8 {
    250
}

fn default_max_image_pixels() -> u64 {
    16_000_000
}
