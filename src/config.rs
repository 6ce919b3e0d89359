use crate::biome::Biome;
use crate::error::{BiomeError, Result};
use crate::hex_grid::odd_dimension;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistortionMode {
    Perlin,
    // Independent uniform draw per tile from the shared generator.
    Uniform,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub biome_width: usize,       // regions along x
    pub biome_height: usize,      // regions along z
    pub region_cell_size: f32,    // world units per region cell
    pub jitter_factor: f32,       // 0.0 to 0.5 of a cell
    pub tile_width: usize,        // forced odd
    pub tile_height: usize,       // forced odd
    pub tile_spacing: f32,
    pub distortion_mode: DistortionMode,
    pub noise_frequency: f64,
    pub noise_strength: f64,
    pub max_penetration: f32,
    pub smoothing_iterations: usize,
    pub smoothing_threshold: usize, // neighbor count a label must exceed
    pub base_block_size: usize,
    pub primary_biomes: Vec<Biome>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        GenerationSettings {
            biome_width: 6,
            biome_height: 6,
            region_cell_size: 4.0,
            jitter_factor: 0.35,
            tile_width: 11,
            tile_height: 11,
            tile_spacing: 1.0,
            distortion_mode: DistortionMode::Perlin,
            noise_frequency: 0.35,
            noise_strength: 1.0,
            max_penetration: 1.5,
            smoothing_iterations: 3,
            smoothing_threshold: 3,
            base_block_size: 3,
            primary_biomes: Biome::DEFAULT_PRIMARY.to_vec(),
        }
    }
}

impl GenerationSettings {
    pub fn validate(mut self) -> Result<Self> {
        if self.biome_width < 2 || self.biome_height < 2 {
            return Err(BiomeError::RegionFieldTooSmall {
                width: self.biome_width,
                height: self.biome_height,
            });
        }
        if self.region_cell_size <= 0.0 || !self.region_cell_size.is_finite() {
            return Err(BiomeError::InvalidConfig(format!(
                "region_cell_size must be positive, got {}",
                self.region_cell_size
            )));
        }
        if self.tile_spacing <= 0.0 || !self.tile_spacing.is_finite() {
            return Err(BiomeError::InvalidConfig(format!(
                "tile_spacing must be positive, got {}",
                self.tile_spacing
            )));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(BiomeError::InvalidConfig(format!(
                "tile grid must be non-empty, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if self.base_block_size == 0 {
            return Err(BiomeError::InvalidConfig(
                "base_block_size must be at least 1".to_string(),
            ));
        }
        if self.jitter_factor.is_nan() {
            return Err(BiomeError::InvalidConfig(
                "jitter_factor must be a number".to_string(),
            ));
        }

        let mut primary: Vec<Biome> = Vec::new();
        for biome in &self.primary_biomes {
            if biome.is_labeled() && !primary.contains(biome) {
                primary.push(*biome);
            }
        }
        if primary.len() < 4 {
            return Err(BiomeError::NotEnoughPrimaryBiomes {
                found: primary.len(),
            });
        }
        // The center block has exactly four regions.
        primary.truncate(4);
        self.primary_biomes = primary;

        let width = odd_dimension(self.tile_width);
        if width != self.tile_width {
            log::warn!("tile_width {} is even, using {}", self.tile_width, width);
            self.tile_width = width;
        }
        let height = odd_dimension(self.tile_height);
        if height != self.tile_height {
            log::warn!("tile_height {} is even, using {}", self.tile_height, height);
            self.tile_height = height;
        }

        let clamped = self.jitter_factor.clamp(0.0, 0.5);
        if clamped != self.jitter_factor {
            log::warn!("jitter_factor {} outside [0, 0.5], clamped to {}", self.jitter_factor, clamped);
            self.jitter_factor = clamped;
        }

        Ok(self)
    }
}

pub fn load_settings_from_path(path: &Path) -> Result<GenerationSettings> {
    let s = std::fs::read_to_string(path)?;
    let settings: GenerationSettings = toml::from_str(&s)?;
    Ok(settings)
}
