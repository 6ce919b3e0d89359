use thiserror::Error;

#[derive(Debug, Error)]
pub enum BiomeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("need at least 4 distinct primary biomes, found {found}")]
    NotEnoughPrimaryBiomes { found: usize },
    #[error("region field must be at least 2x2, got {width}x{height}")]
    RegionFieldTooSmall { width: usize, height: usize },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BiomeError>;
