//! Seeded biome assignment for hexagonal tile maps.
//!
//! A jittered lattice of region seed points partitions the plane; every hex
//! tile takes the label of its nearest region, boundaries are roughened by
//! noise, and a synchronous majority vote smooths out stray tiles. The block
//! of tiles around the map center is held fixed through the randomized
//! passes so the start area is predictable.

pub mod adjacency;
pub mod base_lock;
pub mod biome;
pub mod biome_generator;
pub mod config;
pub mod distortion;
pub mod error;
pub mod hex_grid;
pub mod map_renderer;
pub mod region_field;
pub mod region_labeler;
pub mod relaxation;

pub use biome::Biome;
pub use biome_generator::{BiomeGenerator, BiomeMap, TileRecord};
pub use config::{DistortionMode, GenerationSettings};
pub use error::{BiomeError, Result};
