use crate::adjacency::AdjacencyGraph;
use crate::base_lock::{BaseBlock, RngCheckpoint};
use crate::biome::Biome;
use crate::config::GenerationSettings;
use crate::distortion::BoundaryDistortion;
use crate::error::Result;
use crate::hex_grid::{HexGrid, Tile, TileCoord};
use crate::region_field::{Point, RegionField, RegionIndex};
use crate::region_labeler::{assign_labels, RegionLabels};
use crate::relaxation::relax;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub coord: TileCoord,
    pub position: Point,
    pub biome: Biome,
    pub region: RegionIndex,
    pub neighbors: Vec<TileCoord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    pub tiles_distorted: usize,
    pub relaxation_changes: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeMap {
    pub seed: u64,
    pub settings: GenerationSettings,
    pub field: RegionField,
    pub region_labels: RegionLabels,
    pub grid: HexGrid,
    pub adjacency: AdjacencyGraph,
    pub stats: GenerationStats,
}

impl BiomeMap {
    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.grid.tile(x, y)
    }

    pub fn center_tile(&self) -> &Tile {
        let c = self.grid.center_coord();
        &self.grid.tiles()[c.y * self.grid.width + c.x]
    }

    pub fn label_grid(&self) -> Vec<Vec<Biome>> {
        self.grid.label_grid()
    }

    pub fn biome_histogram(&self) -> Vec<(Biome, usize)> {
        let mut counts = [0usize; Biome::ALL.len()];
        for tile in self.grid.tiles() {
            counts[tile.biome.ordinal()] += 1;
        }
        Biome::ALL.iter().map(|b| (*b, counts[b.ordinal()])).collect()
    }

    pub fn tile_records(&self) -> Vec<TileRecord> {
        self.grid
            .tiles()
            .iter()
            .enumerate()
            .map(|(i, tile)| TileRecord {
                coord: tile.coord,
                position: tile.position,
                biome: tile.biome,
                region: tile.region,
                neighbors: self.adjacency.neighbor_coords(i),
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tile_records())?)
    }
}

// Perlin takes a 32-bit seed; fold the high half in so it still matters.
fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

pub struct BiomeGenerator {
    seed: u64,
    settings: GenerationSettings,
}

impl BiomeGenerator {
    pub fn new(seed: u64) -> Result<Self> {
        Self::new_with_settings(seed, GenerationSettings::default())
    }

    pub fn new_with_settings(seed: u64, settings: GenerationSettings) -> Result<Self> {
        Ok(BiomeGenerator {
            seed,
            settings: settings.validate()?,
        })
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GenerationSettings) -> Result<()> {
        self.settings = settings.validate()?;
        Ok(())
    }

    // Distortion may draw from `rng`; the stream is rewound afterwards so
    // later stages see the same numbers in every mode.
    fn distort(&self, grid: &mut HexGrid, field: &RegionField, labels: &RegionLabels, rng: &mut ChaCha8Rng) -> usize {
        let checkpoint = RngCheckpoint::capture(rng);
        let distortion = BoundaryDistortion::from_settings(&self.settings, noise_seed(self.seed));
        let flipped = distortion.apply(grid, field, labels, rng);
        checkpoint.restore(rng);
        flipped
    }

    /// Runs the whole pipeline from a freshly seeded generator, so repeated
    /// calls return identical maps.
    pub fn generate(&self) -> Result<BiomeMap> {
        let s = &self.settings;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let field = RegionField::generate(
            s.biome_width,
            s.biome_height,
            s.region_cell_size,
            s.jitter_factor,
            &mut rng,
        )?;
        let region_labels = assign_labels(&field, &s.primary_biomes, &mut rng)?;
        log::info!(
            "region field {}x{} labeled (seed {})",
            field.width,
            field.height,
            self.seed
        );

        let mut grid = HexGrid::build(s.tile_width, s.tile_height, s.tile_spacing, &field, &region_labels);
        let adjacency = AdjacencyGraph::build(&grid);

        let base = BaseBlock::snapshot(&grid, s.base_block_size);

        let tiles_distorted = self.distort(&mut grid, &field, &region_labels, &mut rng);

        let relaxation_changes = relax(&mut grid, &adjacency, s.smoothing_threshold, s.smoothing_iterations)?;

        base.restore(&mut grid);

        Ok(BiomeMap {
            seed: self.seed,
            settings: s.clone(),
            field,
            region_labels,
            grid,
            adjacency,
            stats: GenerationStats {
                tiles_distorted,
                relaxation_changes,
            },
        })
    }
}
