use crate::biome::Biome;
use crate::hex_grid::{HexGrid, TileCoord};
use crate::region_field::RegionIndex;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct BaseBlock {
    pub center: TileCoord,
    entries: Vec<(TileCoord, Biome, RegionIndex)>,
}

impl BaseBlock {
    // Captures a `block_size x block_size` square centered on the middle
    // tile, clipped to the grid. Even sizes extend one further toward the
    // low side.
    pub fn snapshot(grid: &HexGrid, block_size: usize) -> Self {
        let center = grid.center_coord();
        // Anything wider than the grid covers all of it anyway
        let size = block_size.min(grid.width.max(grid.height));
        let half = size / 2;
        let x0 = center.x as isize - half as isize;
        let y0 = center.y as isize - half as isize;

        let mut entries = Vec::with_capacity(size * size);
        for y in y0..y0 + size as isize {
            for x in x0..x0 + size as isize {
                if !grid.contains(x, y) {
                    continue;
                }
                if let Some(tile) = grid.tile(x as usize, y as usize) {
                    entries.push((tile.coord, tile.biome, tile.region));
                }
            }
        }

        BaseBlock { center, entries }
    }

    pub fn entries(&self) -> &[(TileCoord, Biome, RegionIndex)] {
        &self.entries
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.entries.iter().any(|(c, _, _)| *c == coord)
    }

    pub fn restore(&self, grid: &mut HexGrid) {
        let mut drifted = 0;
        for &(coord, biome, region) in &self.entries {
            if let Some(tile) = grid.tile_mut(coord.x, coord.y) {
                if tile.biome != biome || tile.region != region {
                    drifted += 1;
                }
                tile.biome = biome;
                tile.region = region;
            }
        }
        if let Some(tile) = grid.tile_mut(self.center.x, self.center.y) {
            tile.biome = Biome::None;
        }
        log::debug!(
            "base block restored: {} tiles, {} had drifted",
            self.entries.len(),
            drifted
        );
    }
}

#[derive(Debug, Clone)]
pub struct RngCheckpoint(ChaCha8Rng);

impl RngCheckpoint {
    pub fn capture(rng: &ChaCha8Rng) -> Self {
        RngCheckpoint(rng.clone())
    }

    pub fn restore(self, rng: &mut ChaCha8Rng) {
        *rng = self.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region_field::RegionField;
    use crate::region_labeler::assign_labels;
    use rand::{Rng, SeedableRng};

    fn grid(width: usize, height: usize) -> HexGrid {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let field = RegionField::generate(6, 6, 4.0, 0.3, &mut rng).unwrap();
        let labels = assign_labels(&field, &Biome::DEFAULT_PRIMARY, &mut rng).unwrap();
        HexGrid::build(width, height, 1.0, &field, &labels)
    }

    #[test]
    fn test_snapshot_covers_centered_square() {
        let grid = grid(11, 11);
        let block = BaseBlock::snapshot(&grid, 3);
        assert_eq!(block.entries().len(), 9);
        assert_eq!(block.center, TileCoord::new(5, 5));
        assert!(block.contains(TileCoord::new(4, 4)));
        assert!(block.contains(TileCoord::new(6, 6)));
        assert!(!block.contains(TileCoord::new(7, 5)));
    }

    #[test]
    fn test_snapshot_is_clipped_to_grid() {
        let grid = grid(3, 3);
        let block = BaseBlock::snapshot(&grid, 7);
        assert_eq!(block.entries().len(), 9);
    }

    #[test]
    fn test_oversized_block_covers_whole_grid() {
        let grid = grid(11, 7);
        let block = BaseBlock::snapshot(&grid, usize::MAX);
        assert_eq!(block.entries().len(), grid.len());
        assert!(block.contains(TileCoord::new(0, 0)));
        assert!(block.contains(TileCoord::new(10, 6)));
    }

    #[test]
    fn test_restore_undoes_drift_and_marks_center() {
        let mut grid = grid(11, 11);
        let block = BaseBlock::snapshot(&grid, 5);

        for tile in grid.tiles_mut() {
            tile.biome = Biome::Swamp;
            tile.region = RegionIndex::new(0, 0);
        }
        block.restore(&mut grid);

        for &(coord, biome, region) in block.entries() {
            let tile = grid.tile(coord.x, coord.y).unwrap();
            assert_eq!(tile.region, region);
            if coord == block.center {
                assert_eq!(tile.biome, Biome::None);
            } else {
                assert_eq!(tile.biome, biome);
            }
        }
        // Outside the block the drift stays.
        assert_eq!(grid.tile(0, 0).unwrap().biome, Biome::Swamp);
    }

    #[test]
    fn test_rng_checkpoint_rewinds_stream() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let checkpoint = RngCheckpoint::capture(&rng);
        let first: u64 = rng.gen();
        let _: u64 = rng.gen();
        checkpoint.restore(&mut rng);
        assert_eq!(rng.gen::<u64>(), first);
    }
}
