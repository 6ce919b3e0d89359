use crate::biome::Biome;
use crate::region_field::{Point, RegionField, RegionIndex};
use crate::region_labeler::RegionLabels;
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_050_8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: usize,
    pub y: usize,
}

impl TileCoord {
    pub fn new(x: usize, y: usize) -> Self {
        TileCoord { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: TileCoord,
    pub position: Point,
    pub region: RegionIndex,
    pub biome: Biome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexGrid {
    pub width: usize,
    pub height: usize,
    pub spacing: f32,
    tiles: Vec<Tile>,
}

pub fn odd_dimension(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

// World position of tile `(x, y)` in a `width x height` grid, re-centered so
// the middle column sits on `x = 0`.
pub fn tile_position(x: usize, y: usize, width: usize, height: usize, spacing: f32) -> Point {
    let mut px = x as f32 * spacing * 1.5;
    let mut pz = y as f32 * spacing * SQRT_3;

    // Odd columns sit half a row further along z
    if x % 2 == 1 {
        pz += spacing * SQRT_3 * 0.5;
    }

    px -= width.saturating_sub(1) as f32 * spacing * 1.5 / 2.0;
    pz -= height.saturating_sub(1) as f32 * spacing * SQRT_3 / 2.0;

    [px, pz]
}

impl HexGrid {
    pub fn build(
        tile_width: usize,
        tile_height: usize,
        spacing: f32,
        field: &RegionField,
        labels: &RegionLabels,
    ) -> Self {
        let width = odd_dimension(tile_width);
        let height = odd_dimension(tile_height);
        let mut tiles = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let position = tile_position(x, y, width, height, spacing);
                let region = field.nearest(position);
                tiles.push(Tile {
                    coord: TileCoord::new(x, y),
                    position,
                    region,
                    biome: labels.get(region),
                });
            }
        }

        log::info!("built {}x{} hex grid ({} tiles)", width, height, tiles.len());

        HexGrid {
            width,
            height,
            spacing,
            tiles,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn index_of(&self, coord: TileCoord) -> Option<usize> {
        if coord.x < self.width && coord.y < self.height {
            Some(coord.y * self.width + coord.x)
        } else {
            None
        }
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        let i = self.index_of(TileCoord::new(x, y))?;
        Some(&self.tiles[i])
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        let i = self.index_of(TileCoord::new(x, y))?;
        Some(&mut self.tiles[i])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn center_coord(&self) -> TileCoord {
        TileCoord::new(self.width / 2, self.height / 2)
    }

    pub fn label_grid(&self) -> Vec<Vec<Biome>> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(|t| t.biome).collect())
            .collect()
    }
}
