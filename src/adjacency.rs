use crate::hex_grid::{HexGrid, TileCoord};
use serde::{Deserialize, Serialize};

const VERTICAL: [(isize, isize); 2] = [(0, -1), (0, 1)];
// Even columns sit half a row lower than odd ones, so their diagonal
// neighbors lean toward `y - 1`.
const EVEN_COLUMN: [(isize, isize); 4] = [(-1, 0), (1, 0), (-1, -1), (1, -1)];
const ODD_COLUMN: [(isize, isize); 4] = [(-1, 0), (1, 0), (-1, 1), (1, 1)];

// Up to six in-bounds neighbors of `coord`, in a fixed order. No wraparound.
pub fn extract_neighbors(coord: TileCoord, width: usize, height: usize) -> Vec<TileCoord> {
    let diagonals = if coord.x % 2 == 0 { &EVEN_COLUMN } else { &ODD_COLUMN };

    VERTICAL
        .iter()
        .chain(diagonals.iter())
        .filter_map(|&(dx, dy)| {
            let x = coord.x as isize + dx;
            let y = coord.y as isize + dy;
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                Some(TileCoord::new(x as usize, y as usize))
            } else {
                None
            }
        })
        .collect()
}

// Must be rebuilt whenever the grid is rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    width: usize,
    height: usize,
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    pub fn build(grid: &HexGrid) -> Self {
        let neighbors = grid
            .tiles()
            .iter()
            .map(|tile| {
                extract_neighbors(tile.coord, grid.width, grid.height)
                    .into_iter()
                    .map(|c| c.y * grid.width + c.x)
                    .collect()
            })
            .collect();

        AdjacencyGraph {
            width: grid.width,
            height: grid.height,
            neighbors,
        }
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    pub fn neighbor_coords(&self, index: usize) -> Vec<TileCoord> {
        self.neighbors[index]
            .iter()
            .map(|&i| TileCoord::new(i % self.width, i / self.width))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn matches(&self, grid: &HexGrid) -> bool {
        self.width == grid.width && self.height == grid.height
    }
}
