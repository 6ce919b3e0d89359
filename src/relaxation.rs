use crate::adjacency::AdjacencyGraph;
use crate::biome::Biome;
use crate::error::{BiomeError, Result};
use crate::hex_grid::HexGrid;

// Label held by more than `threshold` of `neighbors`, if any. The highest
// count wins; ties go to the lowest `Biome::ordinal`.
pub fn majority_label<I>(neighbors: I, threshold: usize) -> Option<Biome>
where
    I: IntoIterator<Item = Biome>,
{
    let mut counts = [0usize; Biome::ALL.len()];
    for biome in neighbors {
        counts[biome.ordinal()] += 1;
    }

    let mut best: Option<(Biome, usize)> = None;
    for biome in Biome::ALL {
        let count = counts[biome.ordinal()];
        if count <= threshold {
            continue;
        }
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((biome, count)),
        }
    }

    best.map(|(biome, _)| biome)
}

/// One synchronous majority-vote round. All next labels are computed from
/// the current grid before any tile is written. Returns the number of tiles
/// whose label changed.
pub fn relax_once(grid: &mut HexGrid, adjacency: &AdjacencyGraph, threshold: usize) -> Result<usize> {
    check_adjacency(grid, adjacency)?;

    let next: Vec<Biome> = {
        let tiles = grid.tiles();
        tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| {
                let neighbor_labels = adjacency.neighbors(i).iter().map(|&n| tiles[n].biome);
                majority_label(neighbor_labels, threshold).unwrap_or(tile.biome)
            })
            .collect()
    };

    let mut changed = 0;
    for (tile, biome) in grid.tiles_mut().iter_mut().zip(next) {
        if tile.biome != biome {
            tile.biome = biome;
            changed += 1;
        }
    }
    Ok(changed)
}

fn check_adjacency(grid: &HexGrid, adjacency: &AdjacencyGraph) -> Result<()> {
    if adjacency.matches(grid) {
        return Ok(());
    }
    Err(BiomeError::InvalidConfig(format!(
        "adjacency graph has {} entries but the grid is {}x{}; rebuild it after rebuilding the grid",
        adjacency.len(),
        grid.width,
        grid.height
    )))
}

pub fn relax(
    grid: &mut HexGrid,
    adjacency: &AdjacencyGraph,
    threshold: usize,
    iterations: usize,
) -> Result<Vec<usize>> {
    check_adjacency(grid, adjacency)?;

    let mut history = Vec::with_capacity(iterations);
    for round in 0..iterations {
        let changed = relax_once(grid, adjacency, threshold)?;
        log::debug!("relaxation round {}: {} tiles changed", round + 1, changed);
        history.push(changed);
    }
    log::info!(
        "relaxation: {} rounds, {} label changes",
        iterations,
        history.iter().sum::<usize>()
    );
    Ok(history)
}

// Runs rounds until one changes nothing or `max_iterations` is reached.
// Returns the number of rounds run, including the final quiet one.
pub fn relax_until_stable(
    grid: &mut HexGrid,
    adjacency: &AdjacencyGraph,
    threshold: usize,
    max_iterations: usize,
) -> Result<usize> {
    for round in 0..max_iterations {
        let changed = relax_once(grid, adjacency, threshold)?;
        log::debug!("relaxation round {}: {} tiles changed", round + 1, changed);
        if changed == 0 {
            return Ok(round + 1);
        }
    }
    Ok(max_iterations)
}
