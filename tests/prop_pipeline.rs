use hexbiome::adjacency::{extract_neighbors, AdjacencyGraph};
use hexbiome::base_lock::BaseBlock;
use hexbiome::distortion::BoundaryDistortion;
use hexbiome::hex_grid::{HexGrid, TileCoord};
use hexbiome::region_field::RegionField;
use hexbiome::region_labeler::{assign_labels, RegionLabels};
use hexbiome::relaxation::{relax_once, relax_until_stable};
use hexbiome::{Biome, BiomeGenerator, DistortionMode, GenerationSettings};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_settings() -> impl Strategy<Value = GenerationSettings> {
    (
        2usize..9,
        2usize..9,
        1usize..16,
        1usize..16,
        0.0f32..0.5,
        prop_oneof![
            Just(DistortionMode::Perlin),
            Just(DistortionMode::Uniform),
            Just(DistortionMode::Disabled)
        ],
        0usize..5,
        1usize..6,
    )
        .prop_map(|(bw, bh, tw, th, jitter, mode, rounds, block)| GenerationSettings {
            biome_width: bw,
            biome_height: bh,
            tile_width: tw,
            tile_height: th,
            jitter_factor: jitter,
            distortion_mode: mode,
            smoothing_iterations: rounds,
            base_block_size: block,
            ..Default::default()
        })
}

/// Grid as it stands just before boundary distortion in the full pipeline.
fn pre_distortion_grid(
    seed: u64,
    settings: &GenerationSettings,
) -> (HexGrid, RegionField, RegionLabels, ChaCha8Rng) {
    let settings = settings.clone().validate().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let field = RegionField::generate(
        settings.biome_width,
        settings.biome_height,
        settings.region_cell_size,
        settings.jitter_factor,
        &mut rng,
    )
    .unwrap();
    let labels = assign_labels(&field, &settings.primary_biomes, &mut rng).unwrap();
    let grid = HexGrid::build(settings.tile_width, settings.tile_height, settings.tile_spacing, &field, &labels);
    (grid, field, labels, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Same seed and settings always give the same labels.
    #[test]
    fn pipeline_is_deterministic(seed in any::<u64>(), settings in arb_settings()) {
        let a = BiomeGenerator::new_with_settings(seed, settings.clone()).unwrap().generate().unwrap();
        let b = BiomeGenerator::new_with_settings(seed, settings).unwrap().generate().unwrap();
        prop_assert_eq!(a.label_grid(), b.label_grid());
        prop_assert_eq!(a.tile_records(), b.tile_records());
    }

    // The center of the map is always the start tile.
    #[test]
    fn center_tile_is_none(seed in any::<u64>(), settings in arb_settings()) {
        let map = BiomeGenerator::new_with_settings(seed, settings).unwrap().generate().unwrap();
        prop_assert_eq!(map.center_tile().biome, Biome::None);
        prop_assert_eq!(map.width() % 2, 1);
        prop_assert_eq!(map.height() % 2, 1);
    }

    #[test]
    fn center_regions_get_distinct_labels(seed in any::<u64>(), w in 2usize..10, h in 2usize..10) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = RegionField::generate(w, h, 3.0, 0.25, &mut rng).unwrap();
        let labels = assign_labels(&field, &Biome::DEFAULT_PRIMARY, &mut rng).unwrap();
        let mut center: Vec<Biome> = field.center_regions().iter().map(|i| labels.get(*i)).collect();
        center.sort();
        center.dedup();
        prop_assert_eq!(center.len(), 4);
        prop_assert!(center.iter().all(|b| Biome::DEFAULT_PRIMARY.contains(b)));
    }

    #[test]
    fn neighbors_in_bounds_and_symmetric(w in 1usize..20, h in 1usize..20) {
        for y in 0..h {
            for x in 0..w {
                let coord = TileCoord::new(x, y);
                let neighbors = extract_neighbors(coord, w, h);
                prop_assert!(neighbors.len() <= 6);
                for n in neighbors {
                    prop_assert!(n.x < w && n.y < h);
                    prop_assert!(n != coord);
                    prop_assert!(extract_neighbors(n, w, h).contains(&coord));
                }
            }
        }
    }

    // After restore the locked block matches its snapshot, center aside.
    #[test]
    fn base_block_survives_randomized_passes(seed in any::<u64>(), settings in arb_settings()) {
        let (mut grid, field, labels, mut rng) = pre_distortion_grid(seed, &settings);
        let adjacency = AdjacencyGraph::build(&grid);
        let block = BaseBlock::snapshot(&grid, settings.base_block_size);

        let pass = BoundaryDistortion::new(DistortionMode::Uniform, seed as u32, 0.5, 10.0, 100.0);
        pass.apply(&mut grid, &field, &labels, &mut rng);
        relax_until_stable(&mut grid, &adjacency, 2, 5).unwrap();
        block.restore(&mut grid);

        for &(coord, biome, region) in block.entries() {
            let tile = grid.tile(coord.x, coord.y).unwrap();
            prop_assert_eq!(tile.region, region);
            if coord == grid.center_coord() {
                prop_assert_eq!(tile.biome, Biome::None);
            } else {
                prop_assert_eq!(tile.biome, biome);
            }
        }
    }

    #[test]
    fn zero_penetration_distorts_nothing(seed in any::<u64>(), settings in arb_settings()) {
        let (mut grid, field, labels, mut rng) = pre_distortion_grid(seed, &settings);
        let before = grid.label_grid();
        let pass = BoundaryDistortion::new(DistortionMode::Uniform, seed as u32, 0.5, 10.0, 0.0);
        prop_assert_eq!(pass.apply(&mut grid, &field, &labels, &mut rng), 0);
        prop_assert_eq!(grid.label_grid(), before);
    }

    // Once a round changes nothing, the next round changes nothing either.
    #[test]
    fn relaxation_idempotent_once_converged(seed in any::<u64>(), settings in arb_settings(), threshold in 1usize..5) {
        let (mut grid, _, _, _) = pre_distortion_grid(seed, &settings);
        let adjacency = AdjacencyGraph::build(&grid);
        let rounds = relax_until_stable(&mut grid, &adjacency, threshold, 50).unwrap();
        if rounds < 50 {
            let settled = grid.label_grid();
            prop_assert_eq!(relax_once(&mut grid, &adjacency, threshold).unwrap(), 0);
            prop_assert_eq!(grid.label_grid(), settled);
        }
    }
}
