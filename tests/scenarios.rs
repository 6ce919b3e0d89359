use hexbiome::hex_grid::TileCoord;
use hexbiome::{Biome, BiomeGenerator, DistortionMode, GenerationSettings};

fn scenario_settings() -> GenerationSettings {
    GenerationSettings {
        biome_width: 6,
        biome_height: 6,
        tile_width: 11,
        tile_height: 11,
        ..Default::default()
    }
}

#[test]
fn seed_42_regenerates_identically() {
    let generator = BiomeGenerator::new_with_settings(42, scenario_settings()).unwrap();
    let first = generator.generate().unwrap();
    let second = generator.generate().unwrap();
    assert_eq!(first.label_grid(), second.label_grid());

    let other = BiomeGenerator::new_with_settings(42, scenario_settings()).unwrap().generate().unwrap();
    assert_eq!(first.label_grid(), other.label_grid());
}

#[test]
fn seed_42_center_is_start_tile() {
    let map = BiomeGenerator::new_with_settings(42, scenario_settings()).unwrap().generate().unwrap();
    assert_eq!(map.center_tile().coord, TileCoord::new(5, 5));
    assert_eq!(map.tile(5, 5).unwrap().biome, Biome::None);
}

#[test]
fn zero_penetration_matches_undistorted_run() {
    for mode in [DistortionMode::Perlin, DistortionMode::Uniform] {
        let guarded = BiomeGenerator::new_with_settings(
            42,
            GenerationSettings {
                distortion_mode: mode,
                max_penetration: 0.0,
                ..scenario_settings()
            },
        )
        .unwrap()
        .generate()
        .unwrap();
        let disabled = BiomeGenerator::new_with_settings(
            42,
            GenerationSettings {
                distortion_mode: DistortionMode::Disabled,
                ..scenario_settings()
            },
        )
        .unwrap()
        .generate()
        .unwrap();
        assert_eq!(guarded.stats.tiles_distorted, 0);
        assert_eq!(guarded.label_grid(), disabled.label_grid());
    }
}

#[test]
fn even_dimensions_still_have_a_center() {
    let map = BiomeGenerator::new_with_settings(
        1,
        GenerationSettings {
            tile_width: 10,
            tile_height: 12,
            ..Default::default()
        },
    )
    .unwrap()
    .generate()
    .unwrap();
    assert_eq!(map.width(), 11);
    assert_eq!(map.height(), 13);
    assert_eq!(map.center_tile().biome, Biome::None);
}
