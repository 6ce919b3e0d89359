use anyhow::Context;
use clap::Parser;
use hexbiome::config::load_settings_from_path;
use hexbiome::map_renderer::MapRenderer;
use hexbiome::{BiomeGenerator, BiomeMap, DistortionMode, GenerationSettings};
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Parser, Debug)]
#[command(name = "hexbiome-cli")]
#[command(about = "Generate seeded biome maps on a hexagonal tile grid")]
struct Args {
    /// Random seed (uses the current time if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with generation settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tiles along x (bumped to odd)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Tiles along z (bumped to odd)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Regions along x
    #[arg(long)]
    biome_width: Option<usize>,

    /// Regions along z
    #[arg(long)]
    biome_height: Option<usize>,

    /// Seed point jitter as a fraction of a region cell (0.0-0.5)
    #[arg(long)]
    jitter: Option<f32>,

    /// Boundary distortion noise source
    #[arg(long, value_parser = parse_mode)]
    distortion: Option<DistortionMode>,

    /// Tiles this much deeper inside their region are never distorted
    #[arg(long)]
    max_penetration: Option<f32>,

    /// Majority-vote smoothing rounds
    #[arg(long)]
    smoothing: Option<usize>,

    /// Write the tile map to a PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write the region partition to a PNG
    #[arg(long)]
    regions_png: Option<PathBuf>,

    /// Pixels per world unit for PNG output
    #[arg(long, default_value = "16")]
    scale: u32,

    /// Write per-tile records as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Plain ASCII output without ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn parse_mode(s: &str) -> Result<DistortionMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "perlin" => Ok(DistortionMode::Perlin),
        "uniform" => Ok(DistortionMode::Uniform),
        "disabled" | "off" | "none" => Ok(DistortionMode::Disabled),
        other => Err(format!("unknown distortion mode '{}' (perlin, uniform, disabled)", other)),
    }
}

fn build_settings(args: &Args) -> anyhow::Result<GenerationSettings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GenerationSettings::default(),
    };

    if let Some(v) = args.width {
        settings.tile_width = v;
    }
    if let Some(v) = args.height {
        settings.tile_height = v;
    }
    if let Some(v) = args.biome_width {
        settings.biome_width = v;
    }
    if let Some(v) = args.biome_height {
        settings.biome_height = v;
    }
    if let Some(v) = args.jitter {
        settings.jitter_factor = v;
    }
    if let Some(v) = args.distortion {
        settings.distortion_mode = v;
    }
    if let Some(v) = args.max_penetration {
        settings.max_penetration = v;
    }
    if let Some(v) = args.smoothing {
        settings.smoothing_iterations = v;
    }

    Ok(settings)
}

fn print_map_info(map: &BiomeMap) {
    println!("\n\x1b[1mBiome Distribution:\x1b[0m");
    let total = map.grid.len().max(1);
    for (biome, count) in map.biome_histogram() {
        if count == 0 {
            continue;
        }
        let percentage = (count as f64 / total as f64) * 100.0;
        println!(
            "  {}{}\x1b[0m {:?} - {:.1}%",
            biome.ansi_color(),
            biome.glyph(),
            biome,
            percentage
        );
    }

    println!(
        "\n\x1b[1mPasses:\x1b[0m {} tiles distorted, smoothing changes per round {:?}",
        map.stats.tiles_distorted, map.stats.relaxation_changes
    );
    let start = map.center_tile();
    println!(
        "\x1b[1mStart tile:\x1b[0m ({}, {}) in region ({}, {})",
        start.coord.x, start.coord.y, start.region.x, start.region.y
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .context("system clock is before the epoch")?
            .as_secs(),
    };

    let settings = build_settings(&args)?;
    let generator = BiomeGenerator::new_with_settings(seed, settings).context("invalid settings")?;
    let map = generator.generate().context("generating biome map")?;

    println!("\x1b[1mHex Biome Map (Seed: {}):\x1b[0m\n", seed);
    print!("{}", MapRenderer::render_ascii(&map, !args.no_color));
    print_map_info(&map);

    if let Some(path) = &args.png {
        MapRenderer::save_png(&map, path, args.scale)
            .with_context(|| format!("saving {}", path.display()))?;
        println!("Map saved as: {}", path.display());
    }
    if let Some(path) = &args.regions_png {
        MapRenderer::save_regions_png(&map, path, args.scale)
            .with_context(|| format!("saving {}", path.display()))?;
        println!("Region map saved as: {}", path.display());
    }
    if let Some(path) = &args.json {
        let json = map.to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Tile records saved as: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("Perlin"), Ok(DistortionMode::Perlin));
        assert_eq!(parse_mode("uniform"), Ok(DistortionMode::Uniform));
        assert_eq!(parse_mode("off"), Ok(DistortionMode::Disabled));
        assert!(parse_mode("voronoi").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["hexbiome-cli", "--width", "21", "--distortion", "uniform", "--smoothing", "0"]);
        let settings = build_settings(&args).unwrap();
        assert_eq!(settings.tile_width, 21);
        assert_eq!(settings.distortion_mode, DistortionMode::Uniform);
        assert_eq!(settings.smoothing_iterations, 0);
        assert_eq!(settings.tile_height, GenerationSettings::default().tile_height);
    }
}
