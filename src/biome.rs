use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biome {
    Grassland,
    Forest,
    Desert,
    Tundra,
    Swamp,
    // Unassigned; also marks the player's start tile.
    None,
}

impl Biome {
    pub const ALL: [Biome; 6] = [
        Biome::Grassland,
        Biome::Forest,
        Biome::Desert,
        Biome::Tundra,
        Biome::Swamp,
        Biome::None,
    ];

    pub const LABELED: [Biome; 5] = [
        Biome::Grassland,
        Biome::Forest,
        Biome::Desert,
        Biome::Tundra,
        Biome::Swamp,
    ];

    pub const DEFAULT_PRIMARY: [Biome; 4] = [
        Biome::Grassland,
        Biome::Forest,
        Biome::Desert,
        Biome::Tundra,
    ];

    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn is_labeled(&self) -> bool {
        *self != Biome::None
    }

    pub fn color(&self) -> [u8; 4] {
        match self {
            Biome::Grassland => [120, 180, 90, 255], // Light green
            Biome::Forest => [50, 120, 50, 255],     // Forest green
            Biome::Desert => [230, 210, 170, 255],   // Sand
            Biome::Tundra => [200, 215, 225, 255],   // Frosted blue-grey
            Biome::Swamp => [60, 80, 60, 255],       // Swamp green-brown
            Biome::None => [245, 245, 250, 255],     // White
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Biome::Grassland => ',',
            Biome::Forest => '♣',
            Biome::Desert => '=',
            Biome::Tundra => '*',
            Biome::Swamp => '%',
            Biome::None => '@',
        }
    }

    pub fn ansi_color(&self) -> &'static str {
        match self {
            Biome::Grassland => "\x1b[92m", // Light green
            Biome::Forest => "\x1b[32m",    // Green
            Biome::Desert => "\x1b[93m",    // Yellow
            Biome::Tundra => "\x1b[97m",    // White
            Biome::Swamp => "\x1b[35m",     // Magenta
            Biome::None => "\x1b[91m",      // Red, stands out as the start tile
        }
    }
}
