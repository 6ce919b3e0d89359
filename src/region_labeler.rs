use crate::biome::Biome;
use crate::error::{BiomeError, Result};
use crate::region_field::{RegionField, RegionIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLabels {
    pub width: usize,
    pub height: usize,
    labels: Vec<Biome>,
}

impl RegionLabels {
    pub fn get(&self, index: RegionIndex) -> Biome {
        self.labels[index.y * self.width + index.x]
    }

    pub fn as_slice(&self) -> &[Biome] {
        &self.labels
    }
}

/// Labels every region of `field`. The four center regions receive a random
/// permutation of `primary` (which must hold 4 distinct labeled biomes); all
/// other regions draw independently from every labeled biome.
pub fn assign_labels<R: Rng>(
    field: &RegionField,
    primary: &[Biome],
    rng: &mut R,
) -> Result<RegionLabels> {
    let mut pool: Vec<Biome> = Vec::with_capacity(4);
    for biome in primary {
        if biome.is_labeled() && !pool.contains(biome) {
            pool.push(*biome);
        }
    }
    if pool.len() < 4 {
        return Err(BiomeError::NotEnoughPrimaryBiomes { found: pool.len() });
    }
    pool.truncate(4);

    let mut labels = Vec::with_capacity(field.width * field.height);
    for index in field.indices() {
        let biome = if field.is_center_region(index) {
            // Draw without replacement so the center block never repeats.
            let pick = rng.gen_range(0..pool.len());
            pool.remove(pick)
        } else {
            Biome::LABELED[rng.gen_range(0..Biome::LABELED.len())]
        };
        labels.push(biome);
    }

    log::debug!("labeled {} regions", labels.len());

    Ok(RegionLabels {
        width: field.width,
        height: field.height,
        labels,
    })
}
