use crate::error::{BiomeError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub type Point = [f32; 2];

pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a[0] - b[0];
    let dz = a[1] - b[1];
    (dx * dx + dz * dz).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionIndex {
    pub x: usize,
    pub y: usize,
}

impl RegionIndex {
    pub fn new(x: usize, y: usize) -> Self {
        RegionIndex { x, y }
    }
}

/// Jittered lattice of region seed points, centered on the world origin.
/// The 2x2 block around the origin is never jittered.
///
/// Lookups only scan the 3x3 cells around an estimate, so near the 0.5 jitter
/// cap a farther seed point can occasionally win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionField {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    points: Vec<Point>,
}

impl RegionField {
    pub fn generate<R: Rng>(
        width: usize,
        height: usize,
        cell_size: f32,
        jitter_factor: f32,
        rng: &mut R,
    ) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(BiomeError::RegionFieldTooSmall { width, height });
        }
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(BiomeError::InvalidConfig(format!(
                "region cell size must be positive, got {}",
                cell_size
            )));
        }
        if jitter_factor.is_nan() {
            return Err(BiomeError::InvalidConfig("jitter factor must be a number".to_string()));
        }

        let jitter = jitter_factor.clamp(0.0, 0.5) * cell_size;
        let mut field = RegionField {
            width,
            height,
            cell_size,
            points: Vec::with_capacity(width * height),
        };

        for ry in 0..height {
            for rx in 0..width {
                let index = RegionIndex::new(rx, ry);
                let center = field.lattice_center(index);
                if field.is_center_region(index) {
                    field.points.push(center);
                    continue;
                }
                let dx = rng.gen_range(-jitter..=jitter);
                let dz = rng.gen_range(-jitter..=jitter);
                field.points.push([center[0] + dx, center[1] + dz]);
            }
        }

        log::debug!(
            "region field {}x{} generated (cell size {}, jitter {})",
            width,
            height,
            cell_size,
            jitter
        );

        Ok(field)
    }

    // The four regions that meet at the world origin.
    pub fn center_regions(&self) -> [RegionIndex; 4] {
        let cx = self.width / 2;
        let cy = self.height / 2;
        [
            RegionIndex::new(cx - 1, cy - 1),
            RegionIndex::new(cx, cy - 1),
            RegionIndex::new(cx - 1, cy),
            RegionIndex::new(cx, cy),
        ]
    }

    pub fn is_center_region(&self, index: RegionIndex) -> bool {
        let cx = self.width / 2;
        let cy = self.height / 2;
        (index.x == cx - 1 || index.x == cx) && (index.y == cy - 1 || index.y == cy)
    }

    pub fn origin(&self) -> Point {
        [
            -(self.width as f32) * self.cell_size / 2.0,
            -(self.height as f32) * self.cell_size / 2.0,
        ]
    }

    pub fn bounds(&self) -> (Point, Point) {
        let min = self.origin();
        (min, [-min[0], -min[1]])
    }

    pub fn lattice_center(&self, index: RegionIndex) -> Point {
        let origin = self.origin();
        [
            origin[0] + (index.x as f32 + 0.5) * self.cell_size,
            origin[1] + (index.y as f32 + 0.5) * self.cell_size,
        ]
    }

    pub fn point(&self, index: RegionIndex) -> Point {
        self.points[index.y * self.width + index.x]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn indices(&self) -> impl Iterator<Item = RegionIndex> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| RegionIndex::new(x, y)))
    }

    fn estimate_cell(&self, position: Point) -> RegionIndex {
        let (min, max) = self.bounds();
        let px = position[0].clamp(min[0], max[0]);
        let pz = position[1].clamp(min[1], max[1]);
        let cx = ((px - min[0]) / self.cell_size).floor() as isize;
        let cz = ((pz - min[1]) / self.cell_size).floor() as isize;
        RegionIndex::new(
            cx.clamp(0, self.width as isize - 1) as usize,
            cz.clamp(0, self.height as isize - 1) as usize,
        )
    }

    // Closest seed point among the 3x3 cells around `center`, skipping
    // `exclude`. Earlier cells in row-major order win exact ties.
    fn scan_around(
        &self,
        center: RegionIndex,
        position: Point,
        exclude: Option<RegionIndex>,
    ) -> Option<RegionIndex> {
        let mut best: Option<(RegionIndex, f32)> = None;

        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                let x = center.x as isize + dx;
                let y = center.y as isize + dy;
                if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
                    continue;
                }
                let candidate = RegionIndex::new(x as usize, y as usize);
                if Some(candidate) == exclude {
                    continue;
                }
                let d = distance(position, self.point(candidate));
                match best {
                    Some((_, best_d)) if d >= best_d => {}
                    _ => best = Some((candidate, d)),
                }
            }
        }

        best.map(|(index, _)| index)
    }

    pub fn nearest(&self, position: Point) -> RegionIndex {
        let estimate = self.estimate_cell(position);
        // The estimate's own cell is always in range, so the scan finds something.
        self.scan_around(estimate, position, None).unwrap_or(estimate)
    }

    // Runner-up region, scanned around the nearest region's cell rather than
    // the raw estimate. `None` when no other cell is in range.
    pub fn second_nearest(&self, position: Point) -> Option<RegionIndex> {
        let nearest = self.nearest(position);
        self.scan_around(nearest, position, Some(nearest))
    }

    pub fn sample_region_map(&self, columns: usize, rows: usize) -> Vec<Vec<RegionIndex>> {
        let (min, max) = self.bounds();
        let step_x = (max[0] - min[0]) / columns.max(1) as f32;
        let step_z = (max[1] - min[1]) / rows.max(1) as f32;

        (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|col| {
                        let position = [
                            min[0] + (col as f32 + 0.5) * step_x,
                            min[1] + (row as f32 + 0.5) * step_z,
                        ];
                        self.nearest(position)
                    })
                    .collect()
            })
            .collect()
    }
}
