use crate::biome::Biome;
use crate::biome_generator::BiomeMap;
use crate::error::Result;
use crate::region_field::Point;
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point as PixelPoint;
use std::path::Path;

const MARGIN: f32 = 1.5; // world units of padding around the grid

pub struct MapRenderer;

fn rgb(color: [u8; 4]) -> Rgb<u8> {
    Rgb([color[0], color[1], color[2]])
}

fn darken(color: Rgb<u8>, factor: f32) -> Rgb<u8> {
    Rgb([
        (color[0] as f32 * factor) as u8,
        (color[1] as f32 * factor) as u8,
        (color[2] as f32 * factor) as u8,
    ])
}

impl MapRenderer {
    fn tile_bounds(map: &BiomeMap) -> (Point, Point) {
        let mut min = [f32::MAX, f32::MAX];
        let mut max = [f32::MIN, f32::MIN];
        for tile in map.grid.tiles() {
            min[0] = min[0].min(tile.position[0]);
            min[1] = min[1].min(tile.position[1]);
            max[0] = max[0].max(tile.position[0]);
            max[1] = max[1].max(tile.position[1]);
        }
        let pad = MARGIN * map.grid.spacing;
        ([min[0] - pad, min[1] - pad], [max[0] + pad, max[1] + pad])
    }

    fn hex_corners(center: (f32, f32), radius: f32) -> Vec<PixelPoint<i32>> {
        let mut corners: Vec<PixelPoint<i32>> = (0..6)
            .map(|i| {
                let angle = std::f32::consts::PI / 3.0 * i as f32;
                PixelPoint::new(
                    (center.0 + radius * angle.cos()).round() as i32,
                    (center.1 + radius * angle.sin()).round() as i32,
                )
            })
            .collect();
        // Rounding can collapse corners on tiny scales; the polygon must stay open.
        corners.dedup();
        while corners.len() > 1 && corners.first() == corners.last() {
            corners.pop();
        }
        corners
    }

    pub fn render_to_image(map: &BiomeMap, scale: u32) -> RgbImage {
        let scale = scale.max(1) as f32;
        let (min, max) = Self::tile_bounds(map);
        let width = ((max[0] - min[0]) * scale).ceil().max(1.0) as u32;
        let height = ((max[1] - min[1]) * scale).ceil().max(1.0) as u32;
        let mut img: RgbImage = ImageBuffer::from_pixel(width, height, Rgb([20, 20, 28]));

        let to_pixel = |p: Point| ((p[0] - min[0]) * scale, (p[1] - min[1]) * scale);
        let radius = map.grid.spacing * scale;

        for tile in map.grid.tiles() {
            let color = rgb(tile.biome.color());
            let corners = Self::hex_corners(to_pixel(tile.position), radius);
            if corners.len() >= 3 {
                draw_polygon_mut(&mut img, &corners, color);

                // Outline, closing back to the first corner
                let edge = darken(color, 0.7);
                for (a, b) in corners.iter().zip(corners.iter().cycle().skip(1)) {
                    draw_line_segment_mut(&mut img, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), edge);
                }
            }
        }

        let dot = (radius * 0.25).max(1.0) as i32;
        for point in map.field.points() {
            let (px, py) = to_pixel(*point);
            if px >= 0.0 && py >= 0.0 && px < width as f32 && py < height as f32 {
                draw_filled_circle_mut(&mut img, (px as i32, py as i32), dot, Rgb([0, 0, 0]));
            }
        }

        img
    }

    pub fn render_regions_to_image(map: &BiomeMap, scale: u32) -> RgbImage {
        let field = &map.field;
        let scale = scale.max(1);
        let width = (field.width as f32 * field.cell_size * scale as f32).ceil().max(1.0) as u32;
        let height = (field.height as f32 * field.cell_size * scale as f32).ceil().max(1.0) as u32;
        let samples = field.sample_region_map(width as usize, height as usize);

        let mut img: RgbImage = ImageBuffer::new(width, height);
        for (y, row) in samples.iter().enumerate() {
            for (x, region) in row.iter().enumerate() {
                let mut color = rgb(map.region_labels.get(*region).color());
                // Alternate shading so neighboring regions with the same label stay distinct.
                if (region.x + region.y) % 2 == 1 {
                    color = darken(color, 0.85);
                }
                img.put_pixel(x as u32, y as u32, color);
            }
        }

        let (min, _) = field.bounds();
        let dot = (scale as f32 * field.cell_size * 0.08).max(1.0) as i32;
        for point in field.points() {
            let px = ((point[0] - min[0]) * scale as f32) as i32;
            let py = ((point[1] - min[1]) * scale as f32) as i32;
            draw_filled_circle_mut(&mut img, (px, py), dot, Rgb([0, 0, 0]));
        }

        img
    }

    // Text view with two lines per row: even columns, then the odd columns
    // that sit half a row further along.
    pub fn render_ascii(map: &BiomeMap, colored: bool) -> String {
        let mut out = String::new();
        let labels = map.label_grid();

        for row in &labels {
            for parity in 0..2 {
                for (x, biome) in row.iter().enumerate() {
                    if x % 2 == parity {
                        Self::push_glyph(&mut out, *biome, colored);
                    } else {
                        out.push(' ');
                    }
                }
                out.push('\n');
            }
        }

        out
    }

    fn push_glyph(out: &mut String, biome: Biome, colored: bool) {
        if colored {
            out.push_str(biome.ansi_color());
            out.push(biome.glyph());
            out.push_str("\x1b[0m");
        } else {
            out.push(biome.glyph());
        }
    }

    pub fn save_png(map: &BiomeMap, path: &Path, scale: u32) -> Result<()> {
        Self::render_to_image(map, scale).save(path)?;
        Ok(())
    }

    pub fn save_regions_png(map: &BiomeMap, path: &Path, scale: u32) -> Result<()> {
        Self::render_regions_to_image(map, scale).save(path)?;
        Ok(())
    }
}
