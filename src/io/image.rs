//! PNG rendering of the pruned grid and the chosen walk
//!
//! Tiles are drawn as pointy-top hexes at their axial positions, coloured by
//! point value. Tiles on the walk are drawn at full strength, the rest are
//! faded, the start tile is red, and the walk itself is traced as a line
//! through tile centres.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::{RENDER_HEX_RADIUS, RENDER_MARGIN};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::Tile;

const SQRT_3: f64 = 1.732_050_807_568_877_2;
const START_COLOR: [u8; 4] = [220, 50, 50, 255];
const PATH_COLOR: [u8; 4] = [25, 25, 25, 255];
const LOW_POINT_COLOR: [f64; 3] = [70.0, 110.0, 200.0];
const HIGH_POINT_COLOR: [f64; 3] = [250.0, 200.0, 60.0];

/// Pixel centre of a tile in unshifted world coordinates
fn hex_center(tile: Tile) -> (f64, f64) {
    let q = f64::from(tile.x());
    let r = f64::from(tile.y());
    (
        RENDER_HEX_RADIUS * SQRT_3 * (q + r / 2.0),
        RENDER_HEX_RADIUS * 1.5 * r,
    )
}

/// Tile whose hex contains a world-space point, if inside the lattice
fn tile_at(wx: f64, wy: f64) -> Option<Tile> {
    let q = (SQRT_3 / 3.0 * wx - wy / 3.0) / RENDER_HEX_RADIUS;
    let r = (2.0 / 3.0 * wy) / RENDER_HEX_RADIUS;
    let s = -q - r;

    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    let in_lattice = |value: f64| (0.0..=255.0).contains(&value);
    (in_lattice(rq) && in_lattice(rr)).then(|| Tile::new(rq as u8, rr as u8))
}

fn point_color(point: u8, max_point: u8, on_walk: bool) -> [u8; 4] {
    let t = if max_point == 0 {
        0.0
    } else {
        f64::from(point) / f64::from(max_point)
    };

    let mut rgb = [0u8; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        let mixed = LOW_POINT_COLOR[channel] + (HIGH_POINT_COLOR[channel] - LOW_POINT_COLOR[channel]) * t;
        let faded = if on_walk {
            mixed
        } else {
            mixed + (255.0 - mixed) * 0.6
        };
        *value = faded.round() as u8;
    }

    [rgb[0], rgb[1], rgb[2], 255]
}

/// Draw the grid with `walk` traced over it
pub fn render_walk(grid: &Grid, walk: &[u16]) -> RgbaImage {
    let on_walk = TileBitset::from_indices(grid.len(), walk);
    let max_point = (0..grid.len())
        .map(|index| grid.point(index as u16))
        .max()
        .unwrap_or(0);

    let pad = RENDER_HEX_RADIUS + RENDER_MARGIN;
    let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
    let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
    for &tile in grid.tiles() {
        let (cx, cy) = hex_center(tile);
        min_x = min_x.min(cx - pad);
        min_y = min_y.min(cy - pad);
        max_x = max_x.max(cx + pad);
        max_y = max_y.max(cy + pad);
    }

    let width = (max_x - min_x).ceil().max(1.0) as u32;
    let height = (max_y - min_y).ceil().max(1.0) as u32;
    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let wx = f64::from(px) + 0.5 + min_x;
        let wy = f64::from(py) + 0.5 + min_y;

        let Some(index) = tile_at(wx, wy).and_then(|tile| grid.index_of(tile)) else {
            continue;
        };

        *pixel = if index == grid.start() {
            Rgba(START_COLOR)
        } else {
            Rgba(point_color(grid.point(index), max_point, on_walk.contains(index)))
        };
    }

    for pair in walk.windows(2) {
        let (ax, ay) = hex_center(grid.tile(pair[0]));
        let (bx, by) = hex_center(grid.tile(pair[1]));
        let steps = (bx - ax).hypot(by - ay).ceil().max(1.0) as u32;

        for step in 0..=steps {
            let t = f64::from(step) / f64::from(steps);
            let x = (ax + (bx - ax) * t - min_x) as u32;
            let y = (ay + (by - ay) * t - min_y) as u32;
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                if x + dx < width && y + dy < height {
                    img.put_pixel(x + dx, y + dy, Rgba(PATH_COLOR));
                }
            }
        }
    }

    img
}

/// Render the walk and save it as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_walk_as_png(grid: &Grid, walk: &[u16], output_path: &Path) -> Result<()> {
    let img = render_walk(grid, walk);

    if let Some(parent) = output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
