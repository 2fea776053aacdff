//! Surface debug renderers: lit colour and elevation heatmap.

use super::image::DebugImage;
use crate::surface::{MAX_ELEVATION, MIN_ELEVATION, SurfaceGrid};

/// Render the grid's colours. Off-sphere cells stay fully transparent.
pub fn render_surface(grid: &SurfaceGrid) -> DebugImage {
    let res = grid.resolution() as u32;
    let mut image = DebugImage::new(res, res);
    for (x, y, cell) in grid.iter_on_sphere() {
        let [r, g, b] = cell.color;
        image.set_pixel(x as u32, y as u32, [r, g, b, 255]);
    }
    image
}

/// Render elevation as a colour ramp. Off-sphere cells stay transparent.
pub fn render_elevation(grid: &SurfaceGrid) -> DebugImage {
    let res = grid.resolution() as u32;
    let mut image = DebugImage::new(res, res);
    for (x, y, cell) in grid.iter_on_sphere() {
        let [r, g, b] = elevation_to_color(cell.elevation);
        image.set_pixel(x as u32, y as u32, [r, g, b, 255]);
    }
    image
}

/// Map an elevation to a blue (low) → black (zero) → red/white (high) ramp.
pub fn elevation_to_color(elevation: f64) -> [u8; 3] {
    if elevation < 0.0 {
        let t = (elevation / MIN_ELEVATION).clamp(0.0, 1.0);
        [0, (t * 60.0) as u8, (80.0 + t * 175.0) as u8]
    } else {
        let t = (elevation / MAX_ELEVATION).clamp(0.0, 1.0);
        let warm = (t * 255.0) as u8;
        let hot = (t * t * 255.0) as u8;
        [warm, hot, hot]
    }
}
