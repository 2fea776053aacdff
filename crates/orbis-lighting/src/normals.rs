//! Per-cell surface normals: orthographic sphere curvature plus a small
//! perturbation from the local elevation gradient.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use orbis_terrain::SurfaceGrid;

/// Cells whose normal `z` is at or below this face away from the viewer and
/// should not be drawn.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;

/// Surface normal of one grid cell. Unit-ish: the bump perturbation is
/// added without renormalizing.
///
/// `#[repr(C)]` and `Pod` so a whole grid can be uploaded as raw bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct NormalCell {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl NormalCell {
    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// `true` if the cell faces the camera hemisphere enough to be drawn.
    pub fn faces_viewer(&self) -> bool {
        self.z > VISIBILITY_THRESHOLD
    }
}

impl From<DVec3> for NormalCell {
    fn from(v: DVec3) -> Self {
        Self {
            x: v.x as f32,
            y: v.y as f32,
            z: v.z as f32,
        }
    }
}

/// A `resolution × resolution` grid of [`NormalCell`]s, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalGrid {
    resolution: usize,
    cells: Vec<NormalCell>,
}

impl NormalGrid {
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&NormalCell> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        self.cells.get(y * self.resolution + x)
    }

    pub fn cells(&self) -> &[NormalCell] {
        &self.cells
    }

    /// Raw little-endian `f32` triples, ready for a GPU buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }
}

/// Pure sphere normal for an offset `(dx, dy)` from the centre of a disk of
/// radius `radius`.
pub fn sphere_normal(dx: f64, dy: f64, radius: f64) -> DVec3 {
    let nx = dx / radius;
    let ny = dy / radius;
    let nz = (1.0 - nx * nx - ny * ny).max(0.0).sqrt();
    DVec3::new(nx, ny, nz)
}

/// Compute normals for every on-sphere cell of `surface`.
///
/// Interior cells add `bump_strength ×` the central-difference elevation
/// gradient to the sphere normal's `x`/`y`; border cells keep the pure
/// sphere normal. Off-sphere cells hold a zero normal.
pub fn compute_normals(surface: &SurfaceGrid, bump_strength: f64) -> NormalGrid {
    let res = surface.resolution();
    let radius = surface.radius();
    let mut cells = vec![NormalCell::default(); res * res];

    for y in 0..res {
        for x in 0..res {
            if !surface.is_on_sphere(x, y) {
                continue;
            }
            let (dx, dy) = surface.offset(x, y);
            let mut normal = sphere_normal(dx, dy, radius);

            let interior = x >= 1 && y >= 1 && x + 1 < res && y + 1 < res;
            if interior {
                let grad_x = surface.elevation(x + 1, y) - surface.elevation(x - 1, y);
                let grad_y = surface.elevation(x, y + 1) - surface.elevation(x, y - 1);
                normal.x += bump_strength * grad_x;
                normal.y += bump_strength * grad_y;
            }

            cells[y * res + x] = NormalCell::from(normal);
        }
    }

    NormalGrid {
        resolution: res,
        cells,
    }
}
