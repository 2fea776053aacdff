//! Square texture grid of surface cells addressed around a central sphere.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Lowest elevation a cell can hold after any number of stamps.
pub const MIN_ELEVATION: f64 = -1.0;
/// Highest elevation a cell can hold after any number of stamps.
pub const MAX_ELEVATION: f64 = 1.0;

/// One texel of a body's generated surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceCell {
    /// RGB colour, each channel in `[0, 255]`.
    pub color: [u8; 3],
    /// Terrain height in `[MIN_ELEVATION, MAX_ELEVATION]`.
    pub elevation: f64,
}

impl SurfaceCell {
    /// Add a (possibly negative) delta to every colour channel, clamping to
    /// `[0, 255]`.
    pub fn add_color(&mut self, delta: [f64; 3]) {
        for (channel, d) in self.color.iter_mut().zip(delta) {
            *channel = clamp_channel(f64::from(*channel) + d);
        }
    }

    /// Add a delta to the elevation, clamping to the documented range.
    pub fn add_elevation(&mut self, delta: f64) {
        self.elevation = (self.elevation + delta).clamp(MIN_ELEVATION, MAX_ELEVATION);
    }
}

/// Round and clamp a channel value into `[0, 255]`.
#[inline]
pub fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// A `resolution × resolution` grid of [`SurfaceCell`]s.
///
/// Cell `(x, y)` sits at offset `(x − R/2, y − R/2)` from the grid centre.
/// Only cells within `R/2` of the centre lie on the sphere's disk; the rest
/// stay at their default value.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceGrid {
    resolution: usize,
    cells: Vec<SurfaceCell>,
}

impl SurfaceGrid {
    /// Create a grid with every cell at its default value.
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            cells: vec![SurfaceCell::default(); resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Radius of the sphere's disk, in cells.
    pub fn radius(&self) -> f64 {
        self.resolution as f64 / 2.0
    }

    /// Offset of cell `(x, y)` from the grid centre.
    pub fn offset(&self, x: usize, y: usize) -> (f64, f64) {
        let r = self.radius();
        (x as f64 - r, y as f64 - r)
    }

    /// Returns `true` if `(x, y)` is inside the grid and on the sphere's disk.
    pub fn is_on_sphere(&self, x: usize, y: usize) -> bool {
        if x >= self.resolution || y >= self.resolution {
            return false;
        }
        let (dx, dy) = self.offset(x, y);
        let r = self.radius();
        dx * dx + dy * dy <= r * r
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.resolution + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&SurfaceCell> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        self.cells.get(self.index(x, y))
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut SurfaceCell> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        let idx = self.index(x, y);
        self.cells.get_mut(idx)
    }

    /// Elevation at `(x, y)`, or `0.0` outside the grid.
    pub fn elevation(&self, x: usize, y: usize) -> f64 {
        self.get(x, y).map_or(0.0, |c| c.elevation)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[SurfaceCell] {
        &self.cells
    }

    /// Iterate `(x, y, cell)` over on-sphere cells only.
    pub fn iter_on_sphere(&self) -> impl Iterator<Item = (usize, usize, &SurfaceCell)> {
        let res = self.resolution;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % res, i / res, cell))
            .filter(|&(x, y, _)| self.is_on_sphere(x, y))
    }

    /// Hash every cell's colour bytes and elevation bits, for determinism
    /// comparison.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.resolution.hash(&mut hasher);
        for cell in &self.cells {
            cell.color.hash(&mut hasher);
            cell.elevation.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}
