//! Baked shading: diffuse + terminator + limb-darkening model applied once
//! per body, producing the final lit colours and a reusable shadow map.
//! Every body kind, stars included, goes through the same model.

use glam::DVec3;
use orbis_terrain::{SurfaceGrid, clamp_channel};
use tracing::debug;

use crate::directional::DirectionalLight;
use crate::normals::{NormalGrid, compute_normals};

/// Shading model parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingParams {
    pub light: DirectionalLight,
    /// Light that reaches every cell regardless of orientation.
    pub ambient: f64,
    /// Weight of the `max(0, normal · light)` term.
    pub diffuse_strength: f64,
    /// Fraction of the elevation gradient added to the sphere normal.
    pub bump_strength: f64,
    /// `terminator = max(0, slope × nx + offset)`.
    pub terminator_slope: f64,
    pub terminator_offset: f64,
    /// Floor of the limb-darkening term `max(min_limb, nz)`.
    pub min_limb: f64,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            light: DirectionalLight::default(),
            ambient: 0.2,
            diffuse_strength: 0.8,
            bump_strength: 0.1,
            terminator_slope: 0.7,
            terminator_offset: 0.3,
            min_limb: 0.3,
        }
    }
}

/// Per-cell brightness multipliers in `[0, 1]`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowGrid {
    resolution: usize,
    cells: Vec<f32>,
}

impl ShadowGrid {
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        self.cells.get(y * self.resolution + x).copied()
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }
}

/// Normal and shadow grids produced alongside the re-shaded surface.
#[derive(Clone, Debug, PartialEq)]
pub struct LitSurface {
    pub normals: NormalGrid,
    pub shadows: ShadowGrid,
}

/// Derives normals and shading for a generated surface.
#[derive(Clone, Debug, Default)]
pub struct LightingEngine {
    params: LightingParams,
}

impl LightingEngine {
    pub fn new(params: LightingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LightingParams {
        &self.params
    }

    /// Final brightness for one normal, clamped to `[0, 1]`.
    pub fn light_factor(&self, normal: DVec3) -> f64 {
        let p = &self.params;
        let diffuse = normal.dot(p.light.direction).max(0.0);
        let terminator = (p.terminator_slope * normal.x + p.terminator_offset).max(0.0);
        let edge = normal.z.max(p.min_limb);
        ((p.ambient + diffuse * p.diffuse_strength) * terminator * edge).clamp(0.0, 1.0)
    }

    /// Compute normals, re-shade `surface` colours in place, and return the
    /// normal and shadow grids.
    ///
    /// A pure function of the surface: no randomness. Off-sphere cells keep
    /// their colour and get a zero shadow value.
    pub fn apply(&self, surface: &mut SurfaceGrid) -> LitSurface {
        let normals = compute_normals(surface, self.params.bump_strength);
        let res = surface.resolution();
        let mut shadows = vec![0.0_f32; res * res];
        let mut lit_cells = 0_usize;

        for y in 0..res {
            for x in 0..res {
                if !surface.is_on_sphere(x, y) {
                    continue;
                }
                let Some(normal) = normals.get(x, y) else {
                    continue;
                };
                let light = self.light_factor(normal.as_dvec3());
                if let Some(cell) = surface.get_mut(x, y) {
                    cell.color = cell
                        .color
                        .map(|c| clamp_channel((f64::from(c) * light).floor()));
                }
                shadows[y * res + x] = light as f32;
                lit_cells += 1;
            }
        }

        debug!(resolution = res, lit_cells, "applied lighting");

        LitSurface {
            normals,
            shadows: ShadowGrid {
                resolution: res,
                cells: shadows,
            },
        }
    }
}
