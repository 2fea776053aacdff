//! Surface synthesis: noise-driven base colour and elevation, then feature
//! stamping, over a fixed-resolution square grid.

use rand::RngCore;
use tracing::debug;

use crate::body_kind::BodyKind;
use crate::feature::{FeatureKind, SurfaceFeature, generate_features, stamp_feature};
use crate::noise_field::{NoiseField, Octave};
use crate::seed::DeterministicRandom;
use crate::surface::{SurfaceCell, SurfaceGrid, clamp_channel};

/// Default texture resolution per body.
pub const DEFAULT_RESOLUTION: usize = 64;
/// Smallest resolution that still leaves interior cells for lighting.
pub const MIN_RESOLUTION: usize = 8;
/// Baseline terrain height is this fraction of the normalised noise.
pub const BASE_ELEVATION_SCALE: f64 = 0.3;
/// Per-channel colour jitter: ±10% of 255.
pub const COLOR_JITTER: f64 = 25.5;

const FALLBACK_PALETTE: &[[u8; 3]] = &[[128, 128, 128]];

/// Parameters for surface synthesis.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceParams {
    /// Grid edge length in cells.
    pub resolution: usize,
    /// Coarse, medium, and fine noise layers, in cell-coordinate frequency.
    pub octaves: [Octave; 3],
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            octaves: [
                Octave::new(0.08, 0.5),
                Octave::new(0.16, 0.3),
                Octave::new(0.32, 0.2),
            ],
        }
    }
}

impl SurfaceParams {
    pub fn with_resolution(resolution: usize) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }
}

/// Output of one synthesis pass.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedSurface {
    pub grid: SurfaceGrid,
    /// Every feature stamped, in stamping order.
    pub features: Vec<SurfaceFeature>,
}

impl GeneratedSurface {
    /// Features that keep animating after generation.
    pub fn animated_features(&self) -> impl Iterator<Item = &SurfaceFeature> {
        self.features.iter().filter(|f| f.kind.is_animated())
    }
}

/// Builds a body's surface grid from a palette and a seeded stream.
#[derive(Clone, Debug, Default)]
pub struct SurfaceSynthesizer {
    params: SurfaceParams,
}

impl SurfaceSynthesizer {
    pub fn new(params: SurfaceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    /// Synthesize a surface using the palettes and feature table of `kind`.
    ///
    /// The palette is chosen from the kind's candidates with the same stream,
    /// so a given seed always picks the same one.
    pub fn synthesize(&self, kind: BodyKind, rng: &mut DeterministicRandom) -> GeneratedSurface {
        let palette = rng
            .choose(kind.palettes())
            .copied()
            .unwrap_or(FALLBACK_PALETTE);
        let surface = self.synthesize_with(palette, kind.feature_kinds(), rng);
        debug!(
            %kind,
            resolution = self.params.resolution,
            features = surface.features.len(),
            "synthesized surface"
        );
        surface
    }

    /// Synthesize with an explicit palette (4–7 anchors, lowest first) and
    /// weighted feature table.
    pub fn synthesize_with(
        &self,
        palette: &[[u8; 3]],
        kinds: &[FeatureKind],
        rng: &mut DeterministicRandom,
    ) -> GeneratedSurface {
        let palette = if palette.is_empty() {
            FALLBACK_PALETTE
        } else {
            palette
        };

        let mut grid = self.base_field(palette, rng);
        let features = generate_features(kinds, self.params.resolution, rng);
        for feature in &features {
            stamp_feature(&mut grid, feature);
        }

        GeneratedSurface { grid, features }
    }

    fn base_field(&self, palette: &[[u8; 3]], rng: &mut DeterministicRandom) -> SurfaceGrid {
        let resolution = self.params.resolution;
        let octaves = &self.params.octaves;
        let noise = NoiseField::new(rng.next_u64());
        let amplitude = match NoiseField::max_amplitude(octaves) {
            a if a > 0.0 => a,
            _ => 1.0,
        };
        let top = palette.len() - 1;

        let mut grid = SurfaceGrid::new(resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                if !grid.is_on_sphere(x, y) {
                    continue;
                }

                let raw = noise.fbm(x as f64, y as f64, octaves);
                let normalized = ((raw / amplitude + 1.0) * 0.5).clamp(0.0, 1.0);
                let index = ((normalized * top as f64).floor() as usize).min(top);
                let color = palette[index].map(|c| {
                    clamp_channel(f64::from(c) + rng.next_float(-COLOR_JITTER, COLOR_JITTER))
                });

                if let Some(cell) = grid.get_mut(x, y) {
                    *cell = SurfaceCell {
                        color,
                        elevation: BASE_ELEVATION_SCALE * normalized,
                    };
                }
            }
        }
        grid
    }
}
