//! Surface features: seeded placement and radial-falloff stamping.
//!
//! Features are write-once stamps applied to a [`SurfaceGrid`]. Only the
//! animated kinds (sunspots, flares, prominences) outlive generation, as
//! [`AnimatedFeature`] entries owned by their body.

use std::f64::consts::TAU;

use crate::seed::DeterministicRandom;
use crate::surface::SurfaceGrid;

/// Fewest features generated per body.
pub const MIN_FEATURES: i64 = 5;
/// Most features generated per body.
pub const MAX_FEATURES: i64 = 19;
/// Smallest feature diameter in cells. Keeps the falloff radius non-zero.
pub const MIN_FEATURE_SIZE: f64 = 3.0;
/// Largest feature diameter in cells.
pub const MAX_FEATURE_SIZE: f64 = 15.0;
pub const MIN_FEATURE_INTENSITY: f64 = 0.3;
pub const MAX_FEATURE_INTENSITY: f64 = 1.0;

/// Kind of surface feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Mountain,
    Crater,
    Valley,
    Plateau,
    Rift,
    Ridge,
    Basin,
    Sunspot,
    Flare,
    Granule,
    Prominence,
    Boulder,
    Fracture,
    MetalDeposit,
}

/// Colour and elevation change applied at full strength (falloff 1,
/// intensity 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StampEffect {
    pub color: [f64; 3],
    pub elevation: f64,
}

impl FeatureKind {
    pub fn effect(self) -> StampEffect {
        let (color, elevation) = match self {
            FeatureKind::Mountain => ([40.0, 40.0, 40.0], 0.3),
            FeatureKind::Crater => ([-60.0, -60.0, -60.0], -0.2),
            FeatureKind::Valley => ([-30.0, -20.0, -30.0], -0.15),
            FeatureKind::Plateau => ([15.0, 15.0, 10.0], 0.15),
            FeatureKind::Rift => ([-45.0, -50.0, -50.0], -0.25),
            FeatureKind::Ridge => ([25.0, 25.0, 25.0], 0.2),
            FeatureKind::Basin => ([-35.0, -35.0, -30.0], -0.15),
            // Darkens toward red/orange: green and blue drop much faster.
            FeatureKind::Sunspot => ([-25.0, -90.0, -110.0], -0.05),
            FeatureKind::Flare => ([60.0, 50.0, 20.0], 0.1),
            FeatureKind::Granule => ([20.0, 20.0, 20.0], 0.02),
            FeatureKind::Prominence => ([70.0, 20.0, 0.0], 0.15),
            FeatureKind::Boulder => ([20.0, 20.0, 20.0], 0.2),
            FeatureKind::Fracture => ([-50.0, -50.0, -50.0], -0.2),
            FeatureKind::MetalDeposit => ([10.0, 20.0, 40.0], 0.05),
        };
        StampEffect { color, elevation }
    }

    /// Animated kinds keep a live entry on their body after generation.
    pub fn is_animated(self) -> bool {
        matches!(
            self,
            FeatureKind::Sunspot | FeatureKind::Flare | FeatureKind::Prominence
        )
    }
}

/// A feature placed on the surface grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceFeature {
    /// Grid column of the feature centre.
    pub center_x: usize,
    /// Grid row of the feature centre.
    pub center_y: usize,
    /// Diameter in cells, in `[MIN_FEATURE_SIZE, MAX_FEATURE_SIZE)`.
    pub size: f64,
    pub kind: FeatureKind,
    /// Strength multiplier in `[MIN_FEATURE_INTENSITY, MAX_FEATURE_INTENSITY)`.
    pub intensity: f64,
}

impl SurfaceFeature {
    /// Falloff radius in cells. Never zero since `size >= MIN_FEATURE_SIZE`.
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

/// Draw `MIN_FEATURES..=MAX_FEATURES` features for a `resolution`-sized grid.
///
/// Kinds are drawn from the weighted table `kinds`; an empty table yields no
/// features.
pub fn generate_features(
    kinds: &[FeatureKind],
    resolution: usize,
    rng: &mut DeterministicRandom,
) -> Vec<SurfaceFeature> {
    if kinds.is_empty() || resolution == 0 {
        return Vec::new();
    }

    let count = rng.next_int(MIN_FEATURES, MAX_FEATURES) as usize;
    let last = resolution as i64 - 1;
    let mut features = Vec::with_capacity(count);

    for _ in 0..count {
        let Some(&kind) = rng.choose(kinds) else {
            break;
        };
        let center_x = rng.next_int(0, last) as usize;
        let center_y = rng.next_int(0, last) as usize;
        let size = rng.next_float(MIN_FEATURE_SIZE, MAX_FEATURE_SIZE);
        let intensity = rng.next_float(MIN_FEATURE_INTENSITY, MAX_FEATURE_INTENSITY);
        features.push(SurfaceFeature {
            center_x,
            center_y,
            size,
            kind,
            intensity,
        });
    }

    features
}

/// Stamp one feature onto the grid.
///
/// Every on-sphere cell within `size / 2` of the centre receives the kind's
/// [`StampEffect`] scaled by `(1 − distance / radius) × intensity`. Effects
/// from overlapping features accumulate; each cell is clamped after the stamp.
pub fn stamp_feature(grid: &mut SurfaceGrid, feature: &SurfaceFeature) {
    let radius = feature.radius();
    let effect = feature.kind.effect();
    let reach = radius.ceil() as i64;
    let cx = feature.center_x as i64;
    let cy = feature.center_y as i64;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (x, y) = (cx + dx, cy + dy);
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            if !grid.is_on_sphere(x, y) {
                continue;
            }

            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            if distance > radius {
                continue;
            }

            let strength = (1.0 - distance / radius) * feature.intensity;
            if let Some(cell) = grid.get_mut(x, y) {
                cell.add_color(effect.color.map(|c| c * strength));
                cell.add_elevation(effect.elevation * strength);
            }
        }
    }
}

/// A feature that keeps animating after generation (e.g. a pulsing sunspot).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedFeature {
    pub feature: SurfaceFeature,
    /// Pulse phase in `[0, 2π)`.
    pub phase: f64,
    /// Phase advance in radians per second.
    pub speed: f64,
}

impl AnimatedFeature {
    /// Wrap a stamped feature, drawing its starting phase and pulse speed
    /// from the body's seeded stream.
    pub fn new(feature: SurfaceFeature, rng: &mut DeterministicRandom) -> Self {
        Self {
            feature,
            phase: rng.next_float(0.0, TAU),
            speed: rng.next_float(0.5, 2.0),
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.phase = (self.phase + self.speed * dt).rem_euclid(TAU);
    }

    /// Intensity pulsing between 50% and 100% of the generated intensity.
    pub fn current_intensity(&self) -> f64 {
        self.feature.intensity * (0.75 + 0.25 * self.phase.sin())
    }
}
