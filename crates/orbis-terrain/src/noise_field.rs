//! Coherent 2D gradient noise and weighted multi-octave composition.
//!
//! Lattice gradients are picked by an integer avalanche hash of the cell
//! coordinates and seed, so the field never depends on memory layout,
//! iteration order, or platform floating-point quirks in the hash.

use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use noise::{NoiseFn, ScalePoint};

/// Unit gradients: four axis directions plus four diagonals.
const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Integer mixing of a lattice corner and seed into 32 well-distributed bits.
#[inline]
fn lattice_hash(ix: i32, iy: i32, seed: u32) -> u32 {
    let mut h = seed.wrapping_mul(0x9E37_79B9)
        ^ (ix as u32).wrapping_mul(0x85EB_CA6B)
        ^ (iy as u32).wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    h
}

/// Quintic fade curve `t³(t(6t − 15) + 10)`: zero first and second
/// derivative at both ends, which hides the lattice.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
fn corner(ix: i32, iy: i32, seed: u32, dx: f64, dy: f64) -> f64 {
    let (gx, gy) = GRADIENTS[(lattice_hash(ix, iy, seed) & 7) as usize];
    gx * dx + gy * dy
}

/// Sample 2D gradient noise at `(x, y)` for the given seed.
///
/// Continuous, smooth, and deterministic in all three inputs. The result is
/// roughly in `[-1, 1]` and clamped to that range. Integer lattice points
/// always sample to zero.
pub fn gradient_noise(x: f64, y: f64, seed: u32) -> f64 {
    let x0 = x.floor();
    let y0 = y.floor();
    let ix = x0 as i32;
    let iy = y0 as i32;
    let fx = x - x0;
    let fy = y - y0;

    let n00 = corner(ix, iy, seed, fx, fy);
    let n10 = corner(ix.wrapping_add(1), iy, seed, fx - 1.0, fy);
    let n01 = corner(ix, iy.wrapping_add(1), seed, fx, fy - 1.0);
    let n11 = corner(
        ix.wrapping_add(1),
        iy.wrapping_add(1),
        seed,
        fx - 1.0,
        fy - 1.0,
    );

    let u = fade(fx);
    let v = fade(fy);
    let bottom = lerp(n00, n10, u);
    let top = lerp(n01, n11, u);

    // Unit gradients peak at ±√2/2; rescale to fill [-1, 1].
    (lerp(bottom, top, v) * SQRT_2).clamp(-1.0, 1.0)
}

/// One layer of a multi-octave sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    /// Spatial frequency multiplier applied to the input coordinates.
    pub frequency: f64,
    /// Weight of this layer in the sum.
    pub weight: f64,
}

impl Octave {
    pub const fn new(frequency: f64, weight: f64) -> Self {
        Self { frequency, weight }
    }
}

/// A seeded gradient-noise field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseField {
    seed: u32,
}

impl NoiseField {
    /// Create a field from a 64-bit seed (folded to 32 bits).
    pub fn new(seed: u64) -> Self {
        Self {
            seed: (seed ^ (seed >> 32)) as u32,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        gradient_noise(x, y, self.seed)
    }

    /// Weighted sum of octaves at `(x, y)`.
    ///
    /// Octave `i` samples with seed `seed + i` so layers are decorrelated
    /// even where their lattices coincide. The caller picks frequencies and
    /// weights per use site; the result lies within
    /// `±`[`max_amplitude`](Self::max_amplitude).
    pub fn fbm(&self, x: f64, y: f64, octaves: &[Octave]) -> f64 {
        octaves
            .iter()
            .enumerate()
            .map(|(i, octave)| {
                let layer = ScalePoint::new(self.octave_layer(i)).set_scale(octave.frequency);
                layer.get([x, y]) * octave.weight
            })
            .sum()
    }

    fn octave_layer(&self, index: usize) -> Self {
        Self {
            seed: self.seed.wrapping_add(index as u32),
        }
    }

    /// Largest absolute value [`fbm`](Self::fbm) can return for `octaves`.
    pub fn max_amplitude(octaves: &[Octave]) -> f64 {
        octaves.iter().map(|o| o.weight.abs()).sum()
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_noise_deterministic() {
        for i in 0..200 {
            let x = i as f64 * 0.37;
            let y = i as f64 * -0.91;
            assert_eq!(
                gradient_noise(x, y, 42).to_bits(),
                gradient_noise(x, y, 42).to_bits(),
                "noise must be a pure function of (x, y, seed)"
            );
        }
    }

    #[test]
    fn test_noise_within_range() {
        for i in 0..100 {
            for j in 0..100 {
                let v = gradient_noise(i as f64 * 0.173, j as f64 * 0.219, 9);
                assert!((-1.0..=1.0).contains(&v), "value {v} outside [-1, 1]");
            }
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        for ix in -5..5 {
            for iy in -5..5 {
                let v = gradient_noise(ix as f64, iy as f64, 123);
                assert!(v.abs() < 1e-12, "lattice point ({ix}, {iy}) sampled {v}");
            }
        }
    }

    #[test]
    fn test_continuity_bounded_by_distance() {
        let step = 1e-3;
        let max_slope = 20.0;
        for i in 0..20_000 {
            let x = i as f64 * 0.000_97 - 3.0;
            let y = 1.7 + i as f64 * 0.000_31;
            let a = gradient_noise(x, y, 77);
            let b = gradient_noise(x + step, y, 77);
            let c = gradient_noise(x, y + step, 77);
            assert!(
                (a - b).abs() < max_slope * step,
                "discontinuity in x at ({x}, {y}): {a} vs {b}"
            );
            assert!(
                (a - c).abs() < max_slope * step,
                "discontinuity in y at ({x}, {y}): {a} vs {c}"
            );
        }
    }

    #[test]
    fn test_continuous_across_cell_boundaries() {
        let eps = 1e-7;
        for k in -4..4 {
            let edge = k as f64;
            for j in 0..20 {
                let y = j as f64 * 0.13 + 0.05;
                let left = gradient_noise(edge - eps, y, 5);
                let right = gradient_noise(edge + eps, y, 5);
                assert!(
                    (left - right).abs() < 1e-5,
                    "jump across x={edge}: {left} vs {right}"
                );
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let differing = (0..100)
            .filter(|&i| {
                let x = i as f64 * 0.31 + 0.5;
                let y = i as f64 * 0.17 + 0.25;
                (gradient_noise(x, y, 1) - gradient_noise(x, y, 2)).abs() > 1e-9
            })
            .count();
        assert!(differing > 50, "only {differing}/100 samples differ between seeds");
    }

    #[test]
    fn test_noise_not_constant() {
        let field = NoiseField::new(2024);
        let samples: Vec<f64> = (0..64).map(|i| field.sample(i as f64 * 0.45 + 0.1, 0.3)).collect();
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.3, "noise range too narrow: [{min}, {max}]");
    }

    #[test]
    fn test_fbm_within_max_amplitude() {
        let field = NoiseField::new(7);
        let octaves = [
            Octave::new(0.08, 0.5),
            Octave::new(0.16, 0.3),
            Octave::new(0.32, 0.2),
        ];
        let max = NoiseField::max_amplitude(&octaves);
        assert!((max - 1.0).abs() < 1e-12);
        for i in 0..64 {
            for j in 0..64 {
                let v = field.fbm(i as f64, j as f64, &octaves);
                assert!(v.abs() <= max + 1e-12, "fbm {v} exceeds {max}");
            }
        }
    }

    #[test]
    fn test_fbm_single_octave_matches_sample() {
        let field = NoiseField::new(31);
        let octaves = [Octave::new(1.0, 1.0)];
        let x = 3.3;
        let y = -1.2;
        assert_eq!(field.fbm(x, y, &octaves), field.sample(x, y));
    }

    #[test]
    fn test_noise_fn_impl_matches_sample() {
        let field = NoiseField::new(55);
        assert_eq!(field.get([0.4, 0.9]), field.sample(0.4, 0.9));
    }

    #[test]
    fn test_fbm_layers_use_offset_seeds_and_frequencies() {
        let field = NoiseField::new(2024);
        let octaves = [
            Octave { frequency: 0.05, weight: 1.0 },
            Octave { frequency: 0.13, weight: 0.5 },
            Octave { frequency: 0.41, weight: 0.25 },
        ];
        let (x, y) = (17.0, 29.0);
        let expected: f64 = octaves
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let seed = field.seed().wrapping_add(i as u32);
                gradient_noise(x * o.frequency, y * o.frequency, seed) * o.weight
            })
            .sum();
        assert_eq!(field.fbm(x, y, &octaves).to_bits(), expected.to_bits());
    }
}
