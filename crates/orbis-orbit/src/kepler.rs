//! Kepler's equation and anomaly conversions for elliptic orbits.

use std::f64::consts::TAU;

/// Newton iterations per solve. Bounded cost; no convergence loop.
pub const KEPLER_ITERATIONS: usize = 5;

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Solve `E − e·sin E = M` for the eccentric anomaly `E`.
///
/// Seeded with `E₀ = M` and run for exactly [`KEPLER_ITERATIONS`] Newton
/// steps. The denominator `1 − e·cos E` is at least `1 − e`, so `e < 1`
/// never divides by zero.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        let residual = ecc - e * ecc.sin() - mean_anomaly;
        let derivative = 1.0 - e * ecc.cos();
        ecc -= residual / derivative;
    }
    ecc
}

/// True anomaly from eccentric anomaly, in `(-π, π]`.
pub fn eccentric_to_true(eccentric_anomaly: f64, e: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}
