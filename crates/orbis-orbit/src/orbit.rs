//! Orbital state of one body around its parent.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::kepler::{eccentric_to_true, solve_eccentric_anomaly, wrap_angle};

/// Highest eccentricity accepted; larger inputs are clamped.
pub const MAX_ECCENTRICITY: f64 = 0.95;

/// Game-scale gravitational constant. Tuned so a planet a few hundred units
/// from a star of mass ~1000 completes an orbit in minutes.
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 50.0;

/// Global orbit tuning shared by every body in a system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitParams {
    pub gravitational_constant: f64,
    /// Multiplier applied to every `dt` before advancing.
    pub time_scale: f64,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            time_scale: 1.0,
        }
    }
}

/// The scalars an external save system needs to reconstruct an orbit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitSnapshot {
    /// Name of the body being orbited.
    pub parent: String,
    pub periapsis: f64,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
    pub parent_mass: f64,
}

/// Elliptic two-body orbit around a parent position.
///
/// Invariants: `semi_major_axis = periapsis / (1 − e)`,
/// `apoapsis = semi_major_axis × (1 + e)`, and `mean_anomaly ∈ [0, 2π)`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalState {
    parent_position: DVec2,
    eccentricity: f64,
    semi_major_axis: f64,
    periapsis: f64,
    apoapsis: f64,
    mean_anomaly: f64,
    mean_motion: f64,
    parent_mass: f64,
    time_scale: f64,
    eccentric_anomaly: f64,
    position: DVec2,
}

impl OrbitalState {
    /// Enter an orbit whose periapsis lies along +x from the parent.
    ///
    /// `start_angle` is the initial mean anomaly. Out-of-range eccentricity
    /// is clamped to `[0, MAX_ECCENTRICITY]`; negative periapsis or mass are
    /// clamped to zero, which yields a stationary orbit with zero mean motion.
    pub fn enter(
        parent_position: DVec2,
        periapsis: f64,
        parent_mass: f64,
        start_angle: f64,
        eccentricity: f64,
        params: &OrbitParams,
    ) -> Self {
        let clamped = if eccentricity.is_nan() {
            0.0
        } else {
            eccentricity.clamp(0.0, MAX_ECCENTRICITY)
        };
        if clamped != eccentricity {
            warn!(eccentricity, clamped, "eccentricity out of range; clamped");
        }
        let periapsis = periapsis.max(0.0);
        let parent_mass = parent_mass.max(0.0);

        let semi_major_axis = periapsis / (1.0 - clamped);
        let apoapsis = semi_major_axis * (1.0 + clamped);
        let mean_motion = if semi_major_axis > 0.0 {
            (params.gravitational_constant * parent_mass / semi_major_axis.powi(3)).sqrt()
        } else {
            0.0
        };

        let mut state = Self {
            parent_position,
            eccentricity: clamped,
            semi_major_axis,
            periapsis,
            apoapsis,
            mean_anomaly: wrap_angle(start_angle),
            mean_motion,
            parent_mass,
            time_scale: params.time_scale,
            eccentric_anomaly: 0.0,
            position: parent_position,
        };
        state.recompute_position();
        state
    }

    /// Rebuild an orbit from a snapshot. The result moves identically to the
    /// orbit the snapshot was taken from.
    pub fn restore(snapshot: &OrbitSnapshot, parent_position: DVec2, params: &OrbitParams) -> Self {
        Self::enter(
            parent_position,
            snapshot.periapsis,
            snapshot.parent_mass,
            snapshot.mean_anomaly,
            snapshot.eccentricity,
            params,
        )
    }

    pub fn snapshot(&self, parent: impl Into<String>) -> OrbitSnapshot {
        OrbitSnapshot {
            parent: parent.into(),
            periapsis: self.periapsis,
            eccentricity: self.eccentricity,
            mean_anomaly: self.mean_anomaly,
            parent_mass: self.parent_mass,
        }
    }

    /// Advance the mean anomaly by `mean_motion × dt × time_scale` and
    /// recompute the world position.
    pub fn advance(&mut self, dt: f64) {
        let dt_scaled = dt * self.time_scale;
        self.mean_anomaly = wrap_angle(self.mean_anomaly + self.mean_motion * dt_scaled);
        self.recompute_position();
    }

    /// Move the focus, e.g. when the parent itself orbits.
    pub fn set_parent_position(&mut self, parent_position: DVec2) {
        self.parent_position = parent_position;
        self.recompute_position();
    }

    fn recompute_position(&mut self) {
        let e = self.eccentricity;
        self.eccentric_anomaly = solve_eccentric_anomaly(self.mean_anomaly, e);
        let nu = eccentric_to_true(self.eccentric_anomaly, e);
        let r = self.radius();
        self.position = self.parent_position + r * DVec2::new(nu.cos(), nu.sin());
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn parent_position(&self) -> DVec2 {
        self.parent_position
    }

    /// Current distance from the parent, `a(1 − e·cos E)`.
    pub fn radius(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentric_anomaly.cos())
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn periapsis(&self) -> f64 {
        self.periapsis
    }

    pub fn apoapsis(&self) -> f64 {
        self.apoapsis
    }

    pub fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }

    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    pub fn parent_mass(&self) -> f64 {
        self.parent_mass
    }

    pub fn eccentric_anomaly(&self) -> f64 {
        self.eccentric_anomaly
    }

    /// True anomaly in `(-π, π]`.
    pub fn true_anomaly(&self) -> f64 {
        eccentric_to_true(self.eccentric_anomaly, self.eccentricity)
    }

    /// Unscaled orbital period, or `None` for a stationary orbit.
    pub fn period(&self) -> Option<f64> {
        (self.mean_motion > 0.0).then(|| TAU / self.mean_motion)
    }
}
