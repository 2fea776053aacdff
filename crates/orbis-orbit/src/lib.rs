//! Two-body Keplerian motion for bodies orbiting a single parent.
//!
//! Orbits live in the 2D plane of the star system. The mean anomaly advances
//! uniformly with scaled time; position is recovered each tick by a
//! fixed-iteration Newton solve of Kepler's equation.

mod kepler;
mod orbit;

pub use kepler::{KEPLER_ITERATIONS, eccentric_to_true, solve_eccentric_anomaly, wrap_angle};
pub use orbit::{
    DEFAULT_GRAVITATIONAL_CONSTANT, MAX_ECCENTRICITY, OrbitParams, OrbitSnapshot, OrbitalState,
};
