//! Celestial bodies and the star systems that hold them.
//!
//! A [`CelestialBody`] is generated once from its name: surface, normals and
//! shadow map are baked at construction and only its spin, pulsing features
//! and orbit change afterwards. [`StarSystem`] ticks bodies parent-first.

mod appearance;
mod body;
mod error;
mod generator;
mod system;

pub use appearance::Appearance;
pub use body::{BodyIdentity, BodySettings, CelestialBody};
pub use error::BodyError;
pub use generator::SystemGenerator;
pub use system::{BodyId, OrbitSpec, SavedOrbit, StarSystem};
