//! Procedural body surfaces: seeded randomness, gradient noise, palette
//! mapping, and feature stamping over a fixed-resolution texture grid.

mod body_kind;
mod feature;
mod noise_field;
mod seed;
mod surface;
mod synthesizer;

pub mod debug_viz;

pub use body_kind::{BodyKind, Palette};
pub use feature::{
    AnimatedFeature, FeatureKind, MAX_FEATURE_SIZE, MAX_FEATURES, MIN_FEATURE_SIZE, MIN_FEATURES,
    StampEffect, SurfaceFeature, generate_features, stamp_feature,
};
pub use noise_field::{NoiseField, Octave, fade, gradient_noise};
pub use seed::{DeterministicRandom, name_seed};
pub use surface::{MAX_ELEVATION, MIN_ELEVATION, SurfaceCell, SurfaceGrid, clamp_channel};
pub use synthesizer::{
    BASE_ELEVATION_SCALE, COLOR_JITTER, DEFAULT_RESOLUTION, GeneratedSurface, MIN_RESOLUTION,
    SurfaceParams, SurfaceSynthesizer,
};
