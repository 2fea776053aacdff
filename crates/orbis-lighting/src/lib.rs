//! Baked body lighting: sphere-plus-bump normals, directional diffuse with a
//! terminator and limb darkening, and the resulting shadow map.

mod debug;
mod directional;
mod normals;
mod shading;

pub use debug::render_shadow;
pub use directional::DirectionalLight;
pub use normals::{NormalCell, NormalGrid, VISIBILITY_THRESHOLD, compute_normals, sphere_normal};
pub use shading::{LightingEngine, LightingParams, LitSurface, ShadowGrid};
