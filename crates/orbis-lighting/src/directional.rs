//! Directional light: the single distant light source used to bake body
//! shading.

use glam::DVec3;

/// CPU-side directional light description.
///
/// `direction` points FROM the surface TOWARD the light, in grid space
/// (x right, y down, z toward the viewer).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction toward the light.
    pub direction: DVec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            // Upper right, 45° off the view axis.
            direction: DVec3::new(1.0, -1.0, 1.0).normalize(),
        }
    }
}

impl DirectionalLight {
    /// Build a light from raw components, falling back to the default
    /// direction if they are zero or non-finite.
    pub fn from_components(components: [f64; 3]) -> Self {
        DVec3::from_array(components)
            .try_normalize()
            .map_or_else(Self::default, |direction| Self { direction })
    }
}
