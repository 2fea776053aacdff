//! The celestial body aggregate: generated grids, animated features, spin,
//! and an optional orbit.

use glam::DVec2;
use orbis_lighting::{LightingEngine, LightingParams, NormalCell, NormalGrid, ShadowGrid};
use orbis_orbit::{OrbitParams, OrbitSnapshot, OrbitalState, wrap_angle};
use orbis_terrain::{
    AnimatedFeature, BodyKind, DEFAULT_RESOLUTION, DeterministicRandom, MIN_RESOLUTION,
    SurfaceCell, SurfaceGrid, SurfaceParams, SurfaceSynthesizer,
};
use rand::Rng;
use tracing::{debug, trace};

use crate::appearance::Appearance;
use crate::error::BodyError;

/// Spin speed range in radians per second.
const ROTATION_SPEED: (f64, f64) = (0.05, 0.5);

/// Who a body is: the inputs its surface is derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyIdentity {
    pub name: String,
    pub kind: BodyKind,
    pub mass: f64,
    pub base_color: [u8; 3],
}

impl BodyIdentity {
    /// Identity with the base colour taken from the middle anchor of the
    /// kind's first palette.
    pub fn new(name: impl Into<String>, kind: BodyKind, mass: f64) -> Self {
        let base_color = kind
            .palettes()
            .first()
            .and_then(|p| p.get(p.len() / 2))
            .copied()
            .unwrap_or([128, 128, 128]);
        Self {
            name: name.into(),
            kind,
            mass,
            base_color,
        }
    }

    pub fn with_base_color(mut self, base_color: [u8; 3]) -> Self {
        self.base_color = base_color;
        self
    }

    fn validate(&self) -> Result<(), BodyError> {
        if self.name.trim().is_empty() {
            return Err(BodyError::EmptyName);
        }
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(BodyError::InvalidMass(self.mass));
        }
        Ok(())
    }
}

/// Generation and motion settings shared by every body in a system.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySettings {
    pub resolution: usize,
    /// Shading model applied to every body kind.
    pub lighting: LightingParams,
    pub orbit: OrbitParams,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            lighting: LightingParams::default(),
            orbit: OrbitParams::default(),
        }
    }
}

/// A star, planet, moon or asteroid.
///
/// Grids and features are generated once from the body's name and never
/// regenerated. `enter_orbit`, `restore_orbit`, `follow_parent` and `update`
/// are the only mutating operations.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    identity: BodyIdentity,
    seed: u64,
    surface: SurfaceGrid,
    normals: NormalGrid,
    shadows: ShadowGrid,
    features: Vec<AnimatedFeature>,
    appearance: Appearance,
    rotation: f64,
    rotation_speed: f64,
    position: DVec2,
    orbit: Option<OrbitalState>,
    orbit_params: OrbitParams,
}

impl CelestialBody {
    /// Build a stationary body at `position`, drawing cosmetics from the
    /// thread-local generator.
    pub fn new(
        identity: BodyIdentity,
        position: DVec2,
        settings: &BodySettings,
    ) -> Result<Self, BodyError> {
        Self::new_with_cosmetic_rng(identity, position, settings, &mut rand::rng())
    }

    /// Build a body with an explicit generator for cosmetic choices. The
    /// surface, features and spin never read from `cosmetic_rng`.
    pub fn new_with_cosmetic_rng<R: Rng + ?Sized>(
        identity: BodyIdentity,
        position: DVec2,
        settings: &BodySettings,
        cosmetic_rng: &mut R,
    ) -> Result<Self, BodyError> {
        identity.validate()?;
        if settings.resolution < MIN_RESOLUTION {
            return Err(BodyError::InvalidResolution {
                resolution: settings.resolution,
                min: MIN_RESOLUTION,
            });
        }

        let mut rng = DeterministicRandom::from_name(&identity.name);
        let seed = rng.state();

        let synthesizer =
            SurfaceSynthesizer::new(SurfaceParams::with_resolution(settings.resolution));
        let generated = synthesizer.synthesize(identity.kind, &mut rng);
        let features: Vec<AnimatedFeature> = generated
            .animated_features()
            .map(|f| AnimatedFeature::new(*f, &mut rng))
            .collect();
        let rotation_speed = rng.next_float(ROTATION_SPEED.0, ROTATION_SPEED.1);

        let mut surface = generated.grid;
        let lit = LightingEngine::new(settings.lighting.clone()).apply(&mut surface);
        let appearance = Appearance::generate(identity.kind, identity.base_color, cosmetic_rng);

        debug!(
            name = %identity.name,
            kind = %identity.kind,
            seed,
            stamped = generated.features.len(),
            animated = features.len(),
            "generated body"
        );

        Ok(Self {
            identity,
            seed,
            surface,
            normals: lit.normals,
            shadows: lit.shadows,
            features,
            appearance,
            rotation: 0.0,
            rotation_speed,
            position,
            orbit: None,
            orbit_params: settings.orbit,
        })
    }

    /// Start orbiting a parent. Replaces any previous orbit.
    pub fn enter_orbit(
        &mut self,
        parent_position: DVec2,
        periapsis: f64,
        parent_mass: f64,
        start_angle: f64,
        eccentricity: f64,
    ) {
        let orbit = OrbitalState::enter(
            parent_position,
            periapsis,
            parent_mass,
            start_angle,
            eccentricity,
            &self.orbit_params,
        );
        self.position = orbit.position();
        self.orbit = Some(orbit);
    }

    /// Rebuild the orbit from saved scalars.
    pub fn restore_orbit(&mut self, snapshot: &OrbitSnapshot, parent_position: DVec2) {
        let orbit = OrbitalState::restore(snapshot, parent_position, &self.orbit_params);
        self.position = orbit.position();
        self.orbit = Some(orbit);
    }

    /// Move the orbit's focus to the parent's latest position. No-op for a
    /// body without an orbit.
    pub fn follow_parent(&mut self, parent_position: DVec2) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.set_parent_position(parent_position);
            self.position = orbit.position();
        }
    }

    /// Advance spin, animated features, and the orbit if there is one.
    pub fn update(&mut self, dt: f64) {
        self.rotation = wrap_angle(self.rotation + self.rotation_speed * dt);
        for feature in &mut self.features {
            feature.advance(dt);
        }
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.advance(dt);
            self.position = orbit.position();
        }
        trace!(name = %self.identity.name, x = self.position.x, y = self.position.y, "body tick");
    }

    pub fn identity(&self) -> &BodyIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn kind(&self) -> BodyKind {
        self.identity.kind
    }

    pub fn mass(&self) -> f64 {
        self.identity.mass
    }

    /// Seed derived from the name; identical names give identical surfaces.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Accumulated spin angle in `[0, 2π)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    pub fn orbit(&self) -> Option<&OrbitalState> {
        self.orbit.as_ref()
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn animated_features(&self) -> &[AnimatedFeature] {
        &self.features
    }

    pub fn surface(&self) -> &SurfaceGrid {
        &self.surface
    }

    pub fn normals(&self) -> &NormalGrid {
        &self.normals
    }

    pub fn shadows(&self) -> &ShadowGrid {
        &self.shadows
    }

    pub fn resolution(&self) -> usize {
        self.surface.resolution()
    }

    pub fn surface_cell(&self, x: usize, y: usize) -> Option<&SurfaceCell> {
        self.surface.get(x, y)
    }

    pub fn normal_cell(&self, x: usize, y: usize) -> Option<&NormalCell> {
        self.normals.get(x, y)
    }

    pub fn shadow_cell(&self, x: usize, y: usize) -> Option<f32> {
        self.shadows.get(x, y)
    }

    /// `true` if the cell is on the sphere and faces the viewer.
    pub fn is_cell_visible(&self, x: usize, y: usize) -> bool {
        self.surface.is_on_sphere(x, y) && self.normals.get(x, y).is_some_and(|n| n.faces_viewer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::TAU;

    fn small_settings() -> BodySettings {
        BodySettings {
            resolution: 32,
            ..BodySettings::default()
        }
    }

    fn body(name: &str, kind: BodyKind) -> CelestialBody {
        let mut cosmetic = ChaCha8Rng::seed_from_u64(0);
        CelestialBody::new_with_cosmetic_rng(
            BodyIdentity::new(name, kind, 10.0),
            DVec2::ZERO,
            &small_settings(),
            &mut cosmetic,
        )
        .unwrap()
    }

    #[test]
    fn test_same_name_same_surface() {
        let a = body("Kepler", BodyKind::Planet);
        let b = body("Kepler", BodyKind::Planet);
        assert_eq!(a.surface(), b.surface());
        assert_eq!(a.normals(), b.normals());
        assert_eq!(a.shadows(), b.shadows());
        assert_eq!(a.rotation_speed(), b.rotation_speed());
        assert_eq!(a.seed(), b.seed());
    }

    #[test]
    fn test_cosmetic_rng_does_not_touch_surface() {
        let settings = small_settings();
        let identity = BodyIdentity::new("Gaia", BodyKind::Planet, 5.0);
        let a = CelestialBody::new_with_cosmetic_rng(
            identity.clone(),
            DVec2::ZERO,
            &settings,
            &mut ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap();
        let b = CelestialBody::new(identity, DVec2::ZERO, &settings).unwrap();
        assert_eq!(a.surface().content_hash(), b.surface().content_hash());
        assert_eq!(a.rotation_speed(), b.rotation_speed());
    }

    #[test]
    fn test_different_names_differ() {
        let a = body("Alpha", BodyKind::Moon);
        let b = body("Beta", BodyKind::Moon);
        assert_ne!(a.surface().content_hash(), b.surface().content_hash());
    }

    #[test]
    fn test_invalid_identity_rejected() {
        let settings = small_settings();
        let empty = CelestialBody::new(
            BodyIdentity::new("  ", BodyKind::Moon, 1.0),
            DVec2::ZERO,
            &settings,
        );
        assert!(matches!(empty, Err(BodyError::EmptyName)));

        let heavy = CelestialBody::new(
            BodyIdentity::new("Bad", BodyKind::Moon, f64::NAN),
            DVec2::ZERO,
            &settings,
        );
        assert!(matches!(heavy, Err(BodyError::InvalidMass(_))));

        let tiny = BodySettings {
            resolution: 4,
            ..BodySettings::default()
        };
        let small = CelestialBody::new(
            BodyIdentity::new("Small", BodyKind::Moon, 1.0),
            DVec2::ZERO,
            &tiny,
        );
        assert_eq!(
            small.err(),
            Some(BodyError::InvalidResolution {
                resolution: 4,
                min: MIN_RESOLUTION
            })
        );
    }

    #[test]
    fn test_no_orbit_update_keeps_position() {
        let mut star = body("Sol", BodyKind::Star);
        let start = star.position();
        let spin_before = star.rotation();
        for _ in 0..200 {
            star.update(0.1);
        }
        assert_eq!(star.position(), start);
        assert_ne!(star.rotation(), spin_before);
        star.follow_parent(DVec2::new(5.0, 5.0));
        assert_eq!(star.position(), start);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut moon = body("Luna", BodyKind::Moon);
        for _ in 0..10_000 {
            moon.update(0.5);
            assert!((0.0..TAU).contains(&moon.rotation()));
        }
    }

    #[test]
    fn test_enter_orbit_moves_body() {
        let mut planet = body("Terra", BodyKind::Planet);
        planet.enter_orbit(DVec2::new(10.0, 0.0), 100.0, 1000.0, 0.0, 0.1);
        assert!((planet.position() - DVec2::new(110.0, 0.0)).length() < 1e-9);
        let before = planet.position();
        planet.update(1.0);
        assert_ne!(planet.position(), before);
        let distance = (planet.position() - DVec2::new(10.0, 0.0)).length();
        let radius = planet.orbit().map_or(0.0, |o| o.radius());
        assert!((distance - radius).abs() < 1e-9);
    }

    #[test]
    fn test_star_features_pulse() {
        let found = ["Sol", "Vega", "Rigel", "Deneb", "Altair", "Spica", "Antares", "Mira"]
            .into_iter()
            .map(|name| body(name, BodyKind::Star))
            .find(|star| !star.animated_features().is_empty());
        let Some(mut star) = found else {
            panic!("no star retained an animated feature");
        };
        let before: Vec<f64> = star
            .animated_features()
            .iter()
            .map(|f| f.current_intensity())
            .collect();
        let surface_before = star.surface().clone();
        star.update(0.3);
        let after: Vec<f64> = star
            .animated_features()
            .iter()
            .map(|f| f.current_intensity())
            .collect();
        assert_ne!(before, after);
        assert_eq!(star.surface(), &surface_before, "grids are never regenerated");
        for f in star.animated_features() {
            let i = f.current_intensity();
            assert!(i >= 0.5 * f.feature.intensity - 1e-12 && i <= f.feature.intensity + 1e-12);
        }
    }

    #[test]
    fn test_cell_accessors() {
        let planet = body("Ceres", BodyKind::Planet);
        let res = planet.resolution();
        assert_eq!(res, 32);
        assert!(planet.surface_cell(res / 2, res / 2).is_some());
        assert!(planet.surface_cell(res, 0).is_none());
        assert!(planet.is_cell_visible(res / 2, res / 2));
        assert!(!planet.is_cell_visible(0, 0));
        assert!(!planet.is_cell_visible(0, res / 2), "limb faces away");
        let shadow = planet.shadow_cell(res / 2, res / 2).unwrap_or(-1.0);
        assert!((0.0..=1.0).contains(&shadow));
        assert!(planet.normal_cell(res / 2, res / 2).is_some_and(|n| n.z > 0.9));
    }

    #[test]
    fn test_star_shading_matches_planet_model() {
        let star = body("Sun", BodyKind::Star);
        let engine = LightingEngine::new(small_settings().lighting);
        let res = star.resolution();
        for (x, y) in [(res / 2, res / 2), (res / 4, res / 2), (3 * res / 4, res / 2)] {
            let Some(normal) = star.normal_cell(x, y) else {
                panic!("cell ({x}, {y}) has no normal");
            };
            let expected = engine.light_factor(normal.as_dvec3()) as f32;
            assert_eq!(star.shadow_cell(x, y), Some(expected));
        }
        let c = res / 2;
        // Facing the viewer, nx is near 0, so the terminator caps light near 0.3.
        let centre = star.shadow_cell(c, c).unwrap_or(1.0);
        assert!(centre < 0.5, "star centre shadow {centre}");
    }
}
