//! Cosmetic one-off looks that are not part of a body's reproducible identity.

use orbis_terrain::BodyKind;
use rand::Rng;

/// Atmosphere tint and glow. Drawn from an unseeded generator, so two bodies
/// with the same name share a surface but may differ here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// RGBA haze drawn around the disk, if the body has an atmosphere.
    pub atmosphere: Option<[u8; 4]>,
    /// Corona radius as a multiple of the body radius; `0` for no glow.
    pub glow: f64,
}

impl Appearance {
    /// No atmosphere, no glow.
    pub const PLAIN: Self = Self {
        atmosphere: None,
        glow: 0.0,
    };

    pub fn generate<R: Rng + ?Sized>(kind: BodyKind, base_color: [u8; 3], rng: &mut R) -> Self {
        match kind {
            BodyKind::Star => Self {
                atmosphere: None,
                glow: rng.random_range(1.2..1.8),
            },
            BodyKind::Planet if rng.random_bool(0.7) => Self {
                atmosphere: Some(tint(base_color, rng, 40..120)),
                glow: 0.0,
            },
            BodyKind::Moon if rng.random_bool(0.1) => Self {
                atmosphere: Some(tint(base_color, rng, 20..50)),
                glow: 0.0,
            },
            _ => Self::PLAIN,
        }
    }
}

fn tint<R: Rng + ?Sized>(base: [u8; 3], rng: &mut R, alpha: std::ops::Range<u8>) -> [u8; 4] {
    let [r, g, b] = base.map(|c| {
        let shifted = i16::from(c) + rng.random_range(-40..=40);
        shifted.clamp(0, 255) as u8
    });
    [r, g, b, rng.random_range(alpha)]
}
