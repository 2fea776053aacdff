//! Seeded star-system generation: one star, planets with moons, and an
//! asteroid belt beyond the outermost planet.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::body::{BodyIdentity, BodySettings};
use crate::error::BodyError;
use crate::system::{OrbitSpec, StarSystem};
use orbis_terrain::BodyKind;

const STAR_NAMES: &[&str] = &[
    "Achernar", "Bellatrix", "Canopus", "Diphda", "Electra", "Fomalhaut", "Gienah", "Hadar",
    "Izar", "Kochab", "Lesath", "Mirfak", "Nunki", "Okul", "Pollux", "Rigel", "Sabik", "Tureis",
];

const MOON_NUMERALS: &[&str] = &["I", "II", "III"];
const MAX_MOONS: usize = 3;

/// Builds a deterministic [`StarSystem`] from a seed.
pub struct SystemGenerator {
    seed: u64,
    planet_count: u32,
    settings: BodySettings,
}

impl SystemGenerator {
    pub fn new(seed: u64, planet_count: u32) -> Self {
        Self {
            seed,
            planet_count,
            settings: BodySettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: BodySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Generate the system. Identical seeds give identical names, surfaces
    /// and orbits.
    pub fn generate(&self) -> Result<StarSystem, BodyError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut system = StarSystem::new(self.settings.clone());

        let base = STAR_NAMES[rng.random_range(0..STAR_NAMES.len())];
        let star_name = format!("{base}-{}", rng.random_range(100..1000));
        let star = system.add_body(
            BodyIdentity::new(star_name.clone(), BodyKind::Star, rng.random_range(800.0..1500.0)),
            DVec2::ZERO,
        )?;

        let mut periapsis = 0.0;
        let mut moons = 0;
        for i in 0..self.planet_count {
            periapsis += rng.random_range(180.0..260.0);
            let name = format!("{star_name} {}", planet_letter(i));
            let planet = system.add_orbiting(
                BodyIdentity::new(name.clone(), BodyKind::Planet, rng.random_range(5.0..60.0)),
                star,
                OrbitSpec {
                    periapsis,
                    start_angle: rng.random_range(0.0..TAU),
                    eccentricity: rng.random_range(0.0..0.3),
                },
            )?;

            let moon_count = rng.random_range(0..=MAX_MOONS);
            for (j, numeral) in MOON_NUMERALS.iter().enumerate().take(moon_count) {
                system.add_orbiting(
                    BodyIdentity::new(
                        format!("{name} {numeral}"),
                        BodyKind::Moon,
                        rng.random_range(0.1..1.0),
                    ),
                    planet,
                    OrbitSpec {
                        periapsis: 20.0 + 15.0 * j as f64 + rng.random_range(0.0..10.0),
                        start_angle: rng.random_range(0.0..TAU),
                        eccentricity: rng.random_range(0.0..0.1),
                    },
                )?;
                moons += 1;
            }
        }

        let belt = periapsis + 150.0;
        let asteroid_count = rng.random_range(4..=8);
        for k in 0..asteroid_count {
            system.add_orbiting(
                BodyIdentity::new(
                    format!("{star_name} A-{}", k + 1),
                    BodyKind::Asteroid,
                    rng.random_range(0.01..0.1),
                ),
                star,
                OrbitSpec {
                    periapsis: belt + rng.random_range(-30.0..30.0),
                    start_angle: rng.random_range(0.0..TAU),
                    eccentricity: rng.random_range(0.0..0.2),
                },
            )?;
        }

        info!(
            seed = self.seed,
            star = %star_name,
            planets = self.planet_count,
            moons,
            asteroids = asteroid_count,
            "generated star system"
        );
        Ok(system)
    }
}

/// Exoplanet-style designation: b, c, d, ... then b2, c2, ...
fn planet_letter(index: u32) -> String {
    let letter = char::from(b'b' + (index % 25) as u8);
    match index / 25 {
        0 => letter.to_string(),
        round => format!("{letter}{}", round + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_letters_unique() {
        let letters: Vec<String> = (0..60).map(planet_letter).collect();
        assert_eq!(letters[0], "b");
        assert_eq!(letters[24], "z");
        assert_eq!(letters[25], "b2");
        let mut sorted = letters.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), letters.len());
    }

    #[test]
    fn test_generated_kinds() {
        let settings = BodySettings {
            resolution: 16,
            ..BodySettings::default()
        };
        let system = SystemGenerator::new(7, 3).with_settings(settings).generate().unwrap();
        let kinds: Vec<BodyKind> = system.bodies().map(|(_, b)| b.kind()).collect();
        assert_eq!(kinds[0], BodyKind::Star);
        assert_eq!(kinds.iter().filter(|k| **k == BodyKind::Star).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == BodyKind::Planet).count(), 3);
        let asteroids = kinds.iter().filter(|k| **k == BodyKind::Asteroid).count();
        assert!((4..=8).contains(&asteroids));
    }
}
