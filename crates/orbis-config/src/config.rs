//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest surface resolution the lighting pass can work with.
const MIN_RESOLUTION: usize = 8;

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Surface generation settings.
    pub surface: SurfaceConfig,
    /// Baked lighting settings.
    pub lighting: LightingConfig,
    /// Orbit tuning.
    pub orbit: OrbitConfig,
    /// System generation and tick loop.
    pub simulation: SimulationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Surface generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Texture edge length in cells.
    pub resolution: usize,
}

/// Lighting model configuration, shared by every body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: f64,
    pub diffuse_strength: f64,
    /// Fraction of the elevation gradient bent into normals.
    pub bump_strength: f64,
    /// Direction toward the light; normalized on use.
    pub light_direction: [f64; 3],
}

/// Orbit configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Game-scale gravitational constant.
    pub gravitational_constant: f64,
    /// Multiplier on every tick's delta time.
    pub time_scale: f64,
}

/// System generation and tick loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub planet_count: u32,
    /// Fixed-timestep ticks to run before exiting.
    pub ticks: u64,
    /// Seconds per tick.
    pub fixed_dt: f64,
    /// Frame times above this are clamped (spiral-of-death guard).
    pub max_frame_time: f64,
    /// Log body positions every N ticks (0 = never).
    pub report_interval: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write every body's lit texture and shadow map as PNG.
    pub export_textures: bool,
    /// Directory the PNGs are written into.
    pub export_dir: PathBuf,
}

// --- Default implementations ---

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { resolution: 64 }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            diffuse_strength: 0.8,
            bump_strength: 0.1,
            light_direction: [1.0, -1.0, 1.0],
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 50.0,
            time_scale: 1.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            planet_count: 4,
            ticks: 600,
            fixed_dt: 1.0 / 60.0,
            max_frame_time: 0.25,
            report_interval: 60,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            export_textures: false,
            export_dir: PathBuf::from("textures"),
        }
    }
}

/// Platform config directory for Orbis, e.g. `~/.config/orbis` on Linux.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orbis")
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Path of the config file inside `config_dir`.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

// --- Persistence and validation ---

impl Config {
    /// Read `config.ron` from `config_dir`. When the file is absent, the
    /// defaults are written there first so the user has something to edit.
    ///
    /// Values are not validated here; CLI overrides apply first, then the
    /// caller runs [`validate`](Self::validate).
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_path(config_dir);
        if !path.exists() {
            let config = Self::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let text = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
        let config = ron::from_str::<Self>(&text).map_err(ConfigError::ParseError)?;
        log::info!(
            "Loaded config from {} (seed {}, {} planets)",
            path.display(),
            config.simulation.seed,
            config.simulation.planet_count
        );
        Ok(config)
    }

    /// Write the config as pretty RON, one section per block, creating
    /// `config_dir` if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new().depth_limit(2))
            .map_err(ConfigError::SerializeError)?;
        std::fs::write(config_path(config_dir), text).map_err(ConfigError::WriteError)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface.resolution < MIN_RESOLUTION {
            return Err(invalid(
                "surface.resolution",
                format!("{} is below {MIN_RESOLUTION}", self.surface.resolution),
            ));
        }

        let l = &self.lighting;
        for (field, value) in [
            ("lighting.ambient", l.ambient),
            ("lighting.diffuse_strength", l.diffuse_strength),
            ("lighting.bump_strength", l.bump_strength),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("{value} must be finite and >= 0")));
            }
        }
        let direction = &l.light_direction;
        if direction.iter().all(|c| *c == 0.0) || direction.iter().any(|c| !c.is_finite()) {
            return Err(invalid("lighting.light_direction", "must be a finite non-zero vector"));
        }

        let o = &self.orbit;
        if !o.gravitational_constant.is_finite() || o.gravitational_constant <= 0.0 {
            return Err(invalid("orbit.gravitational_constant", "must be finite and > 0"));
        }
        if !o.time_scale.is_finite() || o.time_scale < 0.0 {
            return Err(invalid("orbit.time_scale", "must be finite and >= 0"));
        }

        let s = &self.simulation;
        if !s.fixed_dt.is_finite() || s.fixed_dt <= 0.0 {
            return Err(invalid("simulation.fixed_dt", "must be finite and > 0"));
        }
        if !s.max_frame_time.is_finite() || s.max_frame_time < s.fixed_dt {
            return Err(invalid(
                "simulation.max_frame_time",
                format!("must be at least fixed_dt ({})", s.fixed_dt),
            ));
        }
        Ok(())
    }
}
