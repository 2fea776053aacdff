//! Command-line argument parsing for the simulation binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orbis command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orbis-sim", about = "Procedural star system simulation")]
pub struct CliArgs {
    /// System seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of planets around the star.
    #[arg(long)]
    pub planets: Option<u32>,

    /// Simulation ticks to run.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Surface texture resolution per body.
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Orbit time multiplier.
    #[arg(long)]
    pub time_scale: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write body textures as PNG into this directory.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.simulation.seed = seed;
        }
        if let Some(planets) = args.planets {
            self.simulation.planet_count = planets;
        }
        if let Some(ticks) = args.ticks {
            self.simulation.ticks = ticks;
        }
        if let Some(resolution) = args.resolution {
            self.surface.resolution = resolution;
        }
        if let Some(scale) = args.time_scale {
            self.orbit.time_scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.export_dir {
            self.debug.export_textures = true;
            self.debug.export_dir = dir.clone();
        }
    }
}
