//! Headless Orbis simulation.
//!
//! Generates a seeded star system, runs it through the fixed-timestep loop,
//! logs body positions periodically and optionally exports every body's
//! textures as PNG.
//!
//! Run with: `cargo run -p orbis-sim -- --seed 7 --planets 5 --ticks 1200`

mod error;
mod export;
mod sim_loop;

use std::process::ExitCode;

use clap::Parser;
use orbis_body::{BodySettings, StarSystem, SystemGenerator};
use orbis_config::{CliArgs, Config, config_path, default_config_dir};
use orbis_lighting::{DirectionalLight, LightingParams};
use orbis_orbit::OrbitParams;
use tracing::{error, info};

use crate::error::SimError;
use crate::sim_loop::SimLoop;

/// Map loaded configuration onto body generation settings.
fn body_settings(config: &Config) -> BodySettings {
    let lighting = &config.lighting;
    BodySettings {
        resolution: config.surface.resolution,
        lighting: LightingParams {
            light: DirectionalLight::from_components(lighting.light_direction),
            ambient: lighting.ambient,
            diffuse_strength: lighting.diffuse_strength,
            bump_strength: lighting.bump_strength,
            ..LightingParams::default()
        },
        orbit: OrbitParams {
            gravitational_constant: config.orbit.gravitational_constant,
            time_scale: config.orbit.time_scale,
        },
    }
}

fn report(system: &StarSystem, tick: u64, sim_time: f64) {
    info!(tick, sim_time = format_args!("{sim_time:.2}"), "system report");
    for (_, body) in system.bodies() {
        let p = body.position();
        info!(
            body = body.name(),
            kind = %body.kind(),
            x = format_args!("{:.1}", p.x),
            y = format_args!("{:.1}", p.y),
            rotation = format_args!("{:.3}", body.rotation()),
            "body state"
        );
    }
}

/// Run the configured simulation. Returns the number of ticks executed.
fn run(config: &Config) -> Result<u64, SimError> {
    config.validate()?;

    let sim = &config.simulation;
    let mut system = SystemGenerator::new(sim.seed, sim.planet_count)
        .with_settings(body_settings(config))
        .generate()?;

    if config.debug.export_textures {
        export::export_system(&system, &config.debug.export_dir)?;
    }

    let mut sim_loop = SimLoop::new(sim.fixed_dt, sim.max_frame_time);
    while sim_loop.update_count() < sim.ticks {
        sim_loop.tick(sim.fixed_dt, |dt, _| system.update(dt));
        let tick = sim_loop.update_count();
        if sim.report_interval > 0 && tick % sim.report_interval == 0 {
            report(&system, tick, sim_loop.total_sim_time());
        }
    }

    info!(
        ticks = sim_loop.update_count(),
        bodies = system.len(),
        "simulation finished"
    );
    Ok(sim_loop.update_count())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!(
            "Failed to load {}: {e}, using defaults",
            config_path(&config_dir).display()
        );
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orbis_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(
        seed = config.simulation.seed,
        planets = config.simulation.planet_count,
        resolution = config.surface.resolution,
        "Orbis simulation starting"
    );

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
