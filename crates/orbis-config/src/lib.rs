//! Configuration for the Orbis simulation.
//!
//! Settings persist to disk as RON, can be overridden from the command line
//! via clap, and are checked by [`Config::validate`] before use.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, LightingConfig, OrbitConfig, SimulationConfig,
    SurfaceConfig, config_path, default_config_dir,
};
pub use error::ConfigError;
