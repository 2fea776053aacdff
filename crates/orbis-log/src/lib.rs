//! Structured logging for Orbis.
//!
//! Console output with uptime and module paths, plus a JSON file layer in
//! debug builds. The filter honours `RUST_LOG` first, then the config's
//! `debug.log_level`.

use std::path::Path;

use orbis_config::Config;
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self,
        format::{Format, Json, JsonFields},
        time::Uptime,
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Generation crates are chatty at `debug`; keep them at `warn` unless asked.
pub const DEFAULT_FILTER: &str = "info,orbis_terrain=warn,orbis_lighting=warn";

/// Name of the JSON log written into `log_dir` in debug builds.
pub const LOG_FILE_NAME: &str = "orbis.log";

/// Filter string to use when `RUST_LOG` is unset.
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file (debug builds only)
/// * `debug_build` - enables the file layer
/// * `config` - optional config supplying the log level
///
/// Calling this twice panics, as with any global subscriber.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let mut file_error = None;
    let file_layer = match log_dir.filter(|_| debug_build).map(json_file_layer) {
        Some(Ok(layer)) => Some(layer),
        Some(Err(err)) => {
            file_error = Some(err);
            None
        }
        None => None,
    };
    let file_enabled = file_layer.is_some();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(err) = file_error {
        tracing::warn!(%err, "file logging disabled");
    } else if file_enabled {
        tracing::debug!("file logging enabled");
    }
}

/// Layer returned by [`json_file_layer`].
pub type JsonFileLayer<S> = fmt::Layer<S, JsonFields, Format<Json, Uptime>, std::fs::File>;

/// JSON layer writing to [`LOG_FILE_NAME`] inside `log_dir`, creating the
/// directory and truncating any previous log.
pub fn json_file_layer<S>(log_dir: &Path) -> std::io::Result<JsonFileLayer<S>> {
    std::fs::create_dir_all(log_dir)?;
    let log_file = std::fs::File::create(log_dir.join(LOG_FILE_NAME))?;
    Ok(fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json())
}

/// `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
