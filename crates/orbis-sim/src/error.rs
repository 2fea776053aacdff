//! Top-level errors for the simulation binary.

use orbis_body::BodyError;
use orbis_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build star system: {0}")]
    Body(#[from] BodyError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),
}
