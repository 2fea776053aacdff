//! Body and system construction errors.

/// Errors raised while building bodies or wiring them into a system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BodyError {
    /// Names seed the surface, so an empty one is rejected.
    #[error("body name must not be empty")]
    EmptyName,

    #[error("body mass must be finite and non-negative, got {0}")]
    InvalidMass(f64),

    #[error("surface resolution {resolution} is below the minimum of {min}")]
    InvalidResolution { resolution: usize, min: usize },

    #[error("unknown parent body `{0}`")]
    UnknownParent(String),

    #[error("a body named `{0}` already exists")]
    DuplicateName(String),

    /// A saved orbit does not match the system it is restored into.
    #[error("saved orbit for `{body}` does not match the system: {reason}")]
    SnapshotMismatch { body: String, reason: String },
}
