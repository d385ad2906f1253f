//! Typed errors for configuration, validation and allocation.
//!
//! Every check runs before any particle memory is touched, so a returned
//! error always means no computation was started.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building or running a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// Particle count was negative (it arrives signed from the CLI and YAML)
    #[error("particle count must be >= 0, got {0}")]
    InvalidParticleCount(i64),

    /// Timestep was zero, negative or not finite
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    /// Tile size was zero
    #[error("tile size must be > 0, got {0}")]
    InvalidTileSize(usize),

    /// Softening was negative or not finite
    #[error("softening eps2 must be >= 0 and finite, got {0}")]
    InvalidSoftening(f64),

    /// Gravitational constant was not finite
    #[error("gravitational constant must be finite, got {0}")]
    InvalidGravitationalConstant(f64),

    /// xorshift64* never leaves the all-zero state
    #[error("seed must be non-zero")]
    InvalidSeed,

    /// An explicit body in a scenario file was malformed
    #[error("body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },

    /// Particle arrays could not be allocated
    #[error("allocation of {n} particles failed: {source}")]
    Allocation {
        n: usize,
        #[source]
        source: TryReserveError,
    },

    /// Scenario file could not be read
    #[error("failed to read scenario {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario file was not valid YAML for the scenario schema
    #[error("failed to parse scenario: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

impl SimError {
    /// True for failures of the particle allocation itself
    pub fn is_allocation(&self) -> bool {
        matches!(self, SimError::Allocation { .. })
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
