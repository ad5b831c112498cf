use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the simulation pipeline and its setup.
///
/// Numeric precondition failures are reported by the stage that owns the
/// precondition; a failing stage aborts the whole step.
#[derive(Debug, Error)]
pub enum Error {
    /// A per-particle property is outside its physical domain (e.g. mass <= 0).
    #[error("invalid property `{field}` for particle {index}: {value}")]
    InvalidProperty {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// The integration timestep must be finite and strictly positive.
    #[error("invalid timestep: {0} (must be > 0)")]
    InvalidTimestep(f64),

    /// Two parallel arrays that must share an index space have different lengths.
    #[error("array `{array}` has length {found}, expected {expected}")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        found: usize,
    },

    /// More contacts than unordered particle pairs; indicates a detector bug.
    #[error("contact buffer capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    #[error("particle index {index} out of range (count = {count})")]
    ParticleOutOfRange { index: usize, count: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The simulation was halted by a diagnostic dump and cannot be resumed.
    #[error("simulation halted by diagnostic dump at step {step}")]
    Halted { step: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
