//! Utility helpers: stage logging and step profiling.

pub mod logging;
pub mod profiling;

pub use logging::ScopedTimer;
pub use profiling::{StageTimer, StepProfiler};
