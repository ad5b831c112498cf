//! Core types describing particles, their properties, and the shared state arrays.

pub mod soa;
pub mod types;

pub use soa::{ParticleSnapshot, SimulationState};
pub use types::{Particle, ParticleProperties, Vector};
