//! Granular DEM – a 2-D discrete-element simulator for Rust.
//!
//! Circular particles interact through linear elastic contact springs. Each
//! step detects overlaps over all particle pairs, turns them into normal and
//! tangential forces, and integrates Newton's second law with semi-implicit
//! Euler. Per-particle data lives in aligned arrays owned by a
//! [`SimulationState`], which a [`Simulation`] drives through the pipeline.

pub mod collision;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod dynamics;
pub mod error;
pub mod scenario;
pub mod utils;
pub mod world;

pub use glam::DVec2;

pub use collision::{
    contact::{Contact, ContactBuffer},
    detector::ContactDetector,
    pairs::{pair_at, pair_index, pairs, size_triangular_matrix},
};
pub use config::{SimulationConfig, TOLERANCE};
pub use core::{
    soa::{ParticleSnapshot, SimulationState},
    types::{Particle, ParticleProperties, Vector},
};
pub use diagnostics::{DiagnosticTrigger, DumpReport, NonFiniteState, ParticleAtStep};
pub use dynamics::{
    forces::{
        BodyForce, ContactForce, ContactForceModel, ForceRegistry, GravityForce,
        StiffnessCombination, TangentialModel,
    },
    integrator::{
        compute_acceleration, compute_displacement, compute_velocity, displace_particles,
        Integrator,
    },
};
pub use error::{Error, Result};
pub use scenario::{ParticleConfig, ScenarioConfig};
pub use world::{RunSummary, Simulation, StepOutcome, StepStage};
