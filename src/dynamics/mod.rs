//! Simulation dynamics: the contact force model, body forces, and integration.

pub mod forces;
pub mod integrator;

pub use forces::{
    BodyForce, ContactForce, ContactForceModel, ForceRegistry, GravityForce, StiffnessCombination,
    TangentialModel,
};
pub use integrator::{
    compute_acceleration, compute_displacement, compute_velocity, displace_particles, Integrator,
};
