//! Force-to-kinematics integration over the particle arrays.
//!
//! Each stage is a free function over slices so it can be driven directly with
//! fixture arrays; [`Integrator`] chains them over a [`SimulationState`] using
//! semi-implicit Euler: velocity first, then position from the new velocity.

use crate::core::soa::{check_len, SimulationState};
use crate::core::types::{Particle, ParticleProperties, Vector};
use crate::error::{Error, Result};

fn check_time_step(dt: f64) -> Result<()> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidTimestep(dt))
    }
}

/// `accelerations[i] = forces[i] / properties[i].mass`.
///
/// Every mass is checked before anything is written, so a rejected call
/// leaves `accelerations` untouched.
pub fn compute_acceleration(
    properties: &[ParticleProperties],
    forces: &[Vector],
    accelerations: &mut [Vector],
) -> Result<()> {
    let count = properties.len();
    check_len("forces", count, forces.len())?;
    check_len("accelerations", count, accelerations.len())?;
    for (index, props) in properties.iter().enumerate() {
        props.validate_mass(index)?;
    }

    for ((acceleration, force), props) in accelerations.iter_mut().zip(forces).zip(properties) {
        *acceleration = *force / props.mass;
    }
    Ok(())
}

/// `new_velocities[i] = velocities[i] + accelerations[i] * dt`.
pub fn compute_velocity(
    accelerations: &[Vector],
    dt: f64,
    velocities: &[Vector],
    new_velocities: &mut [Vector],
) -> Result<()> {
    check_time_step(dt)?;
    let count = accelerations.len();
    check_len("velocities", count, velocities.len())?;
    check_len("new_velocities", count, new_velocities.len())?;

    for ((new_velocity, velocity), acceleration) in
        new_velocities.iter_mut().zip(velocities).zip(accelerations)
    {
        *new_velocity = *velocity + *acceleration * dt;
    }
    Ok(())
}

/// `displacements[i] = velocities[i] * dt`.
pub fn compute_displacement(velocities: &[Vector], dt: f64, displacements: &mut [Vector]) -> Result<()> {
    check_time_step(dt)?;
    check_len("displacements", velocities.len(), displacements.len())?;

    for (displacement, velocity) in displacements.iter_mut().zip(velocities) {
        *displacement = *velocity * dt;
    }
    Ok(())
}

/// Moves every particle centre by its displacement. Radii are untouched.
pub fn displace_particles(displacements: &[Vector], particles: &mut [Particle]) -> Result<()> {
    check_len("particles", displacements.len(), particles.len())?;

    for (particle, displacement) in particles.iter_mut().zip(displacements) {
        particle.position += *displacement;
    }
    Ok(())
}

/// Semi-implicit Euler integrator with a fixed timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    pub dt: f64,
}

impl Integrator {
    pub fn new(dt: f64) -> Result<Self> {
        check_time_step(dt)?;
        Ok(Self { dt })
    }

    pub fn accelerate(&self, state: &mut SimulationState) -> Result<()> {
        let (properties, forces, accelerations) = state.acceleration_view();
        compute_acceleration(properties, forces, accelerations)
    }

    pub fn integrate_velocity(&self, state: &mut SimulationState) -> Result<()> {
        let (accelerations, velocities, next_velocities) = state.velocity_view();
        compute_velocity(accelerations, self.dt, velocities, next_velocities)?;
        state.commit_velocities();
        Ok(())
    }

    pub fn integrate_position(&self, state: &mut SimulationState) -> Result<()> {
        let (velocities, displacements) = state.displacement_view();
        compute_displacement(velocities, self.dt, displacements)?;
        let (displacements, particles) = state.position_view();
        displace_particles(displacements, particles)
    }

    /// Runs acceleration, velocity and position updates in order.
    pub fn step(&self, state: &mut SimulationState) -> Result<()> {
        self.accelerate(state)?;
        self.integrate_velocity(state)?;
        self.integrate_position(state)
    }
}
