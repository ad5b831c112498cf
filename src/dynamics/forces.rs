use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::soa::{check_len, SimulationState};
use crate::core::types::{Particle, ParticleProperties, Vector};
use crate::error::{Error, Result};

/// Rule combining the stiffness of two particles into one contact spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StiffnessCombination {
    /// Springs in series: `k1 * k2 / (k1 + k2)`.
    #[default]
    Series,
    Average,
    Min,
    Max,
}

impl StiffnessCombination {
    pub fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            StiffnessCombination::Series => {
                let sum = a + b;
                if sum > 0.0 {
                    a * b / sum
                } else {
                    0.0
                }
            }
            StiffnessCombination::Average => 0.5 * (a + b),
            StiffnessCombination::Min => a.min(b),
            StiffnessCombination::Max => a.max(b),
        }
    }
}

/// How the tangential contact force is derived.
///
/// Contacts carry no history between steps, so the tangential spring is
/// stretched by the relative tangential displacement of the current step only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TangentialModel {
    /// `ks_eff * (relative tangential velocity) * dt`.
    #[default]
    VelocityIncrement,
    Disabled,
}

/// Force exchanged by one contact, expressed for its first particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactForce {
    /// Unit vector from the first particle's centre towards the second's.
    pub normal: Vector,
    pub normal_magnitude: f64,
    /// Signed along the tangent `(-normal.y, normal.x)`.
    pub tangential_magnitude: f64,
    /// Total force on the first particle; the second receives its negation.
    pub on_first: Vector,
}

/// Linear elastic spring contact model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactForceModel {
    pub stiffness_combination: StiffnessCombination,
    pub tangential_model: TangentialModel,
}

impl ContactForceModel {
    pub fn new(stiffness_combination: StiffnessCombination, tangential_model: TangentialModel) -> Self {
        Self {
            stiffness_combination,
            tangential_model,
        }
    }

    pub fn effective_kn(&self, a: &ParticleProperties, b: &ParticleProperties) -> f64 {
        self.stiffness_combination.combine(a.kn, b.kn)
    }

    pub fn effective_ks(&self, a: &ParticleProperties, b: &ParticleProperties) -> f64 {
        self.stiffness_combination.combine(a.ks, b.ks)
    }

    /// Force of a single contact, or `None` when the centres coincide and the
    /// contact direction is undefined.
    #[allow(clippy::too_many_arguments)]
    pub fn contact_force(
        &self,
        particle_a: &Particle,
        particle_b: &Particle,
        props_a: &ParticleProperties,
        props_b: &ParticleProperties,
        velocity_a: Vector,
        velocity_b: Vector,
        overlap: f64,
        dt: f64,
    ) -> Option<ContactForce> {
        let normal = (particle_b.position - particle_a.position).try_normalize()?;
        let tangent = normal.perp();

        let normal_magnitude = self.effective_kn(props_a, props_b) * overlap;
        let tangential_magnitude = match self.tangential_model {
            TangentialModel::VelocityIncrement => {
                let slip = (velocity_b - velocity_a).dot(tangent) * dt;
                self.effective_ks(props_a, props_b) * slip
            }
            TangentialModel::Disabled => 0.0,
        };

        Some(ContactForce {
            normal,
            normal_magnitude,
            tangential_magnitude,
            on_first: -normal * normal_magnitude + tangent * tangential_magnitude,
        })
    }

    /// Computes the force of every active contact, in contact-list order.
    ///
    /// Entries are `None` for contacts whose centres coincide.
    pub fn contact_forces(
        &self,
        state: &SimulationState,
        dt: f64,
        out: &mut Vec<Option<ContactForce>>,
    ) -> Result<()> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(Error::InvalidTimestep(dt));
        }

        let particles = state.particles();
        let properties = state.properties();
        let velocities = state.velocities();

        out.clear();
        for contact in state.contacts() {
            let (i, j) = (contact.p1_idx, contact.p2_idx);
            let force = self.contact_force(
                &particles[i],
                &particles[j],
                &properties[i],
                &properties[j],
                velocities[i],
                velocities[j],
                contact.overlap,
                dt,
            );
            if force.is_none() {
                warn!("particles {i} and {j} share a centre; contact skipped");
            }
            out.push(force);
        }
        Ok(())
    }

    /// Resets the resultant force of every particle and sums the contact
    /// forces into it (Newton's third law), followed by the body forces.
    ///
    /// Summation follows contact-list order, so results are reproducible.
    pub fn accumulate(
        &self,
        state: &mut SimulationState,
        contact_forces: &[Option<ContactForce>],
        body_forces: &ForceRegistry,
    ) -> Result<()> {
        let mut view = state.force_view();
        check_len("contact_forces", view.contacts.len(), contact_forces.len())?;

        view.forces.fill(Vector::ZERO);
        view.normal_forces.fill(0.0);
        view.tangential_forces.fill(0.0);

        for (contact, force) in view.contacts.iter().zip(contact_forces) {
            let Some(force) = force else {
                continue;
            };
            let (i, j) = (contact.p1_idx, contact.p2_idx);

            view.forces[i] += force.on_first;
            view.forces[j] -= force.on_first;

            view.normal_forces[i] += force.normal_magnitude;
            view.normal_forces[j] += force.normal_magnitude;
            view.tangential_forces[i] += force.tangential_magnitude.abs();
            view.tangential_forces[j] += force.tangential_magnitude.abs();
        }

        if !body_forces.is_empty() {
            for (index, force) in view.forces.iter_mut().enumerate() {
                *force += body_forces.resultant(&view.particles[index], &view.properties[index]);
            }
        }

        Ok(())
    }

    /// Computes and accumulates all forces of the current contact list.
    pub fn apply(
        &self,
        state: &mut SimulationState,
        body_forces: &ForceRegistry,
        dt: f64,
    ) -> Result<()> {
        let mut contact_forces = Vec::with_capacity(state.contacts().len());
        self.contact_forces(state, dt, &mut contact_forces)?;
        self.accumulate(state, &contact_forces, body_forces)
    }
}

/// External force acting on each particle independently of contacts.
pub trait BodyForce: Send + Sync {
    fn force(&self, particle: &Particle, properties: &ParticleProperties) -> Vector;
}

/// Uniform gravitational field.
pub struct GravityForce {
    pub gravity: Vector,
}

impl GravityForce {
    pub fn new(gravity: Vector) -> Self {
        Self { gravity }
    }
}

impl BodyForce for GravityForce {
    fn force(&self, _particle: &Particle, properties: &ParticleProperties) -> Vector {
        self.gravity * properties.mass
    }
}

/// Collection of body forces applied every step.
#[derive(Default)]
pub struct ForceRegistry {
    forces: Vec<Box<dyn BodyForce>>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    pub fn add_force<F: BodyForce + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn resultant(&self, particle: &Particle, properties: &ParticleProperties) -> Vector {
        self.forces
            .iter()
            .fold(Vector::ZERO, |acc, f| acc + f.force(particle, properties))
    }
}
