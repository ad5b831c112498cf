use crate::collision::contact::{Contact, ContactBuffer};
use crate::core::types::{Particle, ParticleProperties, Vector};
use crate::error::{Error, Result};

/// Structure-of-Arrays storage for every per-particle quantity of a run.
///
/// All per-particle vectors share one index space and have the same length,
/// fixed at construction. Properties are never handed out mutably.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    particles: Vec<Particle>,
    properties: Vec<ParticleProperties>,

    // Per-particle force magnitudes summed over the particle's contacts.
    normal_forces: Vec<f64>,
    tangential_forces: Vec<f64>,

    forces: Vec<Vector>,
    accelerations: Vec<Vector>,
    velocities: Vec<Vector>,
    displacements: Vec<Vector>,

    // Scratch target for velocity integration, swapped with `velocities`.
    next_velocities: Vec<Vector>,

    contacts: ContactBuffer,
}

impl SimulationState {
    /// Builds the state with every kinematic quantity at rest.
    pub fn new(particles: Vec<Particle>, properties: Vec<ParticleProperties>) -> Result<Self> {
        let count = particles.len();
        Self::with_velocities(particles, properties, vec![Vector::ZERO; count])
    }

    pub fn with_velocities(
        particles: Vec<Particle>,
        properties: Vec<ParticleProperties>,
        velocities: Vec<Vector>,
    ) -> Result<Self> {
        let count = particles.len();
        check_len("properties", count, properties.len())?;
        check_len("velocities", count, velocities.len())?;

        for (index, particle) in particles.iter().enumerate() {
            if !particle.position.is_finite() {
                return Err(Error::InvalidProperty {
                    index,
                    field: "position",
                    value: if particle.position.x.is_finite() {
                        particle.position.y
                    } else {
                        particle.position.x
                    },
                });
            }
            if !(particle.radius >= 0.0) || !particle.radius.is_finite() {
                return Err(Error::InvalidProperty {
                    index,
                    field: "radius",
                    value: particle.radius,
                });
            }
        }
        for (index, props) in properties.iter().enumerate() {
            props.validate(index)?;
        }
        if let Some(index) = velocities.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidProperty {
                index,
                field: "velocity",
                value: velocities[index].length(),
            });
        }

        Ok(Self {
            particles,
            properties,
            normal_forces: vec![0.0; count],
            tangential_forces: vec![0.0; count],
            forces: vec![Vector::ZERO; count],
            accelerations: vec![Vector::ZERO; count],
            velocities,
            displacements: vec![Vector::ZERO; count],
            next_velocities: vec![Vector::ZERO; count],
            contacts: ContactBuffer::for_particles(count),
        })
    }

    /// Number of particles, fixed for the lifetime of the state.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn properties(&self) -> &[ParticleProperties] {
        &self.properties
    }

    pub fn normal_forces(&self) -> &[f64] {
        &self.normal_forces
    }

    pub fn tangential_forces(&self) -> &[f64] {
        &self.tangential_forces
    }

    pub fn forces(&self) -> &[Vector] {
        &self.forces
    }

    pub fn accelerations(&self) -> &[Vector] {
        &self.accelerations
    }

    pub fn velocities(&self) -> &[Vector] {
        &self.velocities
    }

    pub fn displacements(&self) -> &[Vector] {
        &self.displacements
    }

    pub fn contacts(&self) -> &[Contact] {
        self.contacts.as_slice()
    }

    pub fn contact_capacity(&self) -> usize {
        self.contacts.capacity()
    }

    /// Copies every quantity of one particle, e.g. for a diagnostic dump.
    pub fn snapshot(&self, index: usize) -> Result<ParticleSnapshot> {
        if index >= self.len() {
            return Err(Error::ParticleOutOfRange {
                index,
                count: self.len(),
            });
        }
        Ok(ParticleSnapshot {
            particle: self.particles[index],
            properties: self.properties[index],
            normal_force: self.normal_forces[index],
            tangential_force: self.tangential_forces[index],
            force: self.forces[index],
            acceleration: self.accelerations[index],
            velocity: self.velocities[index],
            displacement: self.displacements[index],
        })
    }

    /// Index of the first particle whose position or kinematics hold NaN or infinity.
    pub fn first_non_finite(&self) -> Option<usize> {
        (0..self.len()).find(|&i| {
            !self.particles[i].position.is_finite()
                || !self.forces[i].is_finite()
                || !self.accelerations[i].is_finite()
                || !self.velocities[i].is_finite()
        })
    }

    pub(crate) fn detection_view(&mut self) -> (&[Particle], &mut ContactBuffer) {
        (&self.particles, &mut self.contacts)
    }

    pub(crate) fn force_view(&mut self) -> ForceView<'_> {
        ForceView {
            particles: &self.particles,
            properties: &self.properties,
            contacts: self.contacts.as_slice(),
            forces: &mut self.forces,
            normal_forces: &mut self.normal_forces,
            tangential_forces: &mut self.tangential_forces,
        }
    }

    pub(crate) fn acceleration_view(&mut self) -> (&[ParticleProperties], &[Vector], &mut [Vector]) {
        (&self.properties, &self.forces, &mut self.accelerations)
    }

    pub(crate) fn velocity_view(&mut self) -> (&[Vector], &[Vector], &mut [Vector]) {
        (&self.accelerations, &self.velocities, &mut self.next_velocities)
    }

    /// Promotes the freshly integrated velocities to current.
    pub(crate) fn commit_velocities(&mut self) {
        std::mem::swap(&mut self.velocities, &mut self.next_velocities);
    }

    pub(crate) fn displacement_view(&mut self) -> (&[Vector], &mut [Vector]) {
        (&self.velocities, &mut self.displacements)
    }

    pub(crate) fn position_view(&mut self) -> (&[Vector], &mut [Particle]) {
        (&self.displacements, &mut self.particles)
    }
}

/// Disjoint borrows of the arrays touched by the contact force stage.
pub(crate) struct ForceView<'a> {
    pub particles: &'a [Particle],
    pub properties: &'a [ParticleProperties],
    pub contacts: &'a [Contact],
    pub forces: &'a mut [Vector],
    pub normal_forces: &'a mut [f64],
    pub tangential_forces: &'a mut [f64],
}

/// Every quantity of one particle at a single instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot {
    pub particle: Particle,
    pub properties: ParticleProperties,
    pub normal_force: f64,
    pub tangential_force: f64,
    pub force: Vector,
    pub acceleration: Vector,
    pub velocity: Vector,
    pub displacement: Vector,
}

pub(crate) fn check_len(array: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            array,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_particles() -> (Vec<Particle>, Vec<ParticleProperties>) {
        (
            vec![Particle::new(0.0, 0.0, 1.0), Particle::new(3.0, 0.0, 1.0)],
            vec![ParticleProperties::new(1.0, 10.0, 5.0); 2],
        )
    }

    #[test]
    fn arrays_share_particle_count() {
        let (particles, properties) = two_particles();
        let state = SimulationState::new(particles, properties).unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.forces().len(), 2);
        assert_eq!(state.accelerations().len(), 2);
        assert_eq!(state.velocities().len(), 2);
        assert_eq!(state.displacements().len(), 2);
        assert_eq!(state.normal_forces().len(), 2);
        assert_eq!(state.contact_capacity(), 1);
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let (particles, mut properties) = two_particles();
        properties.pop();
        let err = SimulationState::new(particles, properties).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                array: "properties",
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn invalid_setup_values_are_rejected() {
        let (mut particles, properties) = two_particles();
        particles[1].radius = -0.5;
        assert!(matches!(
            SimulationState::new(particles, properties),
            Err(Error::InvalidProperty { index: 1, field: "radius", .. })
        ));

        let (particles, mut properties) = two_particles();
        properties[0].mass = 0.0;
        assert!(matches!(
            SimulationState::new(particles, properties),
            Err(Error::InvalidProperty { index: 0, field: "mass", .. })
        ));
    }

    #[test]
    fn snapshot_out_of_range_fails() {
        let (particles, properties) = two_particles();
        let state = SimulationState::new(particles, properties).unwrap();
        assert!(state.snapshot(1).is_ok());
        assert!(matches!(
            state.snapshot(2),
            Err(Error::ParticleOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn empty_state_is_valid() {
        let state = SimulationState::new(Vec::new(), Vec::new()).unwrap();
        assert!(state.is_empty());
        assert_eq!(state.contact_capacity(), 0);
    }
}
