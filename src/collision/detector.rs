use crate::{
    collision::{
        contact::{Contact, ContactBuffer},
        pairs::pairs,
    },
    core::types::Particle,
    error::Result,
};

/// Exhaustive all-pairs contact detection between circular particles.
pub struct ContactDetector;

impl ContactDetector {
    /// Overlap of pair `(i, j)`, or `None` when the discs do not touch.
    ///
    /// Zero overlap counts as "not touching".
    pub fn overlap(particle_a: &Particle, particle_b: &Particle) -> Option<f64> {
        let overlap = particle_a.overlap_with(particle_b);
        if overlap > 0.0 {
            Some(overlap)
        } else {
            None
        }
    }

    /// Rebuilds `contacts` from scratch for the current particle positions.
    ///
    /// Contacts appear in pair enumeration order with `p1_idx < p2_idx`.
    /// Returns the number of active contacts.
    pub fn detect(particles: &[Particle], contacts: &mut ContactBuffer) -> Result<usize> {
        contacts.clear();
        for (i, j) in pairs(particles.len()) {
            if let Some(overlap) = Self::overlap(&particles[i], &particles[j]) {
                contacts.push(Contact::new(i, j, overlap))?;
            }
        }
        Ok(contacts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(spacing: f64, radius: f64, count: usize) -> Vec<Particle> {
        (0..count)
            .map(|i| Particle::new(i as f64 * spacing, 0.0, radius))
            .collect()
    }

    #[test]
    fn touching_neighbours_produce_ordered_contacts() {
        let particles = row(1.5, 1.0, 3);
        let mut buffer = ContactBuffer::for_particles(particles.len());
        let active = ContactDetector::detect(&particles, &mut buffer).unwrap();

        // 0-1 and 1-2 overlap by 0.5; 0-2 are 3.0 apart with radii sum 2.0.
        assert_eq!(active, 2);
        let contacts = buffer.as_slice();
        assert_eq!((contacts[0].p1_idx, contacts[0].p2_idx), (0, 1));
        assert_eq!((contacts[1].p1_idx, contacts[1].p2_idx), (1, 2));
        assert!((contacts[0].overlap - 0.5).abs() < 1e-12);
    }

    #[test]
    fn exact_tangency_is_not_a_contact() {
        let particles = row(2.0, 1.0, 2);
        let mut buffer = ContactBuffer::for_particles(particles.len());
        assert_eq!(ContactDetector::detect(&particles, &mut buffer).unwrap(), 0);
    }

    #[test]
    fn detection_discards_previous_contacts() {
        let mut particles = row(1.0, 1.0, 2);
        let mut buffer = ContactBuffer::for_particles(particles.len());
        assert_eq!(ContactDetector::detect(&particles, &mut buffer).unwrap(), 1);

        particles[1].position.x = 10.0;
        assert_eq!(ContactDetector::detect(&particles, &mut buffer).unwrap(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Particle::new(0.0, 0.0, 0.7);
        let b = Particle::new(0.3, 0.4, 0.6);
        assert_eq!(
            ContactDetector::overlap(&a, &b),
            ContactDetector::overlap(&b, &a)
        );
    }

    #[test]
    fn fully_packed_cluster_fills_capacity_exactly() {
        let particles: Vec<_> = (0..6).map(|_| Particle::new(0.0, 0.0, 1.0)).collect();
        let mut buffer = ContactBuffer::for_particles(particles.len());
        let active = ContactDetector::detect(&particles, &mut buffer).unwrap();
        assert_eq!(active, buffer.capacity());
    }
}
