use serde::{Deserialize, Serialize};

use crate::collision::pairs::size_triangular_matrix;
use crate::error::{Error, Result};

/// An overlapping particle pair detected during one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Lower particle index of the pair.
    pub p1_idx: usize,
    /// Higher particle index of the pair.
    pub p2_idx: usize,
    pub overlap: f64,
}

impl Contact {
    pub fn new(p1_idx: usize, p2_idx: usize, overlap: f64) -> Self {
        Self {
            p1_idx,
            p2_idx,
            overlap,
        }
    }
}

/// Contact list sized once for the worst case of every pair overlapping.
#[derive(Debug, Clone, Default)]
pub struct ContactBuffer {
    contacts: Vec<Contact>,
    capacity: usize,
}

impl ContactBuffer {
    /// Allocates room for all unordered pairs of `particle_count` particles.
    pub fn for_particles(particle_count: usize) -> Self {
        let capacity = size_triangular_matrix(particle_count);
        Self {
            contacts: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Appends a contact. Exceeding the pair count is an invariant failure.
    pub fn push(&mut self, contact: Contact) -> Result<()> {
        if self.contacts.len() >= self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.contacts.push(contact);
        Ok(())
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }
}

impl<'a> IntoIterator for &'a ContactBuffer {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_capacity_is_triangular() {
        assert_eq!(ContactBuffer::for_particles(0).capacity(), 0);
        assert_eq!(ContactBuffer::for_particles(1).capacity(), 0);
        assert_eq!(ContactBuffer::for_particles(4).capacity(), 6);
    }

    #[test]
    fn push_past_capacity_fails_instead_of_truncating() {
        let mut buffer = ContactBuffer::for_particles(2);
        buffer.push(Contact::new(0, 1, 0.1)).unwrap();
        let err = buffer.push(Contact::new(0, 1, 0.1)).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 1 }));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = ContactBuffer::for_particles(3);
        buffer.push(Contact::new(0, 2, 0.5)).unwrap();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 3);
    }
}
