use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Generic 2-D quantity: force, acceleration, velocity, displacement.
pub type Vector = DVec2;

/// Centre position and geometry of a circular particle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vector,
    pub radius: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            position: Vector::new(x, y),
            radius,
        }
    }

    /// Penetration depth with `other`; positive only when the discs overlap.
    pub fn overlap_with(&self, other: &Particle) -> f64 {
        (self.radius + other.radius) - self.position.distance(other.position)
    }
}

/// Physical properties of a particle. Read-only once the simulation starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleProperties {
    pub mass: f64,
    /// Normal spring stiffness.
    pub kn: f64,
    /// Tangential spring stiffness.
    pub ks: f64,
}

impl Default for ParticleProperties {
    fn default() -> Self {
        Self {
            mass: 1.0,
            kn: 0.0,
            ks: 0.0,
        }
    }
}

impl ParticleProperties {
    pub fn new(mass: f64, kn: f64, ks: f64) -> Self {
        Self { mass, kn, ks }
    }

    /// Properties carrying only a mass, as used by the integrator fixtures.
    pub fn with_mass(mass: f64) -> Self {
        Self {
            mass,
            ..Self::default()
        }
    }

    /// Checks the mass is strictly positive.
    pub fn validate_mass(&self, index: usize) -> Result<()> {
        if self.mass > 0.0 && self.mass.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidProperty {
                index,
                field: "mass",
                value: self.mass,
            })
        }
    }

    pub fn validate(&self, index: usize) -> Result<()> {
        self.validate_mass(index)?;
        for (field, value) in [("kn", self.kn), ("ks", self.ks)] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(Error::InvalidProperty {
                    index,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}
