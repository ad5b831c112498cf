//! Scenario files describing the initial particle population of a run.
//!
//! ```yaml
//! simulation:
//!   time_step: 0.00025
//!   steps: 2000
//!   gravity: [0.0, -9.81]
//!   stiffness_combination: series   # series | average | min | max
//!   tangential_model: velocity_increment   # or disabled
//!   debug_folder: debug
//!
//! particles:
//!   - position: [0.0, 0.0]
//!     radius: 0.5
//!     mass: 1.0
//!     kn: 10000.0
//!     ks: 5000.0
//!   - position: [0.9, 0.0]
//!     velocity: [-1.0, 0.0]
//!     radius: 0.5
//!     mass: 1.0
//!     kn: 10000.0
//!     ks: 5000.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::core::soa::SimulationState;
use crate::core::types::{Particle, ParticleProperties, Vector};
use crate::error::Result;
use crate::world::Simulation;

/// Initial state of one particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    pub radius: f64,
    pub mass: f64,
    pub kn: f64,
    pub ks: f64,
}

impl ParticleConfig {
    pub fn particle(&self) -> Particle {
        Particle {
            position: Vector::from_array(self.position),
            radius: self.radius,
        }
    }

    pub fn properties(&self) -> ParticleProperties {
        ParticleProperties::new(self.mass, self.kn, self.ks)
    }
}

/// Top-level scenario document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Allocates and validates the particle arrays.
    pub fn build_state(&self) -> Result<SimulationState> {
        let particles = self.particles.iter().map(ParticleConfig::particle).collect();
        let properties = self.particles.iter().map(ParticleConfig::properties).collect();
        let velocities = self
            .particles
            .iter()
            .map(|p| Vector::from_array(p.velocity))
            .collect();
        SimulationState::with_velocities(particles, properties, velocities)
    }

    pub fn build(&self) -> Result<Simulation> {
        Simulation::new(self.build_state()?, self.simulation.clone())
    }
}
