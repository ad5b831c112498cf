//! Global configuration constants and runtime settings for the simulator.

use std::path::PathBuf;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::dynamics::forces::{StiffnessCombination, TangentialModel};
use crate::error::{Error, Result};

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f64 = 0.00025;

/// Default number of steps performed by [`crate::Simulation::run_configured`].
pub const DEFAULT_STEP_COUNT: u64 = 1_000;

/// Default body-force acceleration. Zero: particles only interact through contacts.
pub const DEFAULT_GRAVITY: [f64; 2] = [0.0, 0.0];

/// Maximum absolute error accepted when comparing floating results.
pub const TOLERANCE: f64 = 0.00005;

/// Significant digits used for floating values in diagnostic dumps.
pub const DUMP_PRECISION: usize = 4;

/// Default column width of the diagnostic dump tables.
pub const DUMP_COLUMN_WIDTH: usize = 11;

/// Column width of the radius field in diagnostic dumps.
pub const DUMP_RADIUS_WIDTH: usize = 7;

/// Column width of the force magnitude fields in diagnostic dumps.
pub const DUMP_FORCE_MAGNITUDE_WIDTH: usize = 8;

/// Runtime settings of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_step: f64,
    pub steps: u64,
    pub gravity: DVec2,
    pub stiffness_combination: StiffnessCombination,
    pub tangential_model: TangentialModel,
    /// Folder receiving diagnostic dumps. `None` writes into the working directory.
    pub debug_folder: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            steps: DEFAULT_STEP_COUNT,
            gravity: DVec2::from_array(DEFAULT_GRAVITY),
            stiffness_combination: StiffnessCombination::default(),
            tangential_model: TangentialModel::default(),
            debug_folder: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_gravity(mut self, gravity: DVec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_stiffness_combination(mut self, mode: StiffnessCombination) -> Self {
        self.stiffness_combination = mode;
        self
    }

    pub fn with_tangential_model(mut self, model: TangentialModel) -> Self {
        self.tangential_model = model;
        self
    }

    pub fn with_debug_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.debug_folder = Some(folder.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(Error::InvalidTimestep(self.time_step));
        }
        if !self.gravity.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        Ok(())
    }
}
