use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};

use crate::{
    collision::{contact::Contact, detector::ContactDetector},
    config::SimulationConfig,
    core::soa::SimulationState,
    diagnostics::{dump::write_debug_information, DiagnosticTrigger, DumpReport},
    dynamics::{
        forces::{BodyForce, ContactForce, ContactForceModel, ForceRegistry, GravityForce},
        integrator::Integrator,
    },
    error::{Error, Result},
    utils::{
        logging::{warn_if_step_budget_exceeded, ScopedTimer},
        profiling::{StageTimer, StepProfiler},
    },
};

/// Stage of the per-step pipeline. Stages run strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStage {
    Detect,
    Force,
    Accumulate,
    Accelerate,
    IntegrateVelocity,
    IntegratePosition,
    /// Terminal: reached through a diagnostic dump, never left again.
    Halt,
}

impl StepStage {
    /// Stage following `self` within the step loop.
    pub fn next(self) -> StepStage {
        match self {
            StepStage::Detect => StepStage::Force,
            StepStage::Force => StepStage::Accumulate,
            StepStage::Accumulate => StepStage::Accelerate,
            StepStage::Accelerate => StepStage::IntegrateVelocity,
            StepStage::IntegrateVelocity => StepStage::IntegratePosition,
            StepStage::IntegratePosition => StepStage::Detect,
            StepStage::Halt => StepStage::Halt,
        }
    }
}

/// Result of one call to [`Simulation::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Completed { step: u64, contacts: usize },
    /// A diagnostic trigger fired; the snapshot was written and the run is over.
    Halted(DumpReport),
}

/// Result of [`Simulation::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps_completed: u64,
    pub halt: Option<DumpReport>,
}

/// Owns the particle arrays and drives them through the step pipeline.
pub struct Simulation {
    state: SimulationState,
    config: SimulationConfig,
    force_model: ContactForceModel,
    body_forces: ForceRegistry,
    integrator: Integrator,
    contact_forces: Vec<Option<ContactForce>>,
    trigger: Option<Box<dyn DiagnosticTrigger>>,
    profiler: StepProfiler,
    step_budget_ms: Option<f64>,
    stage: StepStage,
    steps_completed: u64,
}

impl Simulation {
    pub fn new(state: SimulationState, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut body_forces = ForceRegistry::new();
        if config.gravity != glam::DVec2::ZERO {
            body_forces.add_force(GravityForce::new(config.gravity));
        }

        Ok(Self {
            contact_forces: Vec::with_capacity(state.contact_capacity()),
            integrator: Integrator::new(config.time_step)?,
            force_model: ContactForceModel::new(
                config.stiffness_combination,
                config.tangential_model,
            ),
            body_forces,
            state,
            config,
            trigger: None,
            profiler: StepProfiler::default(),
            step_budget_ms: None,
            stage: StepStage::Detect,
            steps_completed: 0,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn contacts(&self) -> &[Contact] {
        self.state.contacts()
    }

    pub fn stage(&self) -> StepStage {
        self.stage
    }

    pub fn steps_completed(&self) -> u64 {
        self.steps_completed
    }

    pub fn is_halted(&self) -> bool {
        self.stage == StepStage::Halt
    }

    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }

    pub fn add_body_force<F: BodyForce + 'static>(&mut self, force: F) {
        self.body_forces.add_force(force);
    }

    /// Installs the check consulted after every completed step.
    pub fn set_trigger<T: DiagnosticTrigger + 'static>(&mut self, trigger: T) {
        self.trigger = Some(Box::new(trigger));
    }

    pub fn clear_trigger(&mut self) {
        self.trigger = None;
    }

    /// Warn whenever a step takes longer than `budget_ms` milliseconds.
    pub fn set_step_budget_ms(&mut self, budget_ms: Option<f64>) {
        self.step_budget_ms = budget_ms;
    }

    fn debug_folder(&self) -> PathBuf {
        self.config
            .debug_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Advances the simulation by one timestep.
    ///
    /// Steps are numbered from 0; the returned step number is the index of
    /// the step just completed. Once halted, every further call fails.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.is_halted() {
            return Err(Error::Halted {
                step: self.steps_completed.saturating_sub(1),
            });
        }

        let started = Instant::now();
        let step = self.steps_completed;
        self.profiler.reset();
        self.profiler.particle_count = self.state.len();

        self.stage = StepStage::Detect;
        let contacts = {
            let _timer = ScopedTimer::new("contacts::detect");
            let _stage = StageTimer::new(&mut self.profiler.detect_time);
            let (particles, buffer) = self.state.detection_view();
            ContactDetector::detect(particles, buffer)?
        };
        self.profiler.contact_count = contacts;

        {
            let _timer = ScopedTimer::new("forces");
            let _stage = StageTimer::new(&mut self.profiler.force_time);
            self.stage = StepStage::Force;
            self.force_model.contact_forces(
                &self.state,
                self.integrator.dt,
                &mut self.contact_forces,
            )?;

            self.stage = StepStage::Accumulate;
            self.force_model
                .accumulate(&mut self.state, &self.contact_forces, &self.body_forces)?;
        }

        {
            let _timer = ScopedTimer::new("integrator");
            let _stage = StageTimer::new(&mut self.profiler.integrate_time);
            self.stage = StepStage::Accelerate;
            self.integrator.accelerate(&mut self.state)?;

            self.stage = StepStage::IntegrateVelocity;
            self.integrator.integrate_velocity(&mut self.state)?;

            self.stage = StepStage::IntegratePosition;
            self.integrator.integrate_position(&mut self.state)?;
        }

        self.steps_completed += 1;
        self.stage = self.stage.next();
        self.profiler.total_step_time = started.elapsed();
        debug!("step {step}: {contacts} contacts");
        if let Some(budget_ms) = self.step_budget_ms {
            warn_if_step_budget_exceeded(step, self.profiler.total_step_time, budget_ms);
        }

        let requested = match self.trigger.as_mut() {
            Some(trigger) => trigger.inspect(step, &self.state),
            None => None,
        };
        if let Some(particle_index) = requested {
            // No resumption, even when writing the snapshot fails.
            self.stage = StepStage::Halt;
            let folder = self.debug_folder();
            let report = self.dump(step, particle_index, &folder)?;
            info!("simulation halted after step {step}");
            return Ok(StepOutcome::Halted(report));
        }

        Ok(StepOutcome::Completed { step, contacts })
    }

    fn dump(&self, step: u64, particle_index: usize, folder: &Path) -> Result<DumpReport> {
        write_debug_information(step, particle_index, &self.state, folder)
    }

    /// Performs up to `steps` steps, stopping early on a diagnostic halt.
    pub fn run(&mut self, steps: u64) -> Result<RunSummary> {
        let first = self.steps_completed;
        for _ in 0..steps {
            if let StepOutcome::Halted(report) = self.step()? {
                return Ok(RunSummary {
                    steps_completed: self.steps_completed - first,
                    halt: Some(report),
                });
            }
        }
        Ok(RunSummary {
            steps_completed: self.steps_completed - first,
            halt: None,
        })
    }

    /// Runs the number of steps set in the configuration.
    pub fn run_configured(&mut self) -> Result<RunSummary> {
        self.run(self.config.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Particle, ParticleProperties};

    fn pair_simulation() -> Simulation {
        let state = SimulationState::new(
            vec![Particle::new(0.0, 0.0, 1.0), Particle::new(1.8, 0.0, 1.0)],
            vec![ParticleProperties::new(1.0, 1000.0, 100.0); 2],
        )
        .unwrap();
        Simulation::new(state, SimulationConfig::default().with_time_step(0.001)).unwrap()
    }

    #[test]
    fn stages_cycle_back_to_detect() {
        let mut stage = StepStage::Detect;
        for _ in 0..6 {
            stage = stage.next();
        }
        assert_eq!(stage, StepStage::Detect);
        assert_eq!(StepStage::Halt.next(), StepStage::Halt);
    }

    #[test]
    fn completed_step_returns_to_detect() {
        let mut sim = pair_simulation();
        let outcome = sim.step().unwrap();
        assert_eq!(outcome, StepOutcome::Completed { step: 0, contacts: 1 });
        assert_eq!(sim.stage(), StepStage::Detect);
        assert_eq!(sim.steps_completed(), 1);
        assert_eq!(sim.profiler().contact_count, 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let state = SimulationState::new(Vec::new(), Vec::new()).unwrap();
        let cfg = SimulationConfig::default().with_time_step(-1.0);
        assert!(matches!(
            Simulation::new(state, cfg),
            Err(Error::InvalidTimestep(_))
        ));
    }

    #[test]
    fn run_counts_steps() {
        let mut sim = pair_simulation();
        let summary = sim.run(5).unwrap();
        assert_eq!(summary.steps_completed, 5);
        assert!(summary.halt.is_none());
    }
}
