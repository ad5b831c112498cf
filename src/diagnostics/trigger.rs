use crate::core::soa::SimulationState;

/// Decides after each step whether the run must be frozen for inspection.
///
/// Returning `Some(index)` requests a dump of that particle and halts the
/// simulation; there is no way to resume afterwards.
pub trait DiagnosticTrigger {
    fn inspect(&mut self, step: u64, state: &SimulationState) -> Option<usize>;
}

impl<F> DiagnosticTrigger for F
where
    F: FnMut(u64, &SimulationState) -> Option<usize>,
{
    fn inspect(&mut self, step: u64, state: &SimulationState) -> Option<usize> {
        self(step, state)
    }
}

/// Dumps a fixed particle once a given step has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleAtStep {
    pub step: u64,
    pub particle: usize,
}

impl DiagnosticTrigger for ParticleAtStep {
    fn inspect(&mut self, step: u64, _state: &SimulationState) -> Option<usize> {
        (step == self.step).then_some(self.particle)
    }
}

/// Dumps the first particle whose state became NaN or infinite.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonFiniteState;

impl DiagnosticTrigger for NonFiniteState {
    fn inspect(&mut self, _step: u64, state: &SimulationState) -> Option<usize> {
        state.first_non_finite()
    }
}
