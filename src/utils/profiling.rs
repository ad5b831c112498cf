use log::info;
use std::time::{Duration, Instant};

/// Timing and size figures of the most recent simulation step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub detect_time: Duration,
    pub force_time: Duration,
    pub integrate_time: Duration,
    pub total_step_time: Duration,

    pub particle_count: usize,
    pub contact_count: usize,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_step_time.as_micros() as f64;
        if total_us < 1.0 {
            return;
        }
        let share = |d: Duration| d.as_micros() as f64 / total_us * 100.0;

        info!(
            "step profile: particles {}, contacts {}, total {:.3} ms (detect {:.1}%, force {:.1}%, integrate {:.1}%)",
            self.particle_count,
            self.contact_count,
            self.total_step_time.as_secs_f64() * 1000.0,
            share(self.detect_time),
            share(self.force_time),
            share(self.integrate_time),
        );
    }
}

/// Adds the elapsed time to `output` when dropped.
pub struct StageTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> StageTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for StageTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
