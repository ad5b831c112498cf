use granular_dem::*;

/// Gravity acting only on grains lighter than `max_mass`; heavier grains form a fixed floor.
struct GrainGravity {
    gravity: Vector,
    max_mass: f64,
}

impl BodyForce for GrainGravity {
    fn force(&self, _particle: &Particle, properties: &ParticleProperties) -> Vector {
        if properties.mass < self.max_mass {
            self.gravity * properties.mass
        } else {
            Vector::ZERO
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // A loose column of grains dropped onto a row of heavy, tightly packed floor grains.
    let mut particles = Vec::new();
    let mut properties = Vec::new();
    for i in 0..20 {
        particles.push(Particle::new(i as f64 * 0.2, 0.0, 0.1));
        properties.push(ParticleProperties::new(1.0e6, 1.0e5, 5.0e4));
    }
    for i in 0..30 {
        let x = 1.5 + (i % 5) as f64 * 0.21;
        let y = 0.3 + (i / 5) as f64 * 0.21;
        particles.push(Particle::new(x, y, 0.1));
        properties.push(ParticleProperties::new(0.05, 1.0e5, 5.0e4));
    }

    let state = SimulationState::new(particles, properties)?;
    let config = SimulationConfig::default()
        .with_time_step(0.00005)
        .with_steps(20_000)
        .with_debug_folder("debug");
    let mut sim = Simulation::new(state, config)?;
    sim.add_body_force(GrainGravity {
        gravity: Vector::new(0.0, -9.81),
        max_mass: 1.0,
    });
    sim.set_trigger(NonFiniteState);

    let summary = sim.run_configured()?;
    sim.profiler().report();

    match summary.halt {
        Some(report) => println!(
            "Halted at step {}: particle {} dumped to {}",
            report.step,
            report.particle_index,
            report.path.display()
        ),
        None => println!(
            "Completed {} steps with {} active contacts",
            summary.steps_completed,
            sim.contacts().len()
        ),
    }
    Ok(())
}
