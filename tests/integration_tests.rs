use granular_dem::*;

fn colliding_pair(tangential: TangentialModel) -> Simulation {
    let state = SimulationState::with_velocities(
        vec![Particle::new(0.0, 0.0, 0.5), Particle::new(1.2, 0.0, 0.5)],
        vec![ParticleProperties::new(1.0, 10_000.0, 5_000.0); 2],
        vec![Vector::new(1.0, 0.0), Vector::new(-1.0, 0.0)],
    )
    .unwrap();
    let config = SimulationConfig::default()
        .with_time_step(0.0001)
        .with_tangential_model(tangential);
    Simulation::new(state, config).unwrap()
}

fn momentum(state: &SimulationState) -> Vector {
    state
        .velocities()
        .iter()
        .zip(state.properties())
        .fold(Vector::ZERO, |acc, (v, p)| acc + *v * p.mass)
}

#[test]
fn resting_particles_stay_put() {
    let state = SimulationState::new(
        vec![Particle::new(0.0, 0.0, 0.5), Particle::new(3.0, 1.0, 0.5)],
        vec![ParticleProperties::new(2.0, 100.0, 10.0); 2],
    )
    .unwrap();
    let before = state.particles().to_vec();
    let mut sim = Simulation::new(state, SimulationConfig::default()).unwrap();

    let outcome = sim.step().expect("step should succeed");

    assert_eq!(outcome, StepOutcome::Completed { step: 0, contacts: 0 });
    assert_eq!(sim.state().particles(), before.as_slice());
    assert!(sim.state().displacements().iter().all(|d| *d == Vector::ZERO));
    assert!(sim.state().forces().iter().all(|f| *f == Vector::ZERO));
}

#[test]
fn head_on_collision_rebounds_and_conserves_momentum() {
    let mut sim = colliding_pair(TangentialModel::VelocityIncrement);
    let initial = momentum(sim.state());

    let summary = sim.run(2_000).unwrap();
    assert_eq!(summary.steps_completed, 2_000);

    let state = sim.state();
    assert!(state.contacts().is_empty(), "particles should have separated");
    assert!(state.velocities()[0].x < -0.9, "v0 = {:?}", state.velocities()[0]);
    assert!(state.velocities()[1].x > 0.9, "v1 = {:?}", state.velocities()[1]);
    assert!((momentum(state) - initial).length() < 1e-9);
    assert_eq!(state.particles()[0].radius, 0.5);
}

#[test]
fn overlapping_pair_is_pushed_apart() {
    let state = SimulationState::new(
        vec![Particle::new(0.0, 0.0, 1.0), Particle::new(1.5, 0.0, 1.0)],
        vec![ParticleProperties::new(1.0, 200.0, 0.0); 2],
    )
    .unwrap();
    let mut sim = Simulation::new(state, SimulationConfig::default().with_time_step(0.01)).unwrap();
    sim.step().unwrap();

    let state = sim.state();
    // Series stiffness 100 * overlap 0.5 = 50 N on unit masses.
    assert!((state.forces()[0].x + 50.0).abs() < 1e-9);
    assert!((state.accelerations()[1].x - 50.0).abs() < 1e-9);
    assert!((state.velocities()[1].x - 0.5).abs() < 1e-9);
    assert!((state.displacements()[1].x - 0.005).abs() < 1e-12);
    assert!((state.particles()[1].position.x - 1.505).abs() < 1e-12);
    assert!((state.particles()[0].position.x + 0.005).abs() < 1e-12);
}

#[test]
fn stiffness_combination_changes_contact_force() {
    let build = |mode| {
        let state = SimulationState::new(
            vec![Particle::new(0.0, 0.0, 1.0), Particle::new(1.0, 0.0, 1.0)],
            vec![
                ParticleProperties::new(1.0, 100.0, 0.0),
                ParticleProperties::new(1.0, 300.0, 0.0),
            ],
        )
        .unwrap();
        let cfg = SimulationConfig::default().with_stiffness_combination(mode);
        let mut sim = Simulation::new(state, cfg).unwrap();
        sim.step().unwrap();
        sim.state().normal_forces()[0]
    };

    assert!((build(StiffnessCombination::Series) - 75.0).abs() < 1e-9);
    assert!((build(StiffnessCombination::Average) - 200.0).abs() < 1e-9);
    assert!((build(StiffnessCombination::Max) - 300.0).abs() < 1e-9);
}

#[test]
fn identical_runs_are_bitwise_reproducible() {
    let run = || {
        let particles: Vec<_> = (0..8)
            .map(|i| Particle::new(i as f64 * 0.9, (i % 3) as f64 * 0.3, 0.5))
            .collect();
        let state = SimulationState::new(
            particles,
            vec![ParticleProperties::new(1.5, 5_000.0, 2_000.0); 8],
        )
        .unwrap();
        let cfg = SimulationConfig::default().with_gravity(DVec2::new(0.0, -9.81));
        let mut sim = Simulation::new(state, cfg).unwrap();
        sim.run(200).unwrap();
        sim.state().particles().to_vec()
    };
    assert_eq!(run(), run());
}

#[test]
fn gravity_accelerates_free_particle() {
    let state = SimulationState::new(
        vec![Particle::new(0.0, 10.0, 0.5)],
        vec![ParticleProperties::new(2.0, 0.0, 0.0)],
    )
    .unwrap();
    let cfg = SimulationConfig::default()
        .with_time_step(0.01)
        .with_gravity(DVec2::new(0.0, -9.81));
    let mut sim = Simulation::new(state, cfg).unwrap();
    sim.step().unwrap();

    let state = sim.state();
    assert!((state.forces()[0].y + 19.62).abs() < 1e-9);
    assert!((state.velocities()[0].y + 0.0981).abs() < 1e-12);
    assert!(state.particles()[0].position.y < 10.0);
}

#[test]
fn scenario_file_drives_a_run() {
    let yaml = r#"
simulation:
  time_step: 0.0001
  steps: 50
particles:
  - position: [0.0, 0.0]
    radius: 0.5
    mass: 1.0
    kn: 1000.0
    ks: 100.0
  - position: [0.95, 0.0]
    radius: 0.5
    mass: 1.0
    kn: 1000.0
    ks: 100.0
"#;
    let mut sim = ScenarioConfig::from_yaml_str(yaml).unwrap().build().unwrap();
    let summary = sim.run_configured().unwrap();
    assert_eq!(summary.steps_completed, 50);
    assert!(sim.state().particles()[1].position.x > 0.95);
}
