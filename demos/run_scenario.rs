use std::path::PathBuf;

use clap::Parser;
use granular_dem::*;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML file.
    #[arg(default_value = "demos/scenarios/two_grains.yaml")]
    scenario: PathBuf,

    /// Overrides the step count of the scenario.
    #[arg(short, long)]
    steps: Option<u64>,

    /// Dumps this particle after the given step: `--dump STEP:PARTICLE`.
    #[arg(long, value_parser = parse_dump)]
    dump: Option<(u64, usize)>,
}

fn parse_dump(text: &str) -> std::result::Result<(u64, usize), String> {
    let (step, particle) = text
        .split_once(':')
        .ok_or_else(|| format!("expected STEP:PARTICLE, got `{text}`"))?;
    let step = step.parse().map_err(|e| format!("bad step: {e}"))?;
    let particle = particle.parse().map_err(|e| format!("bad particle: {e}"))?;
    Ok((step, particle))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario = ScenarioConfig::from_path(&args.scenario)?;
    if let Some(steps) = args.steps {
        scenario.simulation.steps = steps;
    }

    let mut sim = scenario.build()?;
    sim.set_trigger(NonFiniteState);
    if let Some((step, particle)) = args.dump {
        sim.set_trigger(ParticleAtStep { step, particle });
    }

    let summary = sim.run_configured()?;
    if let Some(report) = summary.halt {
        println!("Snapshot written to {}", report.path.display());
        return Ok(());
    }

    println!("Completed {} steps", summary.steps_completed);
    for (i, particle) in sim.state().particles().iter().enumerate() {
        println!(
            "particle {i}: position ({:.4}, {:.4}) velocity ({:.4}, {:.4})",
            particle.position.x,
            particle.position.y,
            sim.state().velocities()[i].x,
            sim.state().velocities()[i].y,
        );
    }
    Ok(())
}
