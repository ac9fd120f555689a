pub mod cli;
pub mod runner;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use boid_core::{StepMode, Vector2D, World, WorldConfig};
use boid_shared::{RunSummary, SimulationSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use cli::{Args, PointArg};
pub use runner::{Runner, RunnerOptions};

/// Reads settings from a JSON file, or returns the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<SimulationSettings> {
    let Some(path) = path else {
        return Ok(SimulationSettings::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    SimulationSettings::from_json(&json)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))
}

/// Applies command-line overrides on top of file settings.
pub fn apply_overrides(settings: &mut SimulationSettings, args: &Args) {
    if let Some(boids) = args.boids {
        settings.boid_count = boids;
    }
    if let Some(predators) = args.predators {
        settings.predator_count = predators;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if args.sequential {
        settings.step_mode = StepMode::Sequential;
    }
}

/// Builds the world, runs it until the tick budget is spent or `stop` is
/// raised, and reports what happened.
pub fn execute(args: &Args, stop: Arc<AtomicBool>) -> Result<RunSummary> {
    if args.snapshot_every.is_some() && args.output.is_none() {
        bail!("--snapshot-every requires --output");
    }

    let mut settings = load_settings(args.config.as_deref())?;
    apply_overrides(&mut settings, args);

    let config = WorldConfig::from_settings(&settings).context("Invalid simulation settings")?;
    log::info!(
        "World {}x{}: {} boids, {} predators, {:?} stepping",
        config.width,
        config.height,
        config.boid_count,
        config.predator_count,
        config.step_mode
    );

    let mut world = match args.seed {
        Some(seed) => {
            log::info!("Seeding placement with {}", seed);
            World::random_with_rng(config, &mut StdRng::seed_from_u64(seed))
        }
        None => World::random(config),
    };

    let output = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            log::info!("Writing snapshots to {}", path.display());
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let options = RunnerOptions {
        ticks: args.ticks,
        pointer: args.pointer.map(|p| Vector2D::new(p.x, p.y)),
        paced: !args.unpaced,
        target_fps: settings.visuals.target_fps,
        snapshot_every: args.snapshot_every.unwrap_or(1),
    };
    let mut runner = Runner::new(options, output).with_stop_flag(stop);

    let ticks = boid_core::run(&mut world, &mut runner).context("Simulation run failed")?;
    let fps = runner.fps();
    runner.finish()?;

    let summary = RunSummary {
        ticks,
        boid_count: world.boids().len(),
        predator_count: world.predators().len(),
        mean_boid_speed: world.mean_boid_speed(),
        fps,
    };
    log::info!("Finished after {} ticks ({:.1} FPS)", summary.ticks, summary.fps);

    Ok(summary)
}
