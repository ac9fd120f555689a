use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// A point given on the command line as `X,Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointArg {
    pub x: f32,
    pub y: f32,
}

impl FromStr for PointArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid coordinate '{}': {}", v.trim(), e))
        };
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Headless boid flocking simulation", long_about = None)]
pub struct Args {
    /// JSON settings file; missing fields fall back to defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of ticks to run (0 runs until interrupted)
    #[arg(short, long, default_value_t = 600)]
    pub ticks: u64,

    /// Override the boid count
    #[arg(long)]
    pub boids: Option<usize>,

    /// Override the predator count
    #[arg(long)]
    pub predators: Option<usize>,

    /// Override the world width
    #[arg(long)]
    pub width: Option<f32>,

    /// Override the world height
    #[arg(long)]
    pub height: Option<f32>,

    /// Seed for reproducible initial placement
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Hold the pointer still at X,Y for the whole run
    #[arg(short, long)]
    pub pointer: Option<PointArg>,

    /// Move agents one at a time instead of from a shared snapshot
    #[arg(long)]
    pub sequential: bool,

    /// Run as fast as possible instead of at the target frame rate
    #[arg(short, long)]
    pub unpaced: bool,

    /// Write frame snapshots as JSON lines to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write every Nth frame to --output
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub snapshot_every: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}
