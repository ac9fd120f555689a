use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use boid_client::{execute, Args};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Boid simulation starting...");
    if let Some(path) = &args.config {
        log::info!("Settings: {}", path.display());
    }

    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = stop.clone();
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let summary = execute(&args, stop).context("Simulation error")?;
    println!(
        "{}",
        serde_json::to_string(&summary).context("Failed to serialize run summary")?
    );

    Ok(())
}
