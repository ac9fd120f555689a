use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use boid_core::{FrameInput, Presenter, Vector2D, World};

/// How a headless run is driven.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Stop after this many ticks; 0 never stops.
    pub ticks: u64,
    pub pointer: Option<Vector2D>,
    /// Sleep between frames to hold `target_fps`.
    pub paced: bool,
    pub target_fps: u32,
    /// Write every Nth frame when an output sink is attached.
    pub snapshot_every: u64,
}

/// Headless presenter: paces frames, logs throughput and optionally
/// streams frame snapshots as JSON lines.
pub struct Runner<W: Write> {
    options: RunnerOptions,
    output: Option<W>,
    stop: Arc<AtomicBool>,
    frames: u64,
    frames_written: u64,
    started: Instant,
    last_frame: Instant,
    window_start: Instant,
    window_frames: u32,
}

impl<W: Write> Runner<W> {
    pub fn new(mut options: RunnerOptions, output: Option<W>) -> Self {
        options.snapshot_every = options.snapshot_every.max(1);
        let now = Instant::now();
        Self {
            options,
            output,
            stop: Arc::new(AtomicBool::new(false)),
            frames: 0,
            frames_written: 0,
            started: now,
            last_frame: now,
            window_start: now,
            window_frames: 0,
        }
    }

    /// Ends the run after the current frame once `stop` is set.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Average frames per second since the runner was created.
    pub fn fps(&self) -> f32 {
        let secs = self.started.elapsed().as_secs_f32();
        if secs > 0.0 {
            self.frames as f32 / secs
        } else {
            0.0
        }
    }

    /// Flushes and hands back the output sink.
    pub fn finish(mut self) -> Result<Option<W>> {
        if let Some(out) = self.output.as_mut() {
            out.flush().context("Failed to flush snapshot output")?;
        }
        Ok(self.output)
    }

    fn frame_budget(&self) -> Option<Duration> {
        if self.options.paced && self.options.target_fps > 0 {
            Some(Duration::from_secs_f64(1.0 / self.options.target_fps as f64))
        } else {
            None
        }
    }

    fn pace(&mut self) {
        if let Some(budget) = self.frame_budget() {
            let elapsed = self.last_frame.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            } else if elapsed > budget * 2 {
                log::warn!(
                    "Frame took {:.1}ms, budget is {:.1}ms",
                    elapsed.as_secs_f64() * 1000.0,
                    budget.as_secs_f64() * 1000.0
                );
            }
        }
        self.last_frame = Instant::now();
    }

    fn log_throughput(&mut self, world: &World) {
        self.window_frames += 1;
        let window = self.window_start.elapsed();
        if window.as_secs() >= 1 {
            log::debug!(
                "tick {}: {:.1} FPS, mean boid speed {:.2}",
                world.tick_count(),
                self.window_frames as f64 / window.as_secs_f64(),
                world.mean_boid_speed()
            );
            self.window_frames = 0;
            self.window_start = Instant::now();
        }
    }
}

impl<W: Write> Presenter for Runner<W> {
    type Error = anyhow::Error;

    fn input(&mut self) -> FrameInput {
        if self.stop.load(Ordering::SeqCst) {
            log::info!("Quit requested after {} frames", self.frames);
            FrameInput::quit()
        } else if self.options.ticks > 0 && self.frames >= self.options.ticks {
            FrameInput::quit()
        } else {
            FrameInput::running(self.options.pointer)
        }
    }

    fn present(&mut self, world: &World) -> Result<()> {
        self.frames += 1;

        if let Some(out) = self.output.as_mut() {
            if world.tick_count() % self.options.snapshot_every == 0 {
                let line = world
                    .snapshot()
                    .to_json_line()
                    .context("Failed to serialize frame snapshot")?;
                writeln!(out, "{}", line).context("Failed to write frame snapshot")?;
                self.frames_written += 1;
            }
        }

        self.log_throughput(world);
        self.pace();
        Ok(())
    }
}
