#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents a 2D position in screen coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The two populations living in a world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Boid,
    Predator,
}

/// How neighbor reads interleave with writes inside a tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Every agent steers from the previous tick's state of both populations.
    #[default]
    Snapshot,
    /// Agents are steered and moved one at a time, so later agents see
    /// already-moved neighbors and predators see this tick's boids.
    Sequential,
}

/// Boid tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoidSettings {
    pub max_speed: f32,
    pub neighbor_radius: f32,
    pub separation_radius: f32,
    /// Pointer repulsion reaches this far.
    pub mouse_repel_radius: f32,
    /// Boids start fleeing a predator inside this distance.
    pub predator_chase_radius: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    /// Extra gain on predator avoidance relative to pointer avoidance.
    pub predator_flee_gain: f32,
}

impl Default for BoidSettings {
    fn default() -> Self {
        Self {
            max_speed: 4.0,
            neighbor_radius: 50.0,
            separation_radius: 5.0,
            mouse_repel_radius: 100.0,
            predator_chase_radius: 150.0,
            alignment_weight: 0.05,
            cohesion_weight: 0.01,
            separation_weight: 0.1,
            predator_flee_gain: 1.5,
        }
    }
}

/// Predator tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredatorSettings {
    pub max_speed: f32,
    pub neighbor_radius: f32,
    /// Predators keep this far apart from each other.
    pub separation_radius: f32,
    /// Optional cap on the combined steering vector applied per tick.
    pub steering_limit: Option<f32>,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub chase_weight: f32,
}

impl Default for PredatorSettings {
    fn default() -> Self {
        Self {
            max_speed: 2.5,
            neighbor_radius: 50.0,
            separation_radius: 40.0,
            steering_limit: None,
            alignment_weight: 0.05,
            cohesion_weight: 0.01,
            separation_weight: 0.2,
            chase_weight: 0.2,
        }
    }
}

/// Presentation knobs. The simulation itself never reads these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualSettings {
    /// Half-length of a boid triangle.
    pub boid_size: f32,
    pub predator_size: f32,
    pub target_fps: u32,
    /// Alpha (out of 255) of the black layer blitted over the previous frame.
    pub trail_fade: u16,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            boid_size: 2.0,
            predator_size: 4.0,
            target_fps: 60,
            trail_fade: 55,
        }
    }
}

/// Complete simulation configuration, loadable from JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub width: f32,
    pub height: f32,
    pub boid_count: usize,
    pub predator_count: usize,
    pub step_mode: StepMode,
    pub boid: BoidSettings,
    pub predator: PredatorSettings,
    pub visuals: VisualSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            boid_count: 500,
            predator_count: 0,
            step_mode: StepMode::default(),
            boid: BoidSettings::default(),
            predator: PredatorSettings::default(),
            visuals: VisualSettings::default(),
        }
    }
}

#[cfg(feature = "std")]
impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// What the presentation layer needs to draw one agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentView {
    pub kind: AgentKind,
    pub position: Position,
    pub velocity: Position,
    /// Heading in degrees, clockwise from +x in screen space.
    pub heading: f32,
    /// Hue in `[0, 1)` derived from the heading.
    pub hue: f32,
}

/// State of the whole world after a tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub width: f32,
    pub height: f32,
    pub agents: Vec<AgentView>,
}

impl FrameSnapshot {
    pub fn count(&self, kind: AgentKind) -> usize {
        self.agents.iter().filter(|a| a.kind == kind).count()
    }
}

#[cfg(feature = "std")]
impl FrameSnapshot {
    /// Single-line JSON, suitable for a JSON-lines stream.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Summary reported when a run ends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub boid_count: usize,
    pub predator_count: usize,
    pub mean_boid_speed: f32,
    pub fps: f32,
}
