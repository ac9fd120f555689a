#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking simulation core: boids that align, cohere and separate, flee a
//! pointer and a handful of predators, and wrap around a toroidal world.

extern crate alloc;

pub mod agent;
pub mod behavior;
pub mod config;
pub mod presenter;
pub mod vector;
pub mod world;

pub use agent::Agent;
pub use boid_shared::{AgentKind, AgentView, FrameSnapshot, SimulationSettings, StepMode};
pub use config::{BoidParams, ConfigError, PredatorParams, SteeringWeights, WorldConfig};
pub use presenter::{run, FrameInput, Presenter};
pub use vector::Vector2D;
pub use world::World;
