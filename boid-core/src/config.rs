use boid_shared::{SimulationSettings, StepMode};
use thiserror::Error;

/// Rejected configuration, reported once at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world dimensions must be positive and finite, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("trail fade is an alpha value and must be at most 255, got {0}")]
    TrailFade(u16),
    #[error("target frame rate must be non-zero")]
    ZeroFrameRate,
}

/// Weights used when the steering terms are combined into one vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringWeights {
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
    /// Only predators chase; boids carry 0.
    pub chase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidParams {
    pub max_speed: f32,
    pub neighbor_radius: f32,
    pub separation_radius: f32,
    pub mouse_repel_radius: f32,
    pub predator_chase_radius: f32,
    pub predator_flee_gain: f32,
    pub weights: SteeringWeights,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredatorParams {
    pub max_speed: f32,
    pub neighbor_radius: f32,
    pub separation_radius: f32,
    pub steering_limit: Option<f32>,
    pub weights: SteeringWeights,
}

/// Validated, static configuration of a world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub boid_count: usize,
    pub predator_count: usize,
    pub step_mode: StepMode,
    pub boid: BoidParams,
    pub predator: PredatorParams,
}

impl WorldConfig {
    /// Validates `settings` and converts them into the simulation's parameters.
    pub fn from_settings(settings: &SimulationSettings) -> Result<Self, ConfigError> {
        validate(settings)?;
        Ok(Self::convert(settings))
    }

    fn convert(settings: &SimulationSettings) -> Self {
        let boid = &settings.boid;
        let predator = &settings.predator;

        Self {
            width: settings.width,
            height: settings.height,
            boid_count: settings.boid_count,
            predator_count: settings.predator_count,
            step_mode: settings.step_mode,
            boid: BoidParams {
                max_speed: boid.max_speed,
                neighbor_radius: boid.neighbor_radius,
                separation_radius: boid.separation_radius,
                mouse_repel_radius: boid.mouse_repel_radius,
                predator_chase_radius: boid.predator_chase_radius,
                predator_flee_gain: boid.predator_flee_gain,
                weights: SteeringWeights {
                    alignment: boid.alignment_weight,
                    cohesion: boid.cohesion_weight,
                    separation: boid.separation_weight,
                    chase: 0.0,
                },
            },
            predator: PredatorParams {
                max_speed: predator.max_speed,
                neighbor_radius: predator.neighbor_radius,
                separation_radius: predator.separation_radius,
                steering_limit: predator.steering_limit,
                weights: SteeringWeights {
                    alignment: predator.alignment_weight,
                    cohesion: predator.cohesion_weight,
                    separation: predator.separation_weight,
                    chase: predator.chase_weight,
                },
            },
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::convert(&SimulationSettings::default())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

pub(crate) fn validate_dimensions(width: f32, height: f32) -> Result<(), ConfigError> {
    let valid = |v: f32| v.is_normal() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimensions { width, height })
    }
}

fn validate(settings: &SimulationSettings) -> Result<(), ConfigError> {
    validate_dimensions(settings.width, settings.height)?;

    let boid = &settings.boid;
    positive("boid.max_speed", boid.max_speed)?;
    non_negative("boid.neighbor_radius", boid.neighbor_radius)?;
    non_negative("boid.separation_radius", boid.separation_radius)?;
    non_negative("boid.mouse_repel_radius", boid.mouse_repel_radius)?;
    non_negative("boid.predator_chase_radius", boid.predator_chase_radius)?;
    non_negative("boid.alignment_weight", boid.alignment_weight)?;
    non_negative("boid.cohesion_weight", boid.cohesion_weight)?;
    non_negative("boid.separation_weight", boid.separation_weight)?;
    non_negative("boid.predator_flee_gain", boid.predator_flee_gain)?;

    let predator = &settings.predator;
    positive("predator.max_speed", predator.max_speed)?;
    non_negative("predator.neighbor_radius", predator.neighbor_radius)?;
    non_negative("predator.separation_radius", predator.separation_radius)?;
    if let Some(limit) = predator.steering_limit {
        positive("predator.steering_limit", limit)?;
    }
    non_negative("predator.alignment_weight", predator.alignment_weight)?;
    non_negative("predator.cohesion_weight", predator.cohesion_weight)?;
    non_negative("predator.separation_weight", predator.separation_weight)?;
    non_negative("predator.chase_weight", predator.chase_weight)?;

    let visuals = &settings.visuals;
    non_negative("visuals.boid_size", visuals.boid_size)?;
    non_negative("visuals.predator_size", visuals.predator_size)?;
    if visuals.target_fps == 0 {
        return Err(ConfigError::ZeroFrameRate);
    }
    if visuals.trail_fade > 255 {
        return Err(ConfigError::TrailFade(visuals.trail_fade));
    }

    Ok(())
}
