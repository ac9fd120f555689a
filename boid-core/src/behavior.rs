//! Steering terms for boids and predators.
//!
//! Every function here is pure: it reads a population slice and returns a
//! vector. The focal agent is addressed by its index in its own population
//! and skipped by index during neighbor scans.

use crate::agent::Agent;
use crate::config::{BoidParams, PredatorParams};
use crate::vector::Vector2D;

/// Group terms gathered from one agent's own population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborTerms {
    /// Average neighbor velocity, rescaled to `max_speed`.
    pub alignment: Vector2D,
    /// Direction to the neighbors' centre of mass, rescaled to `max_speed`.
    pub cohesion: Vector2D,
    /// Sum of offsets away from every agent inside the separation radius.
    pub separation: Vector2D,
    pub neighbors: usize,
}

/// Scans `population` for agents near `population[index]`.
pub fn neighbor_terms(
    index: usize,
    population: &[Agent],
    max_speed: f32,
    neighbor_radius: f32,
    separation_radius: f32,
) -> NeighborTerms {
    let focal = &population[index];
    let mut alignment_sum = Vector2D::zero();
    let mut cohesion_sum = Vector2D::zero();
    let mut separation = Vector2D::zero();
    let mut neighbors = 0usize;

    for (other_index, other) in population.iter().enumerate() {
        if other_index == index {
            continue;
        }
        let distance = focal.position.distance(&other.position);
        if distance < neighbor_radius {
            alignment_sum += other.velocity;
            cohesion_sum += other.position;
            neighbors += 1;
        }
        if distance < separation_radius {
            separation += focal.position - other.position;
        }
    }

    let (alignment, cohesion) = if neighbors > 0 {
        let count = neighbors as f32;
        (
            (alignment_sum / count).normalize() * max_speed,
            (cohesion_sum / count - focal.position).normalize() * max_speed,
        )
    } else {
        (Vector2D::zero(), Vector2D::zero())
    };

    NeighborTerms {
        alignment,
        cohesion,
        separation,
        neighbors,
    }
}

/// Push away from `source` that grows as `radius / distance`.
/// Zero outside `radius` and when the two points coincide.
pub fn repulsion(position: Vector2D, source: Vector2D, radius: f32) -> Vector2D {
    let away = position - source;
    let distance = away.magnitude();
    if distance < radius && distance > 0.0 {
        away.normalize() * (radius / distance)
    } else {
        Vector2D::zero()
    }
}

/// Repulsion from the pointer, if there is one.
pub fn pointer_repulsion(agent: &Agent, pointer: Option<Vector2D>, radius: f32) -> Vector2D {
    pointer
        .map(|pointer| repulsion(agent.position, pointer, radius))
        .unwrap_or_default()
}

/// Combined flight from every predator inside `radius`.
pub fn predator_flee(agent: &Agent, predators: &[Agent], radius: f32, gain: f32) -> Vector2D {
    let mut flee = Vector2D::zero();
    for predator in predators {
        flee += repulsion(agent.position, predator.position, radius) * gain;
    }
    flee
}

/// Full-speed heading toward the nearest member of `prey`.
/// Ties go to the earlier agent. Zero when `prey` is empty.
pub fn chase(agent: &Agent, prey: &[Agent], max_speed: f32) -> Vector2D {
    prey.iter()
        .map(|target| (agent.position.distance(&target.position), target))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, nearest)| (nearest.position - agent.position).normalize() * max_speed)
        .unwrap_or_default()
}

/// Velocity change for `boids[index]` this tick.
pub fn boid_steering(
    index: usize,
    boids: &[Agent],
    pointer: Option<Vector2D>,
    predators: &[Agent],
    params: &BoidParams,
) -> Vector2D {
    let agent = &boids[index];
    let terms = neighbor_terms(
        index,
        boids,
        params.max_speed,
        params.neighbor_radius,
        params.separation_radius,
    );

    let mut separation = terms.separation;
    separation += pointer_repulsion(agent, pointer, params.mouse_repel_radius);
    if !predators.is_empty() {
        separation += predator_flee(
            agent,
            predators,
            params.predator_chase_radius,
            params.predator_flee_gain,
        );
    }

    let weights = &params.weights;
    terms.alignment * weights.alignment
        + terms.cohesion * weights.cohesion
        + separation * weights.separation
}

/// Velocity change for `predators[index]` this tick.
pub fn predator_steering(
    index: usize,
    predators: &[Agent],
    boids: &[Agent],
    params: &PredatorParams,
) -> Vector2D {
    let agent = &predators[index];
    let terms = neighbor_terms(
        index,
        predators,
        params.max_speed,
        params.neighbor_radius,
        params.separation_radius,
    );
    let chase = chase(agent, boids, params.max_speed);

    let weights = &params.weights;
    let steering = terms.alignment * weights.alignment
        + terms.cohesion * weights.cohesion
        + terms.separation * weights.separation
        + chase * weights.chase;

    match params.steering_limit {
        Some(limit) => steering.limit(limit),
        None => steering,
    }
}
