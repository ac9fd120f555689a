use alloc::vec::Vec;

use boid_shared::{AgentKind, FrameSnapshot, StepMode};

use crate::agent::Agent;
use crate::behavior;
use crate::config::{validate_dimensions, ConfigError, WorldConfig};
use crate::vector::Vector2D;

#[cfg(feature = "std")]
use rand::Rng;

/// Both populations plus the configuration they are simulated under.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    boids: Vec<Agent>,
    predators: Vec<Agent>,
    tick: u64,
}

impl World {
    pub fn new(config: WorldConfig, boids: Vec<Agent>, predators: Vec<Agent>) -> Self {
        Self {
            config,
            boids,
            predators,
            tick: 0,
        }
    }

    /// Populates `config.boid_count` boids and `config.predator_count`
    /// predators at random positions and headings.
    #[cfg(feature = "std")]
    pub fn random(config: WorldConfig) -> Self {
        Self::random_with_rng(config, &mut rand::thread_rng())
    }

    #[cfg(feature = "std")]
    pub fn random_with_rng<R: Rng + ?Sized>(config: WorldConfig, rng: &mut R) -> Self {
        let (width, height) = (config.width, config.height);
        let boids = (0..config.boid_count)
            .map(|_| Agent::random(&mut *rng, width, height, config.boid.max_speed))
            .collect();
        let predators = (0..config.predator_count)
            .map(|_| Agent::random(&mut *rng, width, height, config.predator.max_speed))
            .collect();
        Self::new(config, boids, predators)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn boids(&self) -> &[Agent] {
        &self.boids
    }

    pub fn predators(&self) -> &[Agent] {
        &self.predators
    }

    /// Number of ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn add_boid(&mut self, boid: Agent) {
        self.boids.push(boid);
    }

    pub fn add_predator(&mut self, predator: Agent) {
        self.predators.push(predator);
    }

    /// Changes the domain and wraps every agent that now lies outside it.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        validate_dimensions(width, height)?;
        self.config.width = width;
        self.config.height = height;
        for agent in self.boids.iter_mut().chain(self.predators.iter_mut()) {
            agent.wrap_edges(width, height);
        }
        Ok(())
    }

    /// Advances the world by one step, boids first, then predators.
    pub fn tick(&mut self, pointer: Option<Vector2D>) {
        match self.config.step_mode {
            StepMode::Snapshot => self.tick_snapshot(pointer),
            StepMode::Sequential => self.tick_sequential(pointer),
        }
        self.tick += 1;
    }

    fn tick_snapshot(&mut self, pointer: Option<Vector2D>) {
        let config = &self.config;

        let boid_steering: Vec<Vector2D> = (0..self.boids.len())
            .map(|i| behavior::boid_steering(i, &self.boids, pointer, &self.predators, &config.boid))
            .collect();
        let predator_steering: Vec<Vector2D> = (0..self.predators.len())
            .map(|i| behavior::predator_steering(i, &self.predators, &self.boids, &config.predator))
            .collect();

        for (boid, steering) in self.boids.iter_mut().zip(boid_steering) {
            boid.integrate(steering, config.boid.max_speed);
            boid.wrap_edges(config.width, config.height);
        }
        for (predator, steering) in self.predators.iter_mut().zip(predator_steering) {
            predator.integrate(steering, config.predator.max_speed);
            predator.wrap_edges(config.width, config.height);
        }
    }

    fn tick_sequential(&mut self, pointer: Option<Vector2D>) {
        let config = self.config;

        for i in 0..self.boids.len() {
            let steering =
                behavior::boid_steering(i, &self.boids, pointer, &self.predators, &config.boid);
            let boid = &mut self.boids[i];
            boid.integrate(steering, config.boid.max_speed);
            boid.wrap_edges(config.width, config.height);
        }
        for i in 0..self.predators.len() {
            let steering =
                behavior::predator_steering(i, &self.predators, &self.boids, &config.predator);
            let predator = &mut self.predators[i];
            predator.integrate(steering, config.predator.max_speed);
            predator.wrap_edges(config.width, config.height);
        }
    }

    /// Mean boid speed, or 0 for an empty flock.
    pub fn mean_boid_speed(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        let total: f32 = self.boids.iter().map(|b| b.velocity.magnitude()).sum();
        total / self.boids.len() as f32
    }

    /// Everything the presentation layer needs to draw the current frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        let agents = self
            .boids
            .iter()
            .map(|b| b.view(AgentKind::Boid))
            .chain(self.predators.iter().map(|p| p.view(AgentKind::Predator)))
            .collect();

        FrameSnapshot {
            tick: self.tick,
            width: self.config.width,
            height: self.config.height,
            agents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: f32, y: f32) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::zero())
    }

    #[test]
    fn test_world_creation() {
        let config = WorldConfig {
            boid_count: 50,
            predator_count: 3,
            ..WorldConfig::default()
        };
        let world = World::random(config);
        assert_eq!(world.boids().len(), 50);
        assert_eq!(world.predators().len(), 3);
        assert_eq!(world.config().width, 800.0);
        assert_eq!(world.tick_count(), 0);
    }

    #[test]
    fn test_seeded_worlds_match() {
        let config = WorldConfig {
            boid_count: 20,
            predator_count: 2,
            ..WorldConfig::default()
        };
        let a = World::random_with_rng(config, &mut StdRng::seed_from_u64(7));
        let b = World::random_with_rng(config, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.boids(), b.boids());
        assert_eq!(a.predators(), b.predators());
    }

    #[test]
    fn test_world_update_moves_agents() {
        let mut world = World::random(WorldConfig {
            boid_count: 10,
            ..WorldConfig::default()
        });
        let initial: Vec<_> = world.boids().iter().map(|b| b.position).collect();

        world.tick(None);

        let changed = world
            .boids()
            .iter()
            .zip(initial.iter())
            .any(|(b, &initial)| b.position != initial);
        assert!(changed);
        assert_eq!(world.tick_count(), 1);
    }

    #[test]
    fn test_snapshot_mode_is_order_independent() {
        let boids = vec![at(100.0, 100.0), at(102.0, 100.0), at(101.0, 103.0)];
        let mut forward = World::new(WorldConfig::default(), boids.clone(), Vec::new());
        let reversed: Vec<_> = boids.iter().rev().copied().collect();
        let mut backward = World::new(WorldConfig::default(), reversed, Vec::new());

        forward.tick(None);
        backward.tick(None);

        let mut back: Vec<_> = backward.boids().to_vec();
        back.reverse();
        assert_eq!(forward.boids(), &back[..]);
    }

    #[test]
    fn test_sequential_mode_sees_moved_neighbors() {
        let config = WorldConfig {
            step_mode: StepMode::Sequential,
            ..WorldConfig::default()
        };
        let boids = vec![at(100.0, 100.0), at(102.0, 100.0)];
        let mut sequential = World::new(config, boids.clone(), Vec::new());
        let mut snapshot = World::new(WorldConfig::default(), boids, Vec::new());

        sequential.tick(None);
        snapshot.tick(None);

        // The first boid is steered from identical state in both modes.
        assert_eq!(sequential.boids()[0], snapshot.boids()[0]);
        assert_ne!(sequential.boids()[1], snapshot.boids()[1]);
    }

    #[test]
    fn test_predators_chase_previous_boid_positions_in_snapshot_mode() {
        let boids = vec![Agent::new(Vector2D::new(100.0, 100.0), Vector2D::new(4.0, 0.0))];
        let predators = vec![at(100.0, 200.0)];
        let mut world = World::new(WorldConfig::default(), boids, predators);

        world.tick(None);

        // Chase aims straight up at where the boid was, not where it went.
        let predator = world.predators()[0];
        assert!(predator.velocity.x.abs() < 1e-6);
        assert!(predator.velocity.y < 0.0);
    }

    #[test]
    fn test_resize_rewraps_agents() {
        let mut world = World::new(WorldConfig::default(), vec![at(700.0, 500.0)], Vec::new());
        world.resize(400.0, 300.0).unwrap();
        assert_eq!(world.boids()[0].position, Vector2D::zero());
        assert_eq!(world.config().width, 400.0);
    }

    #[test]
    fn test_resize_rejects_empty_domain() {
        let mut world = World::new(WorldConfig::default(), Vec::new(), Vec::new());
        assert!(world.resize(0.0, 300.0).is_err());
        assert!(world.resize(400.0, f32::MIN_POSITIVE / 2.0).is_err());
        assert_eq!(world.config().width, 800.0);
    }

    #[test]
    fn test_add_agents() {
        let mut world = World::new(WorldConfig::default(), Vec::new(), Vec::new());
        world.add_boid(at(1.0, 1.0));
        world.add_predator(at(2.0, 2.0));
        assert_eq!(world.boids().len(), 1);
        assert_eq!(world.predators().len(), 1);
    }

    #[test]
    fn test_snapshot_lists_boids_then_predators() {
        let world = World::new(
            WorldConfig::default(),
            vec![at(1.0, 1.0), at(2.0, 2.0)],
            vec![at(3.0, 3.0)],
        );
        let snapshot = world.snapshot();
        assert_eq!(snapshot.agents.len(), 3);
        assert_eq!(snapshot.agents[0].kind, AgentKind::Boid);
        assert_eq!(snapshot.agents[2].kind, AgentKind::Predator);
        assert_eq!(snapshot.width, 800.0);
    }

    #[test]
    fn test_mean_boid_speed() {
        let empty = World::new(WorldConfig::default(), Vec::new(), Vec::new());
        assert_eq!(empty.mean_boid_speed(), 0.0);

        let world = World::new(
            WorldConfig::default(),
            vec![
                Agent::new(Vector2D::zero(), Vector2D::new(3.0, 4.0)),
                Agent::new(Vector2D::zero(), Vector2D::new(1.0, 0.0)),
            ],
            Vec::new(),
        );
        assert_eq!(world.mean_boid_speed(), 3.0);
    }
}
