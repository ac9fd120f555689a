use crate::vector::Vector2D;
use boid_shared::{AgentKind, AgentView};

#[cfg(feature = "std")]
use rand::Rng;

/// Maps a coordinate that left `[0, extent)` onto the opposite edge.
fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value >= extent {
        0.0
    } else if value < 0.0 {
        // Largest value still strictly inside the domain.
        extent - extent * f32::EPSILON
    } else {
        value
    }
}

/// A single agent. Boids and predators share this shape; what differs is
/// the parameter set they are steered with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self { position, velocity }
    }

    /// Uniform position in the domain, uniform heading, moving at `speed`.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, speed: f32) -> Self {
        let position = Vector2D::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let heading = rng.gen_range(0.0..core::f32::consts::TAU);
        let velocity = Vector2D::new(heading.cos(), heading.sin()) * speed;
        Self::new(position, velocity)
    }

    /// Adds `steering` to the velocity, clamps speed and moves one step.
    pub fn integrate(&mut self, steering: Vector2D, max_speed: f32) {
        self.velocity = (self.velocity + steering).limit(max_speed);
        self.position += self.velocity;
    }

    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        self.position.x = wrap_axis(self.position.x, width);
        self.position.y = wrap_axis(self.position.y, height);
    }

    /// Heading in degrees, clockwise from +x on screen.
    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    /// Hue in `[0, 1)` taken from the angle between velocity and +x.
    pub fn hue(&self) -> f32 {
        let angle = self.velocity.angle_to(&Vector2D::new(1.0, 0.0));
        let mut degrees = angle % 360.0;
        if degrees < 0.0 {
            degrees += 360.0;
        }
        if degrees >= 360.0 {
            degrees = 0.0;
        }
        degrees / 360.0
    }

    /// Vertices of the heading-oriented triangle drawn for this agent.
    /// `size` is the distance from the centre to the nose.
    pub fn triangle(&self, size: f32) -> [Vector2D; 3] {
        let heading = self.heading();
        [
            Vector2D::new(size, 0.0),
            Vector2D::new(-size / 2.0, size / 2.0),
            Vector2D::new(-size / 2.0, -size / 2.0),
        ]
        .map(|corner| self.position + corner.rotate(heading))
    }

    pub fn view(&self, kind: AgentKind) -> AgentView {
        AgentView {
            kind,
            position: self.position.into(),
            velocity: self.velocity.into(),
            heading: self.heading(),
            hue: self.hue(),
        }
    }
}
