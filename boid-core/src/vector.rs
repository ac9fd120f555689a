use boid_shared::Position;

fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

fn sin_cos(radians: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        radians.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sincosf(radians)
    }
}

/// Folds an angle in degrees into `(-180, 180]`.
pub(crate) fn wrap_degrees(degrees: f32) -> f32 {
    let mut angle = degrees % 360.0;
    if angle <= -180.0 {
        angle += 360.0;
    } else if angle > 180.0 {
        angle -= 360.0;
    }
    angle
}

/// A 2D vector used for position and velocity.
///
/// Every operation returns a new value; nothing mutates through a shared
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing `degrees` clockwise from +x in screen space.
    pub fn from_heading(degrees: f32) -> Self {
        let (sin, cos) = sin_cos(degrees.to_radians());
        Self::new(cos, sin)
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.magnitude_squared())
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Rescales to exactly `length`. The zero vector stays zero.
    pub fn scale_to_length(&self, length: f32) -> Self {
        self.normalize() * length
    }

    /// Rescales to `max` only when longer than `max`.
    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude() > max {
            self.scale_to_length(max)
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    /// Rotates by `degrees`, clockwise-positive with Y pointing down.
    pub fn rotate(&self, degrees: f32) -> Self {
        let (sin, cos) = sin_cos(degrees.to_radians());
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Direction in degrees measured from +x, in `(-180, 180]`.
    pub fn heading(&self) -> f32 {
        atan2(self.y, self.x).to_degrees()
    }

    /// Signed angle in degrees that rotates `self` onto `reference`,
    /// in `(-180, 180]`.
    pub fn angle_to(&self, reference: &Vector2D) -> f32 {
        wrap_degrees(reference.heading() - self.heading())
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl From<Position> for Vector2D {
    fn from(position: Position) -> Self {
        Self::new(position.x, position.y)
    }
}

impl From<Vector2D> for Position {
    fn from(vector: Vector2D) -> Self {
        Position::new(vector.x, vector.y)
    }
}
