use flock_shared::BoidSnapshot;
use rand::Rng;

use crate::vector::Vector2D;

pub const DEFAULT_MAX_SPEED: f32 = 2.0;
pub const DEFAULT_MAX_FORCE: f32 = 0.03;

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Forces accumulated since the last `update`
    pub acceleration: Vector2D,
    pub max_speed: f32,
    pub max_force: f32,
}

impl Boid {
    /// Creates a boid at `(x, y)` with each velocity component drawn
    /// uniformly from `[-1, 1)`.
    pub fn new<R: Rng + ?Sized>(x: f32, y: f32, rng: &mut R) -> Self {
        let velocity = Vector2D::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        Self::with_velocity(Vector2D::new(x, y), velocity)
    }

    pub fn with_velocity(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            max_speed: DEFAULT_MAX_SPEED,
            max_force: DEFAULT_MAX_FORCE,
        }
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Euler step: the speed cap is applied before the position moves, so a
    /// boid never covers more than `max_speed` in one frame.
    pub fn update(&mut self) {
        self.velocity = (self.velocity + self.acceleration).limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();
    }

    /// Snaps a boid that left the domain to the opposite edge.
    ///
    /// This is a one-sided snap rather than a modulo wrap: a boid at
    /// `width + 50` lands on `0`, not on `50`.
    pub fn wrap_around(&mut self, width: f32, height: f32) {
        if self.position.x < 0.0 {
            self.position.x = width;
        }
        if self.position.x > width {
            self.position.x = 0.0;
        }
        if self.position.y < 0.0 {
            self.position.y = height;
        }
        if self.position.y > height {
            self.position.y = 0.0;
        }
    }

    /// Steering force toward `target`, capped at `max_force`
    pub fn seek(&self, target: Vector2D) -> Vector2D {
        let desired = (target - self.position).normalize() * self.max_speed;
        (desired - self.velocity).limit(self.max_force)
    }

    pub fn snapshot(&self) -> BoidSnapshot {
        BoidSnapshot::new(
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
        )
    }
}
