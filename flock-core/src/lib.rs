//! Boid flocking on a bounded 2D plane.
//!
//! [`FlockingEngine`] owns the flock and advances it one frame per
//! [`FlockingEngine::tick`]: separation, alignment and cohesion steer each
//! boid relative to its neighbors, and a pointer position repels boids that
//! come too close. Neighbor candidates come from a [`NeighborQuery`], by
//! default the uniform [`SpatialGrid`] behind [`GridQuery`].

pub mod boid;
pub mod engine;
pub mod grid;
pub mod params;
pub mod query;
pub mod vector;

pub use boid::Boid;
pub use engine::{FlockingEngine, Steering, DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use flock_shared::{BoidSnapshot, FlockSettings};
pub use grid::SpatialGrid;
pub use params::SimulationParams;
pub use query::{BruteForceQuery, GridQuery, NeighborQuery};
pub use vector::Vector2D;
