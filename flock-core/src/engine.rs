//! Per-frame orchestration of the flock.
//!
//! A frame runs in two phases. First every boid's steering is computed
//! against the positions and velocities as they stood when the frame began;
//! only then are the forces applied, the boids integrated and wrapped. No
//! boid's motion in a frame can leak into another boid's steering for that
//! same frame.

use flock_shared::BoidSnapshot;
use rand::Rng;

use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::query::{GridQuery, NeighborQuery};
use crate::vector::Vector2D;

pub const DEFAULT_WIDTH: f32 = 800.0;
pub const DEFAULT_HEIGHT: f32 = 600.0;

/// Grid cell side. Comfortably above the default behavior radii (at most 50)
/// so most queries touch a 3x3 block of cells.
pub const DEFAULT_CELL_SIZE: f32 = 75.0;

/// Pointer position before a host reports one: far outside the domain.
pub const DEFAULT_POINTER: Vector2D = Vector2D {
    x: -1000.0,
    y: -1000.0,
};

const AVOIDANCE_FORCE_FACTOR: f32 = 3.0;

/// The four steering forces computed for one boid in one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub avoidance: Vector2D,
}

impl Steering {
    pub fn total(&self) -> Vector2D {
        self.separation + self.alignment + self.cohesion + self.avoidance
    }

    fn apply_to(&self, boid: &mut Boid) {
        boid.apply_force(self.separation);
        boid.apply_force(self.alignment);
        boid.apply_force(self.cohesion);
        boid.apply_force(self.avoidance);
    }
}

/// Owns the flock, its parameters and the neighbor index
///
/// The engine starts uninitialized with no boids; [`FlockingEngine::tick`] is
/// then a no-op. The neighbor index always mirrors the current boid
/// positions between calls, so the per-behavior force methods can be called
/// at any time.
pub struct FlockingEngine<Q: NeighborQuery = GridQuery> {
    boids: Vec<Boid>,
    params: SimulationParams,
    width: f32,
    height: f32,
    pointer: Vector2D,
    query: Q,
    steering: Vec<Steering>,
    initialized: bool,
}

impl FlockingEngine<GridQuery> {
    pub fn new() -> Self {
        Self::with_query(GridQuery::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            DEFAULT_CELL_SIZE,
        ))
    }
}

impl Default for FlockingEngine<GridQuery> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: NeighborQuery> FlockingEngine<Q> {
    pub fn with_query(mut query: Q) -> Self {
        query.reset(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        Self {
            boids: Vec::new(),
            params: SimulationParams::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pointer: DEFAULT_POINTER,
            query,
            steering: Vec::new(),
            initialized: false,
        }
    }

    /// Replaces the flock with `count` boids scattered uniformly over a
    /// `width x height` domain.
    pub fn initialize<R>(&mut self, count: usize, width: f32, height: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let mut boids = Vec::with_capacity(count);
        for _ in 0..count {
            let x = rng.gen::<f32>() * width;
            let y = rng.gen::<f32>() * height;
            boids.push(Boid::new(x, y, rng));
        }
        self.initialize_with(boids, width, height);
    }

    /// Replaces the flock with a prepared population.
    pub fn initialize_with(&mut self, boids: Vec<Boid>, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.boids = boids;
        self.steering.clear();
        self.query.reset(width, height);
        self.query.rebuild(&self.boids);
        self.initialized = true;

        log::debug!(
            "Initialized {} boids in a {}x{} domain",
            self.boids.len(),
            width,
            height
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self) {
        let mut steering = std::mem::take(&mut self.steering);
        self.compute_steering(&mut steering);

        for (boid, force) in self.boids.iter_mut().zip(&steering) {
            force.apply_to(boid);
            boid.update();
            boid.wrap_around(self.width, self.height);
        }

        self.steering = steering;
        self.query.rebuild(&self.boids);
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_steering(&self, out: &mut Vec<Steering>) {
        out.clear();
        out.extend((0..self.boids.len()).map(|i| self.steering(i)));
    }

    #[cfg(feature = "parallel")]
    fn compute_steering(&self, out: &mut Vec<Steering>) {
        use rayon::prelude::*;

        (0..self.boids.len())
            .into_par_iter()
            .map(|i| self.steering(i))
            .collect_into_vec(out);
    }

    /// All four forces boid `i` would receive this frame
    pub fn steering(&self, i: usize) -> Steering {
        Steering {
            separation: self.separate(i),
            alignment: self.align(i),
            cohesion: self.cohesion(i),
            avoidance: self.avoid_pointer(i),
        }
    }

    /// Steers away from crowding neighbors, weighting closer ones more.
    pub fn separate(&self, i: usize) -> Vector2D {
        let Some(boid) = self.boids.get(i) else {
            return Vector2D::zero();
        };

        let mut sum = Vector2D::zero();
        let mut count = 0usize;
        self.for_each_neighbor_within(i, self.params.separation_radius, |other, distance_sq| {
            let away = (boid.position - other.position).normalize();
            sum += away / distance_sq.sqrt();
            count += 1;
        });

        if count == 0 {
            return Vector2D::zero();
        }

        let desired = (sum / count as f32).normalize() * boid.max_speed;
        (desired - boid.velocity).limit(boid.max_force) * self.params.separation_strength
    }

    /// Steers toward the average heading of nearby boids.
    pub fn align(&self, i: usize) -> Vector2D {
        let Some(boid) = self.boids.get(i) else {
            return Vector2D::zero();
        };

        let mut sum = Vector2D::zero();
        let mut count = 0usize;
        self.for_each_neighbor_within(i, self.params.alignment_radius, |other, _| {
            sum += other.velocity;
            count += 1;
        });

        if count == 0 {
            return Vector2D::zero();
        }

        let desired = (sum / count as f32).normalize() * boid.max_speed;
        (desired - boid.velocity).limit(boid.max_force) * self.params.alignment_strength
    }

    /// Steers toward the center of mass of nearby boids.
    pub fn cohesion(&self, i: usize) -> Vector2D {
        let Some(boid) = self.boids.get(i) else {
            return Vector2D::zero();
        };

        let mut sum = Vector2D::zero();
        let mut count = 0usize;
        self.for_each_neighbor_within(i, self.params.cohesion_radius, |other, _| {
            sum += other.position;
            count += 1;
        });

        if count == 0 {
            return Vector2D::zero();
        }

        boid.seek(sum / count as f32) * self.params.cohesion_strength
    }

    /// Pushes away from the pointer while it is within the avoidance distance.
    pub fn avoid_pointer(&self, i: usize) -> Vector2D {
        let Some(boid) = self.boids.get(i) else {
            return Vector2D::zero();
        };

        let distance = self.params.avoidance_distance;
        if boid.position.distance_squared(&self.pointer) < distance * distance {
            (boid.position - self.pointer).normalize() * (boid.max_force * AVOIDANCE_FORCE_FACTOR)
        } else {
            Vector2D::zero()
        }
    }

    // Candidates from the index, minus `i` itself, filtered to
    // 0 < distance² < radius². The zero-distance guard also skips distinct
    // boids sharing a position.
    fn for_each_neighbor_within<F>(&self, i: usize, radius: f32, mut visit: F)
    where
        F: FnMut(&Boid, f32),
    {
        let Some(boid) = self.boids.get(i) else {
            return;
        };
        let radius_sq = radius * radius;

        self.query.for_each_candidate(boid.position, radius, |j| {
            if j == i {
                return;
            }
            if let Some(other) = self.boids.get(j) {
                let distance_sq = boid.position.distance_squared(&other.position);
                if distance_sq > 0.0 && distance_sq < radius_sq {
                    visit(other, distance_sq);
                }
            }
        });
    }

    pub fn set_pointer_position(&mut self, x: f32, y: f32) {
        self.pointer = Vector2D::new(x, y);
    }

    pub fn pointer(&self) -> Vector2D {
        self.pointer
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SimulationParams) {
        log::trace!("Parameters replaced: {:?}", params);
        self.params = params;
    }

    pub fn set_separation_params(&mut self, radius: f32, strength: f32) {
        log::trace!("Separation radius={} strength={}", radius, strength);
        self.params.separation_radius = radius;
        self.params.separation_strength = strength;
    }

    pub fn set_alignment_params(&mut self, radius: f32, strength: f32) {
        log::trace!("Alignment radius={} strength={}", radius, strength);
        self.params.alignment_radius = radius;
        self.params.alignment_strength = strength;
    }

    pub fn set_cohesion_params(&mut self, radius: f32, strength: f32) {
        log::trace!("Cohesion radius={} strength={}", radius, strength);
        self.params.cohesion_radius = radius;
        self.params.cohesion_strength = strength;
    }

    pub fn set_avoidance_distance(&mut self, distance: f32) {
        log::trace!("Avoidance distance={}", distance);
        self.params.avoidance_distance = distance;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boid_count(&self) -> usize {
        self.boids.len()
    }

    /// Current state of every boid, in index order
    pub fn snapshots(&self) -> Vec<BoidSnapshot> {
        self.boids.iter().map(Boid::snapshot).collect()
    }

    // Out-of-range indices read as 0.0 rather than failing
    pub fn boid_position_x(&self, i: usize) -> f32 {
        self.boids.get(i).map_or(0.0, |b| b.position.x)
    }

    pub fn boid_position_y(&self, i: usize) -> f32 {
        self.boids.get(i).map_or(0.0, |b| b.position.y)
    }

    pub fn boid_velocity_x(&self, i: usize) -> f32 {
        self.boids.get(i).map_or(0.0, |b| b.velocity.x)
    }

    pub fn boid_velocity_y(&self, i: usize) -> f32 {
        self.boids.get(i).map_or(0.0, |b| b.velocity.y)
    }
}
