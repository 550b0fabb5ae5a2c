use crate::boid::Boid;
use crate::grid::SpatialGrid;
use crate::vector::Vector2D;

/// Source of neighbor candidates for the flocking behaviors
///
/// Implementations may report more indices than are actually within the
/// radius (the engine filters by exact distance) but never fewer.
pub trait NeighborQuery: Send + Sync {
    /// Re-targets the query at a new domain. Called on (re)initialization.
    fn reset(&mut self, width: f32, height: f32);

    /// Indexes the boid positions for the coming frame.
    fn rebuild(&mut self, boids: &[Boid]);

    /// Calls `visit` with the index of every candidate neighbor of `position`.
    fn for_each_candidate<F: FnMut(usize)>(&self, position: Vector2D, radius: f32, visit: F);
}

/// Grid-accelerated neighbor lookups backed by a [`SpatialGrid`]
pub struct GridQuery {
    grid: SpatialGrid,
}

impl GridQuery {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        Self {
            grid: SpatialGrid::new(width, height, cell_size),
        }
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }
}

impl NeighborQuery for GridQuery {
    fn reset(&mut self, width: f32, height: f32) {
        let cell_size = self.grid.cell_size();
        self.grid = SpatialGrid::new(width, height, cell_size);
    }

    fn rebuild(&mut self, boids: &[Boid]) {
        self.grid.clear();
        for (i, boid) in boids.iter().enumerate() {
            self.grid.insert(i, boid.position);
        }
    }

    fn for_each_candidate<F: FnMut(usize)>(&self, position: Vector2D, radius: f32, visit: F) {
        self.grid.for_each_neighbor(position, radius, visit);
    }
}

/// Reports every boid as a candidate. O(n²) per frame; kept as a reference
/// for cross-checking the grid on small populations.
#[derive(Debug, Default)]
pub struct BruteForceQuery {
    count: usize,
}

impl BruteForceQuery {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NeighborQuery for BruteForceQuery {
    fn reset(&mut self, _width: f32, _height: f32) {
        self.count = 0;
    }

    fn rebuild(&mut self, boids: &[Boid]) {
        self.count = boids.len();
    }

    fn for_each_candidate<F: FnMut(usize)>(&self, _position: Vector2D, _radius: f32, visit: F) {
        (0..self.count).for_each(visit);
    }
}
