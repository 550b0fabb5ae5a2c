//! Uniform grid over the simulation domain for neighbor lookups.
//!
//! The grid stores plain indices into a boid collection it does not own.
//! Queries return every index in the block of cells covering a radius, so
//! callers still have to apply the exact distance test.

use crate::vector::Vector2D;

const MIN_EXTENT: f32 = 1.0e-6;

/// Upper bound on cells along either axis. Caps the grid at about a million
/// cells however large the domain is.
pub const MAX_CELLS_PER_AXIS: usize = 1024;

pub struct SpatialGrid {
    cell_size: f32,
    width: f32,
    height: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Creates a grid of `ceil(width / cell_size) x ceil(height / cell_size)`
    /// empty cells.
    ///
    /// Non-positive or non-finite extents are clamped to a tiny positive
    /// size. An unusable `cell_size` falls back to a single cell spanning
    /// the whole domain. On domains wider than [`MAX_CELLS_PER_AXIS`] cells
    /// the cell size is coarsened to fit; queries stay correct because the
    /// searched block grows with the radius.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        let widest = width.max(height);
        let mut cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            widest
        };
        if widest / cell_size > MAX_CELLS_PER_AXIS as f32 {
            cell_size = widest / MAX_CELLS_PER_AXIS as f32;
        }

        let cols = axis_cells(width, cell_size);
        let rows = axis_cells(height, cell_size);
        let cell_count = cols.saturating_mul(rows);

        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cells: vec![Vec::new(); cell_count],
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of indices currently stored across all cells
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Empties every cell, keeping the allocated capacity for the next frame.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Files `index` under the cell containing `position`.
    ///
    /// Positions outside the domain are silently skipped.
    pub fn insert(&mut self, index: usize, position: Vector2D) {
        if let Some(cell) = self
            .cell_coords(position)
            .and_then(|(row, col)| self.cell_index(row, col))
        {
            self.cells[cell].push(index);
        }
    }

    /// Visits every index in the square block of cells that covers `radius`
    /// around `position`, row by row, in insertion order within a cell.
    pub fn for_each_neighbor<F>(&self, position: Vector2D, radius: f32, mut visit: F)
    where
        F: FnMut(usize),
    {
        let Some((center_row, center_col)) = self.cell_coords(position) else {
            return;
        };
        let cell_radius = (radius / self.cell_size).ceil() as isize;

        let min_row = center_row.saturating_sub(cell_radius).max(0);
        let max_row = center_row
            .saturating_add(cell_radius)
            .min(self.rows as isize - 1);
        let min_col = center_col.saturating_sub(cell_radius).max(0);
        let max_col = center_col
            .saturating_add(cell_radius)
            .min(self.cols as isize - 1);

        for row in min_row..=max_row {
            let row_start = row as usize * self.cols;
            for col in min_col..=max_col {
                for &index in &self.cells[row_start + col as usize] {
                    visit(index);
                }
            }
        }
    }

    /// Collects the candidates visited by [`SpatialGrid::for_each_neighbor`].
    pub fn neighbors(&self, position: Vector2D, radius: f32) -> Vec<usize> {
        let mut result = Vec::new();
        self.for_each_neighbor(position, radius, |index| result.push(index));
        result
    }

    // (row, col) of the cell containing `position`; may lie outside the grid
    fn cell_coords(&self, position: Vector2D) -> Option<(isize, isize)> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return None;
        }
        let col = (position.x / self.cell_size).floor() as isize;
        let row = (position.y / self.cell_size).floor() as isize;
        Some((row, col))
    }

    fn cell_index(&self, row: isize, col: isize) -> Option<usize> {
        let in_bounds =
            row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols;
        in_bounds.then(|| row as usize * self.cols + col as usize)
    }
}

fn axis_cells(extent: f32, cell_size: f32) -> usize {
    ((extent / cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS)
}

fn sanitize_extent(extent: f32) -> f32 {
    if extent.is_finite() && extent > MIN_EXTENT {
        extent
    } else {
        MIN_EXTENT
    }
}
