//! Spatial grid partitioning for connective-edge search.
//!
//! Drawing edges needs every pair of particles closer than the connection
//! distance.  Checking every pair is O(N²).  The grid buckets particles by
//! cell and only pairs particles whose cells touch, so each particle meets
//! the occupants of its 3×3 block and nothing else.
//!
//! ## Cell Size Choice
//!
//! The cell size equals the query distance, so one ring of neighbouring
//! cells is always enough.  Smaller cells would force a wider ring; larger
//! cells would return more candidates that fail the exact distance check.

use bevy::math::Vec2;
use std::collections::HashMap;

/// Uniform grid over viewport coordinates holding particle indices.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    /// Map from cell coordinates to particle indices.
    cells: HashMap<(i32, i32), Vec<usize>>,
    /// Every inserted particle with its cell, in insertion order.
    entries: Vec<(usize, (i32, i32))>,
}

impl SpatialGrid {
    /// Grid whose cells are `cell_size` pixels wide.  Non-positive sizes are
    /// bumped to one pixel.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            cells: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Compute grid cell coordinates for a viewport position.
    fn world_to_cell(&self, pos: Vec2) -> (i32, i32) {
        let x = (pos.x / self.cell_size).floor() as i32;
        let y = (pos.y / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Add particle `index` at `pos`.  Indices must be unique per rebuild.
    pub fn insert(&mut self, index: usize, pos: Vec2) {
        let cell = self.world_to_cell(pos);
        self.cells.entry(cell).or_default().push(index);
        self.entries.push((index, cell));
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.entries.clear();
    }

    /// Clear and re-insert `positions`, indexed by their order.
    pub fn rebuild(&mut self, positions: impl IntoIterator<Item = Vec2>) {
        self.clear();
        for (index, pos) in positions.into_iter().enumerate() {
            self.insert(index, pos);
        }
    }

    /// Every unordered pair `(i, j)` with `i < j` whose cells touch.
    ///
    /// A conservative superset of the pairs within one cell size of each other.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for &(index, cell) in &self.entries {
            for dx in -1..=1 {
                for dy in -1..=1 {
                    if let Some(indices) = self.cells.get(&(cell.0 + dx, cell.1 + dy)) {
                        pairs.extend(indices.iter().filter(|&&j| j > index).map(|&j| (index, j)));
                    }
                }
            }
        }
        pairs
    }
}
