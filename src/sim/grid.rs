//! Grid dimensions
//!
//! The grid is not an entity, just the bounds every placement and
//! bounds check is measured against.

use serde::{Deserialize, Serialize};

use super::direction::Position;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

/// Width and height of the playfield in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }
}

impl GridSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total number of cells (0 for degenerate sizes)
    pub fn cell_count(&self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as usize * self.height as usize
    }

    /// True if `pos` lies inside [0, width) x [0, height)
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Center cell (rounded down)
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Canvas size in pixels for a given cell size
    pub fn canvas_size(&self, cell_size: u32) -> (u32, u32) {
        (
            self.width.max(0) as u32 * cell_size,
            self.height.max(0) as u32 * cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = GridSize::default();
        assert_eq!(grid.cell_count(), 1200);
        assert_eq!(grid.center(), Position::new(20, 15));
        assert_eq!(grid.canvas_size(20), (800, 600));
    }

    #[test]
    fn test_contains_edges() {
        let grid = GridSize::new(40, 30);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(39, 29)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(0, -1)));
        assert!(!grid.contains(Position::new(40, 0)));
        assert!(!grid.contains(Position::new(0, 30)));
        assert!(!grid.contains(Position::new(i32::MIN, i32::MAX)));
    }

    #[test]
    fn test_degenerate_grid() {
        assert_eq!(GridSize::new(0, 10).cell_count(), 0);
        assert_eq!(GridSize::new(-3, 10).cell_count(), 0);
        assert_eq!(GridSize::new(-3, 10).canvas_size(20), (0, 200));
    }
}
