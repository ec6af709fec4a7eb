//! Grid positions and movement directions

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A grid cell coordinate (cells, not pixels)
pub type Position = IVec2;

/// Movement direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in a stable order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The reverse direction (up <-> down, left <-> right)
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit displacement for one step. Screen coordinates: y grows downward.
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn opposite_is_an_involution(d in any_direction()) {
            prop_assert_eq!(d.opposite().opposite(), d);
            prop_assert_ne!(d.opposite(), d);
        }

        #[test]
        fn vectors_are_unit_and_axis_aligned(d in any_direction()) {
            let v = d.vector();
            prop_assert_eq!(v.x.abs() + v.y.abs(), 1);
            prop_assert!((v.x == 0) != (v.y == 0));
        }

        #[test]
        fn opposite_vectors_cancel(d in any_direction()) {
            prop_assert_eq!(d.vector() + d.opposite().vector(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::Up.vector(), IVec2::new(0, -1));
        assert_eq!(Direction::Down.vector(), IVec2::new(0, 1));
        assert_eq!(Direction::Left.vector(), IVec2::new(-1, 0));
        assert_eq!(Direction::Right.vector(), IVec2::new(1, 0));
    }

    #[test]
    fn test_is_opposite() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }
}
