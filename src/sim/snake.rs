//! The snake entity
//!
//! Movement and collision policy are separate: `advance` only moves the
//! body, callers decide what a wall or self hit means.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::direction::{Direction, Position};
use crate::consts::{GRID_HEIGHT, GRID_WIDTH, INITIAL_SNAKE_LENGTH};

/// Default spawn cell (center of the default grid)
pub const DEFAULT_HEAD: Position = Position::new(GRID_WIDTH / 2, GRID_HEIGHT / 2);
/// Default spawn heading
pub const DEFAULT_DIRECTION: Direction = Direction::Right;

/// The player's snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    /// Segments, head first
    body: VecDeque<Position>,
    /// Direction applied on the last step
    direction: Direction,
    /// Buffered direction, committed at the start of the next step
    next_direction: Direction,
    /// One-shot growth pending for the next step
    has_grown: bool,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(DEFAULT_HEAD, DEFAULT_DIRECTION)
    }
}

impl Snake {
    /// Create a 3-segment snake with the head at `head`, body trailing
    /// behind it opposite to `direction`
    pub fn new(head: Position, direction: Direction) -> Self {
        let back = direction.opposite().vector();
        let body = (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|i| head + back * i)
            .collect();

        Self {
            body,
            direction,
            next_direction: direction,
            has_grown: false,
        }
    }

    /// Reinitialize to the starting layout (defaults for missing arguments)
    pub fn reset(&mut self, head: Option<Position>, direction: Option<Direction>) {
        *self = Self::new(
            head.unwrap_or(DEFAULT_HEAD),
            direction.unwrap_or(DEFAULT_DIRECTION),
        );
    }

    pub fn head(&self) -> Position {
        // body is never empty: constructed with 3 segments, `advance` pushes before it pops
        debug_assert!(!self.body.is_empty(), "snake body must never be empty");
        self.body.front().copied().unwrap_or(DEFAULT_HEAD)
    }

    /// Owned copy of the segments, head first
    pub fn body(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    /// Iterate segments without copying the whole body
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// True if the body has no segments
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn has_grown(&self) -> bool {
        self.has_grown
    }

    /// Buffer a direction change for the next step.
    ///
    /// A reversal of the committed direction is rejected (returns false,
    /// nothing changes). Any other change overwrites the buffer, so the
    /// last accepted intent before a step wins.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }
        self.next_direction = new_direction;
        true
    }

    /// Commit the buffered direction and move one cell.
    ///
    /// No bounds or self checks happen here.
    pub fn advance(&mut self) {
        self.direction = self.next_direction;
        let new_head = self.head() + self.direction.vector();
        self.body.push_front(new_head);

        if self.has_grown {
            self.has_grown = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Grow by one segment on the next step. Repeated calls before that
    /// step do not stack.
    pub fn grow(&mut self) {
        self.has_grown = true;
    }

    /// True if the head overlaps any other segment
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    pub fn is_head_at(&self, position: Position) -> bool {
        self.head() == position
    }

    pub fn occupies_position(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// True if the head is outside [0, width) x [0, height)
    pub fn is_out_of_bounds(&self, width: i32, height: i32) -> bool {
        let head = self.head();
        head.x < 0 || head.x >= width || head.y < 0 || head.y >= height
    }
}
