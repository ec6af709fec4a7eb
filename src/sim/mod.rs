//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time enters only as explicit per-frame deltas
//! - Seeded RNG only (food placement)
//! - Fixed update order within a step
//! - No rendering or platform dependencies

pub mod direction;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use direction::{Direction, Position};
pub use food::Food;
pub use grid::GridSize;
pub use snake::Snake;
pub use state::{Collision, Difficulty, GameEvent, GamePhase, GameState, Snapshot, StepClock};
pub use tick::{TickInput, classify_collision, step, tick};
