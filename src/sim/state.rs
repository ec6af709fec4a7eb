//! Game state and core simulation types
//!
//! Everything a session needs to replay deterministically lives here:
//! the entities, the score bookkeeping, the step clock and the seeded RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Position;
use super::food::Food;
use super::snake::Snake;
use crate::config::GameConfig;
use crate::consts::{EASY_INTERVAL_MS, HARD_INTERVAL_MS, MEDIUM_INTERVAL_MS};

/// Current phase of the game, as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before a session exists
    #[default]
    Menu,
    /// Steps are running
    Playing,
    /// Steps suspended, direction intents still buffered
    Paused,
    /// Terminal for this session
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// Difficulty, chosen once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Fixed move interval for this difficulty (milliseconds)
    pub fn default_interval_ms(self) -> f64 {
        match self {
            Difficulty::Easy => EASY_INTERVAL_MS,
            Difficulty::Medium => MEDIUM_INTERVAL_MS,
            Difficulty::Hard => HARD_INTERVAL_MS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Result of classifying a completed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    None,
    Food,
    Wall,
    SelfHit,
}

/// Discrete events emitted by a step, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Food eaten; carries the new score
    AteFood { score: u32 },
    /// Score crossed a level boundary; carries the new level (score / step)
    LeveledUp { level: u32 },
    CollidedWall,
    CollidedSelf,
    /// Food could not be placed because the snake fills the grid
    GridFilled,
    /// Session ended; carries the final score
    GameOver { score: u32 },
}

impl GameEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}

/// Delta-time accumulator gating discrete steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepClock {
    interval_ms: f64,
    accumulator_ms: f64,
}

impl StepClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            accumulator_ms: 0.0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Add elapsed time. Returns true (and resets the accumulator) when a
    /// step is due. At most one step per call.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        // Negative or NaN deltas never move the clock backwards
        if dt_ms > 0.0 {
            self.accumulator_ms += dt_ms;
        }
        if self.accumulator_ms >= self.interval_ms {
            self.accumulator_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}

/// Read-only view for renderers and the HUD (owned copies only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub body: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub length: usize,
    pub phase: GamePhase,
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Difficulty the move interval was derived from
    pub difficulty: Difficulty,
    pub config: GameConfig,
    pub snake: Snake,
    pub food: Food,
    /// Monotonic within a session
    pub score: u32,
    /// Score at the last level-up check
    pub last_level_score: u32,
    pub phase: GamePhase,
    pub clock: StepClock,
    /// Discrete steps taken so far
    pub steps: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Build a fresh session: centered snake facing right, food placed
    /// away from it, phase Playing.
    pub fn new(config: GameConfig, difficulty: Difficulty, seed: u64) -> Self {
        let grid = config.grid;
        let interval = config.move_interval_ms(difficulty);
        let mut state = Self {
            seed,
            difficulty,
            snake: Snake::new(grid.center(), super::snake::DEFAULT_DIRECTION),
            food: Food::new(grid, None),
            score: 0,
            last_level_score: 0,
            phase: GamePhase::Playing,
            clock: StepClock::new(interval),
            steps: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
        };

        let body = state.snake.body();
        if !state
            .food
            .spawn(&body, state.config.max_spawn_attempts, &mut state.rng)
        {
            log::warn!("Initial food placement failed, grid is full");
            state.phase = GamePhase::GameOver;
        }

        log::info!(
            "New game: seed={} difficulty={} interval={}ms grid={}x{}",
            seed,
            difficulty.as_str(),
            interval,
            grid.width,
            grid.height
        );

        state
    }

    /// Current level (number of level boundaries crossed)
    pub fn level(&self) -> u32 {
        self.score / self.config.level_up_score.max(1)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.snake.body(),
            food: self.food.position(),
            score: self.score,
            length: self.snake.len(),
            phase: self.phase,
        }
    }
}
