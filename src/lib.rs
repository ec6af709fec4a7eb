//! Snake Grid - A browser Snake game
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (snake, food, collisions, stepping)
//! - `session`: Scheduler harness that mirrors score/phase into a status sink
//! - `status`: Shared status store consumed by the presentation layer
//! - `config`: Data-driven grid and pacing configuration
//! - `input`: Keyboard and swipe adapters producing direction intents
//! - `settings` / `highscores`: Persisted player records
//! - `audio`: Sound cues for simulation events

pub mod audio;
pub mod config;
pub mod highscores;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;
pub mod status;

pub use config::{ConfigError, GameConfig};
pub use highscores::HighScores;
pub use session::{FrameLoop, Session};
pub use settings::Settings;
pub use status::{Scoreboard, StatusSink};

/// Game configuration constants
pub mod consts {
    /// Grid dimensions in cells
    pub const GRID_WIDTH: i32 = 40;
    pub const GRID_HEIGHT: i32 = 30;
    /// Pixel size of one cell on the canvas
    pub const CELL_SIZE: u32 = 20;

    /// Initial snake length (head plus two trailing segments)
    pub const INITIAL_SNAKE_LENGTH: usize = 3;

    /// Score awarded per food eaten
    pub const SCORE_PER_FOOD: u32 = 10;
    /// A level-up fires every time the score crosses a multiple of this
    pub const LEVEL_UP_SCORE: u32 = 50;

    /// Random draws before food placement falls back to a full scan
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;

    /// Move intervals per difficulty (milliseconds)
    pub const EASY_INTERVAL_MS: f64 = 150.0;
    pub const MEDIUM_INTERVAL_MS: f64 = 100.0;
    pub const HARD_INTERVAL_MS: f64 = 60.0;

    /// Frame deltas above this are clamped by the host (tab restore, debugger)
    pub const MAX_FRAME_DELTA_MS: f64 = 250.0;
}
