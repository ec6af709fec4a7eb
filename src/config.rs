//! Data-driven game configuration
//!
//! Defaults mirror `consts`. A JSON document may override any subset of
//! fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Difficulty, GridSize};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Grid must have a positive size, got {width}x{height}")]
    EmptyGrid { width: i32, height: i32 },

    #[error("Grid {width}x{height} cannot fit the starting snake")]
    GridTooSmall { width: i32, height: i32 },

    #[error("Move interval for {0:?} must be positive")]
    ZeroInterval(Difficulty),

    #[error("Score per food must be positive")]
    ZeroScoreIncrement,

    #[error("Level-up step must be positive")]
    ZeroLevelStep,
}

/// Move interval per difficulty (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalTable {
    pub easy_ms: f64,
    pub medium_ms: f64,
    pub hard_ms: f64,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            easy_ms: Difficulty::Easy.default_interval_ms(),
            medium_ms: Difficulty::Medium.default_interval_ms(),
            hard_ms: Difficulty::Hard.default_interval_ms(),
        }
    }
}

impl IntervalTable {
    pub fn get(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy_ms,
            Difficulty::Medium => self.medium_ms,
            Difficulty::Hard => self.hard_ms,
        }
    }
}

/// Grid and pacing configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Pixels per cell (rendering only)
    pub cell_size: u32,
    pub intervals: IntervalTable,
    pub score_per_food: u32,
    /// Level-up fires each time the score crosses a multiple of this
    pub level_up_score: u32,
    /// Random draws before food placement falls back to a scan
    pub max_spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            cell_size: CELL_SIZE,
            intervals: IntervalTable::default(),
            score_per_food: SCORE_PER_FOOD,
            level_up_score: LEVEL_UP_SCORE,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        // The snake spawns at the center facing right with two segments
        // behind it, and food needs at least one free cell
        let center = self.grid.center();
        let tail_x = center.x - (INITIAL_SNAKE_LENGTH as i32 - 1);
        if tail_x < 0 || self.grid.cell_count() <= INITIAL_SNAKE_LENGTH {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        for difficulty in Difficulty::ALL {
            let interval = self.intervals.get(difficulty);
            if interval.is_nan() || interval <= 0.0 {
                return Err(ConfigError::ZeroInterval(difficulty));
            }
        }
        if self.score_per_food == 0 {
            return Err(ConfigError::ZeroScoreIncrement);
        }
        if self.level_up_score == 0 {
            return Err(ConfigError::ZeroLevelStep);
        }
        Ok(())
    }

    /// Move interval for a difficulty, read once at session start
    pub fn move_interval_ms(&self, difficulty: Difficulty) -> f64 {
        self.intervals.get(difficulty)
    }

    /// Canvas size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        self.grid.canvas_size(self.cell_size)
    }
}
