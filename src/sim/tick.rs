//! Fixed-interval simulation tick
//!
//! `tick` is called once per rendered frame with the elapsed time.
//! It buffers input, handles the pause toggle and runs at most one
//! discrete `step` when the move interval has elapsed.

use super::direction::Direction;
use super::state::{Collision, GameEvent, GamePhase, GameState};

/// Input gathered since the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Latest direction intent (single slot, last write wins)
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Overwrite the pending direction
    pub fn push_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// Clear one-shot inputs after they have been consumed
    pub fn clear(&mut self) {
        self.direction = None;
        self.pause = false;
    }
}

/// Advance the game by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
    if state.phase == GamePhase::GameOver || state.phase == GamePhase::Menu {
        return Vec::new();
    }

    // Intents are buffered even while paused
    if let Some(direction) = input.direction {
        state.snake.set_direction(direction);
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at step {}", state.steps);
                return Vec::new();
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed at step {}", state.steps);
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    if state.clock.advance(dt_ms) {
        step(state)
    } else {
        Vec::new()
    }
}

/// One discrete step: move, classify, resolve
pub fn step(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.snake.advance();
    state.steps += 1;

    match classify_collision(state) {
        Collision::Wall => {
            events.push(GameEvent::CollidedWall);
            end_game(state, &mut events);
        }
        Collision::SelfHit => {
            events.push(GameEvent::CollidedSelf);
            end_game(state, &mut events);
        }
        Collision::Food => eat_food(state, &mut events),
        Collision::None => {}
    }

    events
}

/// Classify the snake's current head position.
///
/// Priority: wall, then self, then food.
pub fn classify_collision(state: &GameState) -> Collision {
    let grid = state.config.grid;
    if state.snake.is_out_of_bounds(grid.width, grid.height) {
        Collision::Wall
    } else if state.snake.check_self_collision() {
        Collision::SelfHit
    } else if state.snake.is_head_at(state.food.position()) {
        Collision::Food
    } else {
        Collision::None
    }
}

fn eat_food(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.snake.grow();
    state.score += state.config.score_per_food;
    events.push(GameEvent::AteFood { score: state.score });

    let level_step = state.config.level_up_score.max(1);
    if state.score / level_step > state.last_level_score / level_step {
        let level = state.score / level_step;
        log::info!("Level up: {} (score {})", level, state.score);
        events.push(GameEvent::LeveledUp { level });
    }
    state.last_level_score = state.score;

    // Exclusion set is the full current body, pending growth included
    let body = state.snake.body();
    let placed = state
        .food
        .respawn(&body, state.config.max_spawn_attempts, &mut state.rng);
    if placed {
        log::debug!("Food respawned at {}", state.food.position());
    } else {
        events.push(GameEvent::GridFilled);
        end_game(state, events);
    }
}

fn end_game(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over: score={} length={} steps={}",
        state.score,
        state.snake.len(),
        state.steps
    );
    events.push(GameEvent::GameOver { score: state.score });
}
