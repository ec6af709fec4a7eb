//! Session harness
//!
//! Owns one `GameState` and the status sink handed in by the host. Every
//! frame goes through `tick`, after which score and phase are mirrored
//! into the sink. A new game is a full reconstruction, never a transition
//! out of GameOver.

use crate::config::GameConfig;
use crate::sim::{Difficulty, Direction, GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::status::StatusSink;

pub struct Session<S: StatusSink> {
    state: GameState,
    sink: S,
}

impl<S: StatusSink> Session<S> {
    /// Start a session. The move interval is fixed from `difficulty` here.
    pub fn new(config: GameConfig, difficulty: Difficulty, seed: u64, sink: S) -> Self {
        let mut session = Self {
            state: GameState::new(config, difficulty, seed),
            sink,
        };
        session.publish();
        session
    }

    /// Advance by one frame and return the events it produced
    pub fn tick(&mut self, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, dt_ms);
        self.publish();
        events
    }

    /// Buffer a direction intent outside of a frame
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase == GamePhase::GameOver {
            return false;
        }
        self.state.snake.set_direction(direction)
    }

    /// Toggle between Playing and Paused (ignored otherwise)
    pub fn toggle_pause(&mut self) {
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut self.state, &input, 0.0);
        self.publish();
    }

    /// Force Paused if currently Playing; returns true if the phase changed.
    /// Unlike `toggle_pause` this never resumes a paused game.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.toggle_pause();
        true
    }

    /// Discard the current entities and start over with the same
    /// configuration and difficulty
    pub fn restart(&mut self, seed: u64) {
        self.restart_with(self.state.difficulty, seed);
    }

    /// Start over with a (possibly) different difficulty
    pub fn restart_with(&mut self, difficulty: Difficulty, seed: u64) {
        let config = self.state.config.clone();
        self.state = GameState::new(config, difficulty, seed);
        self.publish();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn publish(&mut self) {
        self.sink.set_score(self.state.score);
        self.sink.set_phase(self.state.phase);
    }
}

/// Run state of the host's self-rescheduling frame loop.
///
/// The host asks `schedule` before requesting a frame and `begin_frame` at
/// the top of each callback. `stop` ends the loop at the next frame;
/// `restore` turns it back on and says whether a new frame must be
/// requested (false while one is still queued, so two loops never run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLoop {
    running: bool,
    frame_pending: bool,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self {
            running: true,
            frame_pending: false,
        }
    }
}

impl FrameLoop {
    pub fn schedule(&mut self) {
        self.frame_pending = true;
    }

    /// Returns false if the loop was stopped and must not re-arm itself
    pub fn begin_frame(&mut self) -> bool {
        self.frame_pending = false;
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn restore(&mut self) -> bool {
        self.running = true;
        !self.frame_pending
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Position;
    use crate::status::Scoreboard;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn new_session(seed: u64) -> Session<Scoreboard> {
        Session::new(GameConfig::default(), Difficulty::Medium, seed, Scoreboard::new())
    }

    #[test]
    fn test_new_session_publishes_playing() {
        let session = new_session(1);
        assert_eq!(session.sink().phase, GamePhase::Playing);
        assert_eq!(session.sink().score, 0);
    }

    #[test]
    fn test_pause_toggle_reaches_sink() {
        let board = Rc::new(RefCell::new(Scoreboard::new()));
        let mut session = Session::new(
            GameConfig::default(),
            Difficulty::Easy,
            3,
            board.clone(),
        );
        session.toggle_pause();
        assert_eq!(board.borrow().phase, GamePhase::Paused);
        session.toggle_pause();
        assert_eq!(board.borrow().phase, GamePhase::Playing);
    }

    #[test]
    fn test_frame_loop_restarts_after_cached_page() {
        let mut frames = FrameLoop::default();
        frames.schedule();
        assert!(frames.begin_frame());
        frames.schedule();

        // Hidden while a frame is queued; that frame ends the loop
        frames.stop();
        assert!(!frames.begin_frame());
        assert!(!frames.is_running());

        // Shown again: nothing queued, so a new frame must be requested
        assert!(frames.restore());
        frames.schedule();
        assert!(frames.begin_frame());
    }

    #[test]
    fn test_frame_loop_restore_with_frame_still_queued() {
        let mut frames = FrameLoop::default();
        frames.schedule();
        frames.stop();
        // The queued frame will pick the loop back up
        assert!(!frames.restore());
        assert!(frames.begin_frame());
    }

    #[test]
    fn test_pause_never_resumes() {
        let mut session = new_session(4);
        assert!(session.pause());
        assert_eq!(session.sink().phase, GamePhase::Paused);
        assert!(!session.pause());
        assert_eq!(session.phase(), GamePhase::Paused);

        // A resume toggle followed by a forced pause in the same frame ends paused
        let resume = TickInput {
            pause: true,
            ..Default::default()
        };
        session.tick(&resume, 16.0);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.pause());
        assert_eq!(session.phase(), GamePhase::Paused);
        assert_eq!(session.sink().phase, GamePhase::Paused);
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut session = new_session(8);
        for _ in 0..40 {
            session.tick(&TickInput::default(), 100.0);
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(!session.pause());
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_then_restart() {
        let mut session = new_session(8);
        // Head straight into the right wall: 20 cells at 100ms each
        let mut events = Vec::new();
        for _ in 0..40 {
            events.extend(session.tick(&TickInput::default(), 100.0));
            if session.phase() == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(events.contains(&GameEvent::CollidedWall));
        assert!(events.last().is_some_and(GameEvent::is_terminal));
        assert_eq!(session.sink().phase, GamePhase::GameOver);
        assert!(!session.set_direction(Direction::Up));

        let best = session.sink().best;
        session.restart_with(Difficulty::Hard, 9);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.state().clock.interval_ms(), 60.0);
        assert_eq!(session.state().snake.head(), Position::new(20, 15));
        assert_eq!(session.sink().score, 0);
        assert_eq!(session.sink().best, best);
    }

    #[test]
    fn test_restart_keeps_difficulty() {
        let mut session = Session::new(
            GameConfig::default(),
            Difficulty::Easy,
            1,
            Scoreboard::new(),
        );
        session.restart(2);
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.state().seed, 2);
    }

    fn any_input() -> impl Strategy<Value = (Option<Direction>, bool, f64)> {
        (
            prop::option::of(prop::sample::select(Direction::ALL.to_vec())),
            prop::bool::weighted(0.05),
            0.0f64..120.0,
        )
    }

    proptest! {
        #[test]
        fn sink_mirrors_state(
            seed in any::<u64>(),
            inputs in prop::collection::vec(any_input(), 1..200),
        ) {
            let mut session = new_session(seed);
            let mut last_score = 0;
            for (direction, pause, dt) in inputs {
                let input = TickInput { direction, pause };
                session.tick(&input, dt);
                prop_assert_eq!(session.sink().score, session.score());
                prop_assert_eq!(session.sink().phase, session.phase());
                prop_assert!(session.score() >= last_score);
                last_score = session.score();
            }
        }
    }
}
