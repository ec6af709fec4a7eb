//! Shared game status
//!
//! The session pushes score and phase into a `StatusSink` it receives at
//! construction. The presentation layer reads the same store through a
//! shared handle (`Rc<RefCell<Scoreboard>>` on the web host).

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::sim::GamePhase;

/// Narrow mutation API for the status store
pub trait StatusSink {
    fn set_score(&mut self, score: u32);
    fn set_phase(&mut self, phase: GamePhase);
}

/// In-memory status store read by the HUD
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub phase: GamePhase,
    /// Best score seen by this store across sessions
    pub best: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

impl StatusSink for Scoreboard {
    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.best = self.best.max(score);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }
}

impl<S: StatusSink> StatusSink for Rc<RefCell<S>> {
    fn set_score(&mut self, score: u32) {
        self.borrow_mut().set_score(score);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.borrow_mut().set_phase(phase);
    }
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn set_score(&mut self, score: u32) {
        (**self).set_score(score);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        (**self).set_phase(phase);
    }
}
