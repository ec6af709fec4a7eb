//! Input capture adapters
//!
//! Turn raw keyboard keys and touch gestures into direction intents.
//! Nothing here touches the simulation directly.

use crate::sim::Direction;

/// Minimum swipe length in CSS pixels
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Map a `KeyboardEvent.key` value to a direction (arrows and WASD)
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Keys that toggle pause
pub fn is_pause_key(key: &str) -> bool {
    matches!(key, " " | "Escape" | "p" | "P")
}

/// Tracks one touch gesture from start to end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
    min_distance: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(MIN_SWIPE_DISTANCE)
    }
}

impl SwipeTracker {
    pub fn new(min_distance: f32) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    /// Record where a touch began
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture. Returns the dominant-axis direction if it was
    /// long enough, None for taps or when no gesture was started.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        let dx = x - sx;
        let dy = y - sy;

        if dx.abs().max(dy.abs()) < self.min_distance {
            return None;
        }

        // Screen y grows downward, same as grid y
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(direction_for_key("s"), Some(Direction::Down));
        assert_eq!(direction_for_key("A"), Some(Direction::Left));
        assert_eq!(direction_for_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(direction_for_key("Enter"), None);
        assert!(is_pause_key(" "));
        assert!(is_pause_key("Escape"));
        assert!(!is_pause_key("ArrowUp"));
    }

    #[test]
    fn test_swipes() {
        let mut swipe = SwipeTracker::default();

        swipe.begin(100.0, 100.0);
        assert!(swipe.is_active());
        assert_eq!(swipe.end(160.0, 110.0), Some(Direction::Right));
        assert!(!swipe.is_active());

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(90.0, 40.0), Some(Direction::Up));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(100.0, 200.0), Some(Direction::Down));

        swipe.begin(100.0, 100.0);
        assert_eq!(swipe.end(20.0, 100.0), Some(Direction::Left));
    }

    #[test]
    fn test_short_or_missing_gesture() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(0.0, 0.0);
        assert_eq!(swipe.end(10.0, 12.0), None);
        // Consumed by the failed attempt
        assert_eq!(swipe.end(200.0, 0.0), None);

        swipe.begin(0.0, 0.0);
        swipe.cancel();
        assert_eq!(swipe.end(200.0, 0.0), None);
    }
}
