//! Swipe gesture detection.
//!
//! A swipe is a press followed by a release. It counts only if it was quick
//! enough and travelled far enough along one axis; the axis with the larger
//! travel decides the direction. Coordinates grow right (x) and down (y).

use std::time::{Duration, Instant};

use crate::types::Direction;

/// Minimum travel along the dominant axis, in pointer units.
pub const SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Longest press-to-release time that still counts as a swipe.
pub const SWIPE_MAX_DURATION: Duration = Duration::from_millis(500);

/// Classify a finished gesture.
///
/// Travel must strictly exceed `min_distance` and the other axis; a diagonal
/// with equal travel on both axes is not a swipe.
pub fn classify_swipe(
    dx: f32,
    dy: f32,
    elapsed: Duration,
    min_distance: f32,
    max_duration: Duration,
) -> Option<Direction> {
    if elapsed > max_duration {
        return None;
    }

    let (ax, ay) = (dx.abs(), dy.abs());
    if ax > ay && ax > min_distance {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if ay > ax && ay > min_distance {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    x: f32,
    y: f32,
    at: Instant,
}

/// Press/release tracker producing swipe directions.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    min_distance: f32,
    max_duration: Duration,
    press: Option<Press>,
}

impl SwipeDetector {
    pub fn new(min_distance: f32, max_duration: Duration) -> Self {
        Self {
            min_distance,
            max_duration,
            press: None,
        }
    }

    /// Record a press. A second press restarts the gesture.
    pub fn begin(&mut self, x: f32, y: f32, at: Instant) {
        self.press = Some(Press { x, y, at });
    }

    /// Finish the gesture. Returns `None` without a prior press.
    pub fn end(&mut self, x: f32, y: f32, at: Instant) -> Option<Direction> {
        let press = self.press.take()?;
        let elapsed = at.saturating_duration_since(press.at);
        classify_swipe(
            x - press.x,
            y - press.y,
            elapsed,
            self.min_distance,
            self.max_duration,
        )
    }

    pub fn cancel(&mut self) {
        self.press = None;
    }
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new(SWIPE_MIN_DISTANCE, SWIPE_MAX_DURATION)
    }
}
