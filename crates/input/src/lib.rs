//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and turns
//! pointer drags into swipe directions. Nothing here touches game state; the
//! host feeds the resulting actions to the session.

pub mod map;
pub mod swipe;

pub use tui_2048_types as types;

pub use map::{map_key, should_quit};
pub use swipe::{classify_swipe, SwipeDetector, SWIPE_MAX_DURATION, SWIPE_MIN_DISTANCE};
