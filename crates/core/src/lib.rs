//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the sliding-tile merge puzzle and the
//! session state machine built on them. The only I/O it knows about is the
//! optional [`store`] used for best score and settings, and that layer never
//! lets a failure reach the game.
//!
//! - **Deterministic**: randomness is injected through [`RandomSource`], so a
//!   seed replays a game exactly
//! - **Zero-allocation moves**: grids, lines and merge lists live inline
//!   (`arrayvec`)
//!
//! # Module Structure
//!
//! - [`grid`]: NxN board with rotation and terminal-state scans
//! - [`engine`]: slide/merge of one line, whole-board moves, tile spawning
//! - [`rng`]: the [`RandomSource`] trait, an LCG and a ChaCha8 source
//! - [`history`]: bounded undo stack
//! - [`session`]: the Playing/Won/Lost state machine driving everything above
//! - [`snapshot`]: read-only view of a session for renderers
//! - [`settings`], [`store`]: user preferences and their persistence
//! - [`config`], [`error`]: rule knobs and typed errors
//!
//! # Rules
//!
//! - Moves slide every tile as far as it goes; equal neighbours merge once per
//!   move, nearest the destination edge first
//! - A move that changes nothing is rejected: no spawn, no history
//! - After every real move one tile spawns: 2 (90%) or 4 (10%)
//! - Reaching the win tile (2048 by default) wins once; play may continue
//! - With no empty cell and no equal neighbours the game is lost
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameConfig, GameSession, MoveOutcome, SimpleRng};
//! use tui_2048_core::types::{Direction, GameStatus};
//!
//! let mut game = GameSession::new(GameConfig::default(), SimpleRng::new(12345));
//! assert_eq!(game.grid().count_non_empty(), 2);
//!
//! let mut applied = 0;
//! for d in Direction::ALL {
//!     if game.apply(d) == MoveOutcome::Applied {
//!         applied += 1;
//!     }
//! }
//! assert!(applied > 0);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod rng;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod store;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use engine::{
    apply_move, is_valid_move, slide_line_left, spawn_random_tile, spawn_tile_in_place,
    valid_moves, LineSlide, MergeList, MoveResult, SpawnedTile,
};
pub use error::{ConfigError, StoreError};
pub use grid::Grid;
pub use history::{UndoHistory, UndoSnapshot};
pub use rng::{ChaChaSource, RandomSource, SimpleRng};
pub use session::{GameSession, MoveOutcome};
pub use settings::Settings;
pub use snapshot::SessionSnapshot;
pub use store::{FileStore, KeyValueStore, MemoryStore, Persistence};
