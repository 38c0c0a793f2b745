//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The board is always square. Row 0 / column 0 is the top-left corner.
//!
//! - **Supported sides**: 3 through 8 ([`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`])
//! - **Presets offered by the UI**: 3, 4, 5 ([`BOARD_SIZE_PRESETS`])
//! - **Default**: 4x4
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TILES` | 2 | Tiles spawned by a new game |
//! | `SPAWN_TWO_PROBABILITY` | 0.9 | Chance a spawned tile is a 2 (otherwise 4) |
//! | `WIN_TILE_VALUE` | 2048 | Default win tile |
//! | `MAX_TILE_VALUE` | 65536 | Tile ceiling; ceiling tiles never merge |
//! | `MAX_UNDO_HISTORY` | 10 | Default undo depth |
//! | `MAX_UNDO_LIMIT` | 1000 | Largest configurable undo depth |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{BoardSize, Direction, GameStatus, is_valid_tile};
//!
//! let size = BoardSize::new(5).unwrap();
//! assert_eq!(size.cells(), 25);
//! assert!(BoardSize::new(2).is_none());
//!
//! assert_eq!(Direction::from_str("Up"), Some(Direction::Up));
//! assert_eq!(Direction::Down.rotations(), 1);
//!
//! assert_eq!(GameStatus::default(), GameStatus::Playing);
//! assert!(is_valid_tile(2048));
//! assert!(!is_valid_tile(3));
//! ```

use std::fmt;

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: u8 = 3;

/// Largest supported board side.
pub const MAX_BOARD_SIZE: u8 = 8;

/// Default board side (classic 4x4).
pub const DEFAULT_BOARD_SIZE: u8 = 4;

/// Board sides offered by the UI.
pub const BOARD_SIZE_PRESETS: [u8; 3] = [3, 4, 5];

/// Capacity of the largest grid, in cells.
pub const MAX_CELLS: usize = (MAX_BOARD_SIZE as usize) * (MAX_BOARD_SIZE as usize);

/// Number of tiles spawned when a game starts.
pub const INITIAL_TILES: usize = 2;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Default win condition.
pub const WIN_TILE_VALUE: Tile = 2048;

/// Highest tile value that may appear on the board.
pub const MAX_TILE_VALUE: Tile = 65536;

/// Default undo depth.
pub const MAX_UNDO_HISTORY: usize = 10;

/// Largest undo depth a config may ask for.
pub const MAX_UNDO_LIMIT: usize = 1000;

/// A tile value: 0 for an empty cell, otherwise a power of two in `2..=MAX_TILE_VALUE`.
pub type Tile = u32;

/// Check whether `value` may appear on a board.
///
/// # Examples
///
/// ```
/// use tui_2048_types::is_valid_tile;
///
/// assert!(is_valid_tile(0));
/// assert!(is_valid_tile(2));
/// assert!(is_valid_tile(65536));
/// assert!(!is_valid_tile(1));
/// assert!(!is_valid_tile(131072));
/// ```
pub fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE_VALUE && value.is_power_of_two())
}

/// Validated board side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardSize(u8);

impl BoardSize {
    /// Returns `None` outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub const fn new(side: u8) -> Option<Self> {
        if side >= MIN_BOARD_SIZE && side <= MAX_BOARD_SIZE {
            Some(Self(side))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Number of cells on a board of this size.
    pub const fn cells(self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self(DEFAULT_BOARD_SIZE)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Direction tiles slide towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order they are probed for valid moves.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Clockwise quarter turns that make this direction point left.
    ///
    /// Row 0 is the top of the board, so one clockwise turn brings the bottom
    /// edge to the left (down) and three bring the top edge there (up).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::Left.rotations(), 0);
    /// assert_eq!(Direction::Down.rotations(), 1);
    /// assert_eq!(Direction::Right.rotations(), 2);
    /// assert_eq!(Direction::Up.rotations(), 3);
    /// ```
    pub const fn rotations(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session status.
///
/// - **Playing**: moves are accepted
/// - **Won**: the win tile appeared for the first time; the player may continue
/// - **Lost**: no move can change the board; only a new game leaves this state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination cell of a merge, in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeEvent {
    pub row: usize,
    pub col: usize,
    /// Value of the tile created by the merge.
    pub value: Tile,
}

/// Notification emitted by a session command.
///
/// The session replaces its event list on every command, so collaborators
/// (sound, highlight, logging) see exactly what the last command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A move changed the board.
    Moved { direction: Direction, score_gained: u32 },
    /// Two tiles merged.
    Merged(MergeEvent),
    /// A tile was spawned after a move or at game start.
    Spawned { row: usize, col: usize, value: Tile },
    /// The best score was raised.
    NewBest { score: u32 },
    /// The win tile appeared for the first time this game.
    Won { value: Tile },
    /// No move remains.
    Lost,
    /// The previous snapshot was restored.
    Undone,
    /// Play resumed after a win.
    Continued,
    /// A fresh game started.
    NewGame { size: BoardSize },
}

/// Commands a host can issue to a session.
///
/// These are produced by input mapping (keyboard, swipe) and consumed by the
/// game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide all tiles in a direction
    Move(Direction),
    /// Restore the previous snapshot
    Undo,
    /// Restart at the current board size
    NewGame,
    /// Resume after reaching the win tile
    ContinueAfterWin,
    /// Restart on a board of a different size
    SetBoardSize(BoardSize),
    /// Toggle the empty-cell grid dots
    ToggleGrid,
    /// Toggle the bell
    ToggleSound,
    /// Toggle merge highlighting
    ToggleHighlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        assert_eq!(INITIAL_TILES, 2);
        assert_eq!(WIN_TILE_VALUE, 2048);
        assert_eq!(MAX_UNDO_HISTORY, 10);
        assert_eq!(MAX_CELLS, 64);
        assert!((SPAWN_TWO_PROBABILITY - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn board_size_bounds() {
        assert!(BoardSize::new(MIN_BOARD_SIZE - 1).is_none());
        assert!(BoardSize::new(MAX_BOARD_SIZE + 1).is_none());
        for side in BOARD_SIZE_PRESETS {
            assert_eq!(BoardSize::new(side).map(BoardSize::get), Some(side));
        }
        assert_eq!(BoardSize::default().get(), DEFAULT_BOARD_SIZE);
        assert_eq!(BoardSize::default().to_string(), "4x4");
    }

    #[test]
    fn tile_validity() {
        let mut v = 2;
        while v <= MAX_TILE_VALUE {
            assert!(is_valid_tile(v), "{v} should be a tile");
            v *= 2;
        }
        assert!(!is_valid_tile(6));
        assert!(!is_valid_tile(MAX_TILE_VALUE * 2));
    }

    #[test]
    fn direction_round_trips_through_str() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Direction::from_str("sideways"), None);
    }

    #[test]
    fn status_display() {
        assert_eq!(GameStatus::Playing.to_string(), "playing");
        assert_eq!(GameStatus::Lost.to_string(), "lost");
    }
}
