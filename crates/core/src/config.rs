//! Game configuration
//!
//! Every knob of the rules lives here so hosts and tests can vary them
//! without touching the engine.

use crate::error::ConfigError;
use crate::types::{
    is_valid_tile, BoardSize, Tile, MAX_UNDO_HISTORY, MAX_UNDO_LIMIT, SPAWN_TWO_PROBABILITY,
    WIN_TILE_VALUE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub board_size: BoardSize,
    /// Tile that wins the game the first time it appears.
    pub win_value: Tile,
    /// Undo depth in `0..=MAX_UNDO_LIMIT`; 0 disables undo.
    pub max_undo: usize,
    /// Probability that a spawned tile is a 2.
    pub two_probability: f64,
}

impl GameConfig {
    pub fn with_size(board_size: BoardSize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Reject values the engine cannot honour.
    ///
    /// The win value must be a tile that a merge can create (4 or more).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_value < 4 || !is_valid_tile(self.win_value) {
            return Err(ConfigError::WinValue(self.win_value));
        }
        if !(0.0..=1.0).contains(&self.two_probability) {
            return Err(ConfigError::Probability(self.two_probability));
        }
        if self.max_undo > MAX_UNDO_LIMIT {
            return Err(ConfigError::UndoDepth(self.max_undo));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BoardSize::default(),
            win_value: WIN_TILE_VALUE,
            max_undo: MAX_UNDO_HISTORY,
            two_probability: SPAWN_TWO_PROBABILITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.board_size.get(), 4);
        assert_eq!(config.win_value, 2048);
        assert_eq!(config.max_undo, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_size_keeps_other_defaults() {
        let config = GameConfig::with_size(BoardSize::new(6).unwrap());
        assert_eq!(config.board_size.get(), 6);
        assert_eq!(config.win_value, WIN_TILE_VALUE);
    }

    #[test]
    fn test_rejects_bad_win_value() {
        for win_value in [0, 2, 100, 131072] {
            let config = GameConfig {
                win_value,
                ..GameConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::WinValue(v)) if v == win_value));
        }
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = GameConfig {
            two_probability: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Probability(_))));

        let nan = GameConfig {
            two_probability: f64::NAN,
            ..GameConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_undo_depth_is_bounded() {
        let at_limit = GameConfig {
            max_undo: MAX_UNDO_LIMIT,
            ..GameConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = GameConfig {
            max_undo: 1_000_000_000_000_000,
            ..GameConfig::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::UndoDepth(1_000_000_000_000_000))
        ));
    }
}
