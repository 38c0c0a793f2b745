//! Host configuration read from the environment.
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `TUI2048_SEED` | fixed RNG seed | OS entropy |
//! | `TUI2048_SIZE` | board side, overrides settings | stored setting |
//! | `TUI2048_WIN` | win tile | 2048 |
//! | `TUI2048_UNDO` | undo depth | 10 |
//! | `TUI2048_DATA_DIR` | where best score and settings live | XDG data dir |
//! | `TUI2048_LOG_PATH` | log file; logging is off without it | none |
//! | `TUI2048_LOG` / `RUST_LOG` | log filter | `info` |
//!
//! Empty values count as unset. Values that do not parse are errors rather
//! than silently ignored.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::store::{FileStore, Persistence};
use crate::core::{ConfigError, GameConfig, Settings};
use crate::types::{BoardSize, Tile, MAX_UNDO_HISTORY, WIN_TILE_VALUE};

pub const ENV_SEED: &str = "TUI2048_SEED";
pub const ENV_SIZE: &str = "TUI2048_SIZE";
pub const ENV_WIN: &str = "TUI2048_WIN";
pub const ENV_UNDO: &str = "TUI2048_UNDO";
pub const ENV_DATA_DIR: &str = "TUI2048_DATA_DIR";
pub const ENV_LOG_PATH: &str = "TUI2048_LOG_PATH";
pub const ENV_LOG: &str = "TUI2048_LOG";

const APP_DIR: &str = "tui-2048";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: Option<u64>,
    /// Overrides the stored board size when set.
    pub board_size: Option<BoardSize>,
    pub win_value: Tile,
    pub max_undo: usize,
    /// `None` keeps best score and settings in memory only.
    pub data_dir: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            board_size: None,
            win_value: WIN_TILE_VALUE,
            max_undo: MAX_UNDO_HISTORY,
            data_dir: None,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = parse_opt::<u64>(ENV_SEED, get(ENV_SEED))?;

        let board_size = match parse_opt::<u32>(ENV_SIZE, get(ENV_SIZE))? {
            Some(side) => Some(
                u8::try_from(side)
                    .ok()
                    .and_then(BoardSize::new)
                    .ok_or(ConfigError::BoardSize(side))?,
            ),
            None => None,
        };

        let win_value = parse_opt::<Tile>(ENV_WIN, get(ENV_WIN))?.unwrap_or(WIN_TILE_VALUE);
        let max_undo = parse_opt::<usize>(ENV_UNDO, get(ENV_UNDO))?.unwrap_or(MAX_UNDO_HISTORY);

        let data_dir = get(ENV_DATA_DIR).map(PathBuf::from).or_else(|| {
            get("XDG_DATA_HOME")
                .map(|d| PathBuf::from(d).join(APP_DIR))
                .or_else(|| {
                    get("HOME").map(|h| PathBuf::from(h).join(".local/share").join(APP_DIR))
                })
        });

        let log_path = get(ENV_LOG_PATH).map(PathBuf::from);
        let log_filter = get(ENV_LOG)
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let config = Self {
            seed,
            board_size,
            win_value,
            max_undo,
            data_dir,
            log_path,
            log_filter,
        };
        config.game_config(&Settings::default()).validate()?;
        Ok(config)
    }

    /// Rules for a session, taking the board size from `settings` unless
    /// overridden.
    pub fn game_config(&self, settings: &Settings) -> GameConfig {
        GameConfig {
            board_size: self.board_size.unwrap_or_else(|| settings.board_size()),
            win_value: self.win_value,
            max_undo: self.max_undo,
            ..GameConfig::default()
        }
    }

    pub fn persistence(&self) -> Persistence {
        match &self.data_dir {
            Some(dir) => Persistence::new(FileStore::new(dir.clone())),
            None => Persistence::memory(),
        }
    }
}

fn parse_opt<T: FromStr>(name: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|_| ConfigError::Env { name, value })
    })
    .transpose()
}
