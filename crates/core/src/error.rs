use std::path::PathBuf;

/// Errors raised by a [`KeyValueStore`](crate::store::KeyValueStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key {0:?}")]
    InvalidKey(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when validating a game or host configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("win value {0} is not a power of two in 4..=65536")]
    WinValue(u32),

    #[error("spawn probability {0} is outside [0, 1]")]
    Probability(f64),

    #[error("undo depth {0} exceeds the limit of {}", crate::types::MAX_UNDO_LIMIT)]
    UndoDepth(usize),

    #[error("board size {0} is outside 3..=8")]
    BoardSize(u32),

    #[error("invalid value {value:?} for {name}")]
    Env { name: &'static str, value: String },
}
