//! Game session - the authoritative state machine
//!
//! A [`GameSession`] owns the grid, score, move counter, status, and the
//! bounded undo history. It is mutated only through its commands
//! ([`apply`](GameSession::apply), [`undo`](GameSession::undo),
//! [`new_game`](GameSession::new_game),
//! [`set_board_size`](GameSession::set_board_size),
//! [`continue_after_win`](GameSession::continue_after_win)); collaborators
//! read [`SessionSnapshot`]s and drain [`GameEvent`]s.
//!
//! # Status transitions
//!
//! ```text
//! Playing --win tile appears (first time)--> Won
//! Playing --no move changes the board-----> Lost
//! Won     --continue_after_win------------> Playing
//! Lost    --new_game / set_board_size-----> Playing
//! ```
//!
//! Status is recomputed once per applied move, after the spawn.

use log::{debug, info};

use crate::config::GameConfig;
use crate::engine::{apply_move, spawn_tile_in_place, MergeList};
use crate::grid::Grid;
use crate::history::{UndoHistory, UndoSnapshot};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::SessionSnapshot;
use crate::store::Persistence;
use crate::types::{BoardSize, Direction, GameEvent, GameStatus, INITIAL_TILES};

/// Result of [`GameSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The board changed; a tile was spawned and history recorded.
    Applied,
    /// Nothing changed (blocked direction or lost game).
    NoOp,
}

impl MoveOutcome {
    pub fn is_applied(self) -> bool {
        self == MoveOutcome::Applied
    }
}

#[derive(Debug)]
pub struct GameSession<R: RandomSource = SimpleRng> {
    config: GameConfig,
    rng: R,
    grid: Grid,
    score: u32,
    best_score: u32,
    moves: u32,
    status: GameStatus,
    /// Set the first time the win tile appears; only a new game clears it.
    has_won: bool,
    last_merges: MergeList,
    history: UndoHistory,
    /// Notifications from the most recent command.
    events: Vec<GameEvent>,
    persistence: Persistence,
}

impl<R: RandomSource> GameSession<R> {
    /// Start a game with no persistence.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`GameConfig::validate`].
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self::with_persistence(config, rng, Persistence::disabled())
    }

    /// Start a game, reading the best score from `persistence` once.
    pub fn with_persistence(config: GameConfig, rng: R, persistence: Persistence) -> Self {
        let mut session = Self::blank(config, rng, persistence);
        session.best_score = session.persistence.load_best_score();
        session.new_game();
        session
    }

    /// Resume from a prepared board without spawning.
    ///
    /// A board that already holds the win tile counts as won, so it will not
    /// trigger a second win.
    ///
    /// # Panics
    ///
    /// Panics if the grid size differs from `config.board_size`.
    pub fn from_grid(config: GameConfig, rng: R, grid: Grid) -> Self {
        assert_eq!(
            grid.size(),
            config.board_size,
            "grid size does not match configured board size"
        );
        let mut session = Self::blank(config, rng, Persistence::disabled());
        session.has_won = grid.contains_value(config.win_value);
        session.status = if grid.has_valid_moves() {
            GameStatus::Playing
        } else {
            GameStatus::Lost
        };
        session.grid = grid;
        session
    }

    fn blank(config: GameConfig, rng: R, persistence: Persistence) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid game config: {e}");
        }
        Self {
            config,
            rng,
            grid: Grid::empty(config.board_size),
            score: 0,
            best_score: 0,
            moves: 0,
            status: GameStatus::Playing,
            has_won: false,
            last_merges: MergeList::new(),
            history: UndoHistory::new(config.max_undo),
            events: Vec::new(),
            persistence,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board_size(&self) -> BoardSize {
        self.config.board_size
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Merge destinations of the last applied move.
    pub fn last_merges(&self) -> &[crate::types::MergeEvent] {
        &self.last_merges
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence {
        &mut self.persistence
    }

    /// Notifications from the most recent command.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain the notifications from the most recent command.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.grid.clone_from(&self.grid);
        out.size = self.config.board_size;
        out.score = self.score;
        out.best_score = self.best_score;
        out.moves = self.moves;
        out.status = self.status;
        out.has_won = self.has_won;
        out.last_merges.clone_from(&self.last_merges);
        out.undo_depth = self.history.len();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Slide every tile in `direction`.
    ///
    /// A move that changes nothing, or any move after a loss, is a no-op:
    /// no spawn, no history entry, no score change.
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        self.events.clear();
        if self.status == GameStatus::Lost {
            return MoveOutcome::NoOp;
        }

        let result = apply_move(&self.grid, direction);
        if !result.moved {
            return MoveOutcome::NoOp;
        }

        let previous = std::mem::replace(&mut self.grid, result.grid);
        self.history.push(UndoSnapshot {
            grid: previous,
            score: self.score,
            moves: self.moves,
        });

        self.score = self.score.saturating_add(result.score);
        self.moves += 1;
        self.events.push(GameEvent::Moved {
            direction,
            score_gained: result.score,
        });
        self.events
            .extend(result.merges.iter().copied().map(GameEvent::Merged));
        self.last_merges = result.merges;

        self.spawn_one();

        if self.score > self.best_score {
            self.best_score = self.score;
            self.persistence.save_best_score(self.best_score);
            self.events.push(GameEvent::NewBest {
                score: self.best_score,
            });
        }

        self.update_status();
        debug!(
            "move {} #{}: +{} (score {}, {} merges, {})",
            direction,
            self.moves,
            result.score,
            self.score,
            self.last_merges.len(),
            self.status
        );
        MoveOutcome::Applied
    }

    /// Restore the most recent pre-move snapshot.
    ///
    /// Returns false when there is nothing to undo. The best score and the
    /// has-won flag are kept.
    pub fn undo(&mut self) -> bool {
        self.events.clear();
        let Some(snapshot) = self.history.pop() else {
            return false;
        };

        self.grid = snapshot.grid;
        self.score = snapshot.score;
        self.moves = snapshot.moves;
        self.last_merges.clear();
        self.status = GameStatus::Playing;
        self.events.push(GameEvent::Undone);
        debug!("undo to move {} (score {})", self.moves, self.score);
        true
    }

    /// Start over at the current board size.
    pub fn new_game(&mut self) {
        self.events.clear();
        self.grid = Grid::empty(self.config.board_size);
        self.score = 0;
        self.moves = 0;
        self.status = GameStatus::Playing;
        self.has_won = false;
        self.last_merges.clear();
        self.history.clear();

        self.events.push(GameEvent::NewGame {
            size: self.config.board_size,
        });
        for _ in 0..INITIAL_TILES {
            self.spawn_one();
        }
        info!("new game on {}", self.config.board_size);
    }

    /// Switch board size; always a full reset.
    pub fn set_board_size(&mut self, size: BoardSize) {
        if size != self.config.board_size {
            info!("board size {} -> {}", self.config.board_size, size);
        }
        self.config.board_size = size;
        self.new_game();
    }

    /// Leave the won state and keep playing.
    ///
    /// Returns false unless the status is `Won`. A board that is already
    /// stuck goes straight to `Lost`.
    pub fn continue_after_win(&mut self) -> bool {
        self.events.clear();
        if self.status != GameStatus::Won {
            return false;
        }

        self.events.push(GameEvent::Continued);
        if self.grid.has_valid_moves() {
            self.status = GameStatus::Playing;
        } else {
            self.mark_lost();
        }
        true
    }

    fn spawn_one(&mut self) {
        if let Some(tile) =
            spawn_tile_in_place(&mut self.grid, &mut self.rng, self.config.two_probability)
        {
            self.events.push(GameEvent::Spawned {
                row: tile.row,
                col: tile.col,
                value: tile.value,
            });
        }
    }

    fn update_status(&mut self) {
        let win_value = self.config.win_value;
        if !self.has_won && self.grid.contains_value(win_value) {
            self.has_won = true;
            self.status = GameStatus::Won;
            self.events.push(GameEvent::Won { value: win_value });
            info!("reached {} after {} moves (score {})", win_value, self.moves, self.score);
        } else if !self.grid.has_valid_moves() {
            self.mark_lost();
        } else {
            self.status = GameStatus::Playing;
        }
    }

    fn mark_lost(&mut self) {
        self.status = GameStatus::Lost;
        self.events.push(GameEvent::Lost);
        info!(
            "game over after {} moves (score {}, max tile {})",
            self.moves,
            self.score,
            self.grid.max_value()
        );
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(GameConfig::default(), SimpleRng::default())
    }
}
