use crate::engine::MergeList;
use crate::grid::Grid;
use crate::types::{BoardSize, GameStatus};

/// Read-only copy of everything a renderer needs from a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub size: BoardSize,
    pub score: u32,
    pub best_score: u32,
    pub moves: u32,
    pub status: GameStatus,
    pub has_won: bool,
    pub last_merges: MergeList,
    pub undo_depth: usize,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.size = BoardSize::default();
        self.grid = Grid::empty(self.size);
        self.score = 0;
        self.best_score = 0;
        self.moves = 0;
        self.status = GameStatus::Playing;
        self.has_won = false;
        self.last_merges.clear();
        self.undo_depth = 0;
    }

    pub fn playable(&self) -> bool {
        self.status != GameStatus::Lost
    }

    /// Was (row, col) the destination of a merge in the last move?
    pub fn merged_at(&self, row: usize, col: usize) -> bool {
        self.last_merges.iter().any(|m| m.row == row && m.col == col)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: Grid::default(),
            size: BoardSize::default(),
            score: 0,
            best_score: 0,
            moves: 0,
            status: GameStatus::Playing,
            has_won: false,
            last_merges: MergeList::new(),
            undo_depth: 0,
        };
        s.clear();
        s
    }
}
