//! Move engine - slide, merge, and spawn
//!
//! Every direction is implemented by one canonical routine, [`slide_line_left`],
//! plus grid rotation: the grid is turned so the requested direction points
//! left, each row is slid, and the result is turned back.
//!
//! | Direction | Clockwise turns before | Turns back |
//! |-----------|------------------------|------------|
//! | Left      | 0                      | 0          |
//! | Down      | 1                      | 3          |
//! | Right     | 2                      | 2          |
//! | Up        | 3                      | 1          |
//!
//! All functions here are pure with respect to their grid input. Spawning
//! draws from an injected [`RandomSource`] and is the only non-deterministic
//! step.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{Direction, MergeEvent, Tile, MAX_BOARD_SIZE, MAX_CELLS, MAX_TILE_VALUE};

const MAX_LINE: usize = MAX_BOARD_SIZE as usize;

/// Merge events produced by one move.
pub type MergeList = ArrayVec<MergeEvent, MAX_CELLS>;

/// Outcome of sliding a single line towards index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSlide {
    /// New line, right-padded with zeros.
    pub line: ArrayVec<Tile, MAX_LINE>,
    /// Sum of every tile created by a merge.
    pub score: u32,
    /// Indices (line-local) where merges landed, left to right.
    pub merges: ArrayVec<usize, MAX_LINE>,
}

/// Outcome of moving a whole grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    pub score: u32,
    /// False when no tile changed position or value.
    pub moved: bool,
    /// Merge destinations in original grid orientation.
    pub merges: MergeList,
}

/// Tile placed by a spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Slide one line towards index 0 and merge equal neighbours.
///
/// Tiles are compacted in order, then merged pairwise left to right. A tile
/// created by a merge is frozen for the rest of the line, so `[2, 2, 2, 2]`
/// becomes `[4, 4, 0, 0]`, never `[8, 0, 0, 0]`. With three equal tiles the
/// leftmost pair merges. Tiles at [`MAX_TILE_VALUE`] never merge.
///
/// # Examples
///
/// ```
/// use tui_2048_core::engine::slide_line_left;
///
/// let slid = slide_line_left(&[4, 0, 4, 4]);
/// assert_eq!(slid.line.as_slice(), &[8, 4, 0, 0]);
/// assert_eq!(slid.score, 8);
/// assert_eq!(slid.merges.as_slice(), &[0]);
/// ```
pub fn slide_line_left(line: &[Tile]) -> LineSlide {
    let mut out: ArrayVec<Tile, MAX_LINE> = ArrayVec::new();
    let mut merges: ArrayVec<usize, MAX_LINE> = ArrayVec::new();
    let mut score = 0u32;
    let mut frozen: Option<usize> = None;

    for &value in line.iter().filter(|&&v| v != 0) {
        let write = out.len();
        let can_merge = write > 0
            && out[write - 1] == value
            && value < MAX_TILE_VALUE
            && frozen != Some(write - 1);

        if can_merge {
            let merged = value * 2;
            out[write - 1] = merged;
            score += merged;
            merges.push(write - 1);
            frozen = Some(write - 1);
        } else {
            out.push(value);
        }
    }

    while out.len() < line.len() {
        out.push(0);
    }

    LineSlide {
        line: out,
        score,
        merges,
    }
}

/// Map a rotated-frame coordinate back through `turns` clockwise quarter turns.
#[inline]
fn rotate_coord_cw(row: usize, col: usize, side: usize, turns: usize) -> (usize, usize) {
    let (mut r, mut c) = (row, col);
    for _ in 0..turns % 4 {
        let prev_r = r;
        r = c;
        c = side - 1 - prev_r;
    }
    (r, c)
}

/// Slide every tile in `direction`.
///
/// Does not spawn a tile and does not mutate `grid`; calling it twice with the
/// same inputs yields identical results.
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveResult {
    let turns = direction.rotations();
    let back = (4 - turns) % 4;
    let side = grid.side();

    let rotated = grid.rotated(turns);
    let mut slid = rotated.clone();
    let mut score = 0u32;
    let mut moved = false;
    let mut local_merges: MergeList = ArrayVec::new();

    for (r, row) in rotated.rows().enumerate() {
        let result = slide_line_left(row);
        // Compare against the rotated row: rotation alone is not a move.
        if result.line.as_slice() != row {
            moved = true;
        }
        score += result.score;
        for &c in &result.merges {
            local_merges.push(MergeEvent {
                row: r,
                col: c,
                value: result.line[c],
            });
        }
        slid.row_mut(r).copy_from_slice(&result.line);
    }

    let merges = local_merges
        .into_iter()
        .map(|m| {
            let (row, col) = rotate_coord_cw(m.row, m.col, side, back);
            MergeEvent { row, col, ..m }
        })
        .collect();

    MoveResult {
        grid: slid.rotated(back),
        score,
        moved,
        merges,
    }
}

/// Would moving in `direction` change the board?
pub fn is_valid_move(grid: &Grid, direction: Direction) -> bool {
    apply_move(grid, direction).moved
}

/// Every direction that would change the board, in [`Direction::ALL`] order.
pub fn valid_moves(grid: &Grid) -> ArrayVec<Direction, 4> {
    Direction::ALL
        .into_iter()
        .filter(|&d| is_valid_move(grid, d))
        .collect()
}

/// Place one random tile in place.
///
/// Picks an empty cell uniformly and writes 2 with probability
/// `two_probability`, otherwise 4. Returns `None` (and leaves the grid alone)
/// on a full board.
pub fn spawn_tile_in_place<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    two_probability: f64,
) -> Option<SpawnedTile> {
    let empties = grid.empty_cells();
    if empties.is_empty() {
        return None;
    }

    let (row, col) = empties[rng.next_index(empties.len())];
    let value = if rng.next_unit() < two_probability { 2 } else { 4 };
    grid.set(row, col, value);

    Some(SpawnedTile { row, col, value })
}

/// Return a copy of `grid` with one random tile added.
///
/// A full board comes back unchanged; callers that need to tell the two cases
/// apart should check [`Grid::empty_cells`] first.
pub fn spawn_random_tile<R: RandomSource + ?Sized>(
    grid: &Grid,
    rng: &mut R,
    two_probability: f64,
) -> Grid {
    let mut next = grid.clone();
    spawn_tile_in_place(&mut next, rng, two_probability);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::{BoardSize, SPAWN_TWO_PROBABILITY};

    fn slide(line: &[Tile]) -> (Vec<Tile>, u32, Vec<usize>) {
        let s = slide_line_left(line);
        (s.line.to_vec(), s.score, s.merges.to_vec())
    }

    #[test]
    fn test_slide_no_chain_merge() {
        assert_eq!(slide(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8, vec![0, 1]));
    }

    #[test]
    fn test_slide_gap_then_pair() {
        assert_eq!(slide(&[4, 0, 4, 4]), (vec![8, 4, 0, 0], 8, vec![0]));
    }

    #[test]
    fn test_slide_three_equal_leftmost_pair_wins() {
        assert_eq!(slide(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4, vec![0]));
        assert_eq!(slide(&[0, 8, 8, 8]), (vec![16, 8, 0, 0], 16, vec![0]));
    }

    #[test]
    fn test_slide_merged_tile_does_not_absorb_equal_follower() {
        // 2+2 makes a 4 that must not swallow the following 4.
        assert_eq!(slide(&[2, 2, 4, 0]), (vec![4, 4, 0, 0], 4, vec![0]));
    }

    #[test]
    fn test_slide_compacts_without_merge() {
        assert_eq!(slide(&[0, 2, 0, 4]), (vec![2, 4, 0, 0], 0, vec![]));
        assert_eq!(slide(&[0, 0, 0]), (vec![0, 0, 0], 0, vec![]));
    }

    #[test]
    fn test_slide_ceiling_does_not_merge() {
        let m = MAX_TILE_VALUE;
        assert_eq!(slide(&[m, m, 0]), (vec![m, m, 0], 0, vec![]));
    }

    #[test]
    fn test_move_left_merge_event() {
        let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let result = apply_move(&grid, Direction::Left);
        assert!(result.moved);
        assert_eq!(result.score, 4);
        assert_eq!(result.grid.get(0, 0), Some(4));
        assert_eq!(
            result.merges.as_slice(),
            &[MergeEvent { row: 0, col: 0, value: 4 }]
        );
    }

    #[test]
    fn test_move_each_direction() {
        let grid = Grid::from_rows([[0, 0, 0], [0, 2, 0], [0, 0, 0]]);

        let up = apply_move(&grid, Direction::Up).grid;
        assert_eq!(up.get(0, 1), Some(2));
        let down = apply_move(&grid, Direction::Down).grid;
        assert_eq!(down.get(2, 1), Some(2));
        let left = apply_move(&grid, Direction::Left).grid;
        assert_eq!(left.get(1, 0), Some(2));
        let right = apply_move(&grid, Direction::Right).grid;
        assert_eq!(right.get(1, 2), Some(2));
    }

    #[test]
    fn test_merge_coordinates_for_vertical_moves() {
        let grid = Grid::from_rows([
            [0, 0, 4, 0],
            [0, 0, 0, 0],
            [0, 0, 4, 0],
            [0, 0, 0, 0],
        ]);

        let up = apply_move(&grid, Direction::Up);
        assert_eq!(up.merges.as_slice(), &[MergeEvent { row: 0, col: 2, value: 8 }]);
        assert_eq!(up.grid.get(0, 2), Some(8));

        let down = apply_move(&grid, Direction::Down);
        assert_eq!(down.merges.as_slice(), &[MergeEvent { row: 3, col: 2, value: 8 }]);
        assert_eq!(down.grid.get(3, 2), Some(8));
    }

    #[test]
    fn test_merge_coordinates_for_right() {
        let grid = Grid::from_rows([[0, 0, 0], [2, 2, 2], [0, 0, 0]]);
        let right = apply_move(&grid, Direction::Right);
        // Processing runs from the right edge, so the rightmost pair merges.
        assert_eq!(right.grid.to_rows()[1], vec![0, 2, 4]);
        assert_eq!(right.merges.as_slice(), &[MergeEvent { row: 1, col: 2, value: 4 }]);
    }

    #[test]
    fn test_move_does_not_mutate_input() {
        let grid = Grid::from_rows([[2, 2, 0], [0, 0, 0], [0, 0, 4]]);
        let before = grid.clone();
        let a = apply_move(&grid, Direction::Left);
        let b = apply_move(&grid, Direction::Left);
        assert_eq!(grid, before);
        assert_eq!(a, b);
    }

    #[test]
    fn test_blocked_direction_is_noop() {
        let grid = Grid::from_rows([[2, 4, 0], [8, 0, 0], [0, 0, 0]]);
        let result = apply_move(&grid, Direction::Left);
        assert!(!result.moved);
        assert_eq!(result.grid, grid);
        assert_eq!(result.score, 0);
        assert!(result.merges.is_empty());
    }

    #[test]
    fn test_valid_moves() {
        let grid = Grid::from_rows([[2, 4, 8], [4, 8, 16], [8, 16, 0]]);
        let moves = valid_moves(&grid);
        assert_eq!(moves.as_slice(), &[Direction::Down, Direction::Right]);

        let stuck = Grid::from_rows([[2, 4, 8], [4, 8, 16], [8, 16, 32]]);
        assert!(valid_moves(&stuck).is_empty());
    }

    #[test]
    fn test_spawn_on_full_board_is_noop() {
        let full = Grid::from_rows([[2, 4, 8], [4, 8, 16], [8, 16, 32]]);
        let mut rng = SimpleRng::new(1);
        assert_eq!(spawn_random_tile(&full, &mut rng, SPAWN_TWO_PROBABILITY), full);
    }

    #[test]
    fn test_spawn_changes_exactly_one_cell() {
        let grid = Grid::empty(BoardSize::default());
        let mut rng = SimpleRng::new(42);
        for _ in 0..50 {
            let next = spawn_random_tile(&grid, &mut rng, SPAWN_TWO_PROBABILITY);
            let changed: Vec<_> = grid
                .cells()
                .iter()
                .zip(next.cells())
                .filter(|(a, b)| a != b)
                .map(|(_, &b)| b)
                .collect();
            assert_eq!(changed.len(), 1);
            assert!(changed[0] == 2 || changed[0] == 4);
        }
    }

    #[test]
    fn test_spawn_probability_extremes() {
        let grid = Grid::empty(BoardSize::default());
        let mut rng = SimpleRng::new(9);
        for _ in 0..20 {
            let twos = spawn_random_tile(&grid, &mut rng, 1.0);
            assert_eq!(twos.max_value(), 2);
            let fours = spawn_random_tile(&grid, &mut rng, 0.0);
            assert_eq!(fours.max_value(), 4);
        }
    }

    #[test]
    fn test_spawn_is_replayable() {
        let grid = Grid::empty(BoardSize::default());
        let a = spawn_random_tile(&grid, &mut SimpleRng::new(77), SPAWN_TWO_PROBABILITY);
        let b = spawn_random_tile(&grid, &mut SimpleRng::new(77), SPAWN_TWO_PROBABILITY);
        assert_eq!(a, b);
    }
}
