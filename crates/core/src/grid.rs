//! Grid module - the square tile board
//!
//! The grid is an NxN board of tile values (0 = empty). Uses a flat inline
//! array for cache locality and zero heap allocation, so cloning a grid for the
//! undo history or the move engine is a plain memcpy.
//! Coordinates: (row, col), both 0-indexed from the top-left corner.

use arrayvec::ArrayVec;

use crate::types::{is_valid_tile, BoardSize, Tile, MAX_CELLS, MAX_TILE_VALUE};

/// Ordered list of empty cell coordinates.
pub type CellList = ArrayVec<(usize, usize), MAX_CELLS>;

/// Square board of tiles, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: BoardSize,
    cells: ArrayVec<Tile, MAX_CELLS>,
}

impl Grid {
    /// Create an empty grid.
    pub fn empty(size: BoardSize) -> Self {
        let mut cells = ArrayVec::new();
        for _ in 0..size.cells() {
            cells.push(0);
        }
        Self { size, cells }
    }

    /// Build a grid from nested rows.
    ///
    /// # Panics
    ///
    /// Panics if the side is unsupported or any value is not a tile. These are
    /// programmer errors.
    pub fn from_rows<const N: usize>(rows: [[Tile; N]; N]) -> Self {
        let size = u8::try_from(N)
            .ok()
            .and_then(BoardSize::new)
            .unwrap_or_else(|| panic!("unsupported grid side {N}"));

        let mut grid = Self::empty(size);
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                assert!(is_valid_tile(value), "invalid tile {value} at ({row}, {col})");
                grid.cells[row * N + col] = value;
            }
        }
        grid
    }

    /// Convert to nested rows (for display and tests).
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Side length as usize.
    #[inline(always)]
    pub fn side(&self) -> usize {
        self.size.as_usize()
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        let n = self.side();
        if row >= n || col >= n {
            return None;
        }
        Some(row * n + col)
    }

    /// Get tile at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set tile at (row, col). Returns false if out of bounds.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a tile.
    pub fn set(&mut self, row: usize, col: usize, value: Tile) -> bool {
        assert!(is_valid_tile(value), "invalid tile {value}");
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Iterate rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.side())
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [Tile] {
        let n = self.side();
        &mut self.cells[row * n..(row + 1) * n]
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> CellList {
        let n = self.side();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| (i / n, i % n))
            .collect()
    }

    /// Rotate 90 degrees clockwise: `rotated[c][n-1-r] = self[r][c]`.
    pub fn rotate_cw(&self) -> Self {
        let n = self.side();
        let mut rotated = Self::empty(self.size);
        for r in 0..n {
            for c in 0..n {
                rotated.cells[c * n + (n - 1 - r)] = self.cells[r * n + c];
            }
        }
        rotated
    }

    /// Rotate clockwise `times` quarter turns (mod 4).
    pub fn rotated(&self, times: usize) -> Self {
        let mut out = self.clone();
        for _ in 0..times % 4 {
            out = out.rotate_cw();
        }
        out
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.contains(&0)
    }

    /// Check whether two horizontally or vertically adjacent tiles could merge.
    ///
    /// Ceiling tiles never merge, so a pair of them does not count.
    pub fn has_adjacent_equal_pair(&self) -> bool {
        let n = self.side();
        let mergeable = |a: Tile, b: Tile| a != 0 && a == b && a < MAX_TILE_VALUE;

        for r in 0..n {
            for c in 0..n {
                let v = self.cells[r * n + c];
                if c + 1 < n && mergeable(v, self.cells[r * n + c + 1]) {
                    return true;
                }
                if r + 1 < n && mergeable(v, self.cells[(r + 1) * n + c]) {
                    return true;
                }
            }
        }
        false
    }

    /// True while at least one direction can change the board.
    pub fn has_valid_moves(&self) -> bool {
        self.has_empty_cell() || self.has_adjacent_equal_pair()
    }

    /// Highest tile on the board (0 on an empty board).
    pub fn max_value(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn contains_value(&self, value: Tile) -> bool {
        self.cells.contains(&value)
    }

    /// Number of occupied cells.
    pub fn count_non_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty(BoardSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u8) -> BoardSize {
        BoardSize::new(n).unwrap()
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(size(3));
        assert_eq!(grid.cells().len(), 9);
        assert_eq!(grid.count_non_empty(), 0);
        assert_eq!(grid.max_value(), 0);
        assert!(!grid.contains_value(2));
        assert_eq!(grid.empty_cells().len(), 9);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::empty(size(4));
        assert!(grid.set(1, 2, 8));
        assert_eq!(grid.get(1, 2), Some(8));
        assert_eq!(grid.cells()[6], 8);
        assert!(!grid.set(4, 0, 2));
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    #[should_panic]
    fn test_set_rejects_non_tile() {
        let mut grid = Grid::empty(size(4));
        grid.set(0, 0, 3);
    }

    #[test]
    #[should_panic]
    fn test_from_rows_rejects_non_tile() {
        Grid::from_rows([[0, 0, 0], [0, 5, 0], [0, 0, 0]]);
    }

    #[test]
    #[should_panic]
    fn test_from_rows_rejects_unsupported_side() {
        Grid::from_rows([[0, 0], [0, 0]]);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let grid = Grid::from_rows([[2, 0, 4], [0, 8, 0], [16, 0, 0]]);
        assert_eq!(grid.to_rows(), vec![vec![2, 0, 4], vec![0, 8, 0], vec![16, 0, 0]]);
        assert_eq!(grid.size(), size(3));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Grid::from_rows([[2, 0, 0], [0, 0, 0], [0, 0, 0]]);
        let mut copy = original.clone();
        copy.set(0, 0, 4);
        assert_eq!(original.get(0, 0), Some(2));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_empty_cells_are_row_major() {
        let grid = Grid::from_rows([[2, 0, 4], [4, 2, 0], [0, 8, 16]]);
        let empties: Vec<_> = grid.empty_cells().into_iter().collect();
        assert_eq!(empties, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_rotate_cw() {
        let grid = Grid::from_rows([[2, 4, 8], [16, 32, 64], [128, 256, 512]]);
        let rotated = grid.rotate_cw();
        assert_eq!(
            rotated.to_rows(),
            vec![vec![128, 16, 2], vec![256, 32, 4], vec![512, 64, 8]]
        );
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let grid = Grid::from_rows([
            [2, 4, 0, 8],
            [0, 0, 16, 0],
            [32, 0, 0, 2],
            [0, 64, 0, 0],
        ]);
        assert_eq!(grid.rotated(4), grid);
        assert_eq!(grid.rotated(1).rotated(3), grid);
        assert_eq!(grid.rotated(2).rotated(2), grid);
    }

    #[test]
    fn test_adjacent_pairs() {
        let horizontal = Grid::from_rows([[2, 2, 4], [4, 8, 16], [32, 64, 128]]);
        assert!(horizontal.has_adjacent_equal_pair());

        let vertical = Grid::from_rows([[2, 4, 8], [2, 16, 32], [64, 128, 256]]);
        assert!(vertical.has_adjacent_equal_pair());

        let none = Grid::from_rows([[2, 4, 8], [4, 8, 16], [8, 16, 32]]);
        assert!(!none.has_adjacent_equal_pair());
        assert!(!none.has_valid_moves());
    }

    #[test]
    fn test_empty_zeros_do_not_pair() {
        let grid = Grid::from_rows([[0, 0, 2], [4, 8, 16], [32, 64, 128]]);
        assert!(!grid.has_adjacent_equal_pair());
        assert!(grid.has_valid_moves());
    }

    #[test]
    fn test_ceiling_tiles_do_not_pair() {
        let m = MAX_TILE_VALUE;
        let grid = Grid::from_rows([[m, m, 2], [4, 8, 16], [32, 64, 128]]);
        assert!(!grid.has_adjacent_equal_pair());
    }

    #[test]
    fn test_scans() {
        let grid = Grid::from_rows([[2, 0, 0], [0, 2048, 0], [0, 0, 4]]);
        assert_eq!(grid.max_value(), 2048);
        assert!(grid.contains_value(2048));
        assert_eq!(grid.count_non_empty(), 3);
    }
}
