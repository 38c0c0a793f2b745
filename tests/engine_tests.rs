//! Move engine behaviour on whole boards.

use tui_2048::core::{apply_move, is_valid_move, slide_line_left, valid_moves, Grid};
use tui_2048::types::{Direction, MergeEvent, MAX_TILE_VALUE};

#[test]
fn test_slide_examples() {
    let cases: [(&[u32], &[u32], u32); 6] = [
        (&[2, 2, 2, 2], &[4, 4, 0, 0], 8),
        (&[4, 0, 4, 4], &[8, 4, 0, 0], 8),
        (&[2, 2, 4, 4], &[4, 8, 0, 0], 12),
        (&[0, 0, 2, 2], &[4, 0, 0, 0], 4),
        (&[8, 8, 8, 8, 8], &[16, 16, 8, 0, 0], 32),
        (&[2, 4, 8], &[2, 4, 8], 0),
    ];
    for (input, expected, score) in cases {
        let slid = slide_line_left(input);
        assert_eq!(slid.line.as_slice(), expected, "input {input:?}");
        assert_eq!(slid.score, score, "input {input:?}");
    }
}

#[test]
fn test_every_direction_on_full_row_and_column() {
    let grid = Grid::from_rows([
        [2, 2, 2, 2],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]);

    let left = apply_move(&grid, Direction::Left);
    assert_eq!(left.grid.to_rows()[0], vec![4, 4, 0, 0]);
    let right = apply_move(&grid, Direction::Right);
    assert_eq!(right.grid.to_rows()[0], vec![0, 0, 4, 4]);
    assert_eq!(
        right.merges.as_slice(),
        &[
            MergeEvent { row: 0, col: 3, value: 4 },
            MergeEvent { row: 0, col: 2, value: 4 },
        ]
    );

    // Vertically every column holds one tile: Down moves them, Up cannot.
    assert!(!is_valid_move(&grid, Direction::Up));
    let down = apply_move(&grid, Direction::Down);
    assert_eq!(down.grid.to_rows()[3], vec![2, 2, 2, 2]);
    assert!(down.merges.is_empty());
}

#[test]
fn test_column_merges_on_large_board() {
    let mut grid = Grid::empty(tui_2048::types::BoardSize::new(8).unwrap());
    for row in 0..8 {
        grid.set(row, 5, 16);
    }

    let up = apply_move(&grid, Direction::Up);
    assert_eq!(up.score, 4 * 32);
    let column: Vec<u32> = (0..8).map(|r| up.grid.get(r, 5).unwrap()).collect();
    assert_eq!(column, vec![32, 32, 32, 32, 0, 0, 0, 0]);
    let rows: Vec<usize> = up.merges.iter().map(|m| m.row).collect();
    assert_eq!(rows, vec![0, 1, 2, 3]);
    assert!(up.merges.iter().all(|m| m.col == 5 && m.value == 32));

    let down = apply_move(&grid, Direction::Down);
    let rows: Vec<usize> = down.merges.iter().map(|m| m.row).collect();
    assert_eq!(rows, vec![7, 6, 5, 4]);
}

#[test]
fn test_ceiling_tiles_block_the_board() {
    let m = MAX_TILE_VALUE;
    let grid = Grid::from_rows([[m, m, m], [m, m, m], [m, m, m]]);
    assert!(!grid.has_valid_moves());
    assert!(valid_moves(&grid).is_empty());
}
