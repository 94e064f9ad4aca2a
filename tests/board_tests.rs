//! Board tests - occupancy, validity and row clearing

use blockfall::core::{calculate_line_score, Board, ScoreRule};
use blockfall::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i16) {
    for x in 0..board.width() as i16 {
        board.set(x, y, Some(Color::Cyan));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i16 {
        for x in 0..BOARD_WIDTH as i16 {
            assert!(board.accepts(x, y), "Cell ({}, {}) should be open", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_rejects_non_positive_dimensions() {
    assert!(Board::new(0, 0).is_err());
    assert!(Board::new(0, 20).is_err());
    assert!(Board::new(10, 0).is_err());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i16, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i16), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(5, 10, Some(Color::Purple)));
    assert_eq!(board.get(5, 10), Some(Some(Color::Purple)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(Color::Red)));
    assert!(!board.set(0, BOARD_HEIGHT as i16, Some(Color::Red)));
}

#[test]
fn test_board_accepts() {
    let mut board = Board::default();
    board.set(5, 10, Some(Color::Red));

    assert!(!board.accepts(5, 10));
    assert!(board.accepts(5, 9));
    assert!(board.accepts(5, -1));
    assert!(!board.accepts(-1, 5));
    assert!(!board.accepts(BOARD_WIDTH as i16, 5));
    assert!(!board.accepts(5, BOARD_HEIGHT as i16));
}

#[test]
fn test_clear_rows_two_and_five() {
    let mut board = Board::default();
    fill_row(&mut board, 2);
    fill_row(&mut board, 5);
    board.set(1, 0, Some(Color::Red));
    board.set(2, 1, Some(Color::Red));
    board.set(3, 3, Some(Color::Blue));
    board.set(4, 4, Some(Color::Blue));
    for y in 6..BOARD_HEIGHT as i16 {
        board.set(y % BOARD_WIDTH as i16, y, Some(Color::Green));
    }
    let below: Vec<Vec<_>> = board.rows().skip(6).map(|r| r.to_vec()).collect();

    let cleared = board.clear_full_rows();

    assert_eq!(cleared, vec![2, 5]);
    let score = calculate_line_score(ScoreRule::Quadratic, cleared.len());
    assert_eq!(score, 400);

    // Rows below the lowest cleared row keep their contents
    let after: Vec<Vec<_>> = board.rows().skip(6).map(|r| r.to_vec()).collect();
    assert_eq!(after, below);

    // Rows above row 2 moved down by two, rows between by one
    assert_eq!(board.get(1, 2), Some(Some(Color::Red)));
    assert_eq!(board.get(2, 3), Some(Some(Color::Red)));
    assert_eq!(board.get(3, 4), Some(Some(Color::Blue)));
    assert_eq!(board.get(4, 5), Some(Some(Color::Blue)));

    // Fresh rows at the top
    for y in 0..2 {
        for x in 0..BOARD_WIDTH as i16 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert!(board.full_rows().is_empty());
}

#[test]
fn test_clear_four_rows_at_bottom() {
    let mut board = Board::default();
    for y in 16..20 {
        fill_row(&mut board, y);
    }
    board.set(0, 15, Some(Color::Yellow));

    let cleared = board.clear_full_rows();

    assert_eq!(cleared, vec![16, 17, 18, 19]);
    assert_eq!(board.get(0, 19), Some(Some(Color::Yellow)));
    assert_eq!(board.locked_count(), 1);
}

#[test]
fn test_from_rows() {
    let board = Board::from_rows(
        &[".....", ".....", "#....", "##.##", "#####"],
        Color::Orange,
    )
    .unwrap();

    assert_eq!((board.width(), board.height()), (5, 5));
    assert_eq!(board.full_rows(), vec![4]);
    assert!(board.is_occupied(0, 2));
    assert!(!board.is_occupied(2, 3));
}

#[test]
fn test_has_locked_in_top() {
    let mut board = Board::default();
    assert!(!board.has_locked_in_top(4));

    board.set(7, 3, Some(Color::Red));
    assert!(board.has_locked_in_top(4));
    assert!(!board.has_locked_in_top(3));
}
