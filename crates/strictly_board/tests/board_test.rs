//! Behavioural tests for the board engine.

use strictly_board::{Board, DisplayGrid, Move, Square, Symbol};

/// Winning lines written out by cell number.
const WINNING_CELLS: [[u8; 3]; 8] = [
    [1, 2, 3],
    [4, 5, 6],
    [7, 8, 9],
    [1, 4, 7],
    [2, 5, 8],
    [3, 6, 9],
    [1, 5, 9],
    [3, 5, 7],
];

fn play(board: &mut Board, moves: &[(u8, Symbol)]) {
    for (index, symbol) in moves {
        let mv = Move::from_index(*index).expect("cell in range");
        board.apply_move(mv, *symbol).expect("cell is open");
    }
}

#[test]
fn test_top_row_win() {
    let mut board = Board::new();
    for index in 1..=3 {
        assert!(!board.is_winner(Symbol::X));
        play(&mut board, &[(index, Symbol::X)]);
        assert!(!board.is_winner(Symbol::O));
    }
    assert!(board.is_winner(Symbol::X));
}

#[test]
fn test_full_board_tie() {
    let mut board = Board::new();
    play(
        &mut board,
        &[
            (1, Symbol::X),
            (2, Symbol::O),
            (3, Symbol::X),
            (4, Symbol::X),
            (5, Symbol::O),
            (6, Symbol::O),
            (7, Symbol::O),
            (8, Symbol::X),
            (9, Symbol::X),
        ],
    );
    assert!(board.is_full());
    assert!(!board.is_winner(Symbol::X));
    assert!(!board.is_winner(Symbol::O));
}

#[test]
fn test_diagonal_win() {
    let mut board = Board::new();
    play(&mut board, &[(1, Symbol::X), (5, Symbol::X), (9, Symbol::X)]);
    assert!(board.is_winner(Symbol::X));
}

#[test]
fn test_anti_diagonal_win() {
    let mut board = Board::new();
    play(&mut board, &[(3, Symbol::O), (5, Symbol::O)]);
    assert!(!board.is_winner(Symbol::O));
    play(&mut board, &[(7, Symbol::O)]);
    assert!(board.is_winner(Symbol::O));
    assert!(!board.is_winner(Symbol::X));
}

#[test]
fn test_near_lines_do_not_win() {
    // Three in a bent or broken row.
    for cells in [[1, 2, 4], [2, 4, 6], [3, 5, 8], [1, 6, 8], [7, 5, 2]] {
        let mut board = Board::new();
        for index in cells {
            play(&mut board, &[(index, Symbol::X)]);
        }
        assert!(!board.is_winner(Symbol::X), "{cells:?}");
    }
}

#[test]
fn test_full_only_after_ninth_move() {
    // Several orderings of all nine cells, alternating symbols.
    let orders: [[u8; 9]; 3] = [
        [1, 2, 3, 4, 5, 6, 7, 8, 9],
        [9, 8, 7, 6, 5, 4, 3, 2, 1],
        [5, 1, 9, 3, 7, 2, 8, 4, 6],
    ];
    for order in orders {
        let mut board = Board::new();
        let mut symbol = Symbol::X;
        for (played, index) in order.iter().enumerate() {
            assert!(!board.is_full(), "full before move {}", played + 1);
            play(&mut board, &[(*index, symbol)]);
            symbol = symbol.opponent();
        }
        assert!(board.is_full());
    }
}

#[test]
fn test_winner_iff_some_line_uniform() {
    // Exhaustive over all boards: each cell Empty, X or O.
    for code in 0..3u32.pow(9) {
        let mut board = Board::new();
        let mut rest = code;
        for index in 1..=9 {
            let mv = Move::from_index(index).unwrap();
            match rest % 3 {
                1 => board.apply_move(mv, Symbol::X).unwrap(),
                2 => board.apply_move(mv, Symbol::O).unwrap(),
                _ => {}
            }
            rest /= 3;
        }
        for symbol in [Symbol::X, Symbol::O] {
            let expected = WINNING_CELLS.iter().any(|line| {
                line.iter().all(|index| {
                    board.get(Move::from_index(*index).unwrap()) == Square::Occupied(symbol)
                })
            });
            assert_eq!(board.is_winner(symbol), expected, "{}", board.display());
        }
    }
}

#[test]
fn test_move_to_cell_is_bijection() {
    let mut seen = std::collections::HashSet::new();
    for mv in Move::ALL {
        let (row, col) = mv.cell();
        assert_eq!(row, usize::from(mv.index() - 1) / 3);
        assert_eq!(col, usize::from(mv.index() - 1) % 3);
        assert!(seen.insert((row, col)));
        assert_eq!(Move::from_cell(row, col), Some(mv));
    }
    assert_eq!(seen.len(), 9);
}

#[test]
fn test_terminal_grid_coordinates() {
    let grid = DisplayGrid::new(2, 1, 6, 3);
    assert_eq!(grid.coordinate(Move::TopLeft), (2, 1));
    assert_eq!(grid.coordinate(Move::Center), (8, 4));
    assert_eq!(grid.coordinate(Move::BottomRight), (14, 7));
}
