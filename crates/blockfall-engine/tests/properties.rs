use std::time::Duration;

use blockfall_engine::{
    BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Color, Command, GameConfig, GameState, Piece,
    PiecePosition, PieceSeed, ShapeKind,
};
use proptest::prelude::*;

fn shape_kind() -> impl Strategy<Value = ShapeKind> {
    (0..ShapeKind::LEN).prop_map(|i| ShapeKind::ALL[i])
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::RotateCw),
        Just(Command::SoftDrop),
        Just(Command::Reset),
    ]
}

fn board() -> impl Strategy<Value = Board> {
    proptest::collection::vec(any::<bool>(), BOARD_WIDTH * BOARD_HEIGHT).prop_map(|bits| {
        let mut rows = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for (i, filled) in bits.into_iter().enumerate() {
            if filled {
                rows[i / BOARD_WIDTH][i % BOARD_WIDTH] = Cell::Filled(Color::Gray);
            }
        }
        Board::from_rows(rows)
    })
}

proptest! {
    #[test]
    fn collides_matches_cellwise_check(
        board in board(),
        kind in shape_kind(),
        rotations in 0..4_usize,
        x in -4..12_i32,
        y in -4..20_i32,
    ) {
        let mut piece = Piece::spawn(kind, Color::Red).at(PiecePosition::new(x, y));
        for _ in 0..rotations {
            piece = piece.rotated_cw();
        }
        let expected = piece
            .occupied_positions()
            .any(|(cx, cy)| board.cell(cx, cy).is_none_or(|cell| !cell.is_empty()));
        prop_assert_eq!(piece.collides(&board), expected);
    }

    #[test]
    fn clearing_leaves_no_full_rows(board in board()) {
        let mut cleared = board.clone();
        let full = board
            .rows()
            .filter(|row| row.iter().all(|cell| !cell.is_empty()))
            .count();
        prop_assert_eq!(cleared.clear_full_rows(), full);
        for row in cleared.rows() {
            prop_assert!(row.iter().any(|cell| cell.is_empty()));
        }
        for row in &cleared.as_rows()[..full] {
            prop_assert!(row.iter().all(|cell| cell.is_empty()));
        }
        // Surviving rows keep their relative order.
        let survivors: Vec<_> = board
            .rows()
            .filter(|row| row.iter().any(|cell| cell.is_empty()))
            .collect();
        let shifted: Vec<_> = cleared.rows().skip(full).collect();
        prop_assert_eq!(survivors, shifted);
    }

    #[test]
    fn four_rotations_restore_the_shape(kind in shape_kind()) {
        let shape = kind.shape();
        let mut rotated = shape;
        for _ in 0..4 {
            rotated = rotated.rotated_cw();
            prop_assert_eq!(rotated.cell_count(), 4);
        }
        prop_assert_eq!(rotated, shape);
    }

    #[test]
    fn random_play_keeps_state_consistent(
        seed in any::<u128>(),
        script in proptest::collection::vec(
            (1..300_u64, proptest::collection::vec(command(), 0..3)),
            1..200,
        ),
    ) {
        let mut state =
            GameState::with_seed(GameConfig::default(), PieceSeed::from_u128(seed), Duration::ZERO);
        let mut now = Duration::ZERO;
        let mut score = 0;
        for (delta, commands) in script {
            now += Duration::from_millis(delta);
            let outcome = state.tick(now, &commands);
            let expected = if outcome.is_reset() {
                0
            } else {
                score + 100 * outcome.cleared_lines().unwrap_or(0)
            };
            prop_assert_eq!(state.score(), expected);
            score = state.score();

            if state.phase().is_playing() {
                prop_assert!(!state.active_piece().collides(state.board()));
                let snapshot = state.snapshot();
                prop_assert_eq!(snapshot.piece.map(|p| p.cells.len()), Some(4));
            } else {
                prop_assert!(state.snapshot().piece.is_none());
            }
            prop_assert!(state.board().rows().all(|row| row.iter().any(|cell| cell.is_empty())));
        }
    }
}
