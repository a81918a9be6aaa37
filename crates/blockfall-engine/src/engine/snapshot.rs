use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{BOARD_HEIGHT, BOARD_WIDTH, BoardRow, Cell, Color, Piece, ShapeKind};

use super::game_state::GamePhase;

/// Self-contained view of the game handed to a [`RenderPort`](super::RenderPort).
///
/// The snapshot owns copies of everything it describes and stays valid after
/// the game moves on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    /// Locked cells, top row first.
    pub board: [BoardRow; BOARD_HEIGHT],
    /// The falling piece while playing.
    pub piece: Option<PieceSnapshot>,
    pub score: usize,
    pub level: usize,
    pub phase: GamePhase,
}

/// Cells and color of the falling piece.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub color: Color,
    /// Absolute `(column, row)` positions.
    pub cells: ArrayVec<(usize, usize), 4>,
}

impl PieceSnapshot {
    /// Captures the in-bounds cells of `piece`.
    #[must_use]
    pub fn from_piece(piece: &Piece) -> Self {
        let cells = piece
            .occupied_positions()
            .filter_map(|(x, y)| Some((usize::try_from(x).ok()?, usize::try_from(y).ok()?)))
            .filter(|&(x, y)| x < BOARD_WIDTH && y < BOARD_HEIGHT)
            .collect();
        Self {
            kind: piece.kind(),
            color: piece.color(),
            cells,
        }
    }
}

impl Snapshot {
    /// Returns the cell as it should be displayed, with the falling piece drawn over the board.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use blockfall_engine::{Cell, GameConfig, GameState, PieceSeed};
    ///
    /// let state = GameState::with_seed(GameConfig::default(), PieceSeed::from_u128(1), Duration::ZERO);
    /// let snapshot = state.snapshot();
    /// let piece = snapshot.piece.as_ref().unwrap();
    /// let (x, y) = piece.cells[0];
    /// assert_eq!(snapshot.display_cell(x, y), Cell::Filled(piece.color));
    /// ```
    #[must_use]
    pub fn display_cell(&self, x: usize, y: usize) -> Cell {
        if let Some(piece) = &self.piece
            && piece.cells.contains(&(x, y))
        {
            return Cell::Filled(piece.color);
        }
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or_default()
    }

    /// Iterates displayed rows with the falling piece merged in.
    pub fn display_rows(&self) -> impl Iterator<Item = BoardRow> + '_ {
        (0..BOARD_HEIGHT).map(|y| std::array::from_fn(|x| self.display_cell(x, y)))
    }
}
