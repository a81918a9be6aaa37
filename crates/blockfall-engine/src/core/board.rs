use serde::{Deserialize, Serialize};

use super::{BOARD_HEIGHT, BOARD_WIDTH, color::Color, shape::Shape};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Cell {
    /// No locked block.
    #[default]
    Empty,
    /// Locked block left behind by a piece of the given color.
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Filled(color) => Some(color),
        }
    }
}

/// One row of [`BOARD_WIDTH`] cells.
pub type BoardRow = [Cell; BOARD_WIDTH];

const EMPTY_ROW: BoardRow = [Cell::Empty; BOARD_WIDTH];

fn is_full(row: &BoardRow) -> bool {
    row.iter().all(|cell| !cell.is_empty())
}

/// The grid of locked cells.
///
/// The board is always [`BOARD_WIDTH`] columns by [`BOARD_HEIGHT`] rows, with
/// row 0 at the top. Cells only change through [`Board::lock`] and
/// [`Board::clear_full_rows`].
///
/// Positions passed to the board are signed so a shape may be tested at
/// column `-1`; anything outside the grid counts as a collision.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Color, ShapeKind};
///
/// let mut board = Board::EMPTY;
/// let square = ShapeKind::O.shape();
///
/// assert!(!board.collides(&square, 4, 16));
/// board.lock(&square, 4, 16, Color::Blue);
/// assert!(board.collides(&square, 4, 15));
/// assert!(board.collides(&square, 9, 0)); // right column would be 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Builds a board from explicit rows, top row first.
    #[must_use]
    pub const fn from_rows(rows: [BoardRow; BOARD_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Maps a signed board position to grid indices, or `None` when outside the grid.
    fn grid_index(x: i32, y: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(x).ok().filter(|&col| col < BOARD_WIDTH)?;
        let row = usize::try_from(y).ok().filter(|&row| row < BOARD_HEIGHT)?;
        Some((col, row))
    }

    /// Returns the cell at the given position, or `None` when outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let (col, row) = Self::grid_index(x, y)?;
        Some(self.rows[row][col])
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &BoardRow> + '_ {
        self.rows.iter()
    }

    #[must_use]
    pub fn as_rows(&self) -> &[BoardRow; BOARD_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Returns whether `shape` placed with its top-left corner at `(x, y)` hits a
    /// wall, the floor, the ceiling or an already locked cell.
    #[must_use]
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.occupied_cells().any(|(dx, dy)| {
            Self::grid_index(x + dx, y + dy)
                .is_none_or(|(col, row)| !self.rows[row][col].is_empty())
        })
    }

    /// Writes `color` into every cell occupied by `shape` at `(x, y)`.
    ///
    /// The caller must have checked that the placement does not collide.
    pub fn lock(&mut self, shape: &Shape, x: i32, y: i32, color: Color) {
        debug_assert!(
            !self.collides(shape, x, y),
            "locking a colliding shape at ({x}, {y})"
        );
        for (dx, dy) in shape.occupied_cells() {
            if let Some((col, row)) = Self::grid_index(x + dx, y + dy) {
                self.rows[row][col] = Cell::Filled(color);
            }
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Remaining rows keep their order and settle at the bottom; the same number
    /// of empty rows is inserted at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if is_full(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }
}
