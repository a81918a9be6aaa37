use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH,
    board::Board,
    color::Color,
    shape::{Shape, ShapeKind},
};

/// The falling piece: a shape in its current orientation, a color and a position.
///
/// Pieces are immutable values. Movement and rotation return new `Piece`
/// instances; whether the result is legal is decided against a [`Board`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Color, Piece, ShapeKind};
///
/// let board = Board::EMPTY;
/// let piece = Piece::spawn(ShapeKind::T, Color::Green);
/// assert_eq!(piece.position().x(), 4);
///
/// let moved = piece.left();
/// assert!(!moved.collides(&board));
///
/// let rotated = moved.rotated_cw_on(&board).unwrap();
/// assert_eq!(rotated.shape().width(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    shape: Shape,
    color: Color,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece in spawn orientation at the spawn position for its width.
    #[must_use]
    pub fn spawn(kind: ShapeKind, color: Color) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            color,
            position: PiecePosition::spawn_for(&shape),
        }
    }

    /// Creates a piece with an explicit orientation and position.
    #[must_use]
    pub const fn new(kind: ShapeKind, shape: Shape, color: Color, position: PiecePosition) -> Self {
        Self {
            kind,
            shape,
            color,
            position,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns this piece moved to `position`, keeping orientation and color.
    #[must_use]
    pub const fn at(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    /// Returns an iterator of absolute board positions occupied by this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let PiecePosition { x, y } = self.position;
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }

    #[must_use]
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.position.x, self.position.y)
    }

    #[must_use]
    pub const fn left(self) -> Self {
        self.at(self.position.left())
    }

    #[must_use]
    pub const fn right(self) -> Self {
        self.at(self.position.right())
    }

    #[must_use]
    pub const fn down(self) -> Self {
        self.at(self.position.down())
    }

    /// Returns this piece rotated clockwise in place, without checking the board.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..self
        }
    }

    /// Rotates clockwise if the rotated shape fits at the current position.
    ///
    /// There are no wall kicks: when the candidate collides, `None` is returned
    /// and the caller keeps the original orientation.
    #[must_use]
    pub fn rotated_cw_on(self, board: &Board) -> Option<Self> {
        let rotated = self.rotated_cw();
        (!rotated.collides(board)).then_some(rotated)
    }

    /// Writes this piece's cells into the board.
    pub fn lock_into(&self, board: &mut Board) {
        board.lock(&self.shape, self.position.x, self.position.y, self.color);
    }
}

/// Board position of a piece's top-left matrix corner.
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Coordinates are signed; positions outside the board are representable and
/// simply collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl fmt::Display for PiecePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl PiecePosition {
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const CENTER_COLUMN: i32 = (BOARD_WIDTH / 2) as i32;

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn position for a shape: centered by integer division, on the top row.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn spawn_for(shape: &Shape) -> Self {
        Self::new(Self::CENTER_COLUMN - (shape.width() / 2) as i32, 0)
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}
