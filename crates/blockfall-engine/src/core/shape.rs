use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest extent of a shape matrix in either direction.
pub const MAX_SHAPE_SIZE: usize = 4;

/// An immutable rectangular boolean matrix describing which cells a piece occupies.
///
/// The matrix is stored top row first. Dimensions are exact: a 1×4 bar has
/// height 1 and width 4, with no padding. Rotation returns a new matrix and
/// swaps width and height.
///
/// # Example
///
/// ```
/// use blockfall_engine::ShapeKind;
///
/// let bar = ShapeKind::I.shape();
/// assert_eq!((bar.width(), bar.height()), (4, 1));
///
/// let upright = bar.rotated_cw();
/// assert_eq!((upright.width(), upright.height()), (1, 4));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from rows of `0`/`1` values, top row first.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or larger than [`MAX_SHAPE_SIZE`] in either direction.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether the cell at column `x`, row `y` of the matrix is occupied.
    ///
    /// Positions outside the matrix are unoccupied.
    #[must_use]
    pub const fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Returns an iterator of `(dx, dy)` offsets of occupied cells relative to the top-left corner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width)
                .filter(move |&dx| self.cells[usize::from(dy)][usize::from(dx)])
                .map(move |dx| (i32::from(dx), i32::from(dy)))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.occupied_cells().count()
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// The rotation reverses the row order and then transposes the matrix.
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        // New matrix has `width` rows and `height` columns.
        let mut y = 0;
        while y < width {
            let mut x = 0;
            while x < height {
                cells[y][x] = self.cells[height - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = (0..self.height()).map(|y| {
            (0..self.width())
                .map(|x| if self.is_filled(x, y) { '#' } else { '.' })
                .collect::<String>()
        });
        f.debug_list().entries(rows).finish()
    }
}

/// Identity of one of the seven catalog shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// 1×4 bar.
    I = 0,
    /// 2×2 square.
    O = 1,
    /// T-shape.
    T = 2,
    /// Z skew (top row shifted left).
    Z = 3,
    /// S skew (top row shifted right).
    S = 4,
    /// J-shape (marker on the left).
    J = 5,
    /// L-shape (marker on the right).
    L = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

const SHAPES: [Shape; ShapeKind::LEN] = [
    Shape::from_rows([[1, 1, 1, 1]]),
    Shape::from_rows([[1, 1], [1, 1]]),
    Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
    Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
    Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
];

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::Z,
        Self::S,
        Self::J,
        Self::L,
    ];

    /// Returns the spawn orientation of this shape.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPES[self as usize]
    }

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::O => 'O',
            Self::T => 'T',
            Self::Z => 'Z',
            Self::S => 'S',
            Self::J => 'J',
            Self::L => 'L',
        }
    }
}
