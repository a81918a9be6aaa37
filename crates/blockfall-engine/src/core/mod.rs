//! Board geometry and the pieces that fall on it.
//!
//! - [`Board`] - Grid of locked cells with collision queries and row clearing
//! - [`Shape`] / [`ShapeKind`] - The seven piece geometries and their rotation
//! - [`Color`] - The seven piece colors
//! - [`Piece`] - A shape instance placed on the board with a color

pub use self::{board::*, color::*, piece::*, shape::*};

mod board;
mod color;
mod piece;
mod shape;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;

/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 18;
