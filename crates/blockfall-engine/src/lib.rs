pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the board or its walls")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("piece colliding when moving active piece")]
    PieceCollision(PieceCollisionError),
    #[display("no active piece after game over")]
    GameOver,
}

impl From<PieceCollisionError> for MoveError {
    fn from(err: PieceCollisionError) -> Self {
        Self::PieceCollision(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("minimum fall interval must be positive")]
    ZeroMinFallInterval,
    #[display("minimum fall interval ({min_ms} ms) exceeds base fall interval ({base_ms} ms)")]
    MinAboveBase { min_ms: u64, base_ms: u64 },
}
