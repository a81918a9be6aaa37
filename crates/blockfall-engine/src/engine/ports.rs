use std::time::Duration;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;

/// Discrete command produced by an input device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant,
)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    SoftDrop,
    /// Start a new game. Only honored after game over.
    Reset,
}

/// Commands read during one tick: at most one per stick axis plus a reset.
pub type Commands = ArrayVec<Command, 3>;

/// Source of commands, polled once per tick.
pub trait InputPort {
    /// Returns the commands issued since the previous poll.
    ///
    /// Horizontal commands must come before vertical ones; the engine applies
    /// them in order.
    fn poll(&mut self, now: Duration) -> Commands;
}

/// Consumer of per-tick snapshots.
pub trait RenderPort {
    /// Called once per tick with the current state.
    fn render(&mut self, snapshot: &Snapshot);

    /// Called once, on the tick the game enters game over, before `render`.
    fn game_over(&mut self, snapshot: &Snapshot) {
        let _ = snapshot;
    }
}

impl<I> InputPort for &mut I
where
    I: InputPort + ?Sized,
{
    fn poll(&mut self, now: Duration) -> Commands {
        (**self).poll(now)
    }
}

impl<R> RenderPort for &mut R
where
    R: RenderPort + ?Sized,
{
    fn render(&mut self, snapshot: &Snapshot) {
        (**self).render(snapshot);
    }

    fn game_over(&mut self, snapshot: &Snapshot) {
        (**self).game_over(snapshot);
    }
}

/// Input port that never issues a command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputPort for NoInput {
    fn poll(&mut self, _now: Duration) -> Commands {
        Commands::new()
    }
}

/// Render port that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRender;

impl RenderPort for NoRender {
    fn render(&mut self, _snapshot: &Snapshot) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_is_empty() {
        assert!(NoInput.poll(Duration::from_secs(3)).is_empty());
    }
}
