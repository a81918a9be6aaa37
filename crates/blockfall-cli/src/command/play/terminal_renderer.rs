use blockfall_engine::{RenderPort, Snapshot};

/// [`RenderPort`] keeping the latest snapshot for the next terminal draw.
///
/// Ticks and draws run at different rates, so the renderer only stores the
/// frame; the app draws it when the terminal is due for a redraw.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    latest: Option<Snapshot>,
    games_over: usize,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    pub fn games_over(&self) -> usize {
        self.games_over
    }
}

impl RenderPort for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        match &mut self.latest {
            Some(latest) => latest.clone_from(snapshot),
            None => self.latest = Some(snapshot.clone()),
        }
    }

    fn game_over(&mut self, snapshot: &Snapshot) {
        self.games_over += 1;
        log::info!(
            "game {} over with score {} (level {})",
            self.games_over,
            snapshot.score,
            snapshot.level
        );
    }
}
