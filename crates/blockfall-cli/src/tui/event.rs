use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// State changed since the last draw.
    Render,
    #[from]
    Crossterm(CrosstermEvent),
}
