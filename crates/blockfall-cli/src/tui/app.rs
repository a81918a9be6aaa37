use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event. Configure the tick interval here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key press, resize, ...).
    fn handle_event(&mut self, event: &Event);

    /// Advances the application by one tick.
    fn update(&mut self);

    fn draw(&self, frame: &mut Frame);
}
