use std::time::Duration;

use blockfall_engine::{Game, GameConfig, GamePhase, PieceSeed, SystemClock};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    command::play::{keyboard::KeyboardInput, terminal_renderer::TerminalRenderer},
    tui::{App, Tui},
    ui::widgets::GameDisplay,
};

const TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub struct PlayApp {
    game: Game<KeyboardInput, TerminalRenderer, SystemClock>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(config: GameConfig, seed: PieceSeed) -> Self {
        let game = Game::new(
            config,
            seed,
            KeyboardInput::new(),
            TerminalRenderer::new(),
            SystemClock::new(),
        );
        Self {
            game,
            is_exiting: false,
        }
    }

    pub fn score(&self) -> usize {
        self.game.state().score()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(TICK_INTERVAL);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event().filter(|key| key.is_press()) else {
            return;
        };
        if key.code == KeyCode::Char('q') {
            self.is_exiting = true;
            return;
        }
        self.game.input_mut().press(key.code);
    }

    fn update(&mut self) {
        self.game.tick();
    }

    fn draw(&self, frame: &mut Frame) {
        let fallback;
        let snapshot = if let Some(snapshot) = self.game.renderer().latest() {
            snapshot
        } else {
            fallback = self.game.state().snapshot();
            &fallback
        };

        let help_text = match snapshot.phase {
            GamePhase::Playing => "Controls: ← → (Move) | ↑ (Rotate) | ↓ (Soft Drop) | Q (Quit)",
            GamePhase::GameOver => "Controls: R (New Game) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let display = GameDisplay::new(snapshot).games_over(self.game.renderer().games_over());
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(display.height()), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(help_text, help_area);
    }
}
