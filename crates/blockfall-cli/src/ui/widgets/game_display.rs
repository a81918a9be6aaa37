use blockfall_engine::{GamePhase, Snapshot};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, color, style};

/// Board and stats side by side, with a popup once the game is over.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    snapshot: &'a Snapshot,
    games_over: usize,
}

impl<'a> GameDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            games_over: 0,
        }
    }

    /// Number of finished games, shown in the stats panel.
    pub fn games_over(self, games_over: usize) -> Self {
        Self { games_over, ..self }
    }

    fn border_color(&self) -> ratatui::style::Color {
        match self.snapshot.phase {
            GamePhase::Playing => color::WHITE,
            GamePhase::GameOver => color::RED,
        }
    }

    fn board(&self) -> BoardDisplay<'a> {
        BoardDisplay::new(self.snapshot).block(
            Block::bordered()
                .border_style(self.border_color())
                .style(style::DEFAULT),
        )
    }

    fn stats(&self) -> StatsDisplay<'a> {
        StatsDisplay::new(self.snapshot, self.games_over).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(self.border_color())
                .style(style::DEFAULT),
        )
    }

    pub fn height(&self) -> u16 {
        u16::max(self.board().height(), self.stats().height())
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.board();
        let stats = self.stats();

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);

        if self.snapshot.phase.is_game_over() {
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::styled("GAME OVER!!", style::GAME_OVER).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
