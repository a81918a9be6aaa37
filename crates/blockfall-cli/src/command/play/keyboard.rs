use std::time::Duration;

use blockfall_engine::{Command, Commands, InputPort};
use crossterm::event::KeyCode;

/// [`InputPort`] fed by key presses between ticks.
///
/// Like a stick, each axis carries at most one command per tick; the latest
/// key pressed on an axis wins.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    horizontal: Option<Command>,
    vertical: Option<Command>,
    reset: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press; returns whether the key is bound to a command.
    pub fn press(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Left => self.horizontal = Some(Command::MoveLeft),
            KeyCode::Right => self.horizontal = Some(Command::MoveRight),
            KeyCode::Up => self.vertical = Some(Command::RotateCw),
            KeyCode::Down => self.vertical = Some(Command::SoftDrop),
            KeyCode::Char('r') => self.reset = true,
            _ => return false,
        }
        true
    }
}

impl InputPort for KeyboardInput {
    fn poll(&mut self, _now: Duration) -> Commands {
        let mut commands = Commands::new();
        commands.extend(self.horizontal.take());
        commands.extend(self.vertical.take());
        if std::mem::take(&mut self.reset) {
            commands.push(Command::Reset);
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_drains_pressed_keys() {
        let mut input = KeyboardInput::new();
        assert!(input.press(KeyCode::Down));
        assert!(input.press(KeyCode::Left));
        assert!(!input.press(KeyCode::Char('x')));
        assert_eq!(
            input.poll(Duration::ZERO).as_slice(),
            [Command::MoveLeft, Command::SoftDrop]
        );
        assert!(input.poll(Duration::ZERO).is_empty());
    }

    #[test]
    fn test_latest_key_per_axis_wins() {
        let mut input = KeyboardInput::new();
        input.press(KeyCode::Left);
        input.press(KeyCode::Right);
        input.press(KeyCode::Down);
        input.press(KeyCode::Up);
        input.press(KeyCode::Char('r'));
        assert_eq!(
            input.poll(Duration::ZERO).as_slice(),
            [Command::MoveRight, Command::RotateCw, Command::Reset]
        );
    }
}
