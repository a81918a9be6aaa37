use std::time::Duration;

use blockfall_engine::{Command, Commands, InputPort};

use crate::{AxisDebounce, Deflection, HoldDetector, StickConfig};

/// Raw readings of a two-axis analog stick and a push button.
pub trait AnalogSource {
    fn read_horizontal(&mut self) -> u16;
    fn read_vertical(&mut self) -> u16;
    /// Current button level, `true` while held down.
    fn button_pressed(&mut self) -> bool;
}

impl<S> AnalogSource for &mut S
where
    S: AnalogSource + ?Sized,
{
    fn read_horizontal(&mut self) -> u16 {
        (**self).read_horizontal()
    }

    fn read_vertical(&mut self) -> u16 {
        (**self).read_vertical()
    }

    fn button_pressed(&mut self) -> bool {
        (**self).button_pressed()
    }
}

/// [`InputPort`] turning analog samples into game commands.
///
/// Each poll reads both axes and the button once:
///
/// - horizontal: negative → [`Command::MoveLeft`], positive → [`Command::MoveRight`];
///   the axis then stays quiet for `horizontal_debounce_ms`
/// - vertical: negative → [`Command::RotateCw`], which silences the axis for
///   `rotate_debounce_ms`; positive → [`Command::SoftDrop`], undebounced
/// - button held for `reset_hold_ms` → one [`Command::Reset`]
///
/// Debounce starts when a command is emitted, whether or not the game accepts it.
/// The port never sees the board, so a move rejected against a wall still
/// mutes the horizontal axis, and a push the other way inside that window is
/// dropped. The game's own input stall only follows committed moves.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Command, InputPort};
/// use blockfall_input::{AnalogInput, AnalogSource, StickConfig};
///
/// struct Pushed;
///
/// impl AnalogSource for Pushed {
///     fn read_horizontal(&mut self) -> u16 { 0 }
///     fn read_vertical(&mut self) -> u16 { 2048 }
///     fn button_pressed(&mut self) -> bool { false }
/// }
///
/// let mut input = AnalogInput::new(Pushed, StickConfig::default());
/// assert_eq!(input.poll(Duration::ZERO).as_slice(), [Command::MoveLeft]);
/// assert!(input.poll(Duration::from_millis(50)).is_empty());
/// assert_eq!(input.poll(Duration::from_millis(100)).as_slice(), [Command::MoveLeft]);
/// ```
#[derive(Debug, Clone)]
pub struct AnalogInput<S> {
    source: S,
    config: StickConfig,
    horizontal: AxisDebounce,
    vertical: AxisDebounce,
    reset: HoldDetector,
}

impl<S> AnalogInput<S>
where
    S: AnalogSource,
{
    pub fn new(source: S, config: StickConfig) -> Self {
        let reset = HoldDetector::new(config.reset_hold());
        Self {
            source,
            config,
            horizontal: AxisDebounce::default(),
            vertical: AxisDebounce::default(),
            reset,
        }
    }

    pub fn config(&self) -> &StickConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn horizontal_command(&mut self, now: Duration) -> Option<Command> {
        let deflection = Deflection::classify(self.source.read_horizontal(), &self.config);
        if !self.horizontal.is_ready(now) {
            return None;
        }
        let command = match deflection {
            Deflection::Negative => Command::MoveLeft,
            Deflection::Positive => Command::MoveRight,
            Deflection::Neutral => return None,
        };
        self.horizontal.arm(now, self.config.horizontal_debounce());
        Some(command)
    }

    fn vertical_command(&mut self, now: Duration) -> Option<Command> {
        let deflection = Deflection::classify(self.source.read_vertical(), &self.config);
        if !self.vertical.is_ready(now) {
            return None;
        }
        match deflection {
            Deflection::Negative => {
                self.vertical.arm(now, self.config.rotate_debounce());
                Some(Command::RotateCw)
            }
            Deflection::Positive => Some(Command::SoftDrop),
            Deflection::Neutral => None,
        }
    }
}

impl<S> InputPort for AnalogInput<S>
where
    S: AnalogSource,
{
    fn poll(&mut self, now: Duration) -> Commands {
        let mut commands = Commands::new();
        if let Some(command) = self.horizontal_command(now) {
            commands.push(command);
        }
        if let Some(command) = self.vertical_command(now) {
            commands.push(command);
        }
        let pressed = self.source.button_pressed();
        if self.reset.update(pressed, now) {
            log::debug!("reset button held for {} ms", self.config.reset_hold_ms);
            commands.push(Command::Reset);
        }
        if !commands.is_empty() {
            log::trace!("stick commands at {} ms: {commands:?}", now.as_millis());
        }
        commands
    }
}
