use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Yields ticks at a fixed interval, terminal events as they arrive, and a
/// render after anything that may have changed the screen.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    next_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            next_tick: Instant::now(),
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
        self.next_tick = Instant::now();
    }

    /// Blocks until the next event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick {
                // Skip missed ticks instead of bursting to catch up.
                self.next_tick = (self.next_tick + self.tick_interval).max(now);
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self.next_tick.saturating_duration_since(now);
            if event::poll(timeout)? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}
