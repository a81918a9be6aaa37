use std::time::Duration;

/// Detects a button held down for a minimum duration.
///
/// Fires once per press, as soon as the hold reaches the threshold. Releasing
/// the button re-arms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldDetector {
    threshold: Duration,
    pressed_since: Option<Duration>,
    fired: bool,
}

impl HoldDetector {
    #[must_use]
    pub const fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pressed_since: None,
            fired: false,
        }
    }

    /// Feeds the current button level; returns `true` on the sample that completes the hold.
    pub fn update(&mut self, pressed: bool, now: Duration) -> bool {
        if !pressed {
            self.pressed_since = None;
            self.fired = false;
            return false;
        }
        let since = *self.pressed_since.get_or_insert(now);
        if self.fired || now.saturating_sub(since) < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fires_at_threshold() {
        let mut hold = HoldDetector::new(ms(800));
        assert!(!hold.update(true, ms(100)));
        assert!(!hold.update(true, ms(899)));
        assert!(hold.update(true, ms(900)));
    }

    #[test]
    fn test_fires_once_per_press() {
        let mut hold = HoldDetector::new(ms(800));
        hold.update(true, ms(0));
        assert!(hold.update(true, ms(800)));
        assert!(!hold.update(true, ms(1600)));
        assert!(!hold.update(true, ms(5000)));
    }

    #[test]
    fn test_release_rearms_and_restarts_timer() {
        let mut hold = HoldDetector::new(ms(800));
        hold.update(true, ms(0));
        assert!(!hold.update(false, ms(700)));
        assert!(!hold.is_pressed());
        assert!(!hold.update(true, ms(750)));
        assert!(!hold.update(true, ms(1500)));
        assert!(hold.update(true, ms(1550)));

        hold.update(false, ms(1600));
        hold.update(true, ms(1700));
        assert!(hold.update(true, ms(2500)));
    }
}
