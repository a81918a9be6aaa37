use std::time::Duration;

use crate::StickConfig;

/// Direction a stick axis is pushed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Deflection {
    Negative,
    Neutral,
    Positive,
}

impl Deflection {
    /// Classifies a raw sample against the configured thresholds.
    ///
    /// Samples above `max_raw` are clamped first. Both thresholds are
    /// exclusive: a sample equal to a threshold is neutral.
    ///
    /// ```
    /// use blockfall_input::{Deflection, StickConfig};
    ///
    /// let config = StickConfig::default();
    /// assert_eq!(Deflection::classify(0, &config), Deflection::Negative);
    /// assert_eq!(Deflection::classify(2048, &config), Deflection::Neutral);
    /// assert_eq!(Deflection::classify(u16::MAX, &config), Deflection::Positive);
    /// ```
    #[must_use]
    pub fn classify(raw: u16, config: &StickConfig) -> Self {
        let raw = raw.min(config.max_raw);
        if raw < config.low_threshold {
            Self::Negative
        } else if raw > config.high_threshold {
            Self::Positive
        } else {
            Self::Neutral
        }
    }
}

/// Quiet window of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisDebounce {
    quiet_until: Option<Duration>,
}

impl AxisDebounce {
    #[must_use]
    pub fn is_ready(&self, now: Duration) -> bool {
        self.quiet_until.is_none_or(|until| now >= until)
    }

    /// Silences the axis for `duration` from `now`.
    pub fn arm(&mut self, now: Duration, duration: Duration) {
        self.quiet_until = Some(now + duration);
    }
}
