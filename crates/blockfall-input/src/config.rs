use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Thresholds and timings of an analog stick with a push button.
///
/// Raw axis samples range over `0..=max_raw`. A sample below
/// `low_threshold` is a negative deflection, one above `high_threshold` a
/// positive one, anything in between is neutral.
///
/// ```
/// use blockfall_input::StickConfig;
///
/// let config: StickConfig = serde_json::from_str(r#"{ "reset_hold_ms": 1000 }"#).unwrap();
/// assert_eq!(config.low_threshold, 500);
/// assert_eq!(config.reset_hold_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StickConfig {
    /// Largest raw sample; readings above it are clamped.
    pub max_raw: u16,
    pub low_threshold: u16,
    pub high_threshold: u16,
    /// Quiet time of the horizontal axis after a move.
    pub horizontal_debounce_ms: u64,
    /// Quiet time of the vertical axis after a rotation.
    pub rotate_debounce_ms: u64,
    /// How long the button must be held to request a reset.
    pub reset_hold_ms: u64,
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            max_raw: 4095,
            low_threshold: 500,
            high_threshold: 3500,
            horizontal_debounce_ms: 100,
            rotate_debounce_ms: 150,
            reset_hold_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StickConfigError {
    #[display("low threshold ({low}) must be below high threshold ({high})")]
    InvertedThresholds { low: u16, high: u16 },
    #[display("high threshold ({high}) exceeds maximum raw value ({max_raw})")]
    ThresholdAboveMax { high: u16, max_raw: u16 },
}

impl StickConfig {
    pub fn validate(&self) -> Result<(), StickConfigError> {
        if self.low_threshold >= self.high_threshold {
            return Err(StickConfigError::InvertedThresholds {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        if self.high_threshold > self.max_raw {
            return Err(StickConfigError::ThresholdAboveMax {
                high: self.high_threshold,
                max_raw: self.max_raw,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn horizontal_debounce(&self) -> Duration {
        Duration::from_millis(self.horizontal_debounce_ms)
    }

    #[must_use]
    pub fn rotate_debounce(&self) -> Duration {
        Duration::from_millis(self.rotate_debounce_ms)
    }

    #[must_use]
    pub fn reset_hold(&self) -> Duration {
        Duration::from_millis(self.reset_hold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(StickConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let inverted = StickConfig {
            low_threshold: 3500,
            high_threshold: 500,
            ..StickConfig::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(StickConfigError::InvertedThresholds {
                low: 3500,
                high: 500
            })
        );

        let too_high = StickConfig {
            high_threshold: 5000,
            ..StickConfig::default()
        };
        assert!(matches!(
            too_high.validate(),
            Err(StickConfigError::ThresholdAboveMax { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(serde_json::from_str::<StickConfig>(r#"{ "dead_zone": 3 }"#).is_err());
    }
}
