use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Timing parameters of a game.
///
/// The fall interval follows `max(base - level × step, min)`. With the defaults
/// this is 500 ms at level 0, shrinking by 50 ms per level and flooring at
/// 100 ms from level 8 onward.
///
/// The stall fields model a host that blocks after a committed horizontal
/// move or a rotate attempt: during the stall no input or gravity is processed.
///
/// Every field has a default, so a partial JSON object is a valid config:
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "min_fall_interval_ms": 200 }"#).unwrap();
/// assert_eq!(config.base_fall_interval_ms, 500);
/// assert_eq!(config.min_fall_interval_ms, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Fall interval at level 0.
    pub base_fall_interval_ms: u64,
    /// Reduction of the fall interval per level.
    pub fall_interval_step_ms: u64,
    /// Lower bound of the fall interval.
    pub min_fall_interval_ms: u64,
    /// Stall after a committed horizontal move.
    pub move_stall_ms: u64,
    /// Stall after any rotate attempt.
    pub rotate_stall_ms: u64,
    /// Whether stalls block gravity and input.
    pub couple_input_stall: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_fall_interval_ms: 500,
            fall_interval_step_ms: 50,
            min_fall_interval_ms: 100,
            move_stall_ms: 100,
            rotate_stall_ms: 150,
            couple_input_stall: true,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_fall_interval_ms == 0 {
            return Err(ConfigError::ZeroMinFallInterval);
        }
        if self.min_fall_interval_ms > self.base_fall_interval_ms {
            return Err(ConfigError::MinAboveBase {
                min_ms: self.min_fall_interval_ms,
                base_ms: self.base_fall_interval_ms,
            });
        }
        Ok(())
    }

    /// Returns the time between gravity steps at `level`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use blockfall_engine::GameConfig;
    ///
    /// let config = GameConfig::default();
    /// assert_eq!(config.fall_interval(0), Duration::from_millis(500));
    /// assert_eq!(config.fall_interval(3), Duration::from_millis(350));
    /// assert_eq!(config.fall_interval(8), Duration::from_millis(100));
    /// assert_eq!(config.fall_interval(20), Duration::from_millis(100));
    /// ```
    #[must_use]
    pub fn fall_interval(&self, level: usize) -> Duration {
        let level = u64::try_from(level).unwrap_or(u64::MAX);
        let reduction = self.fall_interval_step_ms.saturating_mul(level);
        let millis = self
            .base_fall_interval_ms
            .saturating_sub(reduction)
            .max(self.min_fall_interval_ms);
        Duration::from_millis(millis)
    }

    #[must_use]
    pub fn move_stall(&self) -> Duration {
        Duration::from_millis(self.move_stall_ms)
    }

    #[must_use]
    pub fn rotate_stall(&self) -> Duration {
        Duration::from_millis(self.rotate_stall_ms)
    }
}
