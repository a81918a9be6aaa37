use std::path::Path;

use anyhow::Context as _;
use blockfall_engine::GameConfig;
use blockfall_input::StickConfig;
use serde::{Deserialize, Serialize};

use crate::util;

/// Contents of a `--config` file.
///
/// ```json
/// { "game": { "min_fall_interval_ms": 150 }, "stick": { "reset_hold_ms": 1000 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub game: GameConfig,
    pub stick: StickConfig,
}

impl HostConfig {
    /// Loads and validates a config file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let config: Self = util::read_json_file("config", path)?;
        config
            .game
            .validate()
            .with_context(|| format!("Invalid game config in {}", path.display()))?;
        config
            .stick
            .validate()
            .with_context(|| format!("Invalid stick config in {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Returns whether the stick section differs from the defaults.
    pub fn has_custom_stick(&self) -> bool {
        self.stick != StickConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: HostConfig =
            serde_json::from_str(r#"{ "game": { "couple_input_stall": false } }"#).unwrap();
        assert!(!config.game.couple_input_stall);
        assert_eq!(config.game.base_fall_interval_ms, 500);
        assert_eq!(config.stick, StickConfig::default());
    }

    #[test]
    fn test_custom_stick_is_detected() {
        let game_only: HostConfig =
            serde_json::from_str(r#"{ "game": { "base_fall_interval_ms": 400 } }"#).unwrap();
        assert!(!game_only.has_custom_stick());
        let with_stick: HostConfig =
            serde_json::from_str(r#"{ "stick": { "reset_hold_ms": 1000 } }"#).unwrap();
        assert!(with_stick.has_custom_stick());
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(serde_json::from_str::<HostConfig>(r#"{ "sound": {} }"#).is_err());
    }

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(HostConfig::load(None).unwrap(), HostConfig::default());
    }
}
