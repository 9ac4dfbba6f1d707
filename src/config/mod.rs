pub mod gameplay;
pub mod worldgen;

pub use gameplay::GameplayConfig;
pub use worldgen::WorldGenConfig;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration, stored as TOML. Missing sections fall back to
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gameplay: GameplayConfig,
    pub worldgen: WorldGenConfig,
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let mut config = GameConfig::default();
        config.worldgen.seed = 1234;
        config.gameplay.run_speed = 0.2;

        let raw = toml::to_string_pretty(&config).unwrap();
        let parsed: GameConfig = toml::from_str(&raw).unwrap();

        assert_eq!(parsed.worldgen, config.worldgen);
        assert_eq!(parsed.gameplay.run_speed, config.gameplay.run_speed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: GameConfig = toml::from_str("[worldgen]\nseed = 5\n").unwrap();
        assert_eq!(parsed.worldgen.seed, 5);
        assert_eq!(parsed.worldgen.width, 16);
        assert_eq!(parsed.gameplay.walk_speed, 0.1);
    }
}
