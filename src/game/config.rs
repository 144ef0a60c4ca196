use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the game
///
/// Missing fields in a config file fall back to the defaults, so a file
/// containing only `{"tick_interval_ms": 100}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square game grid
    pub board_size: usize,
    /// Milliseconds between two ticks while running
    pub tick_interval_ms: u64,
    /// Points awarded per food eaten
    pub food_score: u32,
    /// Random placements tried before scanning the board for a free cell
    pub max_spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            tick_interval_ms: 150,
            food_score: 10,
            max_spawn_attempts: 1000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Interval between ticks as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Read a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.board_size < 2 {
            return Err(format!(
                "board_size must be at least 2, got {}",
                self.board_size
            ));
        }

        if self.board_size > i32::MAX as usize {
            return Err(format!("board_size {} is too large", self.board_size));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        if self.food_score == 0 {
            return Err("food_score must be at least 1".to_string());
        }

        if self.max_spawn_attempts == 0 {
            return Err("max_spawn_attempts must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(150));
        assert_eq!(config.food_score, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.tick_interval_ms, 150);
    }

    #[test]
    fn test_validation_board_too_small() {
        let config = GameConfig::new(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_tick() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_food_score() {
        let config = GameConfig {
            food_score: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"board_size": 12, "tick_interval_ms": 90}}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.food_score, 10);
        assert_eq!(config.max_spawn_attempts, 1000);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = GameConfig::load(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "board_size = 12").unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }
}
