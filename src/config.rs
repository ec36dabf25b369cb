//! Game tuning
//!
//! Built once at startup (defaults or a JSON file) and handed to the
//! simulation by value. Nothing reads tuning from global state.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading a config file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "Malformed config: {e}"),
            ConfigError::Invalid(reason) => write!(f, "Invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Target tick rate
    pub fps: u32,

    // === Health & damage ===
    pub player_max_health: u32,
    pub enemy_health: u32,
    pub boss_health: u32,
    pub enemy_laser_damage: u32,
    pub boss_laser_damage: u32,

    // === Speeds (pixels per tick) ===
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub boss_speed: f32,
    pub player_laser_speed: f32,
    pub enemy_laser_speed: f32,
    pub boss_laser_speed: f32,

    // === Cooldowns (ms) ===
    pub player_shoot_cooldown_ms: u64,
    pub enemy_shoot_cooldown_ms: u64,
    pub boss_shoot_cooldown_ms: u64,

    // === Spawning & AI ===
    pub enemy_spawn_interval_ms: u64,
    /// Probability per tick that an enemy tries to fire
    pub enemy_shoot_chance: f64,
    /// Probability per tick that the boss tries to fire
    pub boss_shoot_chance: f64,
    /// Probability per tick that an enemy starts a burst
    pub enemy_burst_chance: f64,
    /// Lasers fired per burst
    pub enemy_burst_shots: u32,
    /// Spacing between burst lasers (ms)
    pub enemy_burst_interval_ms: u64,
    /// Kills between boss appearances
    pub boss_spawn_count: u32,

    // === Dimensions ===
    pub plane_width: f32,
    pub plane_height: f32,
    pub boss_width: f32,
    pub boss_height: f32,
    pub laser_width: f32,
    pub laser_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1200.0,
            screen_height: 800.0,
            fps: 60,

            player_max_health: 100,
            enemy_health: 2,
            boss_health: 5,
            enemy_laser_damage: 1,
            boss_laser_damage: 5,

            player_speed: 5.0,
            enemy_speed: 2.0,
            boss_speed: 1.5,
            player_laser_speed: 8.0,
            enemy_laser_speed: 10.0,
            boss_laser_speed: 12.0,

            player_shoot_cooldown_ms: 200,
            enemy_shoot_cooldown_ms: 1000,
            boss_shoot_cooldown_ms: 800,

            enemy_spawn_interval_ms: 1000,
            enemy_shoot_chance: 0.015,
            boss_shoot_chance: 0.03,
            enemy_burst_chance: 0.002,
            enemy_burst_shots: 3,
            enemy_burst_interval_ms: 150,
            boss_spawn_count: 50,

            plane_width: 60.0,
            plane_height: 40.0,
            boss_width: 100.0,
            boss_height: 60.0,
            laser_width: 4.0,
            laser_height: 10.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pretty JSON (used by `--print-config`)
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tunings the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Invalid(reason.to_string()));

        if self.fps == 0 || self.fps > 1000 {
            return invalid("fps must be in 1..=1000");
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return invalid("screen dimensions must be positive");
        }
        if self.player_max_health == 0 || self.enemy_health == 0 || self.boss_health == 0 {
            return invalid("health values must be at least 1");
        }
        if self.enemy_laser_damage == 0 || self.boss_laser_damage == 0 {
            return invalid("laser damage must be at least 1");
        }
        for chance in [
            self.enemy_shoot_chance,
            self.boss_shoot_chance,
            self.enemy_burst_chance,
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return invalid("probabilities must be within [0, 1]");
            }
        }
        if self.boss_spawn_count == 0 {
            return invalid("boss_spawn_count must be at least 1");
        }
        if self.plane_width <= 0.0
            || self.plane_height <= 0.0
            || self.boss_width <= 0.0
            || self.boss_height <= 0.0
            || self.laser_width <= 0.0
            || self.laser_height <= 0.0
        {
            return invalid("entity sizes must be positive");
        }
        if self.plane_width > self.screen_width
            || self.plane_height > self.screen_height
            || self.boss_width > self.screen_width
            || self.boss_height * 2.0 > self.screen_height
        {
            return invalid("planes must fit on screen");
        }
        if self.screen_width <= 2.0 * crate::consts::SPAWN_MARGIN_X {
            return invalid("screen too narrow for spawn margins");
        }
        Ok(())
    }

    /// Milliseconds of simulated time per tick
    pub fn tick_ms(&self) -> u64 {
        1000 / u64::from(self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_ms(), 16);
        assert_eq!(config.boss_spawn_count, 50);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "boss_spawn_count": 3, "fps": 30 }"#)
            .expect("valid config");
        assert_eq!(config.boss_spawn_count, 3);
        assert_eq!(config.fps, 30);
        assert_eq!(config.enemy_health, 2);
        assert_eq!(config.screen_width, 1200.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = GameConfig::from_json_str(r#"{ "fps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json_str(r#"{ "boss_shoot_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip_is_stable() {
        let config = GameConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(GameConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("Failed to read config"));
    }
}
