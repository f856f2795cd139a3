//! Configuration system
//!
//! Tunables for the game rules, collision response, renderer and random
//! movement. Every section carries serde defaults so partial files load.

pub use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec4;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, picking the format from the path's extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Initial game counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Hearts the player starts with
    pub hearts: i32,
    /// Presents required to win
    pub presents_goal: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hearts: 3,
            presents_goal: 5,
        }
    }
}

/// Collision response tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Seconds of invulnerability after touching an avoidable entity
    pub recovery_cooldown: f32,
    /// Distance the recorded safe camera position is pulled toward the origin
    pub boundary_nudge: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            recovery_cooldown: 5.0,
            boundary_nudge: 0.05,
        }
    }
}

/// Frame clear parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// RGBA clear color
    pub clear_color: [f32; 4],
    /// Depth buffer clear value
    pub clear_depth: f32,
}

impl RendererConfig {
    /// Clear color as a vector
    pub fn clear_color(&self) -> Vec4 {
        Vec4::from(self.clear_color)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.031_372_55, 0.031_372_55, 0.109_803_92, 1.0],
            clear_depth: 1.0,
        }
    }
}

/// Random movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomMovementConfig {
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

/// Top-level configuration for the engine core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Game rules
    pub game: GameConfig,
    /// Collision response
    pub collision: CollisionConfig,
    /// Renderer clear state
    pub renderer: RendererConfig,
    /// Random movement
    pub random_movement: RandomMovementConfig,
}

impl Config for CoreConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.game.hearts, 3);
        assert_eq!(config.game.presents_goal, 5);
        assert!((config.collision.recovery_cooldown - 5.0).abs() < f32::EPSILON);
        assert_eq!(config.random_movement.seed, None);
    }

    #[test]
    fn test_partial_toml() {
        let text = "[game]\npresents_goal = 7\n\n[collision]\nrecovery_cooldown = 2.5\n";
        let config = CoreConfig::from_str_with_format(text, "core.toml").unwrap();
        assert_eq!(config.game.presents_goal, 7);
        assert_eq!(config.game.hearts, 3);
        assert!((config.collision.recovery_cooldown - 2.5).abs() < f32::EPSILON);
        assert!((config.collision.boundary_nudge - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_ron() {
        let text = "(game: (hearts: 1), random_movement: (seed: Some(42)))";
        let config = CoreConfig::from_str_with_format(text, "core.ron").unwrap();
        assert_eq!(config.game.hearts, 1);
        assert_eq!(config.random_movement.seed, Some(42));
    }

    #[test]
    fn test_saved_config_loads_back() {
        let mut config = CoreConfig::default();
        config.game.presents_goal = 9;
        config.random_movement.seed = Some(3);

        let dir = std::env::temp_dir();
        for name in ["present_engine_saved.toml", "present_engine_saved.ron"] {
            let path = dir.join(name);
            let path = path.to_str().unwrap();
            config.save_to_file(path).unwrap();
            let loaded = CoreConfig::load_from_file(path).unwrap();
            std::fs::remove_file(path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("present_engine_saved.json");
        let result = CoreConfig::default().save_to_file(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_unsupported_format() {
        let result = CoreConfig::from_str_with_format("{}", "core.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
