//! Top-level configuration file for a platformer scene.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::game::GameConfig;
use crate::camera::CameraConfig;
use crate::error::PlatformerError;
use crate::movement::MovementConfig;

/// Everything a level needs tuned, loadable from one JSON document.
/// Omitted sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub game: GameConfig,
    pub movement: MovementConfig,
    pub camera: CameraConfig,
}

impl PlatformerConfig {
    pub fn from_json(json: &str) -> Result<Self, PlatformerError> {
        let config: Self = serde_json::from_str(json).map_err(PlatformerError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PlatformerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(PlatformerError::ConfigRead)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlatformerError> {
        self.game.validate()?;
        self.movement.validate()?;
        self.camera.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = PlatformerConfig::from_json("{}").unwrap();
        assert_eq!(config, PlatformerConfig::default());
    }

    #[test]
    fn sections_override_independently() {
        let config = PlatformerConfig::from_json(
            r#"{
                "movement": { "player_speed": 6.0, "max_additional_jumps": 2 },
                "camera": { "offset": [0.0, 2.0, -10.0], "follow_y": false }
            }"#,
        )
        .unwrap();
        assert_eq!(config.movement.player_speed, 6.0);
        assert_eq!(config.movement.max_additional_jumps, 2);
        assert_eq!(config.movement.jump_force, MovementConfig::default().jump_force);
        assert_eq!(config.camera.offset, Vec3::new(0.0, 2.0, -10.0));
        assert!(!config.camera.follow_y);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = PlatformerConfig::from_json(r#"{ "movement": { "player_speed": -1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, PlatformerError::InvalidConfig { field: "player_speed", .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = PlatformerConfig::from_json("{ movement: ").unwrap_err();
        assert!(matches!(err, PlatformerError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = PlatformerConfig::from_file("/nonexistent/platformer.json").unwrap_err();
        assert!(matches!(err, PlatformerError::ConfigRead(_)));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir()
            .join(format!("platformer-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "game": { "fixed_dt": 0.01 } }"#).unwrap();
        let config = PlatformerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.game.fixed_dt, 0.01);
    }
}
