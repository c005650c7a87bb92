use serde::{Deserialize, Serialize};

use crate::core::physics::CollisionLayers;
use crate::error::{ensure_non_negative, PlatformerError};

/// Tuning values for the player controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in world units per second.
    pub player_speed: f32,
    pub sprint_speed_multiplier: f32,
    /// Vertical speed on ladders.
    pub climb_speed: f32,
    /// Speed multiplier while standing in a trap cell.
    pub trap_slow_multiplier: f32,
    /// Upward impulse applied per jump.
    pub jump_force: f32,
    /// Length of the probe below the collider's bottom edge.
    pub ground_check_distance: f32,
    /// Jumps allowed between landings. Counts the first jump too.
    pub max_additional_jumps: u32,
    /// Extra reach of the side probes beyond the collider.
    pub wall_check_distance: f32,
    pub enable_wall_slide: bool,
    /// Layers probes treat as ground and walls.
    pub ground_layers: CollisionLayers,
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), PlatformerError> {
        ensure_non_negative("player_speed", self.player_speed)?;
        ensure_non_negative("sprint_speed_multiplier", self.sprint_speed_multiplier)?;
        ensure_non_negative("climb_speed", self.climb_speed)?;
        ensure_non_negative("trap_slow_multiplier", self.trap_slow_multiplier)?;
        ensure_non_negative("jump_force", self.jump_force)?;
        ensure_non_negative("ground_check_distance", self.ground_check_distance)?;
        ensure_non_negative("wall_check_distance", self.wall_check_distance)?;
        if self.ground_layers == CollisionLayers::NONE {
            return Err(PlatformerError::invalid(
                "ground_layers",
                "no layers selected, probes would never hit",
            ));
        }
        Ok(())
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            player_speed: 8.0,
            sprint_speed_multiplier: 1.5,
            climb_speed: 5.0,
            trap_slow_multiplier: 0.5,
            jump_force: 8.0,
            ground_check_distance: 0.1,
            max_additional_jumps: 1,
            wall_check_distance: 0.05,
            enable_wall_slide: true,
            ground_layers: CollisionLayers::GROUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MovementConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: MovementConfig =
            serde_json::from_str(r#"{ "player_speed": 6.0, "max_additional_jumps": 2 }"#).unwrap();
        assert_eq!(config.player_speed, 6.0);
        assert_eq!(config.max_additional_jumps, 2);
        assert_eq!(config.jump_force, 8.0);
        assert_eq!(config.ground_layers, CollisionLayers::GROUND);
    }

    #[test]
    fn negative_speed_is_rejected() {
        let config = MovementConfig {
            climb_speed: -1.0,
            ..MovementConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("climb_speed"), "{err}");
    }

    #[test]
    fn empty_ground_mask_is_rejected() {
        let config = MovementConfig {
            ground_layers: CollisionLayers::NONE,
            ..MovementConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
