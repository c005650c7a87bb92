use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::camera::Camera2D;
use crate::core::scene::{Scene, PLAYER_TAG};
use crate::error::PlatformerError;

/// World-space box the camera's desired position is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self {
            min_x: -10.0,
            max_x: 10.0,
            min_y: -10.0,
            max_y: 10.0,
        }
    }
}

impl CameraBounds {
    fn validate(&self) -> Result<(), PlatformerError> {
        let all_finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(PlatformerError::invalid("camera.bounds", "must be finite"));
        }
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(PlatformerError::invalid(
                "camera.bounds",
                format!("inverted bounds {self:?}"),
            ));
        }
        Ok(())
    }

    fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.max(self.min_x).min(self.max_x),
            point.y.max(self.min_y).min(self.max_y),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Added to the target position; `z` is the camera's fixed depth.
    pub offset: Vec3,
    /// Fraction of the remaining distance covered each tick (0 = frozen, 1 = snap).
    pub smooth_factor: f32,
    pub follow_x: bool,
    pub follow_y: bool,
    pub bounds: Option<CameraBounds>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.0, -10.0),
            smooth_factor: 0.125,
            follow_x: true,
            follow_y: true,
            bounds: None,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), PlatformerError> {
        if !self.offset.is_finite() {
            return Err(PlatformerError::invalid("camera.offset", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.smooth_factor) {
            return Err(PlatformerError::invalid(
                "camera.smooth_factor",
                format!("expected a value in [0, 1], got {}", self.smooth_factor),
            ));
        }
        if let Some(bounds) = &self.bounds {
            bounds.validate()?;
        }
        Ok(())
    }
}

/// Chases a target entity with exponential smoothing, one step per tick.
#[derive(Debug, Clone)]
pub struct CameraFollower {
    config: CameraConfig,
    target: Option<EntityId>,
}

impl CameraFollower {
    pub fn new(config: CameraConfig) -> Self {
        Self { config, target: None }
    }

    /// Follow a specific entity instead of looking one up by tag.
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Validate the config and resolve the target. A missing target leaves
    /// the follower inert; only an invalid config is an error.
    pub fn initialize(&mut self, scene: &Scene) -> Result<(), PlatformerError> {
        self.config.validate()?;

        if self.target.is_none() {
            self.target = scene.find_by_tag(PLAYER_TAG).map(|e| e.id);
        }
        match self.target {
            Some(id) => log::info!("camera following {:?}", id),
            None => log::warn!("camera has no target: nothing tagged {:?}", PLAYER_TAG),
        }
        Ok(())
    }

    /// Move the camera one smoothing step toward the target. Takes no `dt`:
    /// `smooth_factor` is a per-step fraction and steps have a fixed length.
    pub fn tick(&self, camera: &mut Camera2D, scene: &Scene) {
        let Some(target) = self.target.and_then(|id| scene.position_of(id)) else {
            return;
        };

        let current = camera.position;
        let mut desired = target.extend(0.0) + self.config.offset;
        if !self.config.follow_x {
            desired.x = current.x;
        }
        if !self.config.follow_y {
            desired.y = current.y;
        }
        if let Some(bounds) = &self.config.bounds {
            let clamped = bounds.clamp(desired.truncate());
            desired.x = clamped.x;
            desired.y = clamped.y;
        }

        let mut smoothed = current.lerp(desired, self.config.smooth_factor);
        smoothed.z = self.config.offset.z;
        camera.position = smoothed;
    }
}
