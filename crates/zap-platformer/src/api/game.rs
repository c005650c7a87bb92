use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::camera::Camera2D;
use crate::components::entity::Entity;
use crate::components::tilemap::CollisionMaps;
use crate::core::physics::{BodyDesc, ColliderMaterial, PhysicsWorld};
use crate::core::scene::Scene;
use crate::error::{ensure_non_negative, PlatformerError};
use crate::input::{InputState, KeyBindings};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/50, a common physics rate).
    pub fixed_dt: f32,
    /// Most fixed steps one frame may run.
    pub max_steps_per_frame: u32,
    /// World gravity. Y-up, so downward gravity is negative.
    pub gravity: Vec2,
    /// Visible camera area in world units.
    pub view_size: Vec2,
    pub bindings: KeyBindings,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), PlatformerError> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(PlatformerError::invalid(
                "fixed_dt",
                format!("expected a positive step length, got {}", self.fixed_dt),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(PlatformerError::invalid("gravity", "must be finite"));
        }
        ensure_non_negative("view_size.x", self.view_size.x)?;
        ensure_non_negative("view_size.y", self.view_size.y)?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 50.0,
            max_steps_per_frame: 10,
            gravity: Vec2::new(0.0, -9.81),
            view_size: Vec2::new(32.0, 18.0),
            bindings: KeyBindings::default(),
        }
    }
}

/// The contract a game fulfills for [`GameRunner`](crate::api::runner::GameRunner).
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the level, spawn entities, initialize components.
    /// An error aborts activation.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), PlatformerError>;

    /// One fixed step of gameplay, run before the physics step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputState);

    /// Runs after the physics step, once entity positions are synced.
    fn after_physics(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub physics: PhysicsWorld,
    pub maps: CollisionMaps,
    pub camera: Camera2D,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create a context with the config's gravity, step length and view size.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        Self {
            scene: Scene::new(),
            physics,
            maps: CollisionMaps::default(),
            camera: Camera2D::new(config.view_size.x, config.view_size.y),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let body = self.physics.create_body(entity.id, &desc, material);
        self.scene.spawn(entity.with_pos(desc.position).with_body(body))
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    /// Get the linear velocity of an entity's physics body.
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the runner after `Game::update()`.
    pub fn step_physics(&mut self) {
        self.physics.step();

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::ColliderDesc;

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 })
            .with_position(Vec2::new(1.0, 2.0));

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        let entity = ctx.scene.get(id).unwrap();
        assert_eq!(entity.pos, Vec2::new(1.0, 2.0));
        assert!(entity.body.is_some());
        assert_eq!(ctx.physics.body_count(), 1);
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 });
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        ctx.despawn(id);
        assert!(ctx.scene.is_empty());
        assert_eq!(ctx.physics.body_count(), 0);
        assert_eq!(ctx.velocity(id), Vec2::ZERO);
    }

    #[test]
    fn step_physics_syncs_positions() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 })
            .with_position(Vec2::new(0.0, 10.0));
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        for _ in 0..10 {
            ctx.step_physics();
        }

        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.pos.y < 10.0, "Entity should have fallen: y={}", entity.pos.y);
        assert!(ctx.velocity(id).y < 0.0);
    }

    #[test]
    fn config_from_partial_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "gravity": [0.0, -20.0], "fixed_dt": 0.01 }"#).unwrap();
        assert_eq!(config.gravity, Vec2::new(0.0, -20.0));
        assert_eq!(config.fixed_dt, 0.01);
        assert_eq!(config.bindings, KeyBindings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_step_length_is_rejected() {
        let config = GameConfig {
            fixed_dt: 0.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
