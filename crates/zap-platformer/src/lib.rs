//! Platformer player movement and camera follow for fixed-step 2D games.
//!
//! The host owns an [`EngineContext`] (scene, rapier world, collision maps,
//! camera) and a [`GameRunner`] that turns frame time into fixed steps. A
//! [`MovementController`] drives the player's rigid body from input each step;
//! a [`CameraFollower`] chases the player with exponential smoothing.
//!
//! Neither component's `tick` takes a `dt`. Both run exactly once per fixed
//! step from [`Game::update`] / [`Game::after_physics`]; the movement policy
//! assigns velocities and the camera moves by a per-step fraction, so the
//! step length is owned by the runner and the physics world alone.

pub mod api;
pub mod camera;
pub mod components;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod movement;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::runner::GameRunner;
pub use api::types::EntityId;
pub use camera::{Camera2D, CameraBounds, CameraConfig, CameraFollower};
pub use components::entity::Entity;
pub use components::tilemap::{CollisionMaps, CollisionTilemap};
pub use config::PlatformerConfig;
pub use core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, CollisionLayers, PhysicsBody,
    PhysicsWorld, RayHit,
};
pub use core::scene::{Scene, PLAYER_TAG};
pub use core::time::FixedTimestep;
pub use error::PlatformerError;
pub use input::{Action, Axis, InputEvent, InputQueue, InputSource, InputState, KeyBindings};
pub use movement::{
    JumpOutcome, Locomotion, MovementConfig, MovementController, MovementState, WallContact,
};
