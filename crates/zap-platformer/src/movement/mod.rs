//! Player movement: terrain probes, a per-tick state snapshot, and the
//! velocity policy that turns input plus state into rigid-body motion.

pub mod config;
pub mod controller;
pub mod state;

pub use config::MovementConfig;
pub use controller::{current_speed, resolve_velocity, MovementController};
pub use state::{JumpOutcome, Locomotion, MovementState, WallContact};
