//! Camera state and the smoothed follow behavior that drives it.

pub mod camera2d;
pub mod follower;

pub use camera2d::Camera2D;
pub use follower::{CameraBounds, CameraConfig, CameraFollower};
