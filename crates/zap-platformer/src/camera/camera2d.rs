use glam::{Vec2, Vec3};

/// Orthographic 2D camera. `position.xy` is the view center in world units;
/// `position.z` is the depth offset the renderer places the camera at.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    pub position: Vec3,
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            width,
            height,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// View center in world space.
    pub fn center(&self) -> Vec2 {
        self.position.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_drops_depth() {
        let cam = Camera2D::new(10.0, 10.0).with_position(Vec3::new(3.0, 4.0, -10.0));
        assert_eq!(cam.center(), Vec2::new(3.0, 4.0));
    }
}
