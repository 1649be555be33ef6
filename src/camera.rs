//! Side-scrolling camera
//!
//! The camera is derived state: each frame it eases toward a target computed
//! from the player's position. It never scrolls vertically.

use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Eases toward centring `focus_x` in a view `view_width` wide.
    ///
    /// `smoothing` is the fraction of the remaining distance covered this
    /// frame (0 = frozen, 1 = snap).
    pub fn follow(&mut self, focus_x: f32, view_width: f32, smoothing: f32) {
        let target_x = focus_x - view_width / 2.0;
        self.x += (target_x - self.x) * smoothing;
        self.y = 0.0;
    }

    /// Pins the camera to the origin (boss arena)
    pub fn fix(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    /// Converts a world position to screen space
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.x, world.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_eases_by_smoothing() {
        let mut camera = Camera::new();
        camera.follow(1640.0, 1280.0, 0.1);
        assert!((camera.x - 100.0).abs() < 1e-4);

        camera.follow(1640.0, 1280.0, 0.1);
        assert!((camera.x - 190.0).abs() < 1e-4);
    }

    #[test]
    fn test_follow_converges() {
        let mut camera = Camera::new();
        for _ in 0..300 {
            camera.follow(2000.0, 1280.0, 0.1);
        }
        assert!((camera.x - 1360.0).abs() < 0.01);
        assert_eq!(camera.y, 0.0);
    }

    #[test]
    fn test_fix_and_to_screen() {
        let mut camera = Camera { x: 500.0, y: 0.0 };
        assert_eq!(camera.to_screen(Vec2::new(600.0, 50.0)), Vec2::new(100.0, 50.0));

        camera.fix();
        assert_eq!(camera.to_screen(Vec2::new(600.0, 50.0)), Vec2::new(600.0, 50.0));
    }
}
