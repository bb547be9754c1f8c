//! Horizontal follow camera

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::CAMERA_LERP;

/// Horizontal viewport offset in level space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Ease toward centering `target`, then clamp to the level
    ///
    /// A level narrower than the viewport pins the camera at 0.
    pub fn follow(&mut self, target: &Rect, viewport_width: f32, level_width: f32) {
        let target_x = target.x - viewport_width / 2.0 + target.width / 2.0;
        self.x += (target_x - self.x) * CAMERA_LERP;

        let max_x = (level_width - viewport_width).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_is_low_pass() {
        let mut camera = Camera::default();
        let player = Rect::new(1000.0, 0.0, 30.0, 40.0);
        camera.follow(&player, 800.0, 4000.0);
        // target = 1000 - 400 + 15 = 615
        assert!((camera.x - 61.5).abs() < 1e-4);

        for _ in 0..200 {
            camera.follow(&player, 800.0, 4000.0);
        }
        assert!((camera.x - 615.0).abs() < 0.01);
    }

    #[test]
    fn test_follow_clamps_to_level() {
        let mut camera = Camera { x: 500.0 };
        let player = Rect::new(0.0, 0.0, 30.0, 40.0);
        camera.follow(&player, 800.0, 2000.0);
        assert!(camera.x < 500.0);

        for _ in 0..200 {
            camera.follow(&player, 800.0, 2000.0);
        }
        assert_eq!(camera.x, 0.0);

        let far = Rect::new(5000.0, 0.0, 30.0, 40.0);
        for _ in 0..200 {
            camera.follow(&far, 800.0, 2000.0);
        }
        assert_eq!(camera.x, 1200.0);
    }

    #[test]
    fn test_narrow_level_pins_camera() {
        let mut camera = Camera::default();
        let player = Rect::new(500.0, 0.0, 30.0, 40.0);
        camera.follow(&player, 800.0, 600.0);
        assert_eq!(camera.x, 0.0);
    }
}
