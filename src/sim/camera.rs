//! Follow camera with screen shake

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_H, SCREEN_W};

/// Fraction of the remaining distance the camera closes each tick
pub const CAMERA_FOLLOW: f32 = 0.15;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    /// World position of the screen's top-left corner
    pub offset: Vec2,
    pub shake_ticks: u32,
    pub shake_magnitude: f32,
}

impl Camera {
    /// Camera already centred on `target`
    pub fn centered_on(target: Vec2) -> Self {
        Self {
            offset: target - Self::half_screen(),
            ..Default::default()
        }
    }

    fn half_screen() -> Vec2 {
        Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0)
    }

    /// Ease toward `target` and count down any shake
    pub fn update(&mut self, target: Vec2) {
        let desired = target - Self::half_screen();
        self.offset += (desired - self.offset) * CAMERA_FOLLOW;
        if self.shake_ticks > 0 {
            self.shake_ticks -= 1;
            if self.shake_ticks == 0 {
                self.shake_magnitude = 0.0;
            }
        }
    }

    /// Start a shake; a weaker shake never cuts a stronger one short
    pub fn shake(&mut self, ticks: u32, magnitude: f32) {
        self.shake_ticks = self.shake_ticks.max(ticks);
        self.shake_magnitude = self.shake_magnitude.max(magnitude);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_ticks > 0
    }

    /// Random jitter for this frame (zero when not shaking)
    pub fn jitter<R: Rng>(&self, rng: &mut R) -> Vec2 {
        if !self.is_shaking() || self.shake_magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        let m = self.shake_magnitude;
        Vec2::new(rng.random_range(-m..=m), rng.random_range(-m..=m))
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// Map a pointer position to world space (for aiming)
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.offset
    }
}
