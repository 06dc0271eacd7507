//! Dot Shooter - A top-down arcade shooter drawn with plain shapes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, shooting, collisions, waves)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences for effects and HUD
//! - `hud`: View model the renderer draws from
//! - `session`: Frame driver wrapping the fixed-timestep simulation
//! - `highscores`: In-session leaderboard

pub mod highscores;
pub mod hud;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use hud::Hud;
pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, WeaponSpec};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, all timers count these ticks)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the accumulator will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport size the camera centres on
    pub const SCREEN_W: f32 = 1280.0;
    pub const SCREEN_H: f32 = 720.0;

    /// Arena tile size and dimensions (in tiles)
    pub const TILE: f32 = 48.0;
    pub const MAP_W: usize = 48;
    pub const MAP_H: usize = 30;
    /// Chance for an inner tile to be a wall block
    pub const WALL_DENSITY: f64 = 0.06;
    /// Half extents (in tiles) of the open plaza carved around the spawn point
    pub const PLAZA_HALF_W: usize = 7;
    pub const PLAZA_HALF_H: usize = 5;

    /// Distance from the player centre to the muzzle
    pub const MUZZLE_OFFSET: f32 = 30.0;
    /// Projectile collision radius
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 22.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
