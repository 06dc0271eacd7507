//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (arena slot order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod camera;
pub mod collision;
pub mod events;
pub mod state;
pub mod tick;
pub mod tilemap;
pub mod weapon;

pub use arena::{Arena, Handle};
pub use camera::Camera;
pub use collision::{Aabb, circles_overlap, collision_half_extent, move_and_slide};
pub use events::GameEvent;
pub use state::{
    Enemy, GamePhase, GameState, Owner, Particle, ParticleKind, Player, PlayerStatus, Projectile,
    MAX_PARTICLES,
};
pub use tick::{
    TickInput, autopilot, check_wave_completion, resolve_collisions, shoot, spawn_wave, tick,
    try_dash,
};
pub use tilemap::TileMap;
pub use weapon::{PerWeapon, WeaponKind};
