//! Events emitted by the simulation for audio and render feedback.
//!
//! The tick pushes these into `GameState::events`; they are cleared at the
//! start of the next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::weapon::WeaponKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A weapon fired `projectiles` projectiles from `muzzle`.
    Shot {
        weapon: WeaponKind,
        muzzle: Vec2,
        projectiles: u32,
    },
    /// Trigger pulled with an empty magazine.
    DryFire { weapon: WeaponKind },
    ReloadStarted { weapon: WeaponKind },
    ReloadFinished { weapon: WeaponKind },
    WeaponSwitched { weapon: WeaponKind },
    /// Dash burst started; `knocked_back` enemies were pushed away.
    Dashed { pos: Vec2, knocked_back: u32 },
    /// Projectile hit an enemy that survived.
    EnemyHit { pos: Vec2, damage: u32 },
    EnemyKilled { pos: Vec2, tier: u8, points: u64 },
    PlayerHurt { damage: u32, hp: u32 },
    WaveStarted { wave: u32, enemies: u32 },
    GameOver { score: u64, wave: u32 },
}
