//! Data-driven game balance
//!
//! Every number that shapes how the game feels lives here so it can be
//! tweaked from JSON without touching the simulation. Defaults reproduce
//! the shipped balance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

/// Fire behaviour of a single weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Rounds per full magazine
    pub magazine: u32,
    /// Rounds per minute (sets the fire interval)
    pub rpm: f32,
    /// Ticks a reload takes
    pub reload_ticks: u32,
    /// Projectiles spawned per shot (one round consumed per shot)
    pub pellets: u32,
    /// Max random deviation from the aim direction per projectile (radians)
    pub spread: f32,
    /// Projectile speed (units/s)
    pub projectile_speed: f32,
    /// Projectile lifetime in ticks
    pub lifetime_ticks: u32,
    /// Damage dealt by each projectile
    pub damage: u32,
    /// Screen shake applied on fire (ticks, magnitude)
    pub shake_ticks: u32,
    pub shake_magnitude: f32,
    /// Muzzle flash particle count
    pub flash_particles: u32,
}

impl WeaponSpec {
    /// Ticks between shots, never less than one
    pub fn fire_interval_ticks(&self) -> u32 {
        if self.rpm <= 0.0 {
            return u32::MAX;
        }
        let ticks_per_minute = 60.0 / SIM_DT;
        ((ticks_per_minute / self.rpm) as u32).max(1)
    }

    pub fn rifle() -> Self {
        Self {
            magazine: 30,
            rpm: 480.0,
            reload_ticks: 48,
            pellets: 1,
            spread: 0.04,
            projectile_speed: 900.0,
            lifetime_ticks: 70,
            damage: 20,
            shake_ticks: 5,
            shake_magnitude: 6.0,
            flash_particles: 8,
        }
    }

    pub fn shotgun() -> Self {
        Self {
            magazine: 8,
            rpm: 90.0,
            reload_ticks: 72,
            pellets: 6,
            spread: 0.22,
            projectile_speed: 675.0,
            lifetime_ticks: 50,
            damage: 20,
            shake_ticks: 8,
            shake_magnitude: 9.0,
            flash_particles: 16,
        }
    }
}

/// All balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_max_hp: u32,
    pub player_speed: f32,
    /// Invincibility granted after taking a hit
    pub hurt_invuln_ticks: u32,
    /// Red screen flash after taking a hit
    pub hurt_flash_ticks: u32,
    pub contact_damage: u32,
    /// Shake on taking a hit (ticks, magnitude)
    pub hurt_shake_ticks: u32,
    pub hurt_shake_magnitude: f32,

    // === Dash ===
    /// Distance covered by a full dash
    pub dash_distance: f32,
    /// Ticks the dash burst lasts
    pub dash_ticks: u32,
    /// Invincibility window opened by a dash
    pub dash_invuln_ticks: u32,
    pub dash_cooldown_ticks: u32,
    pub dash_knockback_radius: f32,
    /// Velocity impulse applied to enemies in the knockback radius (units/s)
    pub dash_knockback_impulse: f32,
    /// Per-tick multiplier applied to enemy knockback
    pub knockback_decay: f32,

    // === Enemies ===
    pub enemy_base_hp: u32,
    pub enemy_hp_per_tier: u32,
    pub enemy_base_speed: f32,
    pub enemy_speed_per_tier: f32,
    pub enemy_base_radius: f32,
    pub enemy_radius_per_tier: f32,
    pub enemy_points_per_tier: u64,

    // === Waves ===
    pub wave_base_quota: u32,
    pub wave_quota_step: u32,
    /// First wave that spawns tier 2/3 enemies
    pub elite_wave: u32,
    /// Chance an elite-wave enemy is tier 2 (otherwise tier 3)
    pub tier2_chance: f64,
    pub spawn_min_distance: f32,
    pub spawn_attempts: u32,

    // === Weapons ===
    pub rifle: WeaponSpec,
    pub shotgun: WeaponSpec,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_max_hp: 150,
            player_speed: 320.0,
            hurt_invuln_ticks: 25,
            hurt_flash_ticks: 7,
            contact_damage: 12,
            hurt_shake_ticks: 8,
            hurt_shake_magnitude: 7.0,

            dash_distance: 140.0,
            dash_ticks: 8,
            dash_invuln_ticks: 18,
            dash_cooldown_ticks: 50,
            dash_knockback_radius: 180.0,
            dash_knockback_impulse: 650.0,
            knockback_decay: 0.88,

            enemy_base_hp: 40,
            enemy_hp_per_tier: 20,
            enemy_base_speed: 170.0,
            enemy_speed_per_tier: 20.0,
            enemy_base_radius: 20.0,
            enemy_radius_per_tier: 3.0,
            enemy_points_per_tier: 10,

            wave_base_quota: 6,
            wave_quota_step: 2,
            elite_wave: 3,
            tier2_chance: 0.6,
            spawn_min_distance: 380.0,
            spawn_attempts: 200,

            rifle: WeaponSpec::rifle(),
            shotgun: WeaponSpec::shotgun(),
        }
    }
}

impl Tuning {
    /// Dash burst speed that covers `dash_distance` over `dash_ticks`
    pub fn dash_speed(&self) -> f32 {
        let ticks = self.dash_ticks.max(1) as f32;
        self.dash_distance / (ticks * SIM_DT)
    }

    /// Enemies spawned for a given 1-based wave number
    pub fn wave_quota(&self, wave: u32) -> u32 {
        self.wave_base_quota + wave * self.wave_quota_step
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
