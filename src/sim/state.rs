//! Game state and core simulation types
//!
//! `GameState` is the single context object every simulation call takes.
//! Timers count fixed ticks (see `consts::SIM_DT`).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::camera::Camera;
use super::events::GameEvent;
use super::tilemap::TileMap;
use super::weapon::{PerWeapon, WeaponKind};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation suspended, render only
    Paused,
    /// Player died; waiting for a restart
    GameOver,
}

/// Player life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Alive,
    /// Inside a dash burst (reverts to Alive on its own)
    Dashing,
    /// Terminal
    Dead,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub status: PlayerStatus,
    /// Last non-zero aim direction
    pub facing: Vec2,
    pub weapon: WeaponKind,
    pub ammo: PerWeapon<u32>,
    pub magazine: PerWeapon<u32>,
    pub fire_cooldown: u32,
    pub reload_ticks: u32,
    /// Weapon the running reload will refill
    pub reloading: Option<WeaponKind>,
    pub dash_cooldown: u32,
    pub dash_ticks: u32,
    pub dash_velocity: Vec2,
    /// Invincibility opened by a dash
    pub dash_invuln_ticks: u32,
    /// Invincibility after taking a hit
    pub hurt_invuln_ticks: u32,
    pub hurt_flash_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let magazine = PerWeapon::from_fn(|w| w.spec(tuning).magazine);
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            hp: tuning.player_max_hp,
            max_hp: tuning.player_max_hp,
            status: PlayerStatus::Alive,
            facing: Vec2::X,
            weapon: WeaponKind::Rifle,
            ammo: magazine,
            magazine,
            fire_cooldown: 0,
            reload_ticks: 0,
            reloading: None,
            dash_cooldown: 0,
            dash_ticks: 0,
            dash_velocity: Vec2::ZERO,
            dash_invuln_ticks: 0,
            hurt_invuln_ticks: 0,
            hurt_flash_ticks: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status != PlayerStatus::Dead
    }

    pub fn is_invulnerable(&self) -> bool {
        self.dash_invuln_ticks > 0 || self.hurt_invuln_ticks > 0
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading.is_some()
    }

    /// Rounds left in the current weapon
    pub fn current_ammo(&self) -> u32 {
        *self.ammo.get(self.weapon)
    }

    pub fn current_magazine(&self) -> u32 {
        *self.magazine.get(self.weapon)
    }

    /// Unit vector toward `target`, or the last facing if on top of it
    pub fn aim_dir(&mut self, target: Vec2) -> Vec2 {
        if let Some(dir) = (target - self.pos).try_normalize() {
            self.facing = dir;
        }
        self.facing
    }

    /// Count down all timers. Returns the weapon whose reload just finished.
    pub fn update_cooldowns(&mut self) -> Option<WeaponKind> {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.dash_invuln_ticks = self.dash_invuln_ticks.saturating_sub(1);
        self.hurt_invuln_ticks = self.hurt_invuln_ticks.saturating_sub(1);
        self.hurt_flash_ticks = self.hurt_flash_ticks.saturating_sub(1);

        if self.dash_ticks > 0 {
            self.dash_ticks -= 1;
            if self.dash_ticks == 0 && self.status == PlayerStatus::Dashing {
                self.status = PlayerStatus::Alive;
                self.dash_velocity = Vec2::ZERO;
            }
        }

        if self.reload_ticks > 0 {
            self.reload_ticks -= 1;
            if self.reload_ticks == 0 {
                if let Some(weapon) = self.reloading.take() {
                    *self.ammo.get_mut(weapon) = *self.magazine.get(weapon);
                    return Some(weapon);
                }
            }
        }
        None
    }

    /// Start reloading the current weapon. No-op when full or already reloading.
    pub fn start_reload(&mut self, tuning: &Tuning) -> bool {
        if self.is_reloading() || self.current_ammo() >= self.current_magazine() {
            return false;
        }
        self.reloading = Some(self.weapon);
        self.reload_ticks = self.weapon.spec(tuning).reload_ticks.max(1);
        true
    }

    /// Swap weapons; a reload in progress is abandoned
    pub fn switch_weapon(&mut self) {
        self.weapon = self.weapon.next();
        self.reloading = None;
        self.reload_ticks = 0;
    }

    /// Whether a dash may start now
    pub fn can_dash(&self) -> bool {
        self.status == PlayerStatus::Alive
            && self.dash_cooldown == 0
            && self.dash_invuln_ticks == 0
    }

    /// Start a dash along `dir`. The invincibility window is set, never
    /// added to, so it cannot outlast `dash_invuln_ticks`.
    pub fn try_dash(&mut self, dir: Vec2, tuning: &Tuning) -> bool {
        let Some(dir) = dir.try_normalize() else {
            return false;
        };
        if !self.can_dash() {
            return false;
        }
        self.status = PlayerStatus::Dashing;
        self.dash_ticks = tuning.dash_ticks.max(1);
        self.dash_velocity = dir * tuning.dash_speed();
        self.dash_invuln_ticks = tuning.dash_invuln_ticks;
        self.dash_cooldown = tuning.dash_cooldown_ticks;
        true
    }

    /// Apply contact damage. Returns false when the hit was ignored.
    pub fn damage(&mut self, amount: u32, tuning: &Tuning) -> bool {
        if !self.is_alive() || self.is_invulnerable() {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        self.hurt_invuln_ticks = tuning.hurt_invuln_ticks;
        self.hurt_flash_ticks = tuning.hurt_flash_ticks;
        if self.hp == 0 {
            self.status = PlayerStatus::Dead;
            self.vel = Vec2::ZERO;
            self.dash_velocity = Vec2::ZERO;
        }
        true
    }
}

/// An enemy chaser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Decaying impulse from dash blasts
    pub knockback: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    /// 1..=3
    pub tier: u8,
    pub radius: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, tier: u8, tuning: &Tuning) -> Self {
        let tier = tier.clamp(1, 3);
        let step = (tier - 1) as u32;
        let hp = tuning.enemy_base_hp + tuning.enemy_hp_per_tier * step;
        Self {
            pos,
            vel: Vec2::ZERO,
            knockback: Vec2::ZERO,
            hp,
            max_hp: hp,
            tier,
            radius: tuning.enemy_base_radius + tuning.enemy_radius_per_tier * step as f32,
            speed: tuning.enemy_base_speed + tuning.enemy_speed_per_tier * step as f32,
        }
    }

    /// Score awarded for the kill
    pub fn points(&self, tuning: &Tuning) -> u64 {
        tuning.enemy_points_per_tier * self.tier as u64
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: Owner,
    pub damage: u32,
    pub radius: f32,
    pub ticks_left: u32,
}

/// Visual-only particle kinds (renderer picks colours)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Dust,
    MuzzleFlash,
    Spark,
    Hurt,
    Pop,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub life: u32,
}

/// Per-tick velocity damping for particles
pub const PARTICLE_DRAG: f32 = 0.88;

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay randomness (spawns, spread)
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    /// Effects randomness, so particle settings never shift gameplay
    #[serde(skip, default = "default_rng")]
    pub fx_rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub map: TileMap,
    pub player: Player,
    pub enemies: Arena<Enemy>,
    pub projectiles: Arena<Projectile>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Particle cap; 0 disables particles
    pub max_particles: usize,
    pub camera: Camera,
    /// Current wave (1-based once the first wave spawns)
    pub wave: u32,
    pub score: u64,
    pub kills: u32,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 512;

impl GameState {
    /// New run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New run: generate the arena, place the player, spawn wave 1
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::without_wave(seed, tuning);
        super::tick::spawn_wave(&mut state);
        state
    }

    /// Arena and player only, no enemies yet
    pub fn without_wave(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let map = TileMap::generate(&mut rng);
        let spawn = map.center();
        let player = Player::new(spawn, &tuning);
        Self {
            seed,
            rng,
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            tuning,
            time_ticks: 0,
            phase: GamePhase::Playing,
            map,
            player,
            enemies: Arena::new(),
            projectiles: Arena::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            camera: Camera::centered_on(spawn),
            wave: 0,
            score: 0,
            kills: 0,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        log::debug!("{:?}", event);
        self.events.push(event);
    }

    /// Burst of particles flying out of `pos`, up to the particle cap
    pub fn burst(&mut self, pos: Vec2, count: u32, speed: f32, life: u32, kind: ParticleKind) {
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let theta = self.fx_rng.random_range(0.0..=std::f32::consts::TAU);
            let r = self.fx_rng.random_range(0.0..=speed);
            self.particles.push(Particle {
                pos,
                vel: polar_to_cartesian(r, theta),
                kind,
                life,
            });
        }
    }

    /// Advance particles one tick and drop the expired ones
    pub fn update_particles(&mut self) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.vel *= PARTICLE_DRAG;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }
}
