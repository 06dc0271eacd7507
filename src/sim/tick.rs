//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically: player
//! input, shooting, dashing, enemy chase, collisions, scoring and waves.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, circles_overlap, move_and_slide};
use super::events::GameEvent;
use super::state::{Enemy, GamePhase, GameState, Owner, ParticleKind, PlayerStatus, Projectile};
use crate::consts::*;
use crate::rotate;

/// How far ahead enemies probe for walls
const FEELER_REACH: f32 = 24.0;
const FEELER_HALF_EXTENT: f32 = 10.0;
const FEELER_PUSH: f32 = 200.0;
/// Knockback below this speed is dropped
const KNOCKBACK_REST: f32 = 1.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction (WASD); normalised before use
    pub move_dir: Vec2,
    /// Pointer position in world space
    pub aim: Option<Vec2>,
    /// Fire button held
    pub fire: bool,
    pub reload: bool,
    pub switch_weapon: bool,
    pub dash: bool,
    /// Pause toggle
    pub pause: bool,
    /// Let the simulation drive the player
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Paused and game over are render-only
    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        input = autopilot(state);
    }
    let input = &input;

    state.time_ticks += 1;

    update_player(state, input, dt);
    update_projectiles(state, dt);
    update_enemies(state, dt);
    resolve_collisions(state);
    check_wave_completion(state);

    if !state.player.is_alive() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over on wave {} with score {}", state.wave, state.score);
        let (score, wave) = (state.score, state.wave);
        state.emit(GameEvent::GameOver { score, wave });
    }

    state.update_particles();
    state.camera.update(state.player.pos);
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(weapon) = state.player.update_cooldowns() {
        state.emit(GameEvent::ReloadFinished { weapon });
    }

    if input.switch_weapon {
        state.player.switch_weapon();
        let weapon = state.player.weapon;
        state.emit(GameEvent::WeaponSwitched { weapon });
    }

    if input.reload && state.player.start_reload(&state.tuning) {
        let weapon = state.player.weapon;
        state.emit(GameEvent::ReloadStarted { weapon });
    }

    let move_dir = input.move_dir.normalize_or_zero();
    state.player.vel = move_dir * state.tuning.player_speed;

    let aim_target = input
        .aim
        .unwrap_or(state.player.pos + state.player.facing);

    if input.dash {
        let dir = if move_dir != Vec2::ZERO {
            move_dir
        } else {
            state.player.aim_dir(aim_target)
        };
        try_dash(state, dir);
    }

    if state.player.status == PlayerStatus::Dashing {
        state.player.vel = state.player.dash_velocity;
    }

    if input.fire {
        shoot(state, aim_target);
    }

    let p = &state.player;
    state.player.pos = move_and_slide(p.pos, p.vel, p.radius, dt, &state.map);
}

/// Start a dash and blast nearby enemies away. Returns false if on cooldown.
pub fn try_dash(state: &mut GameState, dir: Vec2) -> bool {
    if !state.player.try_dash(dir, &state.tuning) {
        return false;
    }

    let origin = state.player.pos;
    let radius = state.tuning.dash_knockback_radius;
    let impulse = state.tuning.dash_knockback_impulse;
    let facing = state.player.facing;
    let mut knocked_back = 0;
    for (_, enemy) in state.enemies.iter_mut() {
        let offset = enemy.pos - origin;
        if offset.length_squared() <= radius * radius {
            let away = offset.try_normalize().unwrap_or(facing);
            enemy.knockback += away * impulse;
            knocked_back += 1;
        }
    }

    state.camera.shake(6, 5.0);
    state.burst(origin, 16, 4.0, 18, ParticleKind::Dust);
    state.emit(GameEvent::Dashed {
        pos: origin,
        knocked_back,
    });
    true
}

/// Fire the current weapon toward `target`. Returns projectiles spawned.
///
/// Blocked while reloading or cooling down; an empty magazine dry-fires.
pub fn shoot(state: &mut GameState, target: Vec2) -> u32 {
    let player = &state.player;
    if !player.is_alive() || player.is_reloading() || player.fire_cooldown > 0 {
        return 0;
    }

    let weapon = player.weapon;
    let spec = weapon.spec(&state.tuning).clone();
    if player.current_ammo() == 0 {
        state.player.fire_cooldown = spec.fire_interval_ticks();
        state.emit(GameEvent::DryFire { weapon });
        return 0;
    }

    let dir = state.player.aim_dir(target);
    let muzzle = state.player.pos + dir * MUZZLE_OFFSET;
    let pellets = spec.pellets.max(1);
    for _ in 0..pellets {
        let deviation = state.rng.random_range(-spec.spread..=spec.spread);
        state.projectiles.insert(Projectile {
            pos: muzzle,
            vel: rotate(dir, deviation) * spec.projectile_speed,
            owner: Owner::Player,
            damage: spec.damage,
            radius: PROJECTILE_RADIUS,
            ticks_left: spec.lifetime_ticks,
        });
    }

    let ammo = state.player.ammo.get_mut(weapon);
    *ammo = ammo.saturating_sub(1);
    state.player.fire_cooldown = spec.fire_interval_ticks();

    state.camera.shake(spec.shake_ticks, spec.shake_magnitude);
    state.burst(muzzle, spec.flash_particles, 3.0, 14, ParticleKind::MuzzleFlash);
    state.emit(GameEvent::Shot {
        weapon,
        muzzle,
        projectiles: pellets,
    });
    pellets
}

fn update_projectiles(state: &mut GameState, dt: f32) {
    let map = &state.map;
    let mut impacts = Vec::new();
    state.projectiles.retain(|p| {
        p.pos += p.vel * dt;
        p.ticks_left = p.ticks_left.saturating_sub(1);
        if map.overlaps_wall(&Aabb::around(p.pos, p.radius)) {
            impacts.push(p.pos);
            return false;
        }
        p.ticks_left > 0
    });
    for pos in impacts {
        state.burst(pos, 4, 3.0, 10, ParticleKind::Spark);
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.pos;
    let player_radius = state.player.radius;
    let decay = state.tuning.knockback_decay;
    let map = &state.map;
    let mut touching = false;

    for (_, enemy) in state.enemies.iter_mut() {
        let steer = (target - enemy.pos).normalize_or_zero() * enemy.speed;

        let mut avoid = Vec2::ZERO;
        for feeler in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
            let ahead = enemy.pos + feeler * FEELER_REACH;
            if map.overlaps_wall(&Aabb::around(ahead, FEELER_HALF_EXTENT)) {
                avoid -= feeler * FEELER_PUSH;
            }
        }
        enemy.vel = (steer + avoid).clamp_length_max(enemy.speed);

        let motion = enemy.vel + enemy.knockback;
        enemy.pos = move_and_slide(enemy.pos, motion, enemy.radius, dt, map);

        enemy.knockback *= decay;
        if enemy.knockback.length_squared() < KNOCKBACK_REST * KNOCKBACK_REST {
            enemy.knockback = Vec2::ZERO;
        }

        if circles_overlap(enemy.pos, enemy.radius, target, player_radius) {
            touching = true;
        }
    }

    if touching {
        let damage = state.tuning.contact_damage;
        if state.player.damage(damage, &state.tuning) {
            let (ticks, magnitude) = (state.tuning.hurt_shake_ticks, state.tuning.hurt_shake_magnitude);
            state.camera.shake(ticks, magnitude);
            state.burst(target, 12, 3.0, 18, ParticleKind::Hurt);
            let hp = state.player.hp;
            state.emit(GameEvent::PlayerHurt { damage, hp });
        }
    }
}

/// Apply projectile hits to enemies. Returns the number of kills.
///
/// Each projectile damages at most one enemy and is consumed by the hit.
/// Enemies whose health is depleted are removed and scored.
pub fn resolve_collisions(state: &mut GameState) -> u32 {
    let mut spent = Vec::new();
    let mut hits = Vec::new();

    for (proj_handle, proj) in state.projectiles.iter() {
        for (enemy_handle, enemy) in state.enemies.iter_mut() {
            if enemy.is_dead() {
                continue;
            }
            if circles_overlap(proj.pos, proj.radius, enemy.pos, enemy.radius) {
                enemy.hp = enemy.hp.saturating_sub(proj.damage);
                spent.push(proj_handle);
                hits.push((enemy_handle, enemy.pos, proj.damage));
                break;
            }
        }
    }

    for handle in spent {
        state.projectiles.remove(handle);
    }

    let mut kills = 0;
    for (handle, pos, damage) in hits {
        // Several pellets can land on the same kill; score it once
        let dead = match state.enemies.get(handle) {
            Some(enemy) => enemy.is_dead(),
            None => continue,
        };
        state.burst(pos, 10, 4.0, 16, ParticleKind::Spark);
        if !dead {
            state.emit(GameEvent::EnemyHit { pos, damage });
            continue;
        }
        let Some(enemy) = state.enemies.remove(handle) else {
            continue;
        };
        let points = enemy.points(&state.tuning);
        state.score += points;
        state.kills += 1;
        kills += 1;
        state.burst(pos, 18, 5.0, 20, ParticleKind::Pop);
        state.emit(GameEvent::EnemyKilled {
            pos,
            tier: enemy.tier,
            points,
        });
    }
    kills
}

/// Start the next wave once every enemy of the current one is gone
pub fn check_wave_completion(state: &mut GameState) -> bool {
    if !state.enemies.is_empty() {
        return false;
    }
    spawn_wave(state);
    true
}

/// Advance the wave counter and spawn its quota away from the player
pub fn spawn_wave(state: &mut GameState) {
    state.wave += 1;
    let quota = state.tuning.wave_quota(state.wave);
    let mut spawned = 0;
    for _ in 0..quota {
        let tier = roll_tier(state);
        let Some(pos) = pick_spawn_point(state) else {
            log::warn!("No free tile to spawn an enemy on");
            break;
        };
        let enemy = Enemy::new(pos, tier, &state.tuning);
        state.enemies.insert(enemy);
        spawned += 1;
    }
    log::info!("Wave {} started with {} enemies", state.wave, spawned);
    let wave = state.wave;
    state.emit(GameEvent::WaveStarted {
        wave,
        enemies: spawned,
    });
}

fn roll_tier(state: &mut GameState) -> u8 {
    if state.wave < state.tuning.elite_wave {
        return 1;
    }
    let chance = state.tuning.tier2_chance.clamp(0.0, 1.0);
    if state.rng.random_bool(chance) { 2 } else { 3 }
}

/// Random open tile at least `spawn_min_distance` from the player, or the
/// farthest open tile seen when every attempt lands too close
fn pick_spawn_point(state: &mut GameState) -> Option<Vec2> {
    let map = &state.map;
    let player = state.player.pos;
    let min_dist = state.tuning.spawn_min_distance;
    let mut best: Option<(f32, Vec2)> = None;

    if map.width > 2 && map.height > 2 {
        for _ in 0..state.tuning.spawn_attempts {
            let x = state.rng.random_range(1..map.width - 1);
            let y = state.rng.random_range(1..map.height - 1);
            if map.is_wall(x, y) {
                continue;
            }
            let pos = map.tile_center(x, y);
            let dist = pos.distance(player);
            if dist > min_dist {
                return Some(pos);
            }
            if best.is_none_or(|(d, _)| dist > d) {
                best = Some((dist, pos));
            }
        }
    }

    if let Some((_, pos)) = best {
        return Some(pos);
    }
    map.free_tiles()
        .map(|(x, y)| map.tile_center(x, y))
        .max_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
}

/// Inputs that play the game: aim and fire at the nearest enemy, keep
/// distance while strafing, reload when empty, dash out when cornered
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let nearest = state
        .enemies
        .values()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .total_cmp(&b.pos.distance_squared(player.pos))
        });

    let Some(enemy) = nearest else {
        return TickInput {
            reload: player.current_ammo() < player.current_magazine(),
            ..Default::default()
        };
    };

    let to_enemy = enemy.pos - player.pos;
    let dist = to_enemy.length();
    let toward = to_enemy.normalize_or_zero();
    let strafe = toward.perp() * (state.time_ticks as f32 * 0.02).sin().signum();
    let move_dir = if dist < 220.0 {
        strafe - toward
    } else {
        strafe + toward * 0.3
    };

    // Lead the target a little
    let aim = enemy.pos + enemy.vel * (dist / 900.0);
    let empty = player.current_ammo() == 0;

    TickInput {
        move_dir,
        aim: Some(aim),
        fire: !empty,
        reload: empty,
        dash: dist < enemy.radius + player.radius + 40.0 && player.can_dash(),
        ..Default::default()
    }
}
