//! HUD view model
//!
//! Everything the renderer needs to draw the overlay, computed from the
//! simulation state so the renderer never reaches into gameplay rules.

use glam::Vec2;
use rand::Rng;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Full-screen overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub title: &'static str,
    pub prompt: Option<&'static str>,
}

pub const PAUSED_OVERLAY: Overlay = Overlay {
    title: "PAUSED",
    prompt: Some("Esc to resume"),
};

pub const GAME_OVER_OVERLAY: Overlay = Overlay {
    title: "GAME OVER",
    prompt: Some("Press Enter to restart"),
};

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// Health bar fill, 0..=1
    pub hp_fraction: f32,
    /// e.g. "RIFLE  Ammo 30/30" or "SHOTGUN  Reloading..."
    pub ammo_line: String,
    /// e.g. "Wave 3   Score 240"
    pub info_line: String,
    /// Fraction of the dash cooldown still to run, 0 = ready
    pub dash_cooldown: f32,
    /// Tint the screen red this frame
    pub hurt_flash: bool,
    pub overlay: Option<Overlay>,
}

impl Hud {
    pub fn from_state(state: &GameState, settings: &Settings) -> Self {
        let player = &state.player;
        let hp_fraction = if player.max_hp == 0 {
            0.0
        } else {
            (player.hp as f32 / player.max_hp as f32).clamp(0.0, 1.0)
        };

        let label = player.weapon.label();
        let ammo_line = if player.is_reloading() {
            format!("{label}  Reloading...")
        } else {
            format!(
                "{label}  Ammo {}/{}",
                player.current_ammo(),
                player.current_magazine()
            )
        };

        let full_cooldown = state.tuning.dash_cooldown_ticks.max(1) as f32;
        let dash_cooldown = (player.dash_cooldown as f32 / full_cooldown).clamp(0.0, 1.0);

        let overlay = match state.phase {
            GamePhase::Playing => None,
            GamePhase::Paused => Some(PAUSED_OVERLAY),
            GamePhase::GameOver => Some(GAME_OVER_OVERLAY),
        };

        Self {
            hp_fraction,
            ammo_line,
            info_line: format!("Wave {}   Score {}", state.wave, state.score),
            dash_cooldown,
            hurt_flash: settings.effective_hurt_flash() && player.hurt_flash_ticks > 0,
            overlay,
        }
    }
}

/// Camera jitter to apply this frame, honouring the shake setting
pub fn shake_offset<R: Rng>(state: &GameState, settings: &Settings, rng: &mut R) -> Vec2 {
    if !settings.effective_screen_shake() {
        return Vec2::ZERO;
    }
    state.camera.jitter(rng)
}
