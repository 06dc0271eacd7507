//! Frame driver around the fixed-timestep simulation
//!
//! The window layer feeds real frame times and raw input here; the session
//! turns them into whole simulation ticks, latches one-shot inputs until a
//! tick consumes them, and owns everything that outlives a single run
//! (settings, leaderboard, seed sequence).

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScores;
use crate::hud::Hud;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Undrained events kept when the host never calls `take_events`; the
/// oldest are dropped first
pub const MAX_PENDING_EVENTS: usize = 1024;

pub struct Session {
    pub state: GameState,
    pub settings: Settings,
    pub tuning: Tuning,
    pub high_scores: HighScores,
    /// Input applied to the next tick(s)
    pub input: TickInput,
    accumulator: f32,
    /// Events gathered since the last `take_events`
    events: Vec<GameEvent>,
    runs: u32,
}

impl Session {
    pub fn new(seed: u64, settings: Settings, tuning: Tuning) -> Self {
        let mut state = GameState::with_tuning(seed, tuning.clone());
        state.max_particles = settings.max_particles();
        let mut events = Vec::new();
        events.append(&mut state.events);
        Self {
            state,
            settings,
            tuning,
            high_scores: HighScores::new(),
            input: TickInput::default(),
            accumulator: 0.0,
            events,
            runs: 1,
        }
    }

    /// Feed one rendered frame's elapsed time. Returns ticks simulated.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() {
            log::warn!("Ignoring non-finite frame time {}", frame_dt);
            return 0;
        }
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.events.append(&mut self.state.events);
            self.trim_events();

            // Clear one-shot inputs after processing
            self.input.pause = false;
            self.input.reload = false;
            self.input.switch_weapon = false;
            self.input.dash = false;
        }

        // Dropped time when the sim falls behind instead of spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    fn trim_events(&mut self) {
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Start a fresh run after game over. Returns the leaderboard rank the
    /// finished run earned, if any. Ignored while a run is still going.
    pub fn restart(&mut self) -> Option<usize> {
        if !self.is_game_over() {
            return None;
        }
        let rank = self
            .high_scores
            .add_score(self.state.score, self.state.wave, self.state.time_ticks);
        let seed = self.state.seed.wrapping_add(1);
        log::info!(
            "Restarting (run {}, seed {}); last score {} on wave {}",
            self.runs + 1,
            seed,
            self.state.score,
            self.state.wave
        );

        self.state = GameState::with_tuning(seed, self.tuning.clone());
        self.state.max_particles = self.settings.max_particles();
        self.events.append(&mut self.state.events);
        self.trim_events();
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.runs += 1;
        rank
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Flip the fullscreen preference for the window layer
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.settings.fullscreen = !self.settings.fullscreen;
        self.settings.fullscreen
    }

    /// Apply new settings (particle cap takes effect immediately)
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.state.max_particles = self.settings.max_particles();
        let cap = self.state.max_particles;
        self.state.particles.truncate(cap);
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(4242, Settings::default(), Tuning::default())
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut s = session();
        assert_eq!(s.advance(SIM_DT * 2.5), 2);
        assert_eq!(s.state.time_ticks, 2);
        // Leftover half tick carries over
        assert_eq!(s.advance(SIM_DT * 0.6), 1);
        assert_eq!(s.state.time_ticks, 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut s = session();
        // A long hitch is clamped to MAX_FRAME_DT worth of ticks
        let ran = s.advance(10.0);
        assert!((5..=MAX_SUBSTEPS).contains(&ran));
        assert_eq!(s.state.time_ticks, ran as u64);
    }

    #[test]
    fn test_bad_frame_time_is_skipped() {
        let mut s = session();
        assert_eq!(s.advance(f32::NAN), 0);
        assert_eq!(s.advance(f32::INFINITY), 0);
        assert_eq!(s.advance(-1.0), 0);
        // The clock still runs afterwards
        assert_eq!(s.advance(SIM_DT * 2.5), 2);
        assert_eq!(s.state.time_ticks, 2);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut s = session();
        let stale = GameEvent::DryFire {
            weapon: crate::sim::WeaponKind::Shotgun,
        };
        s.events.extend(std::iter::repeat_n(stale.clone(), MAX_PENDING_EVENTS * 2));
        s.input.switch_weapon = true;
        s.advance(SIM_DT);
        let events = s.take_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        // Oldest dropped, newest kept
        assert_eq!(
            events.last(),
            Some(&GameEvent::WeaponSwitched {
                weapon: crate::sim::WeaponKind::Shotgun
            })
        );
    }

    #[test]
    fn test_one_shot_inputs_clear() {
        let mut s = session();
        s.input.pause = true;
        s.input.fire = true;
        s.advance(SIM_DT);
        assert_eq!(s.state.phase, GamePhase::Paused);
        assert!(!s.input.pause);
        // Held inputs stay held
        assert!(s.input.fire);

        let ticks = s.state.time_ticks;
        s.advance(SIM_DT * 3.0);
        assert_eq!(s.state.time_ticks, ticks);
    }

    #[test]
    fn test_first_wave_event_is_delivered() {
        let mut s = session();
        let events = s.take_events();
        assert!(events.contains(&GameEvent::WaveStarted { wave: 1, enemies: 8 }));
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut s = session();
        assert_eq!(s.restart(), None);
        assert_eq!(s.runs(), 1);

        s.state.score = 120;
        s.state.phase = GamePhase::GameOver;
        assert_eq!(s.restart(), Some(1));
        assert_eq!(s.runs(), 2);
        assert_eq!(s.state.seed, 4243);
        assert_eq!(s.state.phase, GamePhase::Playing);
        assert_eq!(s.state.score, 0);
        assert_eq!(s.high_scores.best().map(|e| e.score), Some(120));
    }

    #[test]
    fn test_toggle_fullscreen() {
        let mut s = session();
        assert!(s.toggle_fullscreen());
        assert!(!s.toggle_fullscreen());
    }

    #[test]
    fn test_particles_disabled_by_settings() {
        let mut s = session();
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        s.apply_settings(settings);
        s.input.autopilot = true;
        for _ in 0..60 {
            s.advance(SIM_DT);
        }
        assert!(s.state.particles.is_empty());
    }
}
