//! Dot Shooter entry point
//!
//! The native binary runs the simulation headless with the autopilot at the
//! controls; the window/render layer plugs into `Session` the same way.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use dot_shooter::consts::SIM_DT;
use dot_shooter::sim::GameEvent;
use dot_shooter::{Session, Settings, Tuning};

/// Frames simulated when DOT_SHOOTER_FRAMES is not set (one minute at 60 fps)
const DEFAULT_FRAMES: u64 = 60 * 60;

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).map(PathBuf::from)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Dot Shooter (headless) starting...");

    let seed = env_u64("DOT_SHOOTER_SEED").unwrap_or_else(time_seed);
    let frames = env_u64("DOT_SHOOTER_FRAMES").unwrap_or(DEFAULT_FRAMES);
    let tuning = env_path("DOT_SHOOTER_TUNING")
        .map(|p| Tuning::load(&p))
        .unwrap_or_default();
    let settings = env_path("DOT_SHOOTER_SETTINGS")
        .map(|p| Settings::load(&p))
        .unwrap_or_default();

    log::info!("Game initialized with seed: {}", seed);
    let mut session = Session::new(seed, settings, tuning);
    session.input.autopilot = true;

    for frame in 0..frames {
        session.advance(SIM_DT);

        for event in session.take_events() {
            match event {
                GameEvent::WaveStarted { .. } | GameEvent::GameOver { .. } => {
                    log::info!("frame {}: {:?}", frame, event)
                }
                other => log::trace!("frame {}: {:?}", frame, other),
            }
        }

        if session.is_game_over() {
            let hud = session.hud();
            println!("{}", hud.info_line);
            if let Some(rank) = session.restart() {
                log::info!("New high score, rank #{}", rank);
            }
            session.input.autopilot = true;
        }
    }

    let hud = session.hud();
    println!("Final run: {}  |  {}", hud.info_line, hud.ammo_line);
    println!(
        "Runs: {}  HP: {:.0}%  Kills: {}",
        session.runs(),
        hud.hp_fraction * 100.0,
        session.state.kills
    );

    // Fold the unfinished run into the board for the summary
    let mut board = session.high_scores.clone();
    board.add_score(session.state.score, session.state.wave, session.state.time_ticks);
    if board.is_empty() {
        println!("No scores recorded");
    } else {
        println!("High scores:");
        for (i, entry) in board.entries.iter().enumerate() {
            println!(
                "  {:>2}. {:>6}  wave {:>2}  {}",
                i + 1,
                entry.score,
                entry.wave,
                entry.survived()
            );
        }
    }
    match serde_json::to_string(&board) {
        Ok(json) => log::debug!("{}", json),
        Err(e) => log::warn!("Could not serialise high scores: {}", e),
    }
}
