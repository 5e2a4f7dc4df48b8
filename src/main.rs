//! Sidearm entry point
//!
//! Headless driver: builds the stage, runs a scripted pilot through the
//! simulation and reports the outcome. A rendering frontend would own
//! its own loop and call `tick` the same way.

use std::time::{SystemTime, UNIX_EPOCH};

use sidearm::consts::TICK_RATE;
use sidearm::level::Level;
use sidearm::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Sidearm (headless) starting...");

    let level = Level::stage_one();
    if let Err(err) = level.validate() {
        log::error!("built-in stage failed validation: {}", err);
        return;
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut state = GameState::new(&level, seed);
    log::info!("run seed: {}", seed);

    // Scripted pilot: push right while firing, hop periodically, and aim
    // up in bursts to sweep the turrets perched on floats.
    let max_ticks = TICK_RATE as u64 * 120;
    while state.phase == GamePhase::Playing && state.ticks < max_ticks {
        let t = state.ticks;
        let input = TickInput {
            right: true,
            shoot: true,
            up: t % 240 < 40,
            jump: state.player.grounded && t % 90 == 0,
            ..Default::default()
        };
        for event in tick(&mut state, &input) {
            match event {
                GameEvent::ScoreChanged { score } => log::info!("score: {}", score),
                GameEvent::LivesChanged { lives } => log::info!("lives: {}", lives),
                GameEvent::GameOver => log::info!("game over"),
                GameEvent::Victory => log::info!("victory"),
                GameEvent::Burst { .. } => {}
            }
        }
    }

    println!(
        "{:?} after {} ticks: score {}, lives {}",
        state.phase, state.ticks, state.player.score, state.player.hp
    );
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&state) {
            Ok(json) => log::debug!("final state: {}", json),
            Err(err) => log::warn!("could not serialize final state: {}", err),
        }
    }
}
