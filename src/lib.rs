//! Sidearm - a side-scrolling run-and-gun game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `level`: Stage data with JSON round-trip and validation

pub mod level;
pub mod sim;

pub use level::{EnemySpawn, Level, LevelError};
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Simulation rate in ticks per second. The sim advances one fixed
    /// step per call; the driver owns the pacing.
    pub const TICK_RATE: u32 = 60;

    /// Viewport dimensions in world pixels
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 450.0;

    /// Player movement (pixels per tick, +y is down)
    pub const GRAVITY: f32 = 0.5;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const JUMP_IMPULSE: f32 = -10.0;
    /// Downward push that starts a drop through a pass-through platform
    pub const DROP_THROUGH_VY: f32 = 1.0;

    /// Player body and life pool
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_START_X: f32 = 64.0;
    pub const PLAYER_START_Y: f32 = 200.0;
    pub const PLAYER_HP: i32 = 3;

    /// Shooting
    pub const PLAYER_SHOOT_COOLDOWN: i32 = 12;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    pub const PLAYER_BULLET_LIFE: i32 = 100;
    /// Per-axis speed factor for diagonal shots
    pub const DIAGONAL_SHOT_SCALE: f32 = 0.7;
    pub const BULLET_SIZE: f32 = 6.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    pub const ENEMY_BULLET_LIFE: i32 = 200;
    pub const ENEMY_FIRE_INTERVAL: i32 = 120;

    /// Horizontal distance at which enemies wake up
    pub const ACTIVATION_RADIUS: f32 = 400.0;
    pub const RUNNER_SPEED: f32 = 1.5;
    /// Runner per-tick descent, clamped back onto platforms
    pub const RUNNER_DESCENT: f32 = 4.0;
    pub const BOSS_HP: i32 = 50;
    pub const SCORE_ENEMY: u32 = 100;
    pub const SCORE_BOSS: u32 = 1000;

    /// Camera and respawn
    pub const CAMERA_LEAD: f32 = 320.0;
    pub const RESPAWN_MARGIN: f32 = 80.0;
    pub const RESPAWN_DROP_Y: f32 = -64.0;
    pub const INVINCIBLE_TICKS: i32 = 180;

    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE: i32 = 30;
}
