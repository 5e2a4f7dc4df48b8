//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order for enemies, newest-first bullets)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{resolve_landing, settle_on_platforms};
pub use geometry::{Aabb, intersects};
pub use state::{
    Anim, Bullet, BulletOwner, Enemy, EnemyKind, Facing, GameEvent, GamePhase, GameState,
    Particle, Platform, PlatformKind, Player, TickInput, COLOR_BOSS, COLOR_ENEMY_BULLET,
    COLOR_PLAYER, COLOR_PLAYER_BULLET, COLOR_RUNNER, COLOR_TURRET, MAX_PARTICLES,
};
pub use tick::tick;
