//! Game state and core simulation types
//!
//! Everything here is plain data with serde derives so a run can be
//! snapshotted to JSON and restored. Only [`GameState::new`] and
//! [`crate::sim::tick`] mutate a [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::level::Level;
use crate::sim::geometry::Aabb;

/// Maximum live cosmetic particles. Oldest are evicted first.
pub const MAX_PARTICLES: usize = 256;

/// Palette indices. The core never interprets these; it tags entities and
/// emitted bursts so a presentation layer can map them to real colors.
pub const COLOR_PLAYER: u32 = 0;
pub const COLOR_RUNNER: u32 = 1;
pub const COLOR_TURRET: u32 = 2;
pub const COLOR_BOSS: u32 = 3;
pub const COLOR_PLAYER_BULLET: u32 = 4;
pub const COLOR_ENEMY_BULLET: u32 = 5;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player ran out of lives. Terminal.
    GameOver,
    /// Boss destroyed. Terminal.
    Victory,
}

/// Horizontal facing, remembered from the last pressed direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Unit sign along x: Right is +1, Left is -1
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Presentation hint describing what an entity is doing. Game logic never
/// branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anim {
    Idle,
    Run,
    Jump,
    Shoot,
}

/// Platform flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Ground segment
    Solid,
    /// Floating ledge the player is expected to drop through
    PassThrough,
}

/// Static level geometry. Only the top surface is solid, and only for
/// entities arriving from above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub body: Aabb,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: PlatformKind) -> Self {
        Self {
            body: Aabb::new(x, y, w, h),
            kind,
        }
    }
}

/// The player avatar. Never removed from the state; running out of lives
/// transitions the phase to [`GamePhase::GameOver`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Aabb,
    pub vel: Vec2,
    pub color: u32,
    pub facing: Facing,
    /// Vertical aim from held keys: +1 up, -1 down, 0 level
    pub aim_vertical: i8,
    /// True only when the last physics resolve landed on a platform top
    pub grounded: bool,
    pub crouching: bool,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: i32,
    /// Post-respawn mercy window in ticks. All damage is ignored while > 0.
    pub invincible_timer: i32,
    /// Remaining lives. Decrements by exactly one per death.
    pub hp: i32,
    pub score: u32,
    pub anim: Anim,
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Aabb::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            color: COLOR_PLAYER,
            facing: Facing::Right,
            aim_vertical: 0,
            grounded: false,
            crouching: false,
            shoot_cooldown: 0,
            invincible_timer: 0,
            hp: PLAYER_HP,
            score: 0,
            anim: Anim::Idle,
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Enemy archetype. Behavior, size and reward are all keyed off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Chases the player on foot along platform tops
    Runner,
    /// Stationary, fires aimed shots on a fixed interval
    Turret,
    /// Stationary heavy turret. Destroying it wins the level.
    Boss,
}

impl EnemyKind {
    pub fn max_hp(self) -> i32 {
        match self {
            EnemyKind::Runner | EnemyKind::Turret => 1,
            EnemyKind::Boss => BOSS_HP,
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Runner => Vec2::new(26.0, 30.0),
            EnemyKind::Turret => Vec2::new(30.0, 26.0),
            EnemyKind::Boss => Vec2::new(64.0, 72.0),
        }
    }

    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Runner | EnemyKind::Turret => SCORE_ENEMY,
            EnemyKind::Boss => SCORE_BOSS,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            EnemyKind::Runner => COLOR_RUNNER,
            EnemyKind::Turret => COLOR_TURRET,
            EnemyKind::Boss => COLOR_BOSS,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Aabb,
    pub vel: Vec2,
    pub color: u32,
    pub hp: i32,
    /// Ticks until the next shot. Only counts down while the enemy is
    /// within activation range of the player.
    pub shoot_cooldown: i32,
    pub facing: Facing,
    /// Dead enemies stay in the list as tombstones so ids stay stable
    pub dead: bool,
    pub anim: Anim,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            body: Aabb {
                pos: Vec2::new(x, y),
                size: kind.size(),
            },
            vel: Vec2::ZERO,
            color: kind.color(),
            hp: kind.max_hp(),
            shoot_cooldown: ENEMY_FIRE_INTERVAL,
            facing: Facing::Left,
            dead: false,
            anim: Anim::Idle,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }
}

/// Who fired a bullet, which decides what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A bullet entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Aabb,
    pub vel: Vec2,
    pub color: u32,
    pub owner: BulletOwner,
    /// Remaining ticks. The bullet is removed the same tick this hits 0.
    pub life: i32,
}

impl Bullet {
    /// Spawn a bullet with its center at `center`
    pub fn new(center: Vec2, vel: Vec2, owner: BulletOwner) -> Self {
        let (color, life) = match owner {
            BulletOwner::Player => (COLOR_PLAYER_BULLET, PLAYER_BULLET_LIFE),
            BulletOwner::Enemy => (COLOR_ENEMY_BULLET, ENEMY_BULLET_LIFE),
        };
        Self {
            body: Aabb::centered(center, Vec2::splat(BULLET_SIZE)),
            vel,
            color,
            owner,
            life,
        }
    }
}

/// A particle for visual effects. Nothing collides with these.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub life: i32,
}

/// Input sampled for one tick. `jump` is edge-triggered: the producer sets
/// it for the single tick a press happened and clears it afterwards. All
/// other fields are level-triggered hold states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub shoot: bool,
}

/// Something externally observable that happened during a tick. Events are
/// advisory: state is already updated when they are emitted, and a driver
/// that drops them loses nothing but the notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score increased to `score`
    ScoreChanged { score: u32 },
    /// Player lives changed to `lives`. Only ever decreases.
    LivesChanged { lives: i32 },
    /// Terminal defeat. No further gameplay events follow in the same tick.
    GameOver,
    /// Terminal win, triggered by destroying the boss
    Victory,
    /// A cosmetic particle burst was spawned at (`x`, `y`)
    Burst { x: f32, y: f32, color: u32 },
}

/// Complete game state for one level run (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub ticks: u64,
    /// Seed for cosmetic randomness. Same level, seed and input sequence
    /// produce a bit-identical run.
    pub seed: u64,
    /// The player avatar
    pub player: Player,
    /// Enemies, in level placement order
    pub enemies: Vec<Enemy>,
    /// Live bullets from both sides
    pub bullets: Vec<Bullet>,
    /// Static level geometry
    pub platforms: Vec<Platform>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Left edge of the visible window in world coordinates. Never moves
    /// backwards during a run.
    pub camera_x: f32,
    /// Total level width in world units
    pub level_length: f32,
}

impl GameState {
    /// Create the starting state for `level`. The player spawns at the
    /// fixed start position with full lives and the camera at zero.
    pub fn new(level: &Level, seed: u64) -> Self {
        let enemies: Vec<Enemy> = level
            .spawns
            .iter()
            .enumerate()
            .map(|(i, spawn)| Enemy::new(i as u32, spawn.kind, spawn.x, spawn.y))
            .collect();
        log::info!(
            "level start: {} platforms, {} enemies, length {}",
            level.platforms.len(),
            enemies.len(),
            level.length
        );
        Self {
            phase: GamePhase::Playing,
            ticks: 0,
            seed,
            player: Player::new(),
            enemies,
            bullets: Vec::new(),
            platforms: level.platforms.clone(),
            particles: Vec::new(),
            camera_x: 0.0,
            level_length: level.length,
        }
    }
}
