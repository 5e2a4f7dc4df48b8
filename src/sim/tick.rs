//! Fixed timestep simulation tick
//!
//! Advances the game deterministically. Subsystems run in a fixed order:
//! player physics, pitfall check, player shooting, enemies, bullets,
//! particles, camera. Damage handlers check the phase so a terminal
//! transition mid-tick stops all further combat within the same tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{resolve_landing, settle_on_platforms};
use super::geometry::intersects;
use super::state::{
    Anim, Bullet, BulletOwner, COLOR_PLAYER, EnemyKind, Facing, GameEvent, GamePhase, GameState,
    MAX_PARTICLES, Particle, TickInput,
};
use crate::consts::*;

/// Advance the game state by one fixed timestep.
///
/// Returns the events observers care about, in the order they happened.
/// Terminal phases are frozen: the call returns an empty list and leaves
/// the state untouched.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    state.ticks += 1;

    if state.player.invincible_timer > 0 {
        state.player.invincible_timer -= 1;
    }

    update_player(state, input);

    // Pitfall: fully below the screen counts as a death.
    if state.player.body.pos.y > VIEW_HEIGHT {
        kill_player(state, &mut events);
    }

    update_player_shooting(state, input);
    update_enemies(state, &mut events);
    update_bullets(state, &mut events);
    update_particles(state);
    update_camera(state);

    events
}

/// Player movement, jumping and landing for one tick.
fn update_player(state: &mut GameState, input: &TickInput) {
    let camera_x = state.camera_x;
    let p = &mut state.player;

    // Horizontal intent. Left wins when both keys are held.
    if input.left {
        p.vel.x = -PLAYER_SPEED;
        p.facing = Facing::Left;
    } else if input.right {
        p.vel.x = PLAYER_SPEED;
        p.facing = Facing::Right;
    } else {
        p.vel.x = 0.0;
    }

    // Vertical aim. Up wins when both keys are held.
    p.aim_vertical = if input.up {
        1
    } else if input.down {
        -1
    } else {
        0
    };

    if input.jump && p.grounded {
        if input.down {
            // Drop through: nudge below the surface so the landing check
            // cannot catch the platform again this tick.
            p.body.pos.y += 1.0;
            p.vel.y = DROP_THROUGH_VY;
        } else {
            p.vel.y = JUMP_IMPULSE;
        }
        p.grounded = false;
    }

    // Gravity applies even when standing; landing re-zeroes it below.
    p.vel.y += GRAVITY;
    p.body.pos += p.vel;

    // The camera never backs up, so its left edge is a wall.
    p.body.pos.x = p.body.pos.x.max(camera_x);

    p.grounded = resolve_landing(&mut p.body, &mut p.vel, &state.platforms);
    p.crouching = p.grounded && input.down;
    p.anim = if !p.grounded {
        Anim::Jump
    } else if p.vel.x != 0.0 {
        Anim::Run
    } else {
        Anim::Idle
    };
}

/// Cooldown bookkeeping plus the eight-direction shot table.
fn update_player_shooting(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let p = &mut state.player;
    if p.shoot_cooldown > 0 {
        p.shoot_cooldown -= 1;
    }
    if !input.shoot || p.shoot_cooldown > 0 {
        return;
    }

    let dir = p.facing.sign();
    let speed = PLAYER_BULLET_SPEED;
    let diag = speed * DIAGONAL_SHOT_SCALE;
    let moving = input.left || input.right;
    let vel = if p.aim_vertical > 0 {
        if moving {
            Vec2::new(dir * diag, -diag)
        } else {
            Vec2::new(0.0, -speed)
        }
    } else if p.aim_vertical < 0 && !p.grounded {
        if moving {
            Vec2::new(dir * diag, diag)
        } else {
            Vec2::new(0.0, speed)
        }
    } else {
        // Level shot. Down-aim on the ground is the crouched shot and
        // fires level as well.
        Vec2::new(dir * speed, 0.0)
    };

    p.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;
    let muzzle = p.body.center();
    state.bullets.push(Bullet::new(muzzle, vel, BulletOwner::Player));
}

/// Per-kind enemy behavior, then contact damage against the player.
fn update_enemies(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let player_center = state.player.body.center();

    for enemy in state.enemies.iter_mut() {
        if enemy.dead {
            continue;
        }
        let center = enemy.body.center();
        if (center.x - player_center.x).abs() > ACTIVATION_RADIUS {
            enemy.anim = Anim::Idle;
            continue;
        }
        enemy.facing = if player_center.x < center.x {
            Facing::Left
        } else {
            Facing::Right
        };
        match enemy.kind {
            EnemyKind::Runner => {
                enemy.vel.x = enemy.facing.sign() * RUNNER_SPEED;
                enemy.body.pos.x += enemy.vel.x;
                // Fixed descent plus an unconditional clamp stands in for
                // real gravity on runners.
                enemy.body.pos.y += RUNNER_DESCENT;
                settle_on_platforms(&mut enemy.body, &state.platforms);
                enemy.anim = Anim::Run;
            }
            EnemyKind::Turret | EnemyKind::Boss => {
                enemy.shoot_cooldown -= 1;
                if enemy.shoot_cooldown <= 0 {
                    let muzzle = enemy.body.center();
                    let aim = (player_center.y - muzzle.y).atan2(player_center.x - muzzle.x);
                    let vel = Vec2::new(aim.cos(), aim.sin()) * ENEMY_BULLET_SPEED;
                    state.bullets.push(Bullet::new(muzzle, vel, BulletOwner::Enemy));
                    enemy.shoot_cooldown = ENEMY_FIRE_INTERVAL;
                }
                enemy.anim = Anim::Shoot;
            }
        }
    }

    // Contact damage comes from every live enemy, dormant ones included.
    let touching = !state.player.is_invincible()
        && state
            .enemies
            .iter()
            .any(|e| e.is_alive() && intersects(&e.body, &state.player.body));
    if touching {
        kill_player(state, events);
    }
}

/// Integrate bullets newest-first so same-tick removal stays index-safe.
/// A bullet is removed the tick it expires, exits the viewport or hits.
fn update_bullets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = &mut state.bullets[i];
        bullet.body.pos += bullet.vel;
        bullet.life -= 1;
        let body = bullet.body;
        let owner = bullet.owner;
        let life = bullet.life;

        let gone = life <= 0
            || body.right() < state.camera_x
            || body.pos.x > state.camera_x + VIEW_WIDTH
            || body.bottom() < 0.0
            || body.pos.y > VIEW_HEIGHT;
        if gone {
            state.bullets.remove(i);
            continue;
        }
        if state.phase != GamePhase::Playing {
            continue;
        }
        match owner {
            BulletOwner::Player => {
                let hit = state
                    .enemies
                    .iter()
                    .position(|e| e.is_alive() && intersects(&e.body, &body));
                if let Some(target) = hit {
                    state.bullets.remove(i);
                    damage_enemy(state, target, events);
                }
            }
            BulletOwner::Enemy => {
                if !state.player.is_invincible() && intersects(&state.player.body, &body) {
                    state.bullets.remove(i);
                    kill_player(state, events);
                }
            }
        }
    }
}

fn damage_enemy(state: &mut GameState, target: usize, events: &mut Vec<GameEvent>) {
    let center = state.enemies[target].body.center();
    let color = state.enemies[target].color;
    spawn_burst(state, center, color, events);

    let enemy = &mut state.enemies[target];
    enemy.hp -= 1;
    if enemy.hp > 0 {
        return;
    }
    enemy.dead = true;
    let kind = enemy.kind;

    state.player.score += kind.score_value();
    events.push(GameEvent::ScoreChanged {
        score: state.player.score,
    });
    if kind == EnemyKind::Boss {
        state.phase = GamePhase::Victory;
        log::info!(
            "boss destroyed at tick {}, final score {}",
            state.ticks,
            state.player.score
        );
        events.push(GameEvent::Victory);
    }
}

/// One death: lose a life, then either game over or respawn invincible.
/// No-op while invincible or once the run is over, which also caps life
/// loss at one per tick.
fn kill_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Playing || state.player.is_invincible() {
        return;
    }
    state.player.hp -= 1;
    events.push(GameEvent::LivesChanged {
        lives: state.player.hp,
    });
    let center = state.player.body.center();
    spawn_burst(state, center, COLOR_PLAYER, events);

    if state.player.hp <= 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "game over at tick {}, score {}",
            state.ticks,
            state.player.score
        );
        events.push(GameEvent::GameOver);
        return;
    }

    // Respawn above the screen, pulled forward to the camera edge so the
    // drop lands inside the visible area.
    let p = &mut state.player;
    p.body.pos.y = RESPAWN_DROP_Y;
    p.body.pos.x = p.body.pos.x.max(state.camera_x + RESPAWN_MARGIN);
    p.vel = Vec2::ZERO;
    p.invincible_timer = INVINCIBLE_TICKS;
    log::debug!("respawn at x {:.0}, {} lives left", p.body.pos.x, p.hp);
}

/// Emit a burst event and spawn its particles. The spread is reseeded
/// from run seed, tick and particle count so same-tick bursts differ
/// while staying deterministic.
fn spawn_burst(state: &mut GameState, origin: Vec2, color: u32, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::Burst {
        x: origin.x,
        y: origin.y,
        color,
    });
    let salt = state
        .ticks
        .wrapping_mul(2654435761)
        .wrapping_add(state.particles.len() as u64);
    let mut rng = Pcg32::seed_from_u64(state.seed ^ salt);
    for _ in 0..12 {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(1.0..3.5);
        state.particles.push(Particle {
            pos: origin,
            // Slight upward kick so debris arcs before gravity wins.
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 1.0),
            color,
            life: PARTICLE_LIFE,
        });
    }
}

fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += GRAVITY * 0.4;
        particle.vel *= 0.96;
        particle.life -= 1;
    }
    state.particles.retain(|p| p.life > 0);
}

/// Forward-only camera follow, clamped to the level bounds.
fn update_camera(state: &mut GameState) {
    if state.player.body.pos.x > state.camera_x + CAMERA_LEAD {
        state.camera_x = state.player.body.pos.x - CAMERA_LEAD;
    }
    state.camera_x = state.camera_x.clamp(0.0, state.level_length - VIEW_WIDTH);
}
