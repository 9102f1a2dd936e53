//! Fixed timestep simulation tick
//!
//! One call advances the world by `dt`: player controller, gravity,
//! collision resolution against the static solids, world-bound clamping,
//! star physics, and star collection with the re-arm rule.

use super::collision::{Aabb, resolve_aabb};
use super::state::{GameState, Player, PlayerAnim};
use crate::consts::*;

/// Held input flags for a single tick, polled once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Terminal flag: no state transition of any kind
    if state.game_over {
        return;
    }

    state.time_ticks += 1;

    step_player(&mut state.player, input, &state.solids, dt);

    for star in state.stars.iter_mut().filter(|s| s.active) {
        step_star(star, &state.solids, dt);
    }

    collect_stars(state);
}

/// Player controller + physics for one tick.
///
/// Horizontal velocity and animation are recomputed from scratch each tick;
/// the jump impulse fires only while resting on a supporting surface, so
/// holding "up" in the air changes nothing.
fn step_player(player: &mut Player, input: &TickInput, solids: &[Aabb], dt: f32) {
    player.vel.y += GRAVITY_Y * dt;

    if input.left {
        player.vel.x = -RUN_SPEED;
        player.anim = PlayerAnim::MovingLeft;
    } else if input.right {
        player.vel.x = RUN_SPEED;
        player.anim = PlayerAnim::MovingRight;
    } else {
        player.vel.x = 0.0;
        player.anim = PlayerAnim::Idle;
    }

    if input.up && player.on_ground {
        player.vel.y = -JUMP_IMPULSE;
    }

    player.pos += player.vel * dt;
    player.on_ground = false;

    for solid in solids {
        let Some(contact) = resolve_aabb(&player.aabb(), solid) else {
            continue;
        };
        player.pos += contact.push;
        if contact.normal.y < 0.0 {
            player.on_ground = true;
            player.vel.y = rebound(player.vel.y, player.bounce);
        } else if contact.normal.y > 0.0 {
            // Head bump: cancel remaining upward motion
            player.vel.y = player.vel.y.max(0.0);
        } else {
            player.vel.x = 0.0;
        }
    }

    clamp_player_to_world(player);
}

/// World-bound clamp (the player is world-bound-clamped, stars are not:
/// they only ever fall onto solids or the floor).
fn clamp_player_to_world(player: &mut Player) {
    let half = Player::half();

    if player.pos.x < half.x {
        player.pos.x = half.x;
        player.vel.x = player.vel.x.max(0.0);
    } else if player.pos.x > GAME_WIDTH - half.x {
        player.pos.x = GAME_WIDTH - half.x;
        player.vel.x = player.vel.x.min(0.0);
    }

    if player.pos.y < half.y {
        player.pos.y = half.y;
        player.vel.y = player.vel.y.max(0.0);
    } else if player.pos.y > GAME_HEIGHT - half.y {
        player.pos.y = GAME_HEIGHT - half.y;
        player.on_ground = true;
        player.vel.y = rebound(player.vel.y, player.bounce);
    }
}

/// Landing rebound: reflect downward motion by the bounce factor, damping
/// slow impacts to rest so the body settles instead of jittering.
fn rebound(vel_y: f32, bounce: f32) -> f32 {
    if vel_y <= 0.0 {
        return vel_y;
    }
    let reflected = -vel_y * bounce;
    if reflected.abs() < REST_SPEED {
        0.0
    } else {
        reflected
    }
}

/// Star physics: vertical fall with a per-star rebound factor. Stars keep
/// bouncing; they never damp to rest.
fn step_star(star: &mut super::state::Collectible, solids: &[Aabb], dt: f32) {
    star.vel.y += GRAVITY_Y * dt;
    star.pos += star.vel * dt;

    for solid in solids {
        let Some(contact) = resolve_aabb(&star.aabb(), solid) else {
            continue;
        };
        star.pos += contact.push;
        if contact.normal.y < 0.0 && star.vel.y > 0.0 {
            star.vel.y = -star.vel.y * star.bounce_y;
        }
    }

    let floor = GAME_HEIGHT - super::state::STAR_HALF;
    if star.pos.y > floor {
        star.pos.y = floor;
        if star.vel.y > 0.0 {
            star.vel.y = -star.vel.y * star.bounce_y;
        }
    }
}

/// Score tracker: deactivate overlapped stars (+10 each), and once the set
/// is exhausted re-arm every star with a fresh bounce factor.
fn collect_stars(state: &mut GameState) {
    let player_box = state.player.aabb();
    let mut collected = 0u32;

    for star in state.stars.iter_mut().filter(|s| s.active) {
        if star.aabb().overlaps(&player_box) {
            star.active = false;
            collected += 1;
        }
    }

    if collected > 0 {
        state.score += collected as u64 * STAR_VALUE;
        if state.active_stars() == 0 {
            state.reactivate_stars();
        }
    }
}
