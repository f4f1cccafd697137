//! Simulation tick
//!
//! Advances the game state by one fixed step. Steps run in a fixed order;
//! later steps see the results of earlier ones within the same tick.

use super::collision::{is_stomp, lands_on, within_pickup};
use super::state::{Facing, GameState, RunStatus};
use crate::input::TickInput;
use crate::tuning::Tuning;

/// Advance the game state by one tick.
///
/// Does nothing while paused or before the run has started, so a frozen
/// state is left exactly as it was. `now_ms` is the host timestamp used
/// for the invulnerability window.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, now_ms: f64) {
    if state.world.paused || state.world.status != RunStatus::Running {
        return;
    }

    steer(state, input, tuning);
    integrate(state, tuning);
    resolve_ground(state);
    resolve_platforms(state, tuning);
    collect_coins(state, tuning);
    update_enemies(state, tuning, now_ms);
    check_fall_out(state, tuning);
}

/// Horizontal acceleration/friction and jumping
fn steer(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let p = &mut state.player;

    // Left wins when both are held
    if input.left {
        p.vel.x = (p.vel.x - tuning.accel).max(-tuning.max_vx);
        p.facing = Facing::Left;
    } else if input.right {
        p.vel.x = (p.vel.x + tuning.accel).min(tuning.max_vx);
        p.facing = Facing::Right;
    } else {
        p.vel.x *= tuning.friction;
        if p.vel.x.abs() < tuning.stop_epsilon {
            p.vel.x = 0.0;
        }
    }

    // Holding jump in the air does nothing until grounded again
    if input.jump && p.on_ground {
        p.vel.y = tuning.jump_vy;
        p.on_ground = false;
    }
}

/// Gravity, Euler step and horizontal world bounds
fn integrate(state: &mut GameState, tuning: &Tuning) {
    let max_x = state.world.width - state.player.size.x;
    let p = &mut state.player;

    // Gravity always accumulates; ground and platforms cancel it below
    p.vel.y += tuning.gravity;

    p.prev_y = p.pos.y;
    p.pos += p.vel;
    p.pos.x = p.pos.x.max(0.0).min(max_x);
}

fn resolve_ground(state: &mut GameState) {
    let ground_y = state.world.ground_y;
    let p = &mut state.player;
    if p.pos.y + p.size.y >= ground_y {
        p.pos.y = ground_y - p.size.y;
        p.vel.y = 0.0;
        p.on_ground = true;
    } else {
        p.on_ground = false;
    }
}

/// One-way platforms: land only when coming down from above.
/// Platforms are checked independently; the last match wins.
fn resolve_platforms(state: &mut GameState, tuning: &Tuning) {
    let p = &mut state.player;
    let prev_bottom = p.prev_y + p.size.y;
    for platform in &state.platforms {
        if lands_on(&p.rect(), prev_bottom, p.vel.y, platform, tuning.land_band) {
            p.pos.y = platform.y - p.size.y;
            p.vel.y = 0.0;
            p.on_ground = true;
        }
    }
}

fn collect_coins(state: &mut GameState, tuning: &Tuning) {
    let body = state.player.rect();
    for coin in state.coins.iter_mut().filter(|c| !c.taken) {
        if within_pickup(&body, coin.pos, coin.radius, tuning.pickup_margin) {
            coin.taken = true;
            state.player.coins += 1;
            state.player.score += tuning.coin_score;
            log::debug!("Coin collected at ({}, {})", coin.pos.x, coin.pos.y);
        }
    }
}

/// Patrol enemies, then resolve contact as a stomp or a hit
fn update_enemies(state: &mut GameState, tuning: &Tuning, now_ms: f64) {
    let min_x = tuning.knockback_margin;
    let max_x = state.world.width - state.player.size.x - tuning.knockback_margin;

    for i in 0..state.enemies.len() {
        state.enemies[i].patrol();

        let enemy = state.enemies[i].rect();
        let body = state.player.rect();
        if !body.overlaps(&enemy) || state.player.is_invulnerable(now_ms) {
            continue;
        }

        let p = &mut state.player;
        if is_stomp(&body, p.vel.y, &enemy, tuning.stomp_depth) {
            // Enemies survive stomps and can be bounced on again
            p.vel.y = tuning.stomp_vy();
            p.score += tuning.stomp_score;
            log::debug!("Stomp, score {}", p.score);
        } else {
            p.invulnerable_until_ms = now_ms + tuning.invulnerable_ms;
            p.pos.x = (p.pos.x - tuning.knockback * p.facing.sign())
                .max(min_x)
                .min(max_x);
            log::debug!("Hit by enemy {}, {} lives left", i, p.lives.saturating_sub(1));
            state.lose_life();
        }
    }
}

/// Losing a life for dropping out of the world; respawn unless that was
/// the last one
pub(crate) fn check_fall_out(state: &mut GameState, tuning: &Tuning) {
    if state.world.paused || state.player.pos.y <= state.world.height + tuning.fall_margin {
        return;
    }
    if !state.lose_life() {
        log::debug!("Fell out of the world, respawning");
        state.partial_reset();
    }
}
