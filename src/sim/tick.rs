//! Per-tick simulation update
//!
//! The tick is the only mutator of [`GameState`]. Input arrives as an
//! intent snapshot assembled by the host between ticks; commands are
//! one-shot flags, the paddle target is last-write-wins.
//!
//! Playing-phase update order: paddle → ball integration and walls →
//! bottom cull → paddle bounce → block hits → speed clamp → power-ups →
//! particles → effect timers → relaunch timer → end-of-tick evaluations.

use super::collision::{
    ball_block_collision, ball_paddle_collision, block_collision_side, paddle_reflection,
};
use super::particles::{spawn_burst, update_particles};
use super::powerup::{PowerUpKind, apply_power_up, expire_power_up};
use super::state::{GamePhase, GameState, GameStats, PowerUp};
use crate::consts::*;
use rand::Rng;

/// Input intent for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Desired paddle center x, already resolved from pointer or discrete
    /// input by the host adapter. Last write before the tick wins.
    pub paddle_target: Option<f32>,
    /// Start command (start screen only)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Advance to the next level (level-complete only)
    pub advance: bool,
    /// Restart the run (game-over only)
    pub restart: bool,
}

/// Score multiplier for the current combo count (hits so far this rally).
#[inline]
pub fn combo_multiplier(combo: u32) -> u64 {
    ((combo / COMBO_HITS_PER_STEP) as u64 + 1).min(COMBO_MULTIPLIER_CAP)
}

/// Award a block hit: combo-scaled score, then the combo grows.
fn score_block_hit(stats: &mut GameStats, points: u64) {
    stats.score += points * combo_multiplier(stats.combo);
    stats.combo += 1;
}

/// Advance the game state by one step of `dt` seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("resumed");
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::StartScreen => {
            if input.start {
                start_run(state);
            }
        }
        GamePhase::LevelComplete => {
            if input.advance {
                advance_level(state);
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                restart_run(state);
            }
        }
        GamePhase::Playing => update_playing(state, input, dt),
        GamePhase::Paused | GamePhase::Victory => {}
    }
}

fn start_run(state: &mut GameState) {
    state.stats = GameStats::new(state.stats.high_score);
    state.level = super::level::generate_level(&mut state.rng, 1, state.playfield.x);
    state.reset_attempt();
    state.launch_ball();
    state.phase = GamePhase::Playing;
    log::info!("run started");
}

fn advance_level(state: &mut GameState) {
    state.stats.level += 1;
    state.level =
        super::level::generate_level(&mut state.rng, state.stats.level, state.playfield.x);
    state.reset_attempt();
    state.launch_ball();
    state.phase = GamePhase::Playing;
}

fn restart_run(state: &mut GameState) {
    state.stats = GameStats::new(state.stats.high_score);
    state.level = super::level::generate_level(&mut state.rng, 1, state.playfield.x);
    state.reset_attempt();
    state.launch_ball();
    state.phase = GamePhase::Playing;
    log::info!("run restarted");
}

fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    // Paddle follows the input target; out-of-range targets just clamp
    if let Some(target) = input.paddle_target {
        state.paddle.pos.x = target - state.paddle.width / 2.0;
    }
    state.paddle.clamp_to(state.playfield.x);

    // Integrate balls and resolve wall bounces (elastic, with clamping)
    let field = state.playfield;
    for ball in state.balls.iter_mut() {
        ball.pos += ball.vel * dt;
        ball.record_trail();

        if ball.left() < 0.0 {
            ball.vel.x = ball.vel.x.abs();
            ball.pos.x = ball.radius;
        } else if ball.right() > field.x {
            ball.vel.x = -ball.vel.x.abs();
            ball.pos.x = field.x - ball.radius;
        }
        if ball.top() < 0.0 {
            ball.vel.y = ball.vel.y.abs();
            ball.pos.y = ball.radius;
        }
    }

    // Balls fully below the bottom edge are lost
    state.balls.retain(|b| b.top() <= field.y);

    // Paddle and block resolution per surviving ball
    for ball in state.balls.iter_mut() {
        // Only bounce a descending ball so it can't stick inside the paddle
        if ball.vel.y > 0.0 && ball_paddle_collision(ball, &state.paddle) {
            ball.vel = paddle_reflection(ball, &state.paddle);
            state.stats.combo = 0;
        }

        // One block hit per ball per tick; blocks stay in place (flagged,
        // never removed) so indices remain stable through the scan
        for block in state.level.blocks.iter_mut() {
            if !ball_block_collision(ball, block) {
                continue;
            }
            ball.vel = block_collision_side(ball, block).reflect(ball.vel);
            block.hp = block.hp.saturating_sub(1);
            score_block_hit(&mut state.stats, block.points);

            if block.hp == 0 {
                block.destroyed = true;
                state.particles.extend(spawn_burst(
                    &mut state.rng,
                    block.center(),
                    BLOCK_BURST_COUNT,
                    block.color,
                    160.0,
                    0.6,
                ));
                if state.rng.random_bool(block.powerup_chance) {
                    let kind = PowerUpKind::ALL
                        [state.rng.random_range(0..PowerUpKind::ALL.len())];
                    state.powerups.push(PowerUp::new(block.center(), kind));
                }
            }
            break;
        }

        // Speed clamp invariant
        let speed = ball.vel.length();
        if speed > BALL_MAX_SPEED {
            ball.vel = ball.vel.normalize_or_zero() * BALL_MAX_SPEED;
        }
    }

    // Power-ups fall, get picked up, or leave the field
    let mut collected: Vec<(PowerUpKind, glam::Vec2)> = Vec::new();
    for powerup in state.powerups.iter_mut() {
        powerup.pos += powerup.vel * dt;

        let half = powerup.size / 2.0;
        let overlaps_paddle = powerup.pos.x + half > state.paddle.pos.x
            && powerup.pos.x - half < state.paddle.pos.x + state.paddle.width
            && powerup.pos.y + half > state.paddle.pos.y
            && powerup.pos.y - half < state.paddle.pos.y + state.paddle.height;

        if overlaps_paddle {
            collected.push((powerup.kind, powerup.pos));
            powerup.active = false;
        } else if powerup.pos.y - half > field.y {
            powerup.active = false;
        }
    }
    state.powerups.retain(|p| p.active);

    for (kind, pos) in collected {
        apply_power_up(state, kind);
        let color = super::powerup::power_up_spec(kind).color;
        state
            .particles
            .extend(spawn_burst(&mut state.rng, pos, PICKUP_BURST_COUNT, color, 120.0, 0.5));
    }

    update_particles(&mut state.particles, dt);

    // Timed effects revert exactly once on expiry
    for kind in state.effects.decay(dt) {
        expire_power_up(state, kind);
    }

    // Scheduled relaunch lives in state and only fires while Playing,
    // so pauses and phase changes can never race it
    if let Some(timer) = state.relaunch_timer.as_mut() {
        *timer -= dt;
        if *timer <= 0.0 {
            state.relaunch_timer = None;
            state.launch_ball();
        }
    }

    // End-of-tick evaluations
    if state.blocks_remaining() == 0 {
        state.phase = GamePhase::LevelComplete;
        state.relaunch_timer = None;
        log::info!("level {} complete, score {}", state.stats.level, state.stats.score);
    } else if state.balls.is_empty() && state.relaunch_timer.is_none() {
        state.stats.lives = state.stats.lives.saturating_sub(1);
        state.stats.combo = 0;
        if state.stats.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("game over, final score {}", state.stats.score);
        } else {
            state.relaunch_timer = Some(RELAUNCH_DELAY);
            log::debug!("ball lost, {} lives left", state.stats.lives);
        }
    }

    if state.stats.score > state.stats.high_score {
        state.stats.high_score = state.stats.score;
    }
}
