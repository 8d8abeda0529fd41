//! Power-up kinds and their effect registry
//!
//! Each kind is a table entry with an activation handler and, for timed
//! effects, a duration plus a deactivation handler. Adding a kind means
//! adding a row, not editing a branch chain. At most one instance of a
//! kind is active at a time: re-pickup resets the remaining duration and
//! never re-applies the effect.

use glam::Vec2;

use super::state::{Ball, Color, GameState};
use crate::consts::*;

/// The fixed power-up enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    MultiBall,
    PaddleExtend,
    BallSlow,
    BonusPoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::MultiBall,
        PowerUpKind::PaddleExtend,
        PowerUpKind::BallSlow,
        PowerUpKind::BonusPoints,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            PowerUpKind::MultiBall => 0,
            PowerUpKind::PaddleExtend => 1,
            PowerUpKind::BallSlow => 2,
            PowerUpKind::BonusPoints => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpKind::MultiBall => "multi-ball",
            PowerUpKind::PaddleExtend => "paddle-extend",
            PowerUpKind::BallSlow => "ball-slow",
            PowerUpKind::BonusPoints => "bonus-points",
        }
    }
}

/// One registry row: how a kind looks and behaves
pub struct PowerUpSpec {
    pub kind: PowerUpKind,
    pub color: Color,
    /// Seconds the effect stays active; None for instantaneous effects
    pub duration: Option<f32>,
    pub activate: fn(&mut GameState),
    pub deactivate: Option<fn(&mut GameState)>,
}

static POWER_UPS: [PowerUpSpec; 4] = [
    PowerUpSpec {
        kind: PowerUpKind::MultiBall,
        color: 0xff_cc33,
        duration: None,
        activate: activate_multi_ball,
        deactivate: None,
    },
    PowerUpSpec {
        kind: PowerUpKind::PaddleExtend,
        color: 0x33_ff77,
        duration: Some(10.0),
        activate: activate_paddle_extend,
        deactivate: Some(deactivate_paddle_extend),
    },
    PowerUpSpec {
        kind: PowerUpKind::BallSlow,
        color: 0x33_99ff,
        duration: Some(8.0),
        activate: activate_ball_slow,
        deactivate: Some(deactivate_ball_slow),
    },
    PowerUpSpec {
        kind: PowerUpKind::BonusPoints,
        color: 0xff_66cc,
        duration: None,
        activate: activate_bonus_points,
        deactivate: None,
    },
];

/// Look up the registry row for a kind.
pub fn power_up_spec(kind: PowerUpKind) -> &'static PowerUpSpec {
    &POWER_UPS[kind.index()]
}

/// Per-kind remaining effect durations. At most one active instance per
/// kind; instantaneous kinds never appear here.
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    remaining: [f32; PowerUpKind::ALL.len()],
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining[kind.index()] > 0.0
    }

    #[inline]
    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        self.remaining[kind.index()]
    }

    fn set(&mut self, kind: PowerUpKind, duration: f32) {
        self.remaining[kind.index()] = duration;
    }

    /// Decay all timers, returning the kinds that expired this call.
    /// Each expiry is reported exactly once.
    pub fn decay(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = &mut self.remaining[kind.index()];
            if *slot > 0.0 {
                *slot -= dt;
                if *slot <= 0.0 {
                    *slot = 0.0;
                    expired.push(kind);
                }
            }
        }
        expired
    }

    /// Iterate currently active kinds with their remaining seconds.
    pub fn active(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .filter(|k| self.is_active(*k))
            .map(|k| (k, self.remaining(k)))
    }
}

/// Apply a picked-up power-up to the game state.
///
/// Timed kinds that are already active only get their timer reset; the
/// effect itself is applied exactly once per activation window so that
/// deactivation reverses it exactly once.
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let spec = power_up_spec(kind);
    match spec.duration {
        Some(duration) => {
            if state.effects.is_active(kind) {
                log::debug!("power-up {} refreshed", kind.as_str());
            } else {
                (spec.activate)(state);
                log::debug!("power-up {} activated", kind.as_str());
            }
            state.effects.set(kind, duration);
        }
        None => {
            (spec.activate)(state);
            log::debug!("power-up {} applied", kind.as_str());
        }
    }
}

/// Revert an expired timed power-up. Called once per expiry from the tick.
pub fn expire_power_up(state: &mut GameState, kind: PowerUpKind) {
    if let Some(deactivate) = power_up_spec(kind).deactivate {
        deactivate(state);
        log::debug!("power-up {} expired", kind.as_str());
    }
}

fn activate_multi_ball(state: &mut GameState) {
    // Split two extra balls off the first live ball
    let Some(source) = state.balls.first().cloned() else {
        return;
    };
    let speed = source.vel.length();
    for angle in [MULTI_BALL_SPLIT_ANGLE, -MULTI_BALL_SPLIT_ANGLE] {
        let dir = Vec2::from_angle(angle).rotate(source.vel.normalize_or_zero());
        state.balls.push(Ball::new(source.pos, dir * speed));
    }
}

fn activate_paddle_extend(state: &mut GameState) {
    // Width always derives from base width so repeated pickups can't compound
    let center = state.paddle.center_x();
    state.paddle.width =
        (state.paddle.base_width * PADDLE_EXTEND_FACTOR).min(PADDLE_MAX_WIDTH);
    state.paddle.pos.x = center - state.paddle.width / 2.0;
    state.paddle.clamp_to(state.playfield.x);
}

fn deactivate_paddle_extend(state: &mut GameState) {
    state.paddle.restore_width();
    state.paddle.clamp_to(state.playfield.x);
}

fn activate_ball_slow(state: &mut GameState) {
    for ball in &mut state.balls {
        ball.vel *= BALL_SLOW_FACTOR;
    }
}

fn deactivate_ball_slow(state: &mut GameState) {
    // Balls launched during the effect carried the factor too, so the
    // reciprocal restores the whole set; the global speed clamp still
    // applies afterwards.
    for ball in &mut state.balls {
        ball.vel /= BALL_SLOW_FACTOR;
        let speed = ball.vel.length();
        if speed > BALL_MAX_SPEED {
            ball.vel = ball.vel.normalize_or_zero() * BALL_MAX_SPEED;
        }
    }
}

fn activate_bonus_points(state: &mut GameState) {
    state.stats.score += BONUS_POINTS_AMOUNT;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Vec2::new(800.0, 600.0), 0);
        state.launch_ball();
        state
    }

    #[test]
    fn test_multi_ball_spawns_two_divergent_balls() {
        let mut state = playing_state();
        let speed = state.balls[0].vel.length();

        apply_power_up(&mut state, PowerUpKind::MultiBall);
        assert_eq!(state.balls.len(), 3);
        for ball in &state.balls[1..] {
            assert!((ball.vel.length() - speed).abs() < 0.01);
            assert_eq!(ball.pos, state.balls[0].pos);
        }
        assert_ne!(state.balls[1].vel, state.balls[2].vel);
    }

    #[test]
    fn test_paddle_extend_caps_and_never_compounds() {
        let mut state = playing_state();
        let base = state.paddle.base_width;

        apply_power_up(&mut state, PowerUpKind::PaddleExtend);
        let extended = state.paddle.width;
        assert!((extended - (base * PADDLE_EXTEND_FACTOR).min(PADDLE_MAX_WIDTH)).abs() < 1e-4);

        // Second pickup before expiry: width unchanged, timer back to full
        let spec_duration = power_up_spec(PowerUpKind::PaddleExtend).duration.unwrap();
        state.effects.decay(spec_duration / 2.0);
        apply_power_up(&mut state, PowerUpKind::PaddleExtend);
        assert!((state.paddle.width - extended).abs() < 1e-4);
        assert!((state.effects.remaining(PowerUpKind::PaddleExtend) - spec_duration).abs() < 1e-4);
    }

    #[test]
    fn test_ball_slow_reverts_exactly_once() {
        let mut state = playing_state();
        let speed = state.balls[0].vel.length();

        apply_power_up(&mut state, PowerUpKind::BallSlow);
        assert!((state.balls[0].vel.length() - speed * BALL_SLOW_FACTOR).abs() < 0.01);

        // A ball launched mid-effect inherits the damping
        state.launch_ball();
        let slowed_launch = state.balls.last().unwrap().vel.length();
        assert!((slowed_launch - state.level.ball_speed * BALL_SLOW_FACTOR).abs() < 0.01);

        for kind in state.effects.decay(100.0) {
            expire_power_up(&mut state, kind);
        }
        assert!((state.balls[0].vel.length() - speed).abs() < 0.01);
        assert!((state.balls[1].vel.length() - state.level.ball_speed).abs() < 0.01);
    }

    #[test]
    fn test_bonus_points_is_instant_with_no_timer() {
        let mut state = playing_state();
        apply_power_up(&mut state, PowerUpKind::BonusPoints);
        assert_eq!(state.stats.score, BONUS_POINTS_AMOUNT);
        assert!(!state.effects.is_active(PowerUpKind::BonusPoints));
    }

    #[test]
    fn test_decay_reports_expiry_exactly_once() {
        let mut effects = ActiveEffects::new();
        effects.set(PowerUpKind::BallSlow, 1.0);
        assert!(effects.decay(0.5).is_empty());
        assert_eq!(effects.decay(0.6), vec![PowerUpKind::BallSlow]);
        assert!(effects.decay(0.5).is_empty());
    }
}
