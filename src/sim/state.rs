//! Game state and core simulation types
//!
//! Entities are plain value types; the [`GameState`] owns every collection
//! and is mutated only by [`crate::sim::tick`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::Level;
use super::powerup::{ActiveEffects, PowerUpKind};
use crate::consts::*;

/// Packed 0xRRGGBB color. Presentation derives display colors from this
/// plus per-entity state (damage ratio, particle alpha).
pub type Color = u32;

pub const BALL_COLOR: Color = 0xff_ffff;
pub const PADDLE_COLOR: Color = 0x4d_d2ff;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start command
    StartScreen,
    /// Active gameplay
    Playing,
    /// Simulation frozen, entity state retained
    Paused,
    /// All blocks cleared, waiting for the advance command
    LevelComplete,
    /// Run ended
    GameOver,
    /// Reserved: no transition currently produces this phase
    Victory,
}

/// A ball entity. Position is the center.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Past positions for rendering, newest last
    pub trail: Vec<Vec2>,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            color: BALL_COLOR,
            trail: Vec::with_capacity(BALL_TRAIL_LENGTH),
        }
    }

    /// Append the current position to the trail, evicting the oldest point
    /// once the cap is exceeded.
    pub fn record_trail(&mut self) {
        self.trail.push(self.pos);
        if self.trail.len() > BALL_TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// The player's paddle. Position is the top-left corner.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    /// Width before any extend effect; restored on expiry and level reset
    pub base_width: f32,
    pub height: f32,
    pub color: Color,
}

impl Paddle {
    /// Create a paddle centered near the bottom of the playfield.
    pub fn new(playfield: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                (playfield.x - PADDLE_WIDTH) / 2.0,
                playfield.y - PADDLE_BOTTOM_MARGIN - PADDLE_HEIGHT,
            ),
            width: PADDLE_WIDTH,
            base_width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color: PADDLE_COLOR,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Clamp the paddle into the playfield's horizontal extent.
    pub fn clamp_to(&mut self, playfield_width: f32) {
        self.pos.x = self.pos.x.clamp(0.0, (playfield_width - self.width).max(0.0));
    }

    /// Drop any extend effect and re-center the widened area.
    pub fn restore_width(&mut self) {
        let center = self.center_x();
        self.width = self.base_width;
        self.pos.x = center - self.width / 2.0;
    }
}

/// A destructible block. Position is the top-left corner.
///
/// Blocks are never removed from the level while it is live, only flagged
/// destroyed. Mid-tick collision resolution relies on stable indices.
#[derive(Debug, Clone)]
pub struct Block {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub hp: u32,
    pub max_hp: u32,
    pub points: u64,
    /// Probability in [0,1] that destroying this block drops a power-up
    pub powerup_chance: f64,
    pub destroyed: bool,
}

impl Block {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Fraction of health lost, in [0,1]. The stored color is immutable;
    /// presentation darkens it by this ratio.
    pub fn damage_ratio(&self) -> f32 {
        if self.max_hp == 0 {
            return 1.0;
        }
        1.0 - self.hp as f32 / self.max_hp as f32
    }
}

/// A falling power-up capsule. Position is the center.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    pub size: f32,
    pub color: Color,
    pub active: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, POWERUP_FALL_SPEED),
            kind,
            size: POWERUP_SIZE,
            color: super::powerup::power_up_spec(kind).color,
            active: true,
        }
    }
}

/// A short-lived visual feedback particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Render alpha, 1 at spawn fading to 0 at end of life
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Scalar run statistics. Handed out by copy; the engine is the only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub combo: u32,
    pub high_score: u64,
}

impl GameStats {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            level: 1,
            combo: 0,
            high_score,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub stats: GameStats,
    /// Playfield dimensions in surface units
    pub playfield: Vec2,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub level: Level,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub effects: ActiveEffects,
    /// Seconds until a replacement ball launches, if one is scheduled.
    /// Fires only while Playing; pause and game-over leave it stale-proof.
    pub relaunch_timer: Option<f32>,
}

impl GameState {
    /// Create a fresh state on the start screen with level 1 laid out.
    pub fn new(seed: u64, playfield: Vec2, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = super::level::generate_level(&mut rng, 1, playfield.x);
        Self {
            seed,
            rng,
            phase: GamePhase::StartScreen,
            stats: GameStats::new(high_score),
            playfield,
            paddle: Paddle::new(playfield),
            balls: Vec::new(),
            level,
            powerups: Vec::new(),
            particles: Vec::new(),
            effects: ActiveEffects::new(),
            relaunch_timer: None,
        }
    }

    /// Launch a ball above the paddle at the level's speed, angled slightly
    /// off vertical. Balls launched while ball-slow is active inherit the
    /// damping so expiry restores every ball uniformly.
    pub fn launch_ball(&mut self) {
        let angle = self.rng.random_range(-0.3_f32..0.3);
        let mut speed = self.level.ball_speed;
        if self.effects.is_active(PowerUpKind::BallSlow) {
            speed *= BALL_SLOW_FACTOR;
        }
        let vel = Vec2::new(angle.sin(), -angle.cos()) * speed;
        let pos = Vec2::new(
            self.paddle.center_x(),
            self.paddle.pos.y - BALL_RADIUS - 2.0,
        );
        self.balls.push(Ball::new(pos, vel));
    }

    /// Count of blocks still standing in the current level
    pub fn blocks_remaining(&self) -> usize {
        self.level.blocks.iter().filter(|b| !b.destroyed).count()
    }

    /// Clear per-attempt entities, retaining stats and the block field.
    pub fn reset_attempt(&mut self) {
        self.balls.clear();
        self.powerups.clear();
        self.effects = ActiveEffects::new();
        self.paddle.restore_width();
        self.relaunch_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_bounded() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(0.0, -100.0));
        for i in 0..(BALL_TRAIL_LENGTH * 2) {
            ball.pos = Vec2::new(i as f32, 0.0);
            ball.record_trail();
        }
        assert_eq!(ball.trail.len(), BALL_TRAIL_LENGTH);
        // Oldest evicted, newest kept
        assert_eq!(ball.trail.last().unwrap().x, (BALL_TRAIL_LENGTH * 2 - 1) as f32);
        assert_eq!(ball.trail[0].x, BALL_TRAIL_LENGTH as f32);
    }

    #[test]
    fn test_paddle_clamp() {
        let playfield = Vec2::new(800.0, 600.0);
        let mut paddle = Paddle::new(playfield);
        paddle.pos.x = -50.0;
        paddle.clamp_to(playfield.x);
        assert_eq!(paddle.pos.x, 0.0);

        paddle.pos.x = 10_000.0;
        paddle.clamp_to(playfield.x);
        assert_eq!(paddle.pos.x, playfield.x - paddle.width);
    }

    #[test]
    fn test_damage_ratio_derived() {
        let mut block = Block {
            pos: Vec2::ZERO,
            width: 70.0,
            height: 25.0,
            color: 0xff0000,
            hp: 2,
            max_hp: 2,
            points: 10,
            powerup_chance: 0.1,
            destroyed: false,
        };
        assert_eq!(block.damage_ratio(), 0.0);
        let color_before = block.color;
        block.hp = 1;
        assert!((block.damage_ratio() - 0.5).abs() < f32::EPSILON);
        // Stored color never mutates with damage
        assert_eq!(block.color, color_before);
    }

    #[test]
    fn test_launch_ball_upward_at_level_speed() {
        let mut state = GameState::new(7, Vec2::new(800.0, 600.0), 0);
        state.launch_ball();
        let ball = &state.balls[0];
        assert!(ball.vel.y < 0.0);
        assert!((ball.vel.length() - state.level.ball_speed).abs() < 0.01);
    }
}
