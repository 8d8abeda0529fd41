//! Brick Blitz - a block-breaker arcade engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `engine`: Host-facing adapter (surface binding, input intent, snapshots)
//! - `highscores`: Single-scalar high score persistence
//! - `error`: Engine error types
//!
//! The crate owns time integration, collision geometry, and the game-state
//! machine. Rendering, audio, and page chrome are external collaborators:
//! the host drives `Engine::tick` with elapsed seconds and reads entity
//! snapshots back for drawing.

pub mod engine;
pub mod error;
pub mod highscores;
pub mod sim;

pub use engine::{Engine, MoveDir, Renderables, Surface};
pub use error::{EngineError, EngineResult};
pub use highscores::{MemoryScoreStore, ScoreStore};

/// Game configuration constants
pub mod consts {
    /// Largest tick delta the engine will integrate in one call (seconds).
    /// Longer host stalls are clamped rather than tunneled through.
    pub const MAX_TICK_DT: f32 = 0.05;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Hard cap on extended paddle width
    pub const PADDLE_MAX_WIDTH: f32 = 160.0;
    /// Width multiplier applied by the paddle-extend power-up
    pub const PADDLE_EXTEND_FACTOR: f32 = 1.5;
    /// Gap between paddle and playfield bottom edge
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;
    /// Horizontal step per discrete (keyboard) input event
    pub const PADDLE_STEP: f32 = 48.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Maximum ball speed after any tick
    pub const BALL_MAX_SPEED: f32 = 700.0;
    /// Trail points kept per ball (rendering only)
    pub const BALL_TRAIL_LENGTH: usize = 10;
    /// Maximum paddle reflection angle from vertical (radians, 60 degrees)
    pub const MAX_REFLECT_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Block grid layout
    pub const BLOCK_ROWS: u32 = 5;
    pub const BLOCK_COLS: u32 = 10;
    pub const BLOCK_WIDTH: f32 = 70.0;
    pub const BLOCK_HEIGHT: f32 = 25.0;
    pub const BLOCK_GAP: f32 = 8.0;
    /// Distance from playfield top to the first block row
    pub const BLOCK_TOP_OFFSET: f32 = 60.0;
    /// Base points for the shallowest row; deeper rows scale up
    pub const BLOCK_POINTS_PER_ROW: u64 = 10;
    /// Chance a grid cell is left empty on levels past the first
    pub const BLOCK_SKIP_CHANCE: f64 = 0.25;

    /// Level difficulty curve
    pub const LEVEL_SPEED_BASE: f32 = 300.0;
    pub const LEVEL_SPEED_STEP: f32 = 25.0;
    /// Ball speed cap across levels (escalation is bounded)
    pub const LEVEL_SPEED_CAP: f32 = 550.0;
    pub const POWERUP_CHANCE_BASE: f64 = 0.10;
    pub const POWERUP_CHANCE_STEP: f64 = 0.02;
    /// Drop chance cap across levels
    pub const POWERUP_CHANCE_CAP: f64 = 0.50;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 14.0;
    pub const POWERUP_FALL_SPEED: f32 = 140.0;
    /// Velocity factor applied by the ball-slow power-up
    pub const BALL_SLOW_FACTOR: f32 = 0.5;
    /// Flat score awarded by the bonus-points power-up
    pub const BONUS_POINTS_AMOUNT: u64 = 500;
    /// Divergence of the two extra multi-ball spawns (radians, ~45 degrees)
    pub const MULTI_BALL_SPLIT_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Particle defaults
    pub const PARTICLE_GRAVITY: f32 = 400.0;
    pub const BLOCK_BURST_COUNT: usize = 12;
    pub const PICKUP_BURST_COUNT: usize = 8;

    /// Scoring
    pub const COMBO_HITS_PER_STEP: u32 = 3;
    pub const COMBO_MULTIPLIER_CAP: u64 = 5;

    /// Run defaults
    pub const START_LIVES: u32 = 3;
    /// Delay before a replacement ball launches after losing all balls
    pub const RELAUNCH_DELAY: f32 = 1.0;
}

/// Linear interpolation between `a` and `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
