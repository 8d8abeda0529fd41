//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Advances only through `tick` with a caller-supplied delta
//! - Seeded RNG only
//! - No rendering, storage, or platform dependencies

pub mod collision;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{
    Side, ball_block_collision, ball_paddle_collision, block_collision_side, paddle_reflection,
};
pub use level::{Level, generate_level};
pub use particles::{spawn_burst, update_particles};
pub use powerup::{ActiveEffects, PowerUpKind, power_up_spec};
pub use state::{Ball, Block, GamePhase, GameState, GameStats, Paddle, Particle, PowerUp};
pub use tick::{TickInput, tick};
