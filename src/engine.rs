//! Host-facing engine adapter
//!
//! Binds the simulation to a drawing surface and an injected score store,
//! buffers input intent between ticks, and hands read-only snapshots back
//! to the presentation layer. The host owns the clock: it calls
//! [`Engine::tick`] with elapsed seconds from its own redraw scheduler.

use glam::Vec2;

use crate::consts::*;
use crate::error::{EngineResult, validate_surface};
use crate::highscores::{ScoreStore, load_high_score, save_high_score};
use crate::sim::level::BACKGROUND_PALETTE;
use crate::sim::powerup::ActiveEffects;
use crate::sim::state::Color;
use crate::sim::{
    Ball, Block, GamePhase, GameState, GameStats, Paddle, Particle, PowerUp, TickInput, tick,
};

/// The host's drawing surface, reduced to what the core needs: dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Discrete (keyboard-style) paddle movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Left,
    Right,
}

/// One frame's worth of drawable state. Borrowed from the engine;
/// the presentation layer must not hold it across a tick.
pub struct Renderables<'a> {
    pub balls: &'a [Ball],
    pub paddle: &'a Paddle,
    pub blocks: &'a [Block],
    pub powerups: &'a [PowerUp],
    pub particles: &'a [Particle],
    /// Gradient stops for the current level background
    pub background: (Color, Color),
    /// Remaining-time map for active power-ups (see [`ActiveEffects::active`])
    pub effects: &'a ActiveEffects,
}

/// The game engine: owns the simulation state, consumes buffered input at
/// each tick, and persists the high score through the injected store.
pub struct Engine {
    state: GameState,
    input: TickInput,
    store: Box<dyn ScoreStore>,
    persisted_high_score: u64,
    destroyed: bool,
}

impl Engine {
    /// Bind the engine to a surface with a random run seed.
    pub fn new(surface: Surface, store: Box<dyn ScoreStore>) -> EngineResult<Self> {
        Self::with_seed(surface, store, rand::random())
    }

    /// Bind the engine to a surface with an explicit seed (reproducible runs).
    pub fn with_seed(
        surface: Surface,
        store: Box<dyn ScoreStore>,
        seed: u64,
    ) -> EngineResult<Self> {
        validate_surface(surface.width, surface.height)?;
        let high_score = load_high_score(store.as_ref());
        let playfield = Vec2::new(surface.width, surface.height);
        log::info!(
            "engine bound to {}x{} surface, seed {}",
            surface.width,
            surface.height,
            seed
        );
        Ok(Self {
            state: GameState::new(seed, playfield, high_score),
            input: TickInput::default(),
            store,
            persisted_high_score: high_score,
            destroyed: false,
        })
    }

    /// Queue the start command (no-op outside the start screen).
    pub fn start_game(&mut self) {
        self.input.start = true;
    }

    /// Queue a pause toggle.
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Space-equivalent command: starts, advances, or restarts depending on
    /// the current phase. Ignored while playing or paused.
    pub fn advance(&mut self) {
        match self.state.phase {
            GamePhase::StartScreen => self.input.start = true,
            GamePhase::LevelComplete => self.input.advance = true,
            GamePhase::GameOver => self.input.restart = true,
            _ => {}
        }
    }

    /// Point the paddle at an absolute x coordinate. Last write before the
    /// next tick wins; out-of-range values are clamped by the simulation.
    pub fn set_paddle_target_from_pointer(&mut self, x: f32) {
        self.input.paddle_target = Some(x);
    }

    /// Step the paddle by one discrete input increment.
    pub fn set_paddle_target_from_discrete(&mut self, dir: MoveDir) {
        let step = match dir {
            MoveDir::Left => -PADDLE_STEP,
            MoveDir::Right => PADDLE_STEP,
        };
        self.input.paddle_target = Some(self.state.paddle.center_x() + step);
    }

    /// Advance the simulation by `dt` seconds and persist a new high score
    /// if this tick produced one. The only mutating entry point.
    pub fn tick(&mut self, dt: f32) {
        debug_assert!(!self.destroyed, "tick called on a destroyed engine");
        if self.destroyed {
            return;
        }

        let dt = dt.clamp(0.0, MAX_TICK_DT);
        let input = self.input;
        // One-shot commands are consumed; the paddle target persists until
        // the next input event overwrites it
        self.input.start = false;
        self.input.pause = false;
        self.input.advance = false;
        self.input.restart = false;

        tick(&mut self.state, &input, dt);

        if self.state.stats.high_score > self.persisted_high_score {
            self.persisted_high_score = self.state.stats.high_score;
            save_high_score(self.store.as_mut(), self.persisted_high_score);
        }
    }

    /// Copy of the scalar run statistics.
    pub fn stats(&self) -> GameStats {
        self.state.stats
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether the simulation is actively ticking (host may idle otherwise).
    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    /// Blocks still standing in the current level.
    pub fn blocks_remaining(&self) -> usize {
        self.state.blocks_remaining()
    }

    /// Read-only view of everything the presentation layer draws.
    pub fn renderables(&self) -> Renderables<'_> {
        Renderables {
            balls: &self.state.balls,
            paddle: &self.state.paddle,
            blocks: &self.state.level.blocks,
            powerups: &self.state.powerups,
            particles: &self.state.particles,
            background: BACKGROUND_PALETTE[self.state.level.background],
            effects: &self.state.effects,
        }
    }

    /// Release the engine. Idempotent; further ticks are contract breaches.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.input = TickInput::default();
        log::info!("engine destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{MemoryScoreStore, STORAGE_KEY};

    const DT: f32 = 1.0 / 120.0;

    fn engine() -> Engine {
        Engine::with_seed(
            Surface::new(800.0, 600.0),
            Box::new(MemoryScoreStore::new()),
            99,
        )
        .unwrap()
    }

    #[test]
    fn test_construct_rejects_bad_surface() {
        let result = Engine::with_seed(
            Surface::new(0.0, 600.0),
            Box::new(MemoryScoreStore::new()),
            1,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_start_and_run() {
        let mut engine = engine();
        assert_eq!(engine.phase(), GamePhase::StartScreen);
        assert!(!engine.is_running());

        engine.start_game();
        engine.tick(DT);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.is_running());
        assert_eq!(engine.renderables().balls.len(), 1);
    }

    #[test]
    fn test_paddle_target_last_write_wins() {
        let mut engine = engine();
        engine.start_game();
        engine.tick(DT);

        engine.set_paddle_target_from_discrete(MoveDir::Left);
        engine.set_paddle_target_from_pointer(650.0);
        engine.tick(DT);

        let paddle = engine.renderables().paddle;
        assert!((paddle.center_x() - 650.0).abs() < 0.01);
    }

    #[test]
    fn test_discrete_input_steps_paddle() {
        let mut engine = engine();
        engine.start_game();
        engine.tick(DT);
        let before = engine.renderables().paddle.center_x();

        engine.set_paddle_target_from_discrete(MoveDir::Right);
        engine.tick(DT);
        let after = engine.renderables().paddle.center_x();
        assert!((after - (before + PADDLE_STEP)).abs() < 0.01);
    }

    #[test]
    fn test_high_score_persisted_when_exceeded() {
        let mut store = MemoryScoreStore::new();
        crate::highscores::save_high_score(&mut store, 50);

        let mut engine =
            Engine::with_seed(Surface::new(800.0, 600.0), Box::new(store), 7).unwrap();
        assert_eq!(engine.stats().high_score, 50);

        engine.start_game();
        engine.tick(DT);
        // Score below the stored value: no write
        engine.state.stats.score = 40;
        engine.tick(DT);
        assert_eq!(engine.stats().high_score, 50);

        engine.state.stats.score = 120;
        engine.tick(DT);
        assert_eq!(engine.stats().high_score, 120);
        let raw = engine.store.read(STORAGE_KEY).unwrap();
        assert!(raw.contains("120"));
    }

    #[test]
    fn test_pause_toggle_roundtrip() {
        let mut engine = engine();
        engine.start_game();
        engine.tick(DT);

        engine.toggle_pause();
        engine.tick(DT);
        assert_eq!(engine.phase(), GamePhase::Paused);
        assert!(!engine.is_running());

        engine.toggle_pause();
        engine.tick(DT);
        assert_eq!(engine.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut engine = engine();
        engine.destroy();
        engine.destroy();
    }

    #[test]
    #[should_panic(expected = "destroyed engine")]
    fn test_tick_after_destroy_asserts() {
        let mut engine = engine();
        engine.destroy();
        engine.tick(DT);
    }
}
