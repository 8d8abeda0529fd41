//! Burst particles for block destruction and power-up pickups
//!
//! Purely visual: nothing in here feeds back into gameplay. Bursts fan out
//! over the full circle with jittered angles and speeds, then fall under a
//! constant gravity until their life runs out.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Color, Particle};
use crate::consts::PARTICLE_GRAVITY;

/// Size range for freshly spawned particles
const SIZE_RANGE: std::ops::Range<f32> = 2.0..6.0;
/// Angular jitter around each evenly spaced base angle (radians)
const ANGLE_JITTER: f32 = 0.35;
/// Speed multiplier jitter bounds
const SPEED_JITTER_MIN: f32 = 0.6;
const SPEED_JITTER_MAX: f32 = 1.4;

/// Emit `count` particles from `origin` in a full-circle fan.
pub fn spawn_burst(
    rng: &mut Pcg32,
    origin: Vec2,
    count: usize,
    color: Color,
    speed: f32,
    life: f32,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let base_angle = std::f32::consts::TAU * (i as f32 / count.max(1) as f32);
        let angle = base_angle + rng.random_range(-ANGLE_JITTER..ANGLE_JITTER);
        let particle_speed = speed * crate::lerp(SPEED_JITTER_MIN, SPEED_JITTER_MAX, rng.random());
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * particle_speed,
            color,
            size: rng.random_range(SIZE_RANGE),
            life,
            max_life: life,
        });
    }
    particles
}

/// Integrate, apply gravity, decay life, and drop dead particles.
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y += PARTICLE_GRAVITY * dt;
        particle.life -= dt;
    }
    particles.retain(|p| p.life > 0.0);
}
