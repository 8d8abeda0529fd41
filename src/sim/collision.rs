//! Collision detection and response
//!
//! Everything is axis-aligned: balls collide as their bounding square
//! (center ± radius) against paddle and block rectangles. Reflection off
//! the paddle is angle-from-offset rather than a physical bounce - hits
//! farther from center leave at steeper angles, which is the skill
//! mechanic of the genre.

use glam::Vec2;

use super::state::{Ball, Block, Paddle};
use crate::consts::MAX_REFLECT_ANGLE;

/// Which face of a block the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Reflect a velocity off this face: vertical faces invert the
    /// vertical component, horizontal faces invert the horizontal one.
    #[inline]
    pub fn reflect(self, vel: Vec2) -> Vec2 {
        match self {
            Side::Top | Side::Bottom => Vec2::new(vel.x, -vel.y),
            Side::Left | Side::Right => Vec2::new(-vel.x, vel.y),
        }
    }
}

#[inline]
fn aabb_overlap(
    a_min: Vec2,
    a_max: Vec2,
    b_min: Vec2,
    b_max: Vec2,
) -> bool {
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// True iff the ball's bounding square overlaps the paddle. No side effects.
pub fn ball_paddle_collision(ball: &Ball, paddle: &Paddle) -> bool {
    aabb_overlap(
        Vec2::new(ball.left(), ball.top()),
        Vec2::new(ball.right(), ball.bottom()),
        paddle.pos,
        paddle.pos + Vec2::new(paddle.width, paddle.height),
    )
}

/// True iff the ball overlaps a still-standing block.
pub fn ball_block_collision(ball: &Ball, block: &Block) -> bool {
    if block.destroyed {
        return false;
    }
    aabb_overlap(
        Vec2::new(ball.left(), ball.top()),
        Vec2::new(ball.right(), ball.bottom()),
        block.pos,
        block.pos + Vec2::new(block.width, block.height),
    )
}

/// Compute the post-bounce velocity for a paddle hit.
///
/// The ball's horizontal offset from paddle center, normalized by the half
/// width and clamped to [-1, 1], maps linearly to a reflection angle within
/// ±60° of vertical. Speed is preserved and the result always points up.
pub fn paddle_reflection(ball: &Ball, paddle: &Paddle) -> Vec2 {
    let half_width = paddle.width / 2.0;
    let offset = ((ball.pos.x - paddle.center_x()) / half_width).clamp(-1.0, 1.0);
    let angle = offset * MAX_REFLECT_ANGLE;
    let speed = ball.vel.length();
    Vec2::new(angle.sin(), -angle.cos()) * speed
}

/// Classify which face of a block the ball hit.
///
/// The ball-to-block-center offset is normalized by the block half extents;
/// the axis with the larger normalized magnitude decides horizontal vs
/// vertical, its sign decides the side. An approximation, not a swept test:
/// acceptable while ball steps stay small relative to block size.
pub fn block_collision_side(ball: &Ball, block: &Block) -> Side {
    let center = block.center();
    let dx = (ball.pos.x - center.x) / (block.width / 2.0);
    let dy = (ball.pos.y - center.y) / (block.height / 2.0);

    if dx.abs() > dy.abs() {
        if dx < 0.0 { Side::Left } else { Side::Right }
    } else if dy < 0.0 {
        Side::Top
    } else {
        Side::Bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_RADIUS, MAX_REFLECT_ANGLE};
    use glam::Vec2;
    use proptest::prelude::*;

    fn test_paddle() -> Paddle {
        Paddle::new(Vec2::new(800.0, 600.0))
    }

    fn test_block(pos: Vec2) -> Block {
        Block {
            pos,
            width: 70.0,
            height: 25.0,
            color: 0xff8800,
            hp: 1,
            max_hp: 1,
            points: 10,
            powerup_chance: 0.0,
            destroyed: false,
        }
    }

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(pos, vel)
    }

    #[test]
    fn test_ball_paddle_overlap() {
        let paddle = test_paddle();
        let center = Vec2::new(paddle.center_x(), paddle.pos.y + paddle.height / 2.0);
        assert!(ball_paddle_collision(&ball_at(center, Vec2::ZERO), &paddle));

        let far = center - Vec2::new(0.0, 100.0);
        assert!(!ball_paddle_collision(&ball_at(far, Vec2::ZERO), &paddle));
    }

    #[test]
    fn test_destroyed_block_never_collides() {
        let mut block = test_block(Vec2::new(100.0, 100.0));
        let ball = ball_at(block.center(), Vec2::ZERO);
        assert!(ball_block_collision(&ball, &block));
        block.destroyed = true;
        assert!(!ball_block_collision(&ball, &block));
    }

    #[test]
    fn test_center_hit_reflects_straight_up() {
        let paddle = test_paddle();
        let ball = ball_at(
            Vec2::new(paddle.center_x(), paddle.pos.y - BALL_RADIUS),
            Vec2::new(0.0, 300.0),
        );
        let out = paddle_reflection(&ball, &paddle);
        assert!(out.x.abs() < 1e-4);
        assert!((out.y - (-300.0)).abs() < 1e-3);
    }

    #[test]
    fn test_edge_hit_reflects_at_max_angle() {
        let paddle = test_paddle();
        let ball = ball_at(
            Vec2::new(paddle.pos.x + paddle.width, paddle.pos.y - BALL_RADIUS),
            Vec2::new(0.0, 300.0),
        );
        let out = paddle_reflection(&ball, &paddle);
        let angle = out.x.atan2(-out.y);
        assert!((angle - MAX_REFLECT_ANGLE).abs() < 1e-4);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_block_side_classification() {
        let block = test_block(Vec2::new(100.0, 100.0));
        let center = block.center();

        let from_above = ball_at(center - Vec2::new(0.0, 20.0), Vec2::ZERO);
        assert_eq!(block_collision_side(&from_above, &block), Side::Top);

        let from_below = ball_at(center + Vec2::new(0.0, 20.0), Vec2::ZERO);
        assert_eq!(block_collision_side(&from_below, &block), Side::Bottom);

        let from_left = ball_at(center - Vec2::new(40.0, 0.0), Vec2::ZERO);
        assert_eq!(block_collision_side(&from_left, &block), Side::Left);

        let from_right = ball_at(center + Vec2::new(40.0, 0.0), Vec2::ZERO);
        assert_eq!(block_collision_side(&from_right, &block), Side::Right);
    }

    #[test]
    fn test_side_reflection_inverts_one_axis() {
        let vel = Vec2::new(120.0, -340.0);
        assert_eq!(Side::Top.reflect(vel), Vec2::new(120.0, 340.0));
        assert_eq!(Side::Left.reflect(vel), Vec2::new(-120.0, -340.0));
    }

    proptest! {
        /// Paddle reflection preserves speed and always points upward,
        /// within the configured angle cone, for any hit position.
        #[test]
        fn prop_paddle_reflection_upward_same_speed(
            hit_x in 0.0_f32..800.0,
            speed in 50.0_f32..700.0,
            incoming_angle in -1.0_f32..1.0,
        ) {
            let paddle = test_paddle();
            let vel = Vec2::new(incoming_angle.sin(), incoming_angle.cos()) * speed;
            let ball = ball_at(Vec2::new(hit_x, paddle.pos.y - BALL_RADIUS), vel);

            let out = paddle_reflection(&ball, &paddle);
            prop_assert!((out.length() - speed).abs() < 0.01 * speed.max(1.0));
            prop_assert!(out.y < 0.0);
            let angle = out.x.atan2(-out.y);
            prop_assert!(angle.abs() <= MAX_REFLECT_ANGLE + 1e-4);
        }

        /// Face reflection is elastic: the speed never changes.
        #[test]
        fn prop_side_reflect_preserves_magnitude(
            vx in -700.0_f32..700.0,
            vy in -700.0_f32..700.0,
        ) {
            let vel = Vec2::new(vx, vy);
            for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
                prop_assert!((side.reflect(vel).length() - vel.length()).abs() < 1e-3);
            }
        }
    }
}
