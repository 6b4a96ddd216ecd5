//! Idle pong
//!
//! An AI paddle guards the left wall. Every paddle bounce pays the ball's
//! value; a missed ball re-enters from the center. Buying balls, speed and
//! paddle size raises income.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Variant, VariantKind, reconcile_count, whole};
use crate::sim::{
    BoundsPolicy, CollisionEffect, CollisionRule, Edge, Entity, EntityKind, SimulationState,
    UpgradeSpec,
};

/// Tuning constants
pub mod consts {
    pub const PADDLE_X: f32 = 30.0;
    /// Paddle vertical tracking speed (px/s)
    pub const PADDLE_SPEED: f32 = 320.0;
    pub const BALL_RADIUS: f32 = 8.0;
    /// Maximum launch angle from horizontal (radians)
    pub const MAX_LAUNCH_ANGLE: f32 = 0.6;
    pub const MAX_BALLS: f64 = 10.0;
    pub const MAX_PADDLE_SIZE: f64 = 120.0;
}

use consts::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pong;

impl Pong {
    fn launch_velocity(speed: f32, rng: &mut Pcg32) -> Vec2 {
        let angle = rng.random_range(-MAX_LAUNCH_ANGLE..=MAX_LAUNCH_ANGLE);
        // Always serve toward the paddle so a new ball is in play immediately
        Vec2::new(-angle.cos(), angle.sin()) * speed
    }

    fn make_ball(state: &SimulationState, rng: &mut Pcg32) -> Entity {
        let speed = state.stat("ball_speed") as f32;
        Entity::new(EntityKind::Ball, state.playfield.center())
            .with_vel(Self::launch_velocity(speed, rng))
            .with_radius(BALL_RADIUS)
            .with_value(state.stat("ball_value"))
    }
}

impl Variant for Pong {
    fn kind(&self) -> VariantKind {
        VariantKind::Pong
    }

    fn upgrades(&self) -> Vec<UpgradeSpec> {
        vec![
            UpgradeSpec::scaling("ball_speed", 200.0, 10.0),
            UpgradeSpec::counter("ball_count", 1.0, 25.0).with_cap(MAX_BALLS),
            UpgradeSpec::scaling("paddle_size", 40.0, 15.0).with_cap(MAX_PADDLE_SIZE),
            UpgradeSpec::counter("ball_value", 1.0, 20.0),
        ]
    }

    fn setup(&self, state: &mut SimulationState, rng: &mut Pcg32) {
        let paddle_y = state.playfield.height / 2.0;
        let size = state.stat("paddle_size") as f32;
        state.add(
            Entity::new(EntityKind::Paddle, Vec2::new(PADDLE_X, paddle_y)).with_radius(size),
        );
        let ball = Self::make_ball(state, rng);
        state.add(ball);
    }

    fn spawn_rate(&self, _state: &SimulationState) -> f64 {
        // Balls come from upgrades, not from a timer
        0.0
    }

    fn spawn(&self, _state: &mut SimulationState, _rng: &mut Pcg32) {}

    fn bounds(&self, kind: EntityKind) -> BoundsPolicy {
        match kind {
            EntityKind::Ball => BoundsPolicy::Respawn { open: Edge::Left },
            // Paddle only ever chases a ball's y, which is already on the field
            _ => BoundsPolicy::Keep,
        }
    }

    fn collision_rules(&self, _state: &SimulationState) -> Vec<CollisionRule> {
        vec![CollisionRule::new(
            EntityKind::Ball,
            EntityKind::Paddle,
            CollisionEffect::Bounce,
        )]
    }

    fn pre_frame(&self, state: &mut SimulationState, rng: &mut Pcg32, dt: f32) {
        let target = whole(state.stat("ball_count"));
        reconcile_count(state, EntityKind::Ball, target, |_, state| {
            Self::make_ball(state, rng)
        });

        let speed = state.stat("ball_speed") as f32;
        let value = state.stat("ball_value");
        let size = state.stat("paddle_size") as f32;

        // Track the most urgent ball: closest to the paddle's wall and approaching
        let threat_y = state
            .of_kind(EntityKind::Ball)
            .filter(|b| b.vel.x < 0.0)
            .min_by(|a, b| a.pos.x.partial_cmp(&b.pos.x).unwrap_or(std::cmp::Ordering::Equal))
            .map(|b| b.pos.y);

        for entity in &mut state.entities {
            match entity.kind {
                EntityKind::Ball => {
                    entity.set_speed(speed);
                    entity.value = value;
                }
                EntityKind::Paddle => {
                    entity.radius = size;
                    entity.vel = match threat_y {
                        Some(y) if dt > 0.0 => {
                            // Clamp to max speed; lands exactly on target when close
                            let max_delta = PADDLE_SPEED * dt;
                            let delta = (y - entity.pos.y).clamp(-max_delta, max_delta);
                            Vec2::new(0.0, delta / dt)
                        }
                        _ => Vec2::ZERO,
                    };
                }
                _ => {}
            }
        }
    }
}
