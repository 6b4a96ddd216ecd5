//! Tank attack
//!
//! Tanks roll in from the right edge. A turret on the left fires at the
//! nearest tank on its own cadence; destroyed tanks pay a bounty. Tanks
//! that make it off the left edge are simply lost. Later waves arrive
//! faster and tougher.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Variant, VariantKind};
use crate::sim::{
    BoundsPolicy, CollisionEffect, CollisionRule, Entity, EntityKind, SimulationState, UpgradeSpec,
};

/// Tuning constants
pub mod consts {
    pub const TURRET_X: f32 = 50.0;
    pub const TURRET_RADIUS: f32 = 16.0;
    pub const TANK_RADIUS: f32 = 14.0;
    pub const TANK_SPEED: f32 = 40.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    /// Starting tank arrivals per second
    pub const BASE_TANK_RATE: f64 = 0.5;
    /// Extra arrivals per second gained per minute survived
    pub const TANK_RATE_GROWTH: f64 = 0.5;
    pub const MAX_TANK_RATE: f64 = 3.0;
    pub const BASE_TANK_HEALTH: f32 = 2.0;
    /// Seconds between tank health steps
    pub const HEALTH_STEP_SECS: f64 = 30.0;
    pub const MAX_PROJECTILE_SPEED: f64 = 900.0;
}

use consts::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct TankAttack;

impl TankAttack {
    /// Tank hit points for the current point in the run
    pub fn tank_health(elapsed: f64) -> f32 {
        let steps = if elapsed.is_finite() && elapsed > 0.0 {
            (elapsed / HEALTH_STEP_SECS).floor() as f32
        } else {
            0.0
        };
        BASE_TANK_HEALTH + steps
    }

    fn fire(state: &mut SimulationState) {
        let Some(origin) = state.of_kind(EntityKind::Turret).next().map(|t| t.pos) else {
            return;
        };
        let Some((target, target_vel)) = state
            .nearest(EntityKind::Enemy, origin)
            .map(|t| (t.pos, t.vel))
        else {
            return;
        };
        let speed = state.stat("projectile_speed") as f32;
        let aim = lead_target(origin, target, target_vel, speed);
        let shot = Entity::new(EntityKind::Projectile, origin)
            .with_vel(crate::direction_to(origin, aim) * speed)
            .with_radius(PROJECTILE_RADIUS);
        state.add(shot);
    }
}

impl Variant for TankAttack {
    fn kind(&self) -> VariantKind {
        VariantKind::TankAttack
    }

    fn upgrades(&self) -> Vec<UpgradeSpec> {
        vec![
            UpgradeSpec::counter("damage", 1.0, 10.0),
            UpgradeSpec::scaling("fire_rate", 1.0, 15.0),
            UpgradeSpec::scaling("projectile_speed", 300.0, 10.0).with_cap(MAX_PROJECTILE_SPEED),
            UpgradeSpec::scaling("bounty", 2.0, 20.0),
        ]
    }

    fn setup(&self, state: &mut SimulationState, _rng: &mut Pcg32) {
        let y = state.playfield.height / 2.0;
        state.add(
            Entity::new(EntityKind::Turret, Vec2::new(TURRET_X, y)).with_radius(TURRET_RADIUS),
        );
    }

    fn spawn_rate(&self, state: &SimulationState) -> f64 {
        (BASE_TANK_RATE + state.elapsed / 60.0 * TANK_RATE_GROWTH).min(MAX_TANK_RATE)
    }

    fn spawn(&self, state: &mut SimulationState, rng: &mut Pcg32) {
        let field = state.playfield;
        let pos = Vec2::new(
            field.width + TANK_RADIUS,
            rng.random_range(TANK_RADIUS..=field.height - TANK_RADIUS),
        );
        let tank = Entity::new(EntityKind::Enemy, pos)
            .with_vel(Vec2::new(-TANK_SPEED, 0.0))
            .with_radius(TANK_RADIUS)
            .with_health(Self::tank_health(state.elapsed))
            .with_value(state.stat("bounty"));
        state.add(tank);
    }

    fn bounds(&self, kind: EntityKind) -> BoundsPolicy {
        match kind {
            EntityKind::Enemy | EntityKind::Projectile => BoundsPolicy::Remove,
            _ => BoundsPolicy::Keep,
        }
    }

    fn collision_rules(&self, state: &SimulationState) -> Vec<CollisionRule> {
        vec![CollisionRule::new(
            EntityKind::Projectile,
            EntityKind::Enemy,
            CollisionEffect::Damage {
                amount: state.stat("damage") as f32,
            },
        )]
    }

    fn pre_frame(&self, state: &mut SimulationState, _rng: &mut Pcg32, dt: f32) {
        // Hold fire while there is nothing to shoot so shots do not bank up
        if state.count(EntityKind::Enemy) == 0 {
            state.action_timer.reset();
            return;
        }
        state.action_timer.rate = state.stat("fire_rate");
        let shots = state.action_timer.advance(f64::from(dt));
        for _ in 0..shots {
            Self::fire(state);
        }
    }
}

/// Where to aim so a shot at `speed` meets a target moving at `target_vel`.
/// Two refinement passes are plenty for tanks this slow.
fn lead_target(origin: Vec2, target: Vec2, target_vel: Vec2, speed: f32) -> Vec2 {
    if speed <= 0.0 {
        return target;
    }
    let mut aim = target;
    for _ in 0..2 {
        let flight = origin.distance(aim) / speed;
        aim = target + target_vel * flight;
    }
    aim
}
