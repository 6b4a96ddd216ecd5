//! Infinite runner
//!
//! One runner per lane loops left to right forever, wrapping at the edge.
//! Coins appear at the right edge of a random open lane and scroll left;
//! a runner that meets a coin pockets it. Extra lanes are bought up to a
//! fixed maximum.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Variant, VariantKind, reconcile_count, whole};
use crate::sim::{
    BoundsPolicy, CollisionEffect, CollisionRule, Entity, EntityKind, SimulationState, UpgradeSpec,
};

/// Tuning constants
pub mod consts {
    pub const MAX_LANES: f64 = 5.0;
    /// Vertical distance between lanes
    pub const LANE_SPACING: f32 = 100.0;
    pub const RUNNER_RADIUS: f32 = 14.0;
    pub const COIN_RADIUS: f32 = 8.0;
    /// Coin scroll speed (px/s)
    pub const COIN_SCROLL: f32 = 120.0;
}

use consts::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct InfiniteRunner;

impl InfiniteRunner {
    /// Screen y of lane `lane`
    pub fn lane_y(lane: u32) -> f32 {
        LANE_SPACING * (lane as f32 + 1.0)
    }
}

impl Variant for InfiniteRunner {
    fn kind(&self) -> VariantKind {
        VariantKind::InfiniteRunner
    }

    fn upgrades(&self) -> Vec<UpgradeSpec> {
        vec![
            UpgradeSpec::scaling("run_speed", 80.0, 10.0),
            UpgradeSpec::counter("lanes", 1.0, 40.0).with_cap(MAX_LANES),
            UpgradeSpec::scaling("coin_rate", 1.0, 20.0),
            UpgradeSpec::scaling("coin_value", 1.0, 15.0),
        ]
    }

    fn setup(&self, state: &mut SimulationState, _rng: &mut Pcg32) {
        let lanes = whole(state.stat("lanes"));
        reconcile_count(state, EntityKind::Collector, lanes, runner_in_lane);
    }

    fn spawn_rate(&self, state: &SimulationState) -> f64 {
        state.stat("coin_rate")
    }

    fn spawn(&self, state: &mut SimulationState, rng: &mut Pcg32) {
        let lanes = whole(state.stat("lanes")).max(1) as u32;
        let lane = rng.random_range(0..lanes);
        let pos = Vec2::new(state.playfield.width - COIN_RADIUS, Self::lane_y(lane));
        let coin = Entity::new(EntityKind::Collectible, pos)
            .with_vel(Vec2::new(-COIN_SCROLL, 0.0))
            .with_radius(COIN_RADIUS)
            .with_value(state.stat("coin_value"))
            .with_lane(lane);
        state.add(coin);
    }

    fn bounds(&self, kind: EntityKind) -> BoundsPolicy {
        match kind {
            EntityKind::Collector => BoundsPolicy::Wrap,
            _ => BoundsPolicy::Remove,
        }
    }

    fn collision_rules(&self, _state: &SimulationState) -> Vec<CollisionRule> {
        vec![CollisionRule::new(
            EntityKind::Collector,
            EntityKind::Collectible,
            CollisionEffect::Collect,
        )]
    }

    fn pre_frame(&self, state: &mut SimulationState, _rng: &mut Pcg32, _dt: f32) {
        let lanes = whole(state.stat("lanes"));
        reconcile_count(state, EntityKind::Collector, lanes, runner_in_lane);

        let speed = state.stat("run_speed") as f32;
        for runner in state
            .entities
            .iter_mut()
            .filter(|e| e.kind == EntityKind::Collector)
        {
            runner.vel = Vec2::new(speed, 0.0);
        }
    }
}

fn runner_in_lane(index: usize, _state: &mut SimulationState) -> Entity {
    let lane = index as u32;
    Entity::new(
        EntityKind::Collector,
        Vec2::new(RUNNER_RADIUS, InfiniteRunner::lane_y(lane)),
    )
    .with_radius(RUNNER_RADIUS)
    .with_lane(lane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn test_lanes_fit_playfield() {
        let field = crate::sim::Playfield::default();
        assert!(InfiniteRunner::lane_y(MAX_LANES as u32 - 1) < field.height);
    }

    #[test]
    fn test_runner_wraps() {
        let mut game = Game::new(VariantKind::InfiniteRunner, 4);
        // 80 px/s across an 800 px field: ten seconds to loop
        for _ in 0..110 {
            game.tick(0.1);
        }
        let runner = game.state().of_kind(EntityKind::Collector).next().unwrap();
        assert!(runner.pos.x < game.state().playfield.width);
        assert!(runner.pos.x >= 0.0);
    }

    #[test]
    fn test_runner_collects_coins() {
        let mut game = Game::new(VariantKind::InfiniteRunner, 4);
        for _ in 0..(60 * 20) {
            game.tick(1.0 / 60.0);
        }
        // Single lane: every coin is on the runner's lane
        assert!(game.state().collected >= 10);
    }

    #[test]
    fn test_lane_cap() {
        let mut game = Game::new(VariantKind::InfiniteRunner, 4);
        game.state_mut().currency = 1.0e9;
        let mut bought = 0;
        while game.purchase("lanes") {
            bought += 1;
        }
        assert_eq!(bought, 4);
        game.tick(0.016);
        assert_eq!(game.state().count(EntityKind::Collector), 5);
        let lanes: Vec<u32> = game
            .state()
            .of_kind(EntityKind::Collector)
            .filter_map(|r| r.lane)
            .collect();
        assert_eq!(lanes, vec![0, 1, 2, 3, 4]);
    }
}
