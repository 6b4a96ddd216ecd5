//! Gold miner
//!
//! Miners head for the nearest nugget and pick up anything they pass
//! over. With no gold showing they wander in straight lines, bouncing off
//! the walls. Nuggets surface at random spots up to a fixed population.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{Variant, VariantKind, random_direction, random_point, reconcile_count, whole};
use crate::sim::{
    BoundsPolicy, CollisionEffect, CollisionRule, Entity, EntityKind, SimulationState, UpgradeSpec,
};

/// Tuning constants
pub mod consts {
    pub const MAX_MINERS: f64 = 12.0;
    /// Nuggets stop surfacing at this many
    pub const MAX_NUGGETS: usize = 50;
    pub const MINER_RADIUS: f32 = 12.0;
    pub const NUGGET_RADIUS: f32 = 6.0;
    /// Keep new nuggets this far from the walls
    pub const NUGGET_MARGIN: f32 = 20.0;
}

use consts::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoldMiner;

impl Variant for GoldMiner {
    fn kind(&self) -> VariantKind {
        VariantKind::GoldMiner
    }

    fn upgrades(&self) -> Vec<UpgradeSpec> {
        vec![
            UpgradeSpec::counter("miners", 1.0, 25.0).with_cap(MAX_MINERS),
            UpgradeSpec::scaling("miner_speed", 50.0, 10.0),
            UpgradeSpec::scaling("spawn_rate", 0.8, 15.0),
            UpgradeSpec::scaling("nugget_value", 1.0, 10.0),
        ]
    }

    fn setup(&self, state: &mut SimulationState, rng: &mut Pcg32) {
        self.pre_frame(state, rng, 0.0);
    }

    fn spawn_rate(&self, state: &SimulationState) -> f64 {
        state.stat("spawn_rate")
    }

    fn spawn(&self, state: &mut SimulationState, rng: &mut Pcg32) {
        if state.count(EntityKind::Collectible) >= MAX_NUGGETS {
            log::trace!("Nugget cap reached, skipping spawn");
            return;
        }
        let pos = random_point(&state.playfield, NUGGET_MARGIN, rng);
        let nugget = Entity::new(EntityKind::Collectible, pos)
            .with_radius(NUGGET_RADIUS)
            .with_value(state.stat("nugget_value"));
        state.add(nugget);
    }

    fn bounds(&self, kind: EntityKind) -> BoundsPolicy {
        match kind {
            EntityKind::Collector => BoundsPolicy::Reflect,
            _ => BoundsPolicy::Keep,
        }
    }

    fn collision_rules(&self, _state: &SimulationState) -> Vec<CollisionRule> {
        vec![CollisionRule::new(
            EntityKind::Collector,
            EntityKind::Collectible,
            CollisionEffect::Collect,
        )]
    }

    fn pre_frame(&self, state: &mut SimulationState, rng: &mut Pcg32, _dt: f32) {
        let count = whole(state.stat("miners"));
        let center = state.playfield.center();
        reconcile_count(state, EntityKind::Collector, count, |_, _| {
            Entity::new(EntityKind::Collector, center)
                .with_vel(random_direction(rng))
                .with_radius(MINER_RADIUS)
        });

        let speed = state.stat("miner_speed") as f32;
        let nuggets: Vec<Vec2> = state.of_kind(EntityKind::Collectible).map(|n| n.pos).collect();
        for miner in state
            .entities
            .iter_mut()
            .filter(|e| e.kind == EntityKind::Collector)
        {
            let nearest = nuggets.iter().copied().min_by(|a, b| {
                a.distance_squared(miner.pos)
                    .partial_cmp(&b.distance_squared(miner.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            match nearest {
                Some(target) => miner.vel = crate::direction_to(miner.pos, target) * speed,
                None => {
                    if miner.vel == Vec2::ZERO {
                        miner.vel = random_direction(rng);
                    }
                    miner.set_speed(speed);
                }
            }
        }
    }
}
