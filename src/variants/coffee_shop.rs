//! Coffee shop
//!
//! Customers walk in from the door on the right toward the counter.
//! Baristas chase the nearest customer and serve on contact. A customer
//! who reaches the left wall unserved leaves without paying.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Variant, VariantKind, reconcile_count, steer_toward_nearest, whole};
use crate::sim::{
    BoundsPolicy, CollisionEffect, CollisionRule, Entity, EntityKind, SimulationState, UpgradeSpec,
};

/// Tuning constants
pub mod consts {
    /// Customer walking speed (px/s)
    pub const CUSTOMER_SPEED: f32 = 45.0;
    pub const CUSTOMER_RADIUS: f32 = 10.0;
    pub const BARISTA_RADIUS: f32 = 12.0;
    /// Counter line the baristas start on
    pub const COUNTER_X: f32 = 120.0;
    pub const MAX_BARISTAS: f64 = 8.0;
}

use consts::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct CoffeeShop;

impl Variant for CoffeeShop {
    fn kind(&self) -> VariantKind {
        VariantKind::CoffeeShop
    }

    fn upgrades(&self) -> Vec<UpgradeSpec> {
        vec![
            UpgradeSpec::scaling("barista_speed", 60.0, 10.0),
            UpgradeSpec::counter("baristas", 1.0, 50.0).with_cap(MAX_BARISTAS),
            UpgradeSpec::scaling("customer_rate", 0.5, 20.0),
            UpgradeSpec::scaling("price", 5.0, 15.0),
        ]
    }

    fn setup(&self, state: &mut SimulationState, _rng: &mut Pcg32) {
        let count = whole(state.stat("baristas"));
        reconcile_count(state, EntityKind::Collector, count, barista_at);
    }

    fn spawn_rate(&self, state: &SimulationState) -> f64 {
        state.stat("customer_rate")
    }

    fn spawn(&self, state: &mut SimulationState, rng: &mut Pcg32) {
        let field = state.playfield;
        let door = Vec2::new(
            field.width - CUSTOMER_RADIUS,
            rng.random_range(CUSTOMER_RADIUS..=field.height - CUSTOMER_RADIUS),
        );
        let customer = Entity::new(EntityKind::Collectible, door)
            .with_vel(Vec2::new(-CUSTOMER_SPEED, 0.0))
            .with_radius(CUSTOMER_RADIUS)
            // Price is locked in when the customer walks in
            .with_value(state.stat("price"));
        state.add(customer);
    }

    fn bounds(&self, kind: EntityKind) -> BoundsPolicy {
        match kind {
            EntityKind::Collectible => BoundsPolicy::Remove,
            _ => BoundsPolicy::Clamp,
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
        let count = whole(state.stat("baristas"));
        reconcile_count(state, EntityKind::Collector, count, barista_at);

        let speed = state.stat("barista_speed") as f32;
        steer_toward_nearest(state, EntityKind::Collector, EntityKind::Collectible, speed);
    }
}

/// New barista `index` on the counter line, spread over the shop height
fn barista_at(index: usize, state: &mut SimulationState) -> Entity {
    let slots = MAX_BARISTAS as f32 + 1.0;
    let y = state.playfield.height * (index as f32 + 1.0) / slots;
    Entity::new(EntityKind::Collector, Vec2::new(COUNTER_X, y)).with_radius(BARISTA_RADIUS)
}
