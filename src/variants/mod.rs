//! Game variants
//!
//! Each game is a configuration of the shared tick engine: an upgrade
//! table, starting entities, a spawn rule, bounds handling and collision
//! rules, plus optional per-frame hooks for behavior the generic loop
//! does not cover (steering, firing).

pub mod coffee_shop;
pub mod gold_miner;
pub mod pong;
pub mod runner;
pub mod tank_attack;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::{
    BoundsPolicy, CollisionRule, Entity, EntityKind, Playfield, SimulationState, UpgradeSpec,
};

pub use coffee_shop::CoffeeShop;
pub use gold_miner::GoldMiner;
pub use pong::Pong;
pub use runner::InfiniteRunner;
pub use tank_attack::TankAttack;

/// Game-specific rules plugged into [`crate::sim::tick`]
pub trait Variant {
    fn kind(&self) -> VariantKind;

    fn playfield(&self) -> Playfield {
        Playfield::default()
    }

    /// Upgrade table, in display order
    fn upgrades(&self) -> Vec<UpgradeSpec>;

    fn starting_currency(&self) -> f64 {
        0.0
    }

    /// Create the starting entities
    fn setup(&self, state: &mut SimulationState, rng: &mut Pcg32);

    /// Spawns per second for the current state
    fn spawn_rate(&self, state: &SimulationState) -> f64;

    /// Create one spawned entity. May decline (e.g. at a population cap).
    fn spawn(&self, state: &mut SimulationState, rng: &mut Pcg32);

    fn bounds(&self, kind: EntityKind) -> BoundsPolicy;

    fn collision_rules(&self, state: &SimulationState) -> Vec<CollisionRule>;

    /// Runs before motion each frame
    fn pre_frame(&self, _state: &mut SimulationState, _rng: &mut Pcg32, _dt: f32) {}

    /// Runs after collisions each frame
    fn post_frame(&self, _state: &mut SimulationState, _rng: &mut Pcg32, _dt: f32) {}
}

/// The games shipped with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VariantKind {
    #[default]
    Pong,
    CoffeeShop,
    TankAttack,
    InfiniteRunner,
    GoldMiner,
}

impl VariantKind {
    pub const ALL: [VariantKind; 5] = [
        VariantKind::Pong,
        VariantKind::CoffeeShop,
        VariantKind::TankAttack,
        VariantKind::InfiniteRunner,
        VariantKind::GoldMiner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Pong => "pong",
            VariantKind::CoffeeShop => "coffee-shop",
            VariantKind::TankAttack => "tank-attack",
            VariantKind::InfiniteRunner => "infinite-runner",
            VariantKind::GoldMiner => "gold-miner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pong" => Some(VariantKind::Pong),
            "coffee-shop" | "coffee" => Some(VariantKind::CoffeeShop),
            "tank-attack" | "tanks" => Some(VariantKind::TankAttack),
            "infinite-runner" | "runner" => Some(VariantKind::InfiniteRunner),
            "gold-miner" | "miner" => Some(VariantKind::GoldMiner),
            _ => None,
        }
    }

    /// Instantiate the rules for this game
    pub fn build(self) -> Box<dyn Variant> {
        match self {
            VariantKind::Pong => Box::new(Pong),
            VariantKind::CoffeeShop => Box::new(CoffeeShop),
            VariantKind::TankAttack => Box::new(TankAttack),
            VariantKind::InfiniteRunner => Box::new(InfiniteRunner),
            VariantKind::GoldMiner => Box::new(GoldMiner),
        }
    }
}

/// Random point inside the playfield, `margin` away from the walls
pub(crate) fn random_point(playfield: &Playfield, margin: f32, rng: &mut Pcg32) -> Vec2 {
    let max_x = (playfield.width - margin).max(margin);
    let max_y = (playfield.height - margin).max(margin);
    Vec2::new(
        rng.random_range(margin..=max_x),
        rng.random_range(margin..=max_y),
    )
}

/// Random unit vector
pub(crate) fn random_direction(rng: &mut Pcg32) -> Vec2 {
    crate::unit_from_angle(rng.random_range(0.0..std::f32::consts::TAU))
}

/// Convert an upgrade value to a whole entity count
pub(crate) fn whole(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.floor() as usize
    } else {
        0
    }
}

/// Add or remove entities of `kind` until there are exactly `target`.
///
/// New entities come from `make`; excess ones are dropped newest first.
pub(crate) fn reconcile_count(
    state: &mut SimulationState,
    kind: EntityKind,
    target: usize,
    mut make: impl FnMut(usize, &mut SimulationState) -> Entity,
) {
    let mut current = state.count(kind);
    while current < target {
        let entity = make(current, state);
        state.add(entity);
        current += 1;
    }
    while current > target {
        if let Some(idx) = state.entities.iter().rposition(|e| e.kind == kind) {
            state.entities.remove(idx);
        }
        current -= 1;
    }
}

/// Point every entity of `kind` at its nearest entity of `toward`, at `speed`.
/// Entities with nothing to chase stop.
pub(crate) fn steer_toward_nearest(
    state: &mut SimulationState,
    kind: EntityKind,
    toward: EntityKind,
    speed: f32,
) {
    let targets: Vec<Vec2> = state.of_kind(toward).map(|e| e.pos).collect();
    for entity in state.entities.iter_mut().filter(|e| e.kind == kind) {
        let nearest = targets.iter().copied().min_by(|a, b| {
            a.distance_squared(entity.pos)
                .partial_cmp(&b.distance_squared(entity.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entity.vel = match nearest {
            Some(target) => crate::direction_to(entity.pos, target) * speed,
            None => Vec2::ZERO,
        };
    }
}
