//! Per-frame simulation tick
//!
//! Called once per displayed frame with the wall-clock time since the
//! previous frame. Spawning and motion scale with elapsed time, so the
//! outcome does not depend on the client's frame rate.

use rand_pcg::Pcg32;

use super::collision::resolve_collisions;
use super::playfield::BoundsOutcome;
use super::state::SimulationState;
use crate::variants::Variant;

/// Advance the game state by `elapsed_seconds`
pub fn tick(
    state: &mut SimulationState,
    variant: &dyn Variant,
    rng: &mut Pcg32,
    elapsed_seconds: f64,
) {
    let dt = if elapsed_seconds.is_finite() && elapsed_seconds > 0.0 {
        elapsed_seconds
    } else {
        0.0
    };
    let dt_f32 = dt as f32;

    state.frames += 1;
    state.elapsed += dt;

    variant.pre_frame(state, rng, dt_f32);

    // Motion and bounds
    let playfield = state.playfield;
    let mut removed = 0usize;
    state.entities.retain_mut(|entity| {
        entity.integrate(dt_f32);
        let policy = variant.bounds(entity.kind);
        match playfield.apply(policy, &mut entity.pos, &mut entity.vel, entity.radius) {
            BoundsOutcome::Removed => {
                removed += 1;
                false
            }
            _ => true,
        }
    });
    if removed > 0 {
        log::trace!("Removed {} out-of-bounds entities", removed);
    }

    // Spawning: fractional carry keeps the count proportional to elapsed time
    state.spawner.rate = variant.spawn_rate(state);
    let due = state.spawner.advance(dt);
    for _ in 0..due {
        variant.spawn(state, rng);
    }
    if due > 0 {
        log::trace!("Spawned {} (accumulator {:.3})", due, state.spawner.accumulator);
    }

    let rules = variant.collision_rules(state);
    resolve_collisions(state, &rules);

    variant.post_frame(state, rng, dt_f32);

    // Ensure deterministic ordering
    state.normalize_order();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{
        BoundsPolicy, CollisionEffect, CollisionRule, Entity, EntityKind, Playfield, UpgradeLedger,
        UpgradeSpec,
    };
    use glam::Vec2;
    use rand::SeedableRng;

    /// Collectibles rain in at a fixed rate; one collector sits in the middle
    struct Rain {
        rate: f64,
    }

    impl Variant for Rain {
        fn kind(&self) -> crate::VariantKind {
            crate::VariantKind::GoldMiner
        }

        fn upgrades(&self) -> Vec<UpgradeSpec> {
            vec![UpgradeSpec::scaling("speed", 100.0, 10.0)]
        }

        fn setup(&self, state: &mut SimulationState, _rng: &mut Pcg32) {
            let center = state.playfield.center();
            state.add(Entity::new(EntityKind::Collector, center).with_radius(20.0));
        }

        fn spawn_rate(&self, _state: &SimulationState) -> f64 {
            self.rate
        }

        fn spawn(&self, state: &mut SimulationState, _rng: &mut Pcg32) {
            state.add(Entity::new(EntityKind::Collectible, Vec2::new(10.0, 10.0)).with_value(1.0));
        }

        fn bounds(&self, kind: EntityKind) -> BoundsPolicy {
            match kind {
                EntityKind::Enemy => BoundsPolicy::Remove,
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
    }

    fn setup(rate: f64) -> (SimulationState, Rain, Pcg32) {
        let variant = Rain { rate };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = SimulationState::new(
            UpgradeLedger::new(variant.upgrades()),
            Playfield::default(),
        );
        variant.setup(&mut state, &mut rng);
        (state, variant, rng)
    }

    #[test]
    fn test_spawn_scenario() {
        let (mut state, variant, mut rng) = setup(2.0);
        tick(&mut state, &variant, &mut rng, 0.9);
        assert_eq!(state.count(EntityKind::Collectible), 1);
        assert!((state.spawner.accumulator - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_motion_scales_with_elapsed() {
        let (mut state, variant, mut rng) = setup(0.0);
        let id = state.add(Entity::new(EntityKind::Enemy, Vec2::new(100.0, 100.0)).with_vel(Vec2::new(50.0, 0.0)));
        tick(&mut state, &variant, &mut rng, 0.5);
        assert!((state.get(id).unwrap().pos.x - 125.0).abs() < 1e-4);
    }

    #[test]
    fn test_offscreen_entities_removed() {
        let (mut state, variant, mut rng) = setup(0.0);
        state.add(Entity::new(EntityKind::Enemy, Vec2::new(5.0, 100.0)).with_vel(Vec2::new(-100.0, 0.0)));
        tick(&mut state, &variant, &mut rng, 0.5);
        assert_eq!(state.count(EntityKind::Enemy), 0);
    }

    #[test]
    fn test_negative_elapsed_is_a_noop_frame() {
        let (mut state, variant, mut rng) = setup(5.0);
        tick(&mut state, &variant, &mut rng, -1.0);
        tick(&mut state, &variant, &mut rng, f64::NAN);
        assert_eq!(state.count(EntityKind::Collectible), 0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.frames, 2);
    }

    #[test]
    fn test_split_frames_match_single_frame() {
        let (mut coarse, variant, mut rng) = setup(3.0);
        tick(&mut coarse, &variant, &mut rng, 2.0);

        let (mut fine, variant, mut rng) = setup(3.0);
        for _ in 0..8 {
            tick(&mut fine, &variant, &mut rng, 0.25);
        }

        assert_eq!(
            coarse.count(EntityKind::Collectible),
            fine.count(EntityKind::Collectible)
        );
    }
}
