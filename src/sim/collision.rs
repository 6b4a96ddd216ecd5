//! Pairwise proximity collisions
//!
//! Each rule pairs an actor kind with a target kind. The outer loop walks
//! actors in insertion order; anything removed during the pass is out of
//! play for the rest of the frame, so each colliding pair is resolved at
//! most once.

use glam::Vec2;
use serde::Serialize;

use super::state::{EntityKind, SimulationState};

/// What happens when an actor touches a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CollisionEffect {
    /// Remove the target and pay out its value
    Collect,
    /// Consume the actor, subtract `amount` health from the target.
    /// A target at zero health is removed and pays out its value.
    Damage { amount: f32 },
    /// Reflect the actor off the target and pay out the actor's value
    Bounce,
}

/// One actor/target pairing checked every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollisionRule {
    pub actor: EntityKind,
    pub target: EntityKind,
    pub effect: CollisionEffect,
}

impl CollisionRule {
    pub const fn new(actor: EntityKind, target: EntityKind, effect: CollisionEffect) -> Self {
        Self {
            actor,
            target,
            effect,
        }
    }
}

/// Reflect velocity off a surface with given normal
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Run every rule once over the current entities, applying effects
///
/// Returns the number of hits resolved.
pub fn resolve_collisions(state: &mut SimulationState, rules: &[CollisionRule]) -> u32 {
    let mut alive = vec![true; state.entities.len()];
    let mut hits = 0u32;

    for rule in rules {
        for a in 0..state.entities.len() {
            if !alive[a] || state.entities[a].kind != rule.actor {
                continue;
            }

            for t in 0..state.entities.len() {
                if t == a || !alive[t] || !alive[a] {
                    continue;
                }
                let (actor, target) = (&state.entities[a], &state.entities[t]);
                if target.kind != rule.target || !actor.touches(target) {
                    continue;
                }

                match rule.effect {
                    CollisionEffect::Collect => {
                        let value = target.value;
                        alive[t] = false;
                        state.earn(value);
                        hits += 1;
                    }
                    CollisionEffect::Damage { amount } => {
                        // Projectile is spent on the first thing it hits
                        alive[a] = false;
                        hits += 1;
                        let target = &mut state.entities[t];
                        let health = target.health.unwrap_or(0.0) - amount;
                        target.health = Some(health);
                        if health <= 0.0 {
                            let bounty = target.value;
                            alive[t] = false;
                            state.earn(bounty);
                        }
                    }
                    CollisionEffect::Bounce => {
                        let normal = (actor.pos - target.pos).normalize_or_zero();
                        // Already separating: ignore so an overlap does not pay every frame
                        if actor.vel.dot(normal) >= 0.0 {
                            continue;
                        }
                        let value = actor.value;
                        let actor = &mut state.entities[a];
                        actor.vel = reflect_velocity(actor.vel, normal);
                        state.earn(value);
                        hits += 1;
                    }
                }
            }
        }
    }

    if alive.iter().any(|a| !a) {
        let mut flags = alive.into_iter();
        state.entities.retain(|_| flags.next().unwrap_or(true));
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Entity, Playfield, UpgradeLedger};

    fn state() -> SimulationState {
        SimulationState::new(UpgradeLedger::default(), Playfield::default())
    }

    const COLLECT: CollisionRule = CollisionRule::new(
        EntityKind::Collector,
        EntityKind::Collectible,
        CollisionEffect::Collect,
    );

    #[test]
    fn test_collect_pays_and_removes() {
        let mut state = state();
        state.add(Entity::new(EntityKind::Collector, Vec2::new(100.0, 100.0)));
        state.add(Entity::new(EntityKind::Collectible, Vec2::new(105.0, 100.0)).with_value(3.0));
        state.add(Entity::new(EntityKind::Collectible, Vec2::new(300.0, 100.0)).with_value(7.0));

        assert_eq!(resolve_collisions(&mut state, &[COLLECT]), 1);
        assert_eq!(state.currency, 3.0);
        assert_eq!(state.count(EntityKind::Collectible), 1);
    }

    #[test]
    fn test_collectible_is_collected_once() {
        // Two collectors sitting on the same coin
        let mut state = state();
        let first = state.add(Entity::new(EntityKind::Collector, Vec2::new(100.0, 100.0)));
        state.add(Entity::new(EntityKind::Collector, Vec2::new(102.0, 100.0)));
        state.add(Entity::new(EntityKind::Collectible, Vec2::new(101.0, 100.0)).with_value(5.0));

        assert_eq!(resolve_collisions(&mut state, &[COLLECT]), 1);
        assert_eq!(state.currency, 5.0);
        assert_eq!(state.collected, 1);
        assert!(state.get(first).is_some());
    }

    #[test]
    fn test_projectile_consumed_on_first_hit() {
        let mut state = state();
        let rule = CollisionRule::new(
            EntityKind::Projectile,
            EntityKind::Enemy,
            CollisionEffect::Damage { amount: 1.0 },
        );
        state.add(Entity::new(EntityKind::Projectile, Vec2::new(50.0, 50.0)).with_radius(4.0));
        let a = state.add(
            Entity::new(EntityKind::Enemy, Vec2::new(55.0, 50.0))
                .with_health(3.0)
                .with_value(10.0),
        );
        let b = state.add(
            Entity::new(EntityKind::Enemy, Vec2::new(45.0, 50.0))
                .with_health(3.0)
                .with_value(10.0),
        );

        assert_eq!(resolve_collisions(&mut state, &[rule]), 1);
        assert_eq!(state.count(EntityKind::Projectile), 0);
        assert_eq!(state.get(a).unwrap().health, Some(2.0));
        assert_eq!(state.get(b).unwrap().health, Some(3.0));
        assert_eq!(state.currency, 0.0);
    }

    #[test]
    fn test_lethal_damage_pays_bounty() {
        let mut state = state();
        let rule = CollisionRule::new(
            EntityKind::Projectile,
            EntityKind::Enemy,
            CollisionEffect::Damage { amount: 2.0 },
        );
        state.add(Entity::new(EntityKind::Projectile, Vec2::new(50.0, 50.0)));
        state.add(Entity::new(EntityKind::Projectile, Vec2::new(52.0, 50.0)));
        state.add(
            Entity::new(EntityKind::Enemy, Vec2::new(51.0, 50.0))
                .with_health(2.0)
                .with_value(4.0),
        );

        // First projectile kills, second finds nothing left to hit
        assert_eq!(resolve_collisions(&mut state, &[rule]), 1);
        assert_eq!(state.currency, 4.0);
        assert_eq!(state.count(EntityKind::Enemy), 0);
        assert_eq!(state.count(EntityKind::Projectile), 1);
    }

    #[test]
    fn test_bounce_reflects_and_pays() {
        let mut state = state();
        let rule = CollisionRule::new(EntityKind::Ball, EntityKind::Paddle, CollisionEffect::Bounce);
        let ball = state.add(
            Entity::new(EntityKind::Ball, Vec2::new(110.0, 100.0))
                .with_vel(Vec2::new(-100.0, 0.0))
                .with_value(2.0),
        );
        state.add(Entity::new(EntityKind::Paddle, Vec2::new(100.0, 100.0)).with_radius(10.0));

        assert_eq!(resolve_collisions(&mut state, &[rule]), 1);
        assert!(state.get(ball).unwrap().vel.x > 0.0);
        assert_eq!(state.currency, 2.0);

        // Now separating: no second payout while still overlapping
        assert_eq!(resolve_collisions(&mut state, &[rule]), 0);
        assert_eq!(state.currency, 2.0);
    }

    #[test]
    fn test_reflect_velocity() {
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }
}
