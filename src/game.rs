//! Game context
//!
//! Everything one running game needs, in one owned value: state, rules and
//! RNG. The presentation layer holds a `Game` and calls `tick` from its
//! render loop, `purchase` from click handlers and `snapshot` from its HUD
//! refresh. Nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::sim::{EntityKind, SimulationState, UpgradeLedger, tick};
use crate::variants::{Variant, VariantKind};

/// A running game instance
pub struct Game {
    state: SimulationState,
    variant: Box<dyn Variant>,
    rng: Pcg32,
    seed: u64,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("variant", &self.variant.kind())
            .field("seed", &self.seed)
            .field("state", &self.state)
            .finish()
    }
}

impl Game {
    /// Start one of the built-in games
    pub fn new(kind: VariantKind, seed: u64) -> Self {
        Self::with_variant(kind.build(), seed)
    }

    /// Start a game with custom rules
    pub fn with_variant(variant: Box<dyn Variant>, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = SimulationState::new(UpgradeLedger::new(variant.upgrades()), variant.playfield());
        state.currency = variant.starting_currency();
        variant.setup(&mut state, &mut rng);

        log::info!(
            "Started {} (seed {}, {} upgrades, {} entities)",
            variant.kind().as_str(),
            seed,
            state.ledger.len(),
            state.entities.len()
        );

        Self {
            state,
            variant,
            rng,
            seed,
        }
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self, elapsed_seconds: f64) {
        tick(&mut self.state, self.variant.as_ref(), &mut self.rng, elapsed_seconds);
    }

    /// Attempt one upgrade purchase. Without funds this does nothing.
    pub fn purchase(&mut self, name: &str) -> bool {
        self.state.purchase(name)
    }

    /// Whether the button for `name` should be enabled
    pub fn can_afford(&self, name: &str) -> bool {
        self.state.ledger.can_afford(name, self.state.currency)
    }

    pub fn kind(&self) -> VariantKind {
        self.variant.kind()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct state access for scenario setup and tooling
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Read-only view for the HUD
    pub fn snapshot(&self) -> HudSnapshot {
        let state = &self.state;

        let upgrades = state
            .ledger
            .iter()
            .map(|(spec, upgrade)| UpgradeView {
                name: spec.name,
                value: upgrade.value,
                cost: upgrade.cost,
                level: upgrade.level,
                affordable: state.ledger.can_afford(spec.name, state.currency),
                capped: state.ledger.is_capped(spec.name),
            })
            .collect();

        let counts = EntityKind::ALL
            .iter()
            .map(|&kind| KindCount {
                kind,
                count: state.count(kind),
            })
            .filter(|c| c.count > 0)
            .collect();

        let entities = state
            .entities
            .iter()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                pos: e.pos,
                radius: e.radius,
                health: e.health,
            })
            .collect();

        HudSnapshot {
            variant: self.variant.kind().as_str(),
            currency: state.currency,
            earned: state.earned,
            collected: state.collected,
            elapsed: state.elapsed,
            upgrades,
            counts,
            entities,
        }
    }
}

/// One upgrade row as the HUD shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeView {
    pub name: &'static str,
    pub value: f64,
    pub cost: f64,
    pub level: u32,
    /// Button enabled
    pub affordable: bool,
    pub capped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindCount {
    pub kind: EntityKind,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    pub health: Option<f32>,
}

/// Polled state consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub variant: &'static str,
    pub currency: f64,
    pub earned: f64,
    pub collected: u64,
    pub elapsed: f64,
    pub upgrades: Vec<UpgradeView>,
    pub counts: Vec<KindCount>,
    pub entities: Vec<EntityView>,
}

impl HudSnapshot {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.count)
    }

    pub fn upgrade(&self, name: &str) -> Option<&UpgradeView> {
        self.upgrades.iter().find(|u| u.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_scenario() {
        let mut game = Game::new(VariantKind::Pong, 1);
        game.state_mut().currency = 20.0;
        game.state_mut().ledger.set("ball_speed", 100.0, 10.0);

        assert!(game.purchase("ball_speed"));

        let speed = game.state().ledger.get("ball_speed").unwrap();
        assert_eq!(game.state().currency, 10.0);
        assert!((speed.value - 110.0).abs() < 1e-9);
        assert_eq!(speed.cost, 20.0);
    }

    #[test]
    fn test_purchase_without_funds_scenario() {
        let mut game = Game::new(VariantKind::Pong, 1);
        game.state_mut().currency = 5.0;
        game.state_mut().ledger.set("ball_speed", 100.0, 10.0);

        assert!(!game.purchase("ball_speed"));

        let speed = game.state().ledger.get("ball_speed").unwrap();
        assert_eq!(game.state().currency, 5.0);
        assert_eq!(speed.value, 100.0);
        assert_eq!(speed.cost, 10.0);
    }

    #[test]
    fn test_purchase_applies_before_next_tick() {
        let mut game = Game::new(VariantKind::InfiniteRunner, 1);
        game.state_mut().currency = 40.0;
        assert!(game.purchase("lanes"));
        game.tick(0.016);
        assert_eq!(game.state().count(EntityKind::Collector), 2);
    }

    #[test]
    fn test_snapshot_reflects_affordability() {
        let mut game = Game::new(VariantKind::CoffeeShop, 1);
        game.state_mut().currency = 12.0;
        let snap = game.snapshot();

        assert_eq!(snap.variant, "coffee-shop");
        assert!(snap.upgrade("barista_speed").unwrap().affordable);
        assert!(!snap.upgrade("baristas").unwrap().affordable);
        assert_eq!(snap.count(EntityKind::Collector), 1);
        assert_eq!(snap.entities.len(), 1);
        assert!(game.can_afford("barista_speed"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let game = Game::new(VariantKind::TankAttack, 1);
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        assert!(json.contains("\"variant\":\"tank-attack\""));
        assert!(json.contains("\"fire_rate\""));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Game::new(VariantKind::GoldMiner, 77);
        let mut b = Game::new(VariantKind::GoldMiner, 77);
        for _ in 0..300 {
            a.tick(1.0 / 60.0);
            b.tick(1.0 / 60.0);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
