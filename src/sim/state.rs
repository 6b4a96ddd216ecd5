//! Simulation state and entity types
//!
//! One `SimulationState` per running game. Created once with the variant's
//! starting values and dropped with the game; nothing here is persisted.

use glam::Vec2;
use serde::Serialize;

use super::ledger::UpgradeLedger;
use super::playfield::Playfield;
use super::spawn::SpawnTimer;

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityKind {
    /// Moves around and picks things up (runner, barista, miner)
    Collector,
    /// Worth currency when picked up (coin, customer, nugget)
    Collectible,
    Ball,
    Paddle,
    Enemy,
    Projectile,
    Turret,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Collector,
        EntityKind::Collectible,
        EntityKind::Ball,
        EntityKind::Paddle,
        EntityKind::Enemy,
        EntityKind::Projectile,
        EntityKind::Turret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Collector => "collector",
            EntityKind::Collectible => "collectible",
            EntityKind::Ball => "ball",
            EntityKind::Paddle => "paddle",
            EntityKind::Enemy => "enemy",
            EntityKind::Projectile => "projectile",
            EntityKind::Turret => "turret",
        }
    }
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Assigned by [`SimulationState::add`]
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Proximity radius for collisions and bounds
    pub radius: f32,
    /// Hit points for damageable entities
    pub health: Option<f32>,
    /// Currency paid out when collected/destroyed (or per bounce for balls)
    pub value: f64,
    /// Lane index for lane-based games
    pub lane: Option<u32>,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: 8.0,
            health: None,
            value: 0.0,
            lane: None,
        }
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_lane(mut self, lane: u32) -> Self {
        self.lane = Some(lane);
        self
    }

    /// Advance position by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Circle-circle proximity test
    #[inline]
    pub fn touches(&self, other: &Entity) -> bool {
        let reach = self.radius + other.radius;
        self.pos.distance_squared(other.pos) <= reach * reach
    }

    /// Rescale velocity to `speed`, keeping direction
    pub fn set_speed(&mut self, speed: f32) {
        self.vel = self.vel.normalize_or_zero() * speed;
    }
}

/// Complete game state, mutated in place by `tick` and `purchase`
#[derive(Debug, Clone, Serialize)]
pub struct SimulationState {
    /// Accumulated resource; never negative
    pub currency: f64,
    /// Active entities (ascending id order)
    pub entities: Vec<Entity>,
    pub ledger: UpgradeLedger,
    /// Main spawn cadence
    pub spawner: SpawnTimer,
    /// Secondary cadence for periodic variant actions (turret fire)
    pub action_timer: SpawnTimer,
    pub playfield: Playfield,
    /// Total simulated seconds
    pub elapsed: f64,
    /// Tick counter
    pub frames: u64,
    /// Lifetime number of collection events (pickups, kills, bounces)
    pub collected: u64,
    /// Lifetime currency earned
    pub earned: f64,
    /// Next entity ID
    next_id: u32,
}

impl SimulationState {
    pub fn new(ledger: UpgradeLedger, playfield: Playfield) -> Self {
        Self {
            currency: 0.0,
            entities: Vec::new(),
            ledger,
            spawner: SpawnTimer::default(),
            action_timer: SpawnTimer::default(),
            playfield,
            elapsed: 0.0,
            frames: 0,
            collected: 0,
            earned: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an entity, assigning it a fresh ID. Returns the ID.
    pub fn add(&mut self, mut entity: Entity) -> u32 {
        let id = self.next_entity_id();
        entity.id = id;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// Closest entity of `kind` to `from`
    pub fn nearest(&self, kind: EntityKind, from: Vec2) -> Option<&Entity> {
        self.of_kind(kind).min_by(|a, b| {
            a.pos
                .distance_squared(from)
                .partial_cmp(&b.pos.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Add earnings from a collection event
    pub fn earn(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.currency += amount;
            self.earned += amount;
        }
        self.collected += 1;
    }

    /// Attempt one upgrade purchase; silently does nothing without funds
    pub fn purchase(&mut self, name: &str) -> bool {
        self.ledger.purchase(name, &mut self.currency)
    }

    /// Current value of an upgrade stat
    pub fn stat(&self, name: &str) -> f64 {
        self.ledger.value_or(name, 0.0)
    }

    /// Ensure entities stay sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}
