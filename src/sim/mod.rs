//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Elapsed time is supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)

pub mod collision;
pub mod ledger;
pub mod playfield;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionEffect, CollisionRule, resolve_collisions};
pub use ledger::{UpgradeEffect, UpgradeLedger, UpgradeSpec, UpgradeState};
pub use playfield::{BoundsPolicy, Edge, Playfield};
pub use spawn::SpawnTimer;
pub use state::{Entity, EntityKind, SimulationState};
pub use tick::tick;
