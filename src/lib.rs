//! Idle Arcade - tick engine for small incremental arcade games
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, spawning, collisions, upgrades)
//! - `variants`: The individual games built on top of `sim`
//! - `game`: Simulation context owned by the presentation layer
//! - `driver`: Frame clock and HUD polling for the render loop
//! - `settings`: Runtime configuration

pub mod driver;
pub mod game;
pub mod settings;
pub mod sim;
pub mod variants;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{AutoBuyer, FrameClock, HudPoller};
pub use game::{Game, HudSnapshot};
pub use settings::SimSettings;
pub use variants::{Variant, VariantKind};

use glam::Vec2;

/// Engine-wide constants
pub mod consts {
    /// Largest elapsed time a single frame may report (seconds).
    /// Longer gaps (background tab, debugger) are clamped to this.
    pub const MAX_FRAME_DT: f64 = 0.1;
    /// HUD refresh interval used by the presentation layer
    pub const HUD_POLL_INTERVAL_MS: f64 = 100.0;

    /// Default playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
}

/// Direction from `from` toward `to`, zero if the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
