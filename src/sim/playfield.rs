//! Playfield bounds and what happens to entities that leave them
//!
//! Coordinates are screen-style: origin top-left, +x right, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// A side of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Out-of-bounds handling for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsPolicy {
    /// No bounds handling
    Keep,
    /// Re-enter from the opposite side (lanes)
    Wrap,
    /// Remove once fully outside (enemies, projectiles, scrolling pickups)
    Remove,
    /// Bounce off every wall
    Reflect,
    /// Stop at the wall
    Clamp,
    /// Bounce off closed walls; leaving through `open` puts the entity back at center
    Respawn { open: Edge },
}

/// Outcome of applying a bounds policy to one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsOutcome {
    Inside,
    Adjusted,
    Respawned,
    Removed,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if a circle at `pos` with `radius` overlaps the playfield at all
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        pos.x + radius >= 0.0
            && pos.x - radius <= self.width
            && pos.y + radius >= 0.0
            && pos.y - radius <= self.height
    }

    /// Apply `policy` to an entity circle, adjusting position/velocity in place
    pub fn apply(
        &self,
        policy: BoundsPolicy,
        pos: &mut Vec2,
        vel: &mut Vec2,
        radius: f32,
    ) -> BoundsOutcome {
        match policy {
            BoundsPolicy::Keep => BoundsOutcome::Inside,
            BoundsPolicy::Wrap => self.wrap(pos),
            BoundsPolicy::Remove => {
                if self.overlaps(*pos, radius) {
                    BoundsOutcome::Inside
                } else {
                    BoundsOutcome::Removed
                }
            }
            BoundsPolicy::Reflect => self.reflect(pos, vel, radius, None),
            BoundsPolicy::Clamp => {
                let clamped = self.clamp(*pos, radius);
                if clamped == *pos {
                    BoundsOutcome::Inside
                } else {
                    *pos = clamped;
                    BoundsOutcome::Adjusted
                }
            }
            BoundsPolicy::Respawn { open } => self.reflect(pos, vel, radius, Some(open)),
        }
    }

    fn wrap(&self, pos: &mut Vec2) -> BoundsOutcome {
        let wrapped = Vec2::new(
            pos.x.rem_euclid(self.width),
            pos.y.rem_euclid(self.height),
        );
        if wrapped == *pos {
            BoundsOutcome::Inside
        } else {
            *pos = wrapped;
            BoundsOutcome::Adjusted
        }
    }

    fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        let r_x = radius.min(self.width / 2.0);
        let r_y = radius.min(self.height / 2.0);
        Vec2::new(
            pos.x.clamp(r_x, self.width - r_x),
            pos.y.clamp(r_y, self.height - r_y),
        )
    }

    fn reflect(
        &self,
        pos: &mut Vec2,
        vel: &mut Vec2,
        radius: f32,
        open: Option<Edge>,
    ) -> BoundsOutcome {
        let mut outcome = BoundsOutcome::Inside;

        let hits = [
            (Edge::Left, pos.x - radius < 0.0 && vel.x < 0.0),
            (Edge::Right, pos.x + radius > self.width && vel.x > 0.0),
            (Edge::Top, pos.y - radius < 0.0 && vel.y < 0.0),
            (Edge::Bottom, pos.y + radius > self.height && vel.y > 0.0),
        ];

        for (edge, hit) in hits {
            if !hit {
                continue;
            }
            if open == Some(edge) {
                // Only respawn once the entity is completely gone
                if !self.overlaps(*pos, radius) {
                    *pos = self.center();
                    *vel = respawn_velocity(*vel, edge);
                    return BoundsOutcome::Respawned;
                }
                continue;
            }
            match edge {
                Edge::Left | Edge::Right => vel.x = -vel.x,
                Edge::Top | Edge::Bottom => vel.y = -vel.y,
            }
            outcome = BoundsOutcome::Adjusted;
        }

        if outcome == BoundsOutcome::Adjusted {
            let clamped = self.clamp(*pos, radius);
            // Keep the open side unclamped so the entity can still leave through it
            match open {
                Some(Edge::Left) | Some(Edge::Right) => pos.y = clamped.y,
                Some(Edge::Top) | Some(Edge::Bottom) => pos.x = clamped.x,
                None => *pos = clamped,
            }
        }
        outcome
    }
}

/// Same speed, heading away from the edge the entity escaped through
fn respawn_velocity(vel: Vec2, escaped: Edge) -> Vec2 {
    match escaped {
        Edge::Left => Vec2::new(vel.x.abs(), vel.y),
        Edge::Right => Vec2::new(-vel.x.abs(), vel.y),
        Edge::Top => Vec2::new(vel.x, vel.y.abs()),
        Edge::Bottom => Vec2::new(vel.x, -vel.y.abs()),
    }
}
