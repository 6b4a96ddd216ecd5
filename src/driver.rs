//! Render-loop helpers
//!
//! The presentation layer owns the loop. These turn its timestamps into
//! tick lengths and decide when the HUD should re-read the game.

use crate::consts::{HUD_POLL_INTERVAL_MS, MAX_FRAME_DT};
use crate::game::{Game, HudSnapshot};

/// Converts render-loop timestamps (ms) into elapsed seconds
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous call; zero on the first call.
    /// Clamped to `max_dt`, and to zero if the clock went backwards.
    pub fn elapsed(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() { dt } else { 0.0 }
    }

    /// Forget the previous timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Rate-limits HUD refreshes to a fixed interval
#[derive(Debug, Clone)]
pub struct HudPoller {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Default for HudPoller {
    fn default() -> Self {
        Self::new(HUD_POLL_INTERVAL_MS)
    }
}

impl HudPoller {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// True when a refresh is due at `now_ms` (and records it)
    pub fn due(&mut self, now_ms: f64) -> bool {
        let due = self
            .last_ms
            .is_none_or(|last| now_ms - last >= self.interval_ms);
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    /// Snapshot the game if a refresh is due
    pub fn poll(&mut self, now_ms: f64, game: &Game) -> Option<HudSnapshot> {
        self.due(now_ms).then(|| game.snapshot())
    }
}

/// Demo/idle player: buys the cheapest affordable upgrade
#[derive(Debug, Clone, Default)]
pub struct AutoBuyer {
    pub purchases: u32,
}

impl AutoBuyer {
    /// Make at most one purchase. Returns the upgrade bought.
    pub fn step(&mut self, game: &mut Game) -> Option<&'static str> {
        let state = game.state();
        let choice = state
            .ledger
            .iter()
            .filter(|(spec, _)| state.ledger.can_afford(spec.name, state.currency))
            .min_by(|a, b| {
                a.1.cost
                    .partial_cmp(&b.1.cost)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(spec, _)| spec.name)?;

        if game.purchase(choice) {
            self.purchases += 1;
            log::info!("Auto-bought {} ({} total)", choice, self.purchases);
            Some(choice)
        } else {
            None
        }
    }
}
