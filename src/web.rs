//! Browser bindings
//!
//! The page drives everything: it calls `frame` from
//! `requestAnimationFrame`, `purchase` from button handlers, and reads
//! `snapshot_json` on its own HUD timer.

use wasm_bindgen::prelude::*;

use crate::driver::{FrameClock, HudPoller};
use crate::game::Game;
use crate::settings::SimSettings;
use crate::variants::VariantKind;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Idle Arcade (wasm) loaded");
}

/// One game instance owned by the page
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    clock: FrameClock,
    poller: HudPoller,
}

impl WebGame {
    fn from_parts(kind: VariantKind, seed: u64, settings: &SimSettings) -> WebGame {
        WebGame {
            game: Game::new(kind, seed),
            clock: FrameClock::new(settings.max_frame_dt),
            poller: HudPoller::new(settings.poll_interval_ms),
        }
    }
}

#[wasm_bindgen]
impl WebGame {
    /// Start `variant` (e.g. "pong", "coffee-shop") with `seed`
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str, seed: u64) -> Result<WebGame, JsValue> {
        let kind = VariantKind::from_str(variant)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game: {}", variant)))?;
        Ok(Self::from_parts(kind, seed, &SimSettings::default()))
    }

    /// Start from a JSON settings blob
    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(json: &str) -> Result<WebGame, JsValue> {
        let settings =
            SimSettings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_parts(settings.variant, settings.seed, &settings))
    }

    /// Advance by an explicit number of seconds
    pub fn tick(&mut self, elapsed_seconds: f64) {
        self.game.tick(elapsed_seconds);
    }

    /// Advance using a `requestAnimationFrame` timestamp (ms)
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.elapsed(now_ms);
        self.game.tick(dt);
    }

    /// Forget the last frame time (call when the tab becomes visible again)
    #[wasm_bindgen(js_name = resetClock)]
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    pub fn purchase(&mut self, name: &str) -> bool {
        self.game.purchase(name)
    }

    #[wasm_bindgen(js_name = canAfford)]
    pub fn can_afford(&self, name: &str) -> bool {
        self.game.can_afford(name)
    }

    #[wasm_bindgen(getter)]
    pub fn currency(&self) -> f64 {
        self.game.state().currency
    }

    /// Full HUD snapshot as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// HUD snapshot as JSON if the refresh interval has passed, else undefined
    #[wasm_bindgen(js_name = pollJson)]
    pub fn poll_json(&mut self, now_ms: f64) -> Option<String> {
        self.poller
            .poll(now_ms, &self.game)
            .and_then(|hud| serde_json::to_string(&hud).ok())
    }
}
