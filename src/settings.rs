//! Runtime settings
//!
//! JSON-backed so the same file works for the native runner and for the
//! web page (which passes the JSON string in).

use serde::{Deserialize, Serialize};

use crate::consts::{HUD_POLL_INTERVAL_MS, MAX_FRAME_DT};
use crate::variants::VariantKind;

/// Environment variable naming a settings file for the native runner
pub const SETTINGS_ENV: &str = "IDLE_ARCADE_SETTINGS";

/// Engine/driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Which game to run
    pub variant: VariantKind,
    /// RNG seed (same seed, same run)
    pub seed: u64,
    /// Frame rate the headless runner simulates
    pub fps: u32,
    /// Simulated seconds the headless runner plays
    pub run_seconds: f64,
    /// HUD refresh interval
    pub poll_interval_ms: f64,
    /// Longest frame the clock will report
    pub max_frame_dt: f64,
    /// Let the built-in idle player buy upgrades
    pub auto_buy: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            variant: VariantKind::Pong,
            seed: 12345,
            fps: 60,
            run_seconds: 60.0,
            poll_interval_ms: HUD_POLL_INTERVAL_MS,
            max_frame_dt: MAX_FRAME_DT,
            auto_buy: true,
        }
    }
}

impl SimSettings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would stall or break the driver
    fn sanitized(mut self) -> Self {
        self.fps = self.fps.clamp(1, 1000);
        if !self.run_seconds.is_finite() || self.run_seconds < 0.0 {
            self.run_seconds = 0.0;
        }
        if !self.poll_interval_ms.is_finite() || self.poll_interval_ms < 0.0 {
            self.poll_interval_ms = HUD_POLL_INTERVAL_MS;
        }
        if !self.max_frame_dt.is_finite() || self.max_frame_dt <= 0.0 {
            self.max_frame_dt = MAX_FRAME_DT;
        }
        self
    }

    /// Frame length the headless runner uses
    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the file named by `IDLE_ARCADE_SETTINGS`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => Self::load(std::path::Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = SimSettings::from_json(r#"{ "variant": "GoldMiner", "seed": 9 }"#).unwrap();
        assert_eq!(settings.variant, VariantKind::GoldMiner);
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.poll_interval_ms, HUD_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_bad_values_sanitized() {
        let settings =
            SimSettings::from_json(r#"{ "fps": 0, "max_frame_dt": -1.0, "run_seconds": -5.0 }"#)
                .unwrap();
        assert_eq!(settings.fps, 1);
        assert_eq!(settings.max_frame_dt, MAX_FRAME_DT);
        assert_eq!(settings.run_seconds, 0.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SimSettings::from_json("{ not json").is_err());
        assert!(SimSettings::from_json(r#"{ "variant": "Chess" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = SimSettings {
            variant: VariantKind::TankAttack,
            auto_buy: false,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(SimSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = SimSettings::load(std::path::Path::new("/nonexistent/idle-arcade.json"));
        assert_eq!(settings, SimSettings::default());
    }
}
