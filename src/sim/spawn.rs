//! Fractional spawn accumulator
//!
//! Spawning is driven by elapsed time, not by frames: a 30 fps and a
//! 144 fps client spawn the same number of entities over the same
//! wall-clock span. The fractional part is carried between frames.

use serde::{Deserialize, Serialize};

/// Rate-driven spawn counter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Spawns per second
    pub rate: f64,
    /// Pending fractional spawns carried across frames (always in [0, 1) after `advance`)
    pub accumulator: f64,
}

impl SpawnTimer {
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            accumulator: 0.0,
        }
    }

    /// Accumulate `dt` seconds and return how many spawns are due.
    ///
    /// Negative or non-finite inputs contribute nothing.
    pub fn advance(&mut self, dt: f64) -> u32 {
        let gained = dt * self.rate;
        if gained.is_finite() && gained > 0.0 {
            self.accumulator += gained;
        }

        if self.accumulator < 1.0 {
            return 0;
        }
        // Same result as decrementing by one per spawn, without looping
        let whole = self.accumulator.floor();
        self.accumulator -= whole;
        whole as u32
    }

    /// Drop any pending fraction (e.g. when a cadence restarts)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_spawn_carries_remainder() {
        // 2/sec for 0.9s accumulates 1.8: one spawn, not two
        let mut timer = SpawnTimer::new(2.0);
        assert_eq!(timer.advance(0.9), 1);
        assert!((timer.accumulator - 0.8).abs() < 1e-9);

        // Second frame reaches 2.6
        assert_eq!(timer.advance(0.9), 2);
        assert!((timer.accumulator - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_below_threshold_spawns_nothing() {
        let mut timer = SpawnTimer::new(1.0);
        assert_eq!(timer.advance(0.4), 0);
        assert_eq!(timer.advance(0.4), 0);
        assert_eq!(timer.advance(0.4), 1);
    }

    #[test]
    fn test_bad_elapsed_is_ignored() {
        let mut timer = SpawnTimer::new(5.0);
        assert_eq!(timer.advance(-1.0), 0);
        assert_eq!(timer.advance(f64::NAN), 0);
        assert_eq!(timer.advance(f64::INFINITY), 0);
        assert_eq!(timer.accumulator, 0.0);
    }

    #[test]
    fn test_zero_rate() {
        let mut timer = SpawnTimer::new(0.0);
        assert_eq!(timer.advance(1000.0), 0);
    }

    proptest! {
        #[test]
        fn prop_spawn_count_is_frame_rate_independent(
            rate in 0.0f64..20.0,
            total in 0.0f64..30.0,
            frames in 1usize..240,
        ) {
            let mut whole = SpawnTimer::new(rate);
            let expected = whole.advance(total);

            let mut split = SpawnTimer::new(rate);
            let step = total / frames as f64;
            let mut spawned = 0u32;
            for _ in 0..frames {
                spawned += split.advance(step);
            }

            // Floating-point summation may land one either side of an integer boundary
            prop_assert!((i64::from(spawned) - i64::from(expected)).abs() <= 1);
            prop_assert!(split.accumulator >= 0.0 && split.accumulator < 1.0);
        }
    }
}
