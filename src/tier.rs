//! Performance tiers and the rolling FPS measurement that drives them.
//!
//! ## State machine
//!
//! | From     | To       | Trigger                     |
//! |----------|----------|-----------------------------|
//! | `High`   | `Medium` | measured FPS < 30           |
//! | `Medium` | `Low`    | measured FPS < 20           |
//! | `Low`    | (none)   | absorbing                   |
//!
//! Measurements never raise the tier.  Only an explicit settings change can.

use std::time::Duration;

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Discrete throttling level.  Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    Medium,
    #[default]
    High,
}

impl PerformanceTier {
    /// Fraction of the configured particle count kept at this tier.
    #[inline]
    pub fn scale(self) -> f32 {
        match self {
            PerformanceTier::High => TIER_SCALE_HIGH,
            PerformanceTier::Medium => TIER_SCALE_MEDIUM,
            PerformanceTier::Low => TIER_SCALE_LOW,
        }
    }

    /// Ambient particle target for `base_count` at this tier.
    pub fn target_count(self, base_count: u32) -> usize {
        (base_count as f32 * self.scale()).round() as usize
    }

    /// Whether connective edges are drawn at this tier.
    #[inline]
    pub fn draws_connections(self) -> bool {
        self == PerformanceTier::High
    }

    /// Tier after observing one FPS measurement.
    pub fn after_measurement(self, fps: u32) -> Self {
        match self {
            PerformanceTier::High if fps < FPS_DOWNGRADE_HIGH => PerformanceTier::Medium,
            PerformanceTier::Medium if fps < FPS_DOWNGRADE_MEDIUM => PerformanceTier::Low,
            other => other,
        }
    }

    /// Parse a tier name; `None` for anything unrecognised.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "high" => Some(PerformanceTier::High),
            "medium" => Some(PerformanceTier::Medium),
            "low" => Some(PerformanceTier::Low),
            _ => None,
        }
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            PerformanceTier::High => "high",
            PerformanceTier::Medium => "medium",
            PerformanceTier::Low => "low",
        }
    }
}

/// Counts frames over a one-second window.
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    frames: u32,
    elapsed: Duration,
    last_fps: Option<u32>,
}

impl FpsMeter {
    /// Record one frame that took `dt`.  Returns the frame count of the window
    /// when the window closes, after which counting restarts from zero.
    pub fn tick(&mut self, dt: Duration) -> Option<u32> {
        self.frames += 1;
        self.elapsed += dt;

        if self.elapsed >= Duration::from_millis(FPS_WINDOW_MS) {
            let fps = self.frames;
            self.frames = 0;
            self.elapsed = Duration::ZERO;
            self.last_fps = Some(fps);
            Some(fps)
        } else {
            None
        }
    }

    /// Most recent completed measurement, if any window has closed yet.
    #[inline]
    pub fn fps(&self) -> Option<u32> {
        self.last_fps
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downgrades_one_tier_at_a_time() {
        assert_eq!(
            PerformanceTier::High.after_measurement(5),
            PerformanceTier::Medium
        );
        assert_eq!(
            PerformanceTier::Medium.after_measurement(5),
            PerformanceTier::Low
        );
        assert_eq!(PerformanceTier::Low.after_measurement(5), PerformanceTier::Low);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(
            PerformanceTier::High.after_measurement(30),
            PerformanceTier::High
        );
        assert_eq!(
            PerformanceTier::Medium.after_measurement(20),
            PerformanceTier::Medium
        );
        // Medium only drops below 20, even if it is also below 30.
        assert_eq!(
            PerformanceTier::Medium.after_measurement(25),
            PerformanceTier::Medium
        );
    }

    #[test]
    fn high_fps_never_upgrades() {
        assert_eq!(
            PerformanceTier::Low.after_measurement(144),
            PerformanceTier::Low
        );
        assert_eq!(
            PerformanceTier::Medium.after_measurement(144),
            PerformanceTier::Medium
        );
    }

    #[test]
    fn target_count_rounds_scaled_base() {
        assert_eq!(PerformanceTier::High.target_count(100), 100);
        assert_eq!(PerformanceTier::Medium.target_count(100), 70);
        assert_eq!(PerformanceTier::Low.target_count(100), 40);
        assert_eq!(PerformanceTier::Low.target_count(15), 6);
    }

    #[test]
    fn meter_reports_frames_per_window() {
        let mut meter = FpsMeter::default();
        let frame = Duration::from_millis(40);
        let mut reported = None;
        for _ in 0..25 {
            if let Some(fps) = meter.tick(frame) {
                reported = Some(fps);
            }
        }
        assert_eq!(reported, Some(25));
        assert_eq!(meter.fps(), Some(25));
    }

    #[test]
    fn meter_is_silent_before_a_full_second() {
        let mut meter = FpsMeter::default();
        for _ in 0..59 {
            assert_eq!(meter.tick(Duration::from_millis(16)), None);
        }
        assert_eq!(meter.fps(), None);
    }
}
