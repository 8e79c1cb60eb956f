//! Timing power meter
//!
//! Holding the launch button charges the meter; the charge is the hold time
//! folded into a fixed cycle, so holding too long wraps back to weak.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{METER_CAUTION_MS, METER_CYCLE_MS, METER_DANGER_MS};

/// Meter zone for a click time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterZone {
    /// [0, 300): green → yellow
    Safe,
    /// [300, 560): yellow → red
    Caution,
    /// [560, 600): solid red
    Danger,
}

impl MeterZone {
    pub fn for_click(click_ms: u32) -> Self {
        match click_ms % METER_CYCLE_MS {
            t if t < METER_CAUTION_MS => MeterZone::Safe,
            t if t < METER_DANGER_MS => MeterZone::Caution,
            _ => MeterZone::Danger,
        }
    }
}

/// Slack for float error when truncating to whole milliseconds
const MS_EPSILON: f64 = 1e-6;

/// Fold a hold duration (seconds, truncated to whole ms) into the meter cycle
pub fn click_time(hold_secs: f64) -> u32 {
    let ms = (hold_secs.max(0.0) * 1000.0 + MS_EPSILON).floor() as u64;
    (ms % METER_CYCLE_MS as u64) as u32
}

/// Bar color (RGB, 0-1) for a click time
pub fn meter_color(click_ms: u32) -> Vec3 {
    let t = click_ms % METER_CYCLE_MS;
    match MeterZone::for_click(t) {
        MeterZone::Safe => {
            let k = t as f32 / METER_CAUTION_MS as f32;
            Vec3::new(k, 1.0, 0.0)
        }
        MeterZone::Caution => {
            let span = (METER_DANGER_MS - METER_CAUTION_MS) as f32;
            let k = (t - METER_CAUTION_MS) as f32 / span;
            Vec3::new(1.0, 1.0 - k, 0.0)
        }
        MeterZone::Danger => Vec3::new(1.0, 0.0, 0.0),
    }
}

/// Meter lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum PowerMeter {
    #[default]
    Idle,
    /// Button held since `started_at` (seconds on the session clock)
    Charging { started_at: f64 },
    /// Released; waiting to be applied to the ball
    Frozen { click_ms: u32 },
}

impl PowerMeter {
    /// Arm on button-down
    pub fn arm(&mut self, now: f64) {
        *self = PowerMeter::Charging { started_at: now };
    }

    /// Current reading; frozen value once released, 0 when idle
    pub fn reading(&self, now: f64) -> u32 {
        match *self {
            PowerMeter::Idle => 0,
            PowerMeter::Charging { started_at } => click_time(now - started_at),
            PowerMeter::Frozen { click_ms } => click_ms,
        }
    }

    /// Freeze on button-up. Returns the click time, or None if not charging.
    pub fn release(&mut self, now: f64) -> Option<u32> {
        let PowerMeter::Charging { started_at } = *self else {
            return None;
        };
        let click_ms = click_time(now - started_at);
        *self = PowerMeter::Frozen { click_ms };
        Some(click_ms)
    }

    /// Take the frozen value exactly once, leaving the meter idle
    pub fn consume(&mut self) -> Option<u32> {
        let PowerMeter::Frozen { click_ms } = *self else {
            return None;
        };
        *self = PowerMeter::Idle;
        Some(click_ms)
    }

    pub fn discard(&mut self) {
        *self = PowerMeter::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(MeterZone::for_click(0), MeterZone::Safe);
        assert_eq!(MeterZone::for_click(299), MeterZone::Safe);
        assert_eq!(MeterZone::for_click(300), MeterZone::Caution);
        assert_eq!(MeterZone::for_click(559), MeterZone::Caution);
        assert_eq!(MeterZone::for_click(560), MeterZone::Danger);
        assert_eq!(MeterZone::for_click(599), MeterZone::Danger);
    }

    #[test]
    fn test_click_time_wraps() {
        assert_eq!(click_time(0.150), 150);
        assert_eq!(click_time(0.6), 0);
        assert_eq!(click_time(0.75), 150);
        assert_eq!(click_time(-1.0), 0);
        // partial milliseconds are dropped, not rounded up into the next cycle
        assert_eq!(click_time(0.5996), 599);
        assert_eq!(click_time(0.1509), 150);
        assert_eq!(click_time(10.2 - 10.0), 200);
    }

    #[test]
    fn test_color_gradient() {
        assert_eq!(meter_color(0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(meter_color(300), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(meter_color(580), Vec3::new(1.0, 0.0, 0.0));
        let mid = meter_color(150);
        assert!((mid.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_meter_lifecycle() {
        let mut meter = PowerMeter::default();
        assert_eq!(meter.release(1.0), None);

        meter.arm(10.0);
        assert_eq!(meter.reading(10.2), 200);
        assert_eq!(meter.release(10.25), Some(250));
        // frozen reading ignores the clock
        assert_eq!(meter.reading(99.0), 250);
        assert_eq!(meter.consume(), Some(250));
        assert_eq!(meter.consume(), None);
        assert_eq!(meter, PowerMeter::Idle);
    }

    proptest! {
        #[test]
        fn click_time_stays_in_cycle(hold in 0.0f64..10_000.0) {
            let t = click_time(hold);
            prop_assert!(t < METER_CYCLE_MS);
        }

        #[test]
        fn color_channels_in_unit_range(t in 0u32..METER_CYCLE_MS) {
            let c = meter_color(t);
            prop_assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }
}
