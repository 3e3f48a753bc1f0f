//! Climate- and drought-driven scaling of liquid consumption.
//!
//! Hot, dry locations and long spells without rain make a farm thirstier.
//! The tracker counts ticks since the last rainfall (rain must persist for
//! a short delay before it counts) and combines that with the farm's
//! climate reading into a single multiplier that strategies apply to their
//! base liquid consumption.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tillworks_types::ClimateReading;

/// Ticks of continuous rain before rainfall resets the drought counter.
pub const HYDRATION_DELAY: u32 = 100;

/// Ticks without rain after which the drought surcharge applies.
pub const DROUGHT_THRESHOLD: u32 = 2000;

/// Serializable hydration counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationState {
    /// Ticks since rainfall last counted.
    pub ticks_since_rainfall: u32,
    /// Remaining rain ticks before rainfall counts.
    pub hydration_delay: u32,
}

impl Default for HydrationState {
    fn default() -> Self {
        Self {
            ticks_since_rainfall: 0,
            hydration_delay: HYDRATION_DELAY,
        }
    }
}

/// Tracks rainfall and computes the hydration modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationTracker {
    state: HydrationState,
}

impl HydrationTracker {
    /// Advance one tick.
    pub const fn update(&mut self, raining: bool) {
        if raining {
            if self.state.hydration_delay > 0 {
                self.state.hydration_delay = self.state.hydration_delay.saturating_sub(1);
            } else {
                self.state.ticks_since_rainfall = 0;
            }
        } else {
            self.state.hydration_delay = HYDRATION_DELAY;
            self.state.ticks_since_rainfall = self.state.ticks_since_rainfall.saturating_add(1);
        }
    }

    /// Whether the drought surcharge is in effect.
    pub const fn is_drought(&self) -> bool {
        self.state.ticks_since_rainfall >= DROUGHT_THRESHOLD
    }

    /// Combined multiplier for liquid consumption at `climate`.
    pub fn modifier(&self, climate: &ClimateReading) -> Decimal {
        let drought = if self.is_drought() {
            Decimal::new(11, 1)
        } else {
            Decimal::ONE
        };
        temperature_modifier(climate.temperature)
            .checked_mul(humidity_modifier(climate.humidity))
            .and_then(|v| v.checked_mul(drought))
            .unwrap_or(Decimal::ONE)
    }

    /// The modifier as a whole percentage.
    pub fn percent(&self, climate: &ClimateReading) -> u32 {
        self.modifier(climate)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|v| v.round().to_u32())
            .unwrap_or(100)
    }

    /// Current counters.
    pub const fn state(&self) -> HydrationState {
        self.state
    }

    /// Replace the counters.
    pub const fn restore(&mut self, state: HydrationState) {
        self.state = state;
    }
}

fn temperature_modifier(temperature: Decimal) -> Decimal {
    temperature.max(Decimal::new(8, 1))
}

fn humidity_modifier(humidity: Decimal) -> Decimal {
    if humidity <= Decimal::ZERO {
        return Decimal::TWO;
    }
    Decimal::ONE
        .checked_div(humidity)
        .map_or(Decimal::TWO, |v| v.min(Decimal::TWO))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn climate(temperature: Decimal, humidity: Decimal) -> ClimateReading {
        ClimateReading {
            temperature,
            humidity,
        }
    }

    #[test]
    fn temperate_climate_is_neutral() {
        let tracker = HydrationTracker::default();
        assert_eq!(tracker.modifier(&climate(dec!(1.0), dec!(1.0))), dec!(1.0));
        assert_eq!(tracker.percent(&climate(dec!(1.0), dec!(1.0))), 100);
    }

    #[test]
    fn cold_floor_and_arid_cap() {
        let tracker = HydrationTracker::default();
        // max(0.2, 0.8) * min(1 / 0.25, 2)
        assert_eq!(tracker.modifier(&climate(dec!(0.2), dec!(0.25))), dec!(1.6));
        assert_eq!(tracker.modifier(&climate(dec!(0.2), dec!(0))), dec!(1.6));
        assert_eq!(tracker.modifier(&climate(dec!(2.0), dec!(0.8))), dec!(2.5));
    }

    #[test]
    fn drought_after_threshold() {
        let mut tracker = HydrationTracker::default();
        for _ in 0..DROUGHT_THRESHOLD {
            tracker.update(false);
        }
        assert!(tracker.is_drought());
        assert_eq!(tracker.modifier(&climate(dec!(1.0), dec!(1.0))), dec!(1.1));
        assert_eq!(tracker.percent(&climate(dec!(1.0), dec!(1.0))), 110);
    }

    #[test]
    fn rain_counts_after_delay() {
        let mut tracker = HydrationTracker::default();
        for _ in 0..DROUGHT_THRESHOLD {
            tracker.update(false);
        }
        for _ in 0..HYDRATION_DELAY {
            tracker.update(true);
        }
        // Delay exhausted but rainfall not counted yet.
        assert!(tracker.is_drought());
        tracker.update(true);
        assert!(!tracker.is_drought());
        assert_eq!(tracker.state().ticks_since_rainfall, 0);
    }

    #[test]
    fn dry_tick_rearms_delay() {
        let mut tracker = HydrationTracker::default();
        tracker.update(true);
        tracker.update(true);
        assert_eq!(tracker.state().hydration_delay, HYDRATION_DELAY.saturating_sub(2));
        tracker.update(false);
        assert_eq!(tracker.state().hydration_delay, HYDRATION_DELAY);
    }
}
