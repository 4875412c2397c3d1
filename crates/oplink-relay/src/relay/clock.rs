//! Throttle clock: rate (Hz) -> sleep period for the next tick.
//!
//! The period is recomputed by the loop on every iteration, so a rate change
//! is picked up by the very next wait.

use std::time::Duration;

/// Shortest wait between ticks.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);
/// Longest wait between ticks.
pub const MAX_PERIOD: Duration = Duration::from_secs(3600);

/// Clock that ticks at `rate`, or at `fallback` while unthrottled or suppressed.
#[derive(Debug, Clone, Copy)]
pub struct ThrottleClock {
    fallback: Duration,
}

impl ThrottleClock {
    pub fn new(fallback: Duration) -> Self {
        Self { fallback }
    }

    /// Build from a fallback frequency in Hz.
    pub fn from_fallback_hz(hz: f64) -> Self {
        Self::new(period_for(hz))
    }

    pub fn fallback(&self) -> Duration {
        self.fallback
    }

    pub fn tick_period(&self, rate: f64) -> Duration {
        if rate == 0.0 || !rate.is_finite() {
            self.fallback
        } else {
            period_for(rate)
        }
    }
}

fn period_for(hz: f64) -> Duration {
    Duration::try_from_secs_f64(1.0 / hz.abs())
        .unwrap_or(MAX_PERIOD)
        .clamp(MIN_PERIOD, MAX_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> ThrottleClock {
        ThrottleClock::from_fallback_hz(10.0)
    }

    #[test]
    fn finite_rate_is_reciprocal() {
        assert_eq!(clock().tick_period(2.0), Duration::from_millis(500));
        assert_eq!(clock().tick_period(4.0), Duration::from_millis(250));
    }

    #[test]
    fn zero_and_infinite_use_fallback() {
        assert_eq!(clock().tick_period(0.0), Duration::from_millis(100));
        assert_eq!(clock().tick_period(f64::INFINITY), Duration::from_millis(100));
    }

    #[test]
    fn extreme_rates_are_clamped() {
        assert_eq!(clock().tick_period(1e12), MIN_PERIOD);
        assert_eq!(clock().tick_period(1e-300), MAX_PERIOD);
    }
}
