//! Clock and pacing utilities for sample streams.
//!
//! Series timestamps are wall-clock seconds as an `f64`, the unit the
//! upstream sample producers report. This module provides:
//! - The wall-clock source used for default timestamps
//! - A monotonic clock anchored at stream start, for pacing
//! - A rate controller for the polling loop

use std::time::Instant;

/// Current wall-clock time in seconds since the Unix epoch.
///
/// This is the default timestamp recorded by a series when the caller
/// supplies none.
pub fn wall_clock_secs() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// A stream clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the stream started).
#[derive(Debug, Clone)]
pub struct StreamClock {
    /// The instant the stream started.
    epoch: Instant,

    /// Wall-clock time at epoch (seconds since Unix epoch).
    epoch_wall_secs: f64,
}

impl StreamClock {
    /// Create a new stream clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall_secs: wall_clock_secs(),
        }
    }

    /// Seconds elapsed since stream start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Nanoseconds elapsed since stream start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at stream start.
    pub fn epoch_wall_secs(&self) -> f64 {
        self.epoch_wall_secs
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}

/// Rate controller for sample polling.
#[derive(Debug)]
pub struct RateController {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ns: 1_000_000_000 / target_hz.max(1) as u64,
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_is_recent() {
        // Anything after 2020-01-01 and before year ~2100
        let now = wall_clock_secs();
        assert!(now > 1_577_836_800.0);
        assert!(now < 4_102_444_800.0);
    }

    #[test]
    fn test_stream_clock_elapsed() {
        let clock = StreamClock::start();
        // Should be very small but non-negative
        assert!(clock.elapsed_ns() < 1_000_000_000); // less than 1 second
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((StreamClock::ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
        assert_eq!(StreamClock::secs_to_ns(2.0), 2_000_000_000);
    }

    #[test]
    fn test_rate_controller() {
        let mut ctrl = RateController::new(60);
        assert!(ctrl.should_tick(0)); // first tick always fires
        assert!(!ctrl.should_tick(1_000_000)); // 1ms later, too soon
        assert!(ctrl.should_tick(17_000_000)); // ~17ms later, should fire (60Hz ~ 16.67ms)
    }
}
