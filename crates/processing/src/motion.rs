//! Velocity-dependent motion gain.
//!
//! Maps the magnitude of a per-step displacement onto a gain factor:
//! displacements below `k_min` are damped toward zero, displacements
//! above `k_max` get the full boost, and the band in between ramps
//! linearly. Applied to pointer-style control signals, this suppresses
//! sensor jitter at rest while keeping deliberate motion responsive.

use serde::{Deserialize, Serialize};

/// Thresholds and gain limits for the motion curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionGainConfig {
    /// Displacement magnitude below which the damp factor applies fully.
    pub k_min: f64,

    /// Displacement magnitude above which the boost factor applies fully.
    pub k_max: f64,

    /// Maximum amplification added for fast movement.
    pub boost: f64,

    /// Damping subtracted for slow movement.
    pub damp: f64,
}

impl Default for MotionGainConfig {
    fn default() -> Self {
        Self {
            k_min: 4.0,
            k_max: 20.0,
            boost: 2.0,
            damp: 1.0,
        }
    }
}

impl MotionGainConfig {
    /// Gain term for a displacement magnitude `dr`, in
    /// `[-damp, boost - damp]`.
    pub fn gain(&self, dr: f64) -> f64 {
        if dr < self.k_min {
            return -self.damp;
        }
        if dr > self.k_max {
            return self.boost - self.damp;
        }
        ((self.boost + self.damp) * (dr - self.k_min) / (self.k_max - self.k_min)) - self.damp
    }

    /// Advance a smoothed coordinate by `delta` with velocity-dependent
    /// gain: `prev + delta * (1 + gain(|delta|))`.
    pub fn amplify(&self, prev: f64, delta: f64) -> f64 {
        prev + delta * (1.0 + self.gain(delta.abs()))
    }
}

/// Stateful per-axis wrapper around the gain curve.
///
/// Tracks the previous raw input (for the displacement) and the previous
/// amplified output (the accumulation point) separately; the first
/// sample passes through unchanged.
#[derive(Debug, Clone)]
pub struct MotionAmplifier {
    config: MotionGainConfig,
    last_raw: Option<f64>,
    last_out: f64,
}

impl MotionAmplifier {
    pub fn new(config: MotionGainConfig) -> Self {
        Self {
            config,
            last_raw: None,
            last_out: 0.0,
        }
    }

    /// Feed the next raw coordinate, returning the amplified one.
    pub fn step(&mut self, raw: f64) -> f64 {
        match self.last_raw {
            None => {
                self.last_raw = Some(raw);
                self.last_out = raw;
                raw
            }
            Some(prev_raw) => {
                let delta = raw - prev_raw;
                let out = self.config.amplify(self.last_out, delta);
                self.last_raw = Some(raw);
                self.last_out = out;
                out
            }
        }
    }

    /// Forget accumulated state; the next sample passes through.
    pub fn reset(&mut self) {
        self.last_raw = None;
        self.last_out = 0.0;
    }

    pub fn config(&self) -> &MotionGainConfig {
        &self.config
    }
}
