//! Smoothing filters for sample series.
//!
//! The filter algorithm is a closed set selected once at series
//! construction. String-keyed selection (config files, CLI flags) goes
//! through [`FilterKind::from_name`], which fails immediately for an
//! unrecognized name instead of deferring to first use.

use sensorwin_common::error::{SensorwinError, SensorwinResult};

use crate::ring::SampleRing;

/// Available smoothing algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Exponential Weighted Moving Average.
    ///
    /// `weight` is the per-step decay in `(0.0, 1.0)`. `None` auto-computes
    /// the weight from the fill level on every insert until the window
    /// first saturates, then freezes it.
    Ewma { weight: Option<f64> },

    /// Simple Moving Average over the currently valid samples.
    Sma,

    /// No smoothing — the filtered view mirrors the newest raw sample.
    Passthrough,
}

impl FilterKind {
    /// Resolve a filter name from config or CLI input.
    ///
    /// Recognized names: `"ewma"`, `"sma"`, `"passthrough"` (alias
    /// `"none"`). `weight` only applies to EWMA and is ignored otherwise.
    pub fn from_name(name: &str, weight: Option<f64>) -> SensorwinResult<Self> {
        match name {
            "ewma" => Ok(Self::Ewma { weight }),
            "sma" => Ok(Self::Sma),
            "passthrough" | "none" => Ok(Self::Passthrough),
            other => Err(SensorwinError::invalid_filter(other)),
        }
    }

    /// Canonical name for display and config round-trips.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ewma { .. } => "ewma",
            Self::Sma => "sma",
            Self::Passthrough => "passthrough",
        }
    }
}

/// Precomputed EWMA weight table for one series.
///
/// Weights are `weight^k` for relative index `k` (0 = newest), normalized
/// by their sum at query time. While the window is unsaturated the table
/// is recomputed on every insert; once `added` first reaches capacity the
/// state freezes. A user-configured weight is never replaced, only the
/// table grows with the fill level.
#[derive(Debug, Clone)]
pub(crate) struct EwmaWeights {
    /// User-supplied weight, if any. Auto-computed otherwise.
    configured: Option<f64>,
    weight: f64,
    weights: Vec<f64>,
    denom: f64,
    frozen: bool,
}

impl EwmaWeights {
    pub(crate) fn new(capacity: usize, configured: Option<f64>) -> Self {
        Self {
            configured,
            weight: configured.unwrap_or(0.0),
            weights: vec![0.0; capacity],
            denom: 0.0,
            frozen: false,
        }
    }

    /// Current per-step weight.
    pub(crate) fn weight(&self) -> f64 {
        self.weight
    }

    /// Unnormalized weight table; the first `added` entries are
    /// meaningful.
    pub(crate) fn table(&self) -> &[f64] {
        &self.weights
    }

    /// Rebuild the table for the given fill level (post-insert `added`).
    ///
    /// The auto weight is `1 - 2/(added + 1)`, the standard span-based
    /// smoothing factor for a window of `added` samples.
    pub(crate) fn recompute(&mut self, added: usize, capacity: usize) {
        if self.frozen {
            return;
        }
        if self.configured.is_none() {
            self.weight = 1.0 - 2.0 / (added as f64 + 1.0);
        }
        self.denom = 0.0;
        for k in 0..added {
            self.weights[k] = self.weight.powi(k as i32);
            self.denom += self.weights[k];
        }
        if added == capacity {
            self.frozen = true;
        }
    }

    /// The normalized weighted average of the valid samples in `ring`.
    /// Returns the zero sample when the ring is empty.
    pub(crate) fn apply(&self, ring: &SampleRing) -> Vec<f64> {
        let mut result = vec![0.0; ring.dimension()];
        if ring.added() == 0 || self.denom == 0.0 {
            return result;
        }
        for (k, sample) in ring.iter().take(ring.added()).enumerate() {
            let w = self.weights[k];
            for (acc, component) in result.iter_mut().zip(sample) {
                *acc += w * component;
            }
        }
        for component in &mut result {
            *component /= self.denom;
        }
        result
    }
}

/// The arithmetic mean of the valid samples in `ring`, component-wise.
/// Returns the zero sample when the ring is empty — a defined degenerate
/// result, not an error.
pub(crate) fn sma(ring: &SampleRing) -> Vec<f64> {
    let mut result = vec![0.0; ring.dimension()];
    if ring.added() == 0 {
        return result;
    }
    for sample in ring.iter().take(ring.added()) {
        for (acc, component) in result.iter_mut().zip(sample) {
            *acc += component;
        }
    }
    let count = ring.added() as f64;
    for component in &mut result {
        *component /= count;
    }
    result
}
