//! Time-aware sample series with automatic smoothing.
//!
//! [`TimeSeries`] wraps a raw sample ring, an optional filtered ring kept
//! in lock-step, and three scalar rings for per-sample timestamp,
//! inter-sample delta, and cumulative elapsed time. Every insert derives
//! defaults for the time metadata from the previous sample's stored
//! values; each field is independently overridable per call.
//!
//! When auto-filtering is enabled, an insert refreshes the filtered slot
//! at the head in a fixed order: pre-hook, primary filter, post-hook.
//! Inserts are atomic — a failing hook rolls the whole update back.

use std::fmt;

use sensorwin_common::clock::wall_clock_secs;
use sensorwin_common::config::SeriesDefaults;
use sensorwin_common::error::{SensorwinError, SensorwinResult};

use crate::filter::{self, EwmaWeights, FilterKind};
use crate::ring::SampleRing;

/// Which of the two parallel data planes to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Exactly what was inserted.
    Raw,
    /// The smoothed/hook-transformed values. Only present when the series
    /// was constructed with auto-filtering.
    Filtered,
}

/// Fill-level progression of a series window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPhase {
    /// Nothing inserted yet; the first insert records delta 0, elapsed 0.
    Initial,
    /// Partially filled; EWMA weights are recomputed on every insert.
    Warmup,
    /// Saturated. Terminal — eviction keeps the window full forever.
    Steady,
}

/// A hook transforming the filtered slot during an insert.
///
/// Receives the series after the raw write and returns one sample of the
/// series dimension. Extra per-call context is closure capture.
pub type SampleHook = Box<dyn Fn(&TimeSeries) -> Vec<f64> + Send>;

/// Construction parameters for a [`TimeSeries`].
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    /// Number of samples retained in the window.
    pub capacity: usize,

    /// Components per sample (1 = scalar).
    pub dimension: usize,

    /// Whether the filtered view is recomputed on every insert.
    pub auto_filter: bool,

    /// The primary smoothing filter.
    pub filter: FilterKind,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            dimension: 1,
            auto_filter: false,
            filter: FilterKind::Ewma { weight: None },
        }
    }
}

impl SeriesConfig {
    /// Config with the given geometry and default filtering.
    pub fn new(capacity: usize, dimension: usize) -> Self {
        Self {
            capacity,
            dimension,
            ..Default::default()
        }
    }

    /// Resolve a config from application defaults. Fails with
    /// `InvalidFilterAlgorithm` for an unrecognized filter name.
    pub fn from_defaults(defaults: &SeriesDefaults) -> SensorwinResult<Self> {
        Ok(Self {
            capacity: defaults.capacity,
            dimension: defaults.dimension,
            auto_filter: defaults.auto_filter,
            filter: FilterKind::from_name(&defaults.filter_alg, defaults.ewma_weight)?,
        })
    }
}

/// Optional per-insert overrides for the time metadata.
///
/// A supplied value is stored verbatim; fields left `None` are derived
/// from the previous sample's stored values, whether those were defaults
/// or overrides themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AddOptions {
    /// Wall-clock capture time in seconds. Default: now.
    pub timestamp: Option<f64>,

    /// Seconds since the previous sample. Default: `timestamp − previous
    /// timestamp` (0 for the first sample).
    pub delta: Option<f64>,

    /// Cumulative seconds since the first sample. Default: `previous
    /// elapsed + delta` (0 for the first sample).
    pub elapsed: Option<f64>,
}

impl AddOptions {
    pub fn with_timestamp(timestamp: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..Default::default()
        }
    }
}

/// Pre-insert state needed to undo one push across all parallel rings.
struct AddSnapshot {
    prev_added: usize,
    phase: FillPhase,
    evicted_raw: Vec<f64>,
    evicted_filtered: Vec<f64>,
    evicted_timestamp: f64,
    evicted_delta: f64,
    evicted_elapsed: f64,
    weights: EwmaWeights,
}

/// A fixed-capacity, time-aware circular buffer of sensor samples.
pub struct TimeSeries {
    raw: SampleRing,
    filtered: Option<SampleRing>,
    timestamp_ring: SampleRing,
    delta_ring: SampleRing,
    elapsed_ring: SampleRing,
    phase: FillPhase,
    filter: FilterKind,
    weights: EwmaWeights,
    pre_hook: Option<SampleHook>,
    post_hook: Option<SampleHook>,
}

impl TimeSeries {
    /// Create an empty series. Fails for zero capacity or dimension and
    /// inherits the config's filter selection, already validated.
    pub fn new(config: SeriesConfig) -> SensorwinResult<Self> {
        let raw = SampleRing::new(config.capacity, config.dimension)?;
        let filtered = if config.auto_filter {
            Some(SampleRing::new(config.capacity, config.dimension)?)
        } else {
            None
        };
        let ewma_weight = match config.filter {
            FilterKind::Ewma { weight } => weight,
            _ => None,
        };
        Ok(Self {
            raw,
            filtered,
            timestamp_ring: SampleRing::new(config.capacity, 1)?,
            delta_ring: SampleRing::new(config.capacity, 1)?,
            elapsed_ring: SampleRing::new(config.capacity, 1)?,
            phase: FillPhase::Initial,
            filter: config.filter,
            weights: EwmaWeights::new(config.capacity, ewma_weight),
            pre_hook: None,
            post_hook: None,
        })
    }

    /// Scalar series shorthand.
    pub fn scalar(capacity: usize) -> SensorwinResult<Self> {
        Self::new(SeriesConfig::new(capacity, 1))
    }

    /// Insert a sample with all time metadata derived from defaults.
    pub fn add(&mut self, sample: &[f64]) -> SensorwinResult<()> {
        self.add_with(sample, AddOptions::default())
    }

    /// Insert a sample with optional timestamp/delta/elapsed overrides.
    ///
    /// The insert either fully commits the raw write, time metadata, and
    /// (when auto-filtering) the filtered write, or fails with no
    /// observable effect.
    pub fn add_with(&mut self, sample: &[f64], opts: AddOptions) -> SensorwinResult<()> {
        if sample.len() != self.raw.dimension() {
            return Err(SensorwinError::shape_mismatch(
                self.raw.dimension(),
                sample.len(),
            ));
        }

        // Past the shape check, hooks are the only thing that can fail.
        // Snapshot the slot about to be overwritten so a bad hook result
        // rolls the insert back instead of committing half an update.
        let snapshot = if self.hooks_bound() {
            Some(self.capture_snapshot()?)
        } else {
            None
        };

        self.raw.push(sample)?;
        if let Some(ring) = self.filtered.as_mut() {
            ring.push(sample)?;
        }

        let (timestamp, delta, elapsed) = match self.phase {
            FillPhase::Initial => (
                opts.timestamp.unwrap_or_else(wall_clock_secs),
                opts.delta.unwrap_or(0.0),
                opts.elapsed.unwrap_or(0.0),
            ),
            FillPhase::Warmup | FillPhase::Steady => {
                let timestamp = opts.timestamp.unwrap_or_else(wall_clock_secs);
                let delta = match opts.delta {
                    Some(delta) => delta,
                    None => timestamp - self.timestamp_ring.scalar(0)?,
                };
                let elapsed = match opts.elapsed {
                    Some(elapsed) => elapsed,
                    None => self.elapsed_ring.scalar(0)? + delta,
                };
                (timestamp, delta, elapsed)
            }
        };
        self.timestamp_ring.push(&[timestamp])?;
        self.delta_ring.push(&[delta])?;
        self.elapsed_ring.push(&[elapsed])?;

        // Weights track the post-insert fill level until saturation.
        self.weights
            .recompute(self.raw.added(), self.raw.capacity());

        let was_steady = self.phase == FillPhase::Steady;
        self.phase = if self.raw.is_saturated() {
            FillPhase::Steady
        } else {
            FillPhase::Warmup
        };
        if !was_steady && self.phase == FillPhase::Steady {
            tracing::trace!(capacity = self.raw.capacity(), "series window saturated");
        }

        if self.filtered.is_some() {
            if let Err(e) = self.refresh_filtered() {
                if let Some(snapshot) = snapshot {
                    self.restore_snapshot(snapshot);
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// The Exponential Weighted Moving Average over the valid raw
    /// samples. The zero sample when the series is empty.
    pub fn ewma(&self) -> Vec<f64> {
        self.weights.apply(&self.raw)
    }

    /// The Simple Moving Average over the valid raw samples. The zero
    /// sample when the series is empty.
    pub fn sma(&self) -> Vec<f64> {
        filter::sma(&self.raw)
    }

    /// Read the sample at relative index `index` (0 = newest) from the
    /// given view.
    pub fn get(&self, view: View, index: usize) -> SensorwinResult<&[f64]> {
        match view {
            View::Raw => self.raw.get(index),
            View::Filtered => self.filtered_ring()?.get(index),
        }
    }

    /// Overwrite the sample at relative index `index` in the given view.
    pub fn set(&mut self, view: View, index: usize, sample: &[f64]) -> SensorwinResult<()> {
        match view {
            View::Raw => self.raw.set(index, sample),
            View::Filtered => match self.filtered.as_mut() {
                Some(ring) => ring.set(index, sample),
                None => Err(filtered_view_disabled()),
            },
        }
    }

    /// Read from the active view: filtered when auto-filtering is
    /// enabled, raw otherwise.
    pub fn sample(&self, index: usize) -> SensorwinResult<&[f64]> {
        self.get(self.active_view(), index)
    }

    /// Samples at relative indices `range` from the given view, newest
    /// first (the same axis as single-index access).
    pub fn window(&self, view: View, range: std::ops::Range<usize>) -> SensorwinResult<Vec<&[f64]>> {
        match view {
            View::Raw => self.raw.window(range),
            View::Filtered => self.filtered_ring()?.window(range),
        }
    }

    /// The view backing [`TimeSeries::sample`].
    pub fn active_view(&self) -> View {
        if self.filtered.is_some() {
            View::Filtered
        } else {
            View::Raw
        }
    }

    /// Wall-clock capture time of the sample at relative index `index`.
    pub fn timestamp(&self, index: usize) -> SensorwinResult<f64> {
        self.timestamp_ring.scalar(index)
    }

    /// Seconds between the sample at `index` and its predecessor.
    pub fn delta(&self, index: usize) -> SensorwinResult<f64> {
        self.delta_ring.scalar(index)
    }

    /// Cumulative seconds from the first sample to the sample at `index`.
    pub fn elapsed(&self, index: usize) -> SensorwinResult<f64> {
        self.elapsed_ring.scalar(index)
    }

    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    pub fn dimension(&self) -> usize {
        self.raw.dimension()
    }

    pub fn added(&self) -> usize {
        self.raw.added()
    }

    pub fn head(&self) -> usize {
        self.raw.head()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn is_saturated(&self) -> bool {
        self.raw.is_saturated()
    }

    pub fn phase(&self) -> FillPhase {
        self.phase
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    /// Current EWMA per-step weight (auto-computed until saturation).
    pub fn ewma_weight(&self) -> f64 {
        self.weights.weight()
    }

    /// Unnormalized EWMA weight table along the relative-index axis
    /// (entry 0 weights the newest sample); the first `added` entries
    /// are meaningful.
    pub fn ewma_weight_table(&self) -> &[f64] {
        self.weights.table()
    }

    /// Bind a hook evaluated before the primary filter on every insert.
    pub fn set_pre_hook(&mut self, hook: SampleHook) {
        self.pre_hook = Some(hook);
    }

    /// Bind a hook evaluated after the primary filter on every insert.
    pub fn set_post_hook(&mut self, hook: SampleHook) {
        self.post_hook = Some(hook);
    }

    pub fn clear_pre_hook(&mut self) {
        self.pre_hook = None;
    }

    pub fn clear_post_hook(&mut self) {
        self.post_hook = None;
    }

    /// Refresh the filtered slot at the head: pre-hook, primary filter,
    /// post-hook, each overwriting the slot in turn.
    fn refresh_filtered(&mut self) -> SensorwinResult<()> {
        if let Some(hook) = self.pre_hook.take() {
            let value = hook(self);
            let written = self.write_filtered_head(&value);
            self.pre_hook = Some(hook);
            written?;
        }

        let value = match self.filter {
            FilterKind::Ewma { .. } => self.ewma(),
            FilterKind::Sma => self.sma(),
            FilterKind::Passthrough => self.raw.newest().to_vec(),
        };
        self.write_filtered_head(&value)?;

        if let Some(hook) = self.post_hook.take() {
            let value = hook(self);
            let written = self.write_filtered_head(&value);
            self.post_hook = Some(hook);
            written?;
        }
        Ok(())
    }

    fn write_filtered_head(&mut self, value: &[f64]) -> SensorwinResult<()> {
        if let Some(ring) = self.filtered.as_mut() {
            ring.set(0, value)?;
        }
        Ok(())
    }

    fn filtered_ring(&self) -> SensorwinResult<&SampleRing> {
        self.filtered.as_ref().ok_or_else(filtered_view_disabled)
    }

    fn hooks_bound(&self) -> bool {
        self.filtered.is_some() && (self.pre_hook.is_some() || self.post_hook.is_some())
    }

    fn capture_snapshot(&self) -> SensorwinResult<AddSnapshot> {
        // Relative index capacity-1 is exactly the slot the next push
        // overwrites, saturated or not.
        let last = self.raw.capacity() - 1;
        Ok(AddSnapshot {
            prev_added: self.raw.added(),
            phase: self.phase,
            evicted_raw: self.raw.get(last)?.to_vec(),
            evicted_filtered: match self.filtered.as_ref() {
                Some(ring) => ring.get(last)?.to_vec(),
                None => Vec::new(),
            },
            evicted_timestamp: self.timestamp_ring.scalar(last)?,
            evicted_delta: self.delta_ring.scalar(last)?,
            evicted_elapsed: self.elapsed_ring.scalar(last)?,
            weights: self.weights.clone(),
        })
    }

    fn restore_snapshot(&mut self, snapshot: AddSnapshot) {
        self.raw
            .rollback_push(snapshot.prev_added, &snapshot.evicted_raw);
        if let Some(ring) = self.filtered.as_mut() {
            ring.rollback_push(snapshot.prev_added, &snapshot.evicted_filtered);
        }
        self.timestamp_ring
            .rollback_push(snapshot.prev_added, &[snapshot.evicted_timestamp]);
        self.delta_ring
            .rollback_push(snapshot.prev_added, &[snapshot.evicted_delta]);
        self.elapsed_ring
            .rollback_push(snapshot.prev_added, &[snapshot.evicted_elapsed]);
        self.weights = snapshot.weights;
        self.phase = snapshot.phase;
    }
}

impl fmt::Debug for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSeries")
            .field("capacity", &self.raw.capacity())
            .field("dimension", &self.raw.dimension())
            .field("added", &self.raw.added())
            .field("phase", &self.phase)
            .field("filter", &self.filter)
            .field("auto_filter", &self.filtered.is_some())
            .field("pre_hook", &self.pre_hook.is_some())
            .field("post_hook", &self.post_hook.is_some())
            .finish()
    }
}

fn filtered_view_disabled() -> SensorwinError {
    SensorwinError::config("filtered view is not enabled for this series")
}
