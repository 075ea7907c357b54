//! Series monitors: the bridge between a sample source and consumers.
//!
//! A monitor owns one [`TimeSeries`], ingests source samples, and
//! exposes the window as a plain-data snapshot — samples newest-first
//! with their timestamps, deltas, and elapsed times in lock-step.

use serde::{Deserialize, Serialize};

use sensorwin_common::error::SensorwinResult;
use sensorwin_series::{AddOptions, SeriesConfig, TimeSeries};

use crate::source::SourceSample;

/// A fully-committed view of one series window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Monitor name, for routing and logging.
    pub monitor: String,

    /// Valid samples from the active view, newest first.
    pub samples: Vec<Vec<f64>>,

    /// Wall-clock capture times, lock-step with `samples`.
    pub timestamps: Vec<f64>,

    /// Inter-sample deltas, lock-step with `samples`.
    pub deltas: Vec<f64>,

    /// Cumulative elapsed times, lock-step with `samples`.
    pub elapsed: Vec<f64>,

    /// Current aggregates over the raw window.
    pub ewma: Vec<f64>,
    pub sma: Vec<f64>,
}

/// Owns a series and keeps it fed from a source.
pub struct SeriesMonitor {
    name: String,
    series: TimeSeries,
    ingested: u64,
}

impl SeriesMonitor {
    pub fn new(name: impl Into<String>, config: SeriesConfig) -> SensorwinResult<Self> {
        Ok(Self {
            name: name.into(),
            series: TimeSeries::new(config)?,
            ingested: 0,
        })
    }

    /// Feed one source sample into the series. The source's timestamp is
    /// honored when present; otherwise the series stamps the sample.
    pub fn ingest(&mut self, sample: &SourceSample) -> SensorwinResult<()> {
        let opts = match sample.timestamp_secs {
            Some(timestamp) => AddOptions::with_timestamp(timestamp),
            None => AddOptions::default(),
        };
        self.series.add_with(&sample.values, opts)?;
        self.ingested += 1;
        Ok(())
    }

    /// Snapshot the currently valid window, newest first.
    pub fn snapshot(&self) -> SensorwinResult<WindowSnapshot> {
        let count = self.series.added();
        let view = self.series.active_view();

        let mut samples = Vec::with_capacity(count);
        let mut timestamps = Vec::with_capacity(count);
        let mut deltas = Vec::with_capacity(count);
        let mut elapsed = Vec::with_capacity(count);
        for i in 0..count {
            samples.push(self.series.get(view, i)?.to_vec());
            timestamps.push(self.series.timestamp(i)?);
            deltas.push(self.series.delta(i)?);
            elapsed.push(self.series.elapsed(i)?);
        }

        Ok(WindowSnapshot {
            monitor: self.name.clone(),
            samples,
            timestamps,
            deltas,
            elapsed,
            ewma: self.series.ewma(),
            sma: self.series.sma(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Samples ingested over the monitor's lifetime (not window-bounded).
    pub fn ingested(&self) -> u64 {
        self.ingested
    }
}
