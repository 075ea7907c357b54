//! Per-component statistics over a sample window.

use serde::{Deserialize, Serialize};

use sensorwin_common::error::SensorwinResult;
use sensorwin_series::{TimeSeries, View};

/// Statistics for one window, component-wise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowStats {
    pub mean: Vec<f64>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,

    /// Number of valid samples the statistics cover.
    pub count: usize,
}

impl WindowStats {
    /// Compute statistics over the valid samples of the given view.
    ///
    /// An empty series yields zero vectors with `count == 0`.
    pub fn from_series(series: &TimeSeries, view: View) -> SensorwinResult<Self> {
        let dimension = series.dimension();
        let count = series.added();
        if count == 0 {
            return Ok(Self {
                mean: vec![0.0; dimension],
                min: vec![0.0; dimension],
                max: vec![0.0; dimension],
                count: 0,
            });
        }

        let mut mean = vec![0.0; dimension];
        let mut min = vec![f64::INFINITY; dimension];
        let mut max = vec![f64::NEG_INFINITY; dimension];

        for sample in series.window(view, 0..count)? {
            for (c, value) in sample.iter().enumerate() {
                mean[c] += value;
                min[c] = min[c].min(*value);
                max[c] = max[c].max(*value);
            }
        }
        for value in &mut mean {
            *value /= count as f64;
        }

        Ok(Self {
            mean,
            min,
            max,
            count,
        })
    }

    /// Spread (max − min) per component.
    pub fn range(&self) -> Vec<f64> {
        self.max
            .iter()
            .zip(&self.min)
            .map(|(hi, lo)| hi - lo)
            .collect()
    }
}
