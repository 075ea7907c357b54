//! sensorwin Series Core — time-aware sample windowing.
//!
//! A fixed-capacity circular buffer for numeric sensor samples with
//! automatic timestamp/delta/elapsed bookkeeping and pluggable smoothing:
//! - **Ring storage:** wrap-aware indexing over a bounded window
//! - **Time metadata:** per-sample timestamp, inter-sample delta, and
//!   cumulative elapsed time, derived on every insert
//! - **Smoothing:** EWMA, SMA, or passthrough, plus user pre/post hooks
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod filter;
pub mod ring;
pub mod series;

pub use filter::FilterKind;
pub use ring::SampleRing;
pub use series::{AddOptions, FillPhase, SampleHook, SeriesConfig, TimeSeries, View};
