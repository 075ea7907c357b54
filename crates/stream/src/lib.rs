//! sensorwin Stream
//!
//! Feeds sample series from live producers. Uses a pluggable source
//! architecture so the same dispatch loop drives hardware pollers,
//! vision pipelines, or the built-in synthetic generator:
//!
//! - **Sources:** synchronous `poll()` producers behind one trait
//! - **Monitors:** own a series, ingest samples, expose window snapshots
//! - **Dispatcher:** paced async loop wiring a source to a monitor and
//!   forwarding snapshots over a channel
//!
//! Snapshots are plain data; no transport framing or persistence here.

pub mod dispatcher;
pub mod monitor;
pub mod source;

pub use dispatcher::StreamDispatcher;
pub use monitor::{SeriesMonitor, WindowSnapshot};
pub use source::{SampleSource, SourceSample, SyntheticSource};
