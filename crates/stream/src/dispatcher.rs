//! The paced polling loop wiring a source to a monitor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sensorwin_common::clock::{RateController, StreamClock};
use sensorwin_common::error::SensorwinResult;
use tokio::sync::mpsc;

use crate::monitor::{SeriesMonitor, WindowSnapshot};
use crate::source::SampleSource;

/// Drives one source into one monitor at a target rate, forwarding a
/// window snapshot per ingested sample.
pub struct StreamDispatcher {
    source: Box<dyn SampleSource>,
    monitor: SeriesMonitor,
    stop_flag: Arc<AtomicBool>,
    samples_dispatched: u64,
}

impl StreamDispatcher {
    pub fn new(source: Box<dyn SampleSource>, monitor: SeriesMonitor) -> Self {
        Self {
            source,
            monitor,
            stop_flag: Arc::new(AtomicBool::new(false)),
            samples_dispatched: 0,
        }
    }

    /// Handle for requesting a stop from another task.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Run the dispatch loop until the stop flag is set or every
    /// snapshot receiver is gone. Returns the number of samples
    /// dispatched.
    pub async fn run(
        mut self,
        rate_hz: u32,
        snapshots: mpsc::Sender<WindowSnapshot>,
    ) -> SensorwinResult<u64> {
        tracing::info!(
            source = %self.source.name(),
            monitor = %self.monitor.name(),
            rate_hz,
            "stream dispatcher started"
        );

        let clock = StreamClock::start();
        let mut rate = RateController::new(rate_hz);

        while !self.stop_flag.load(Ordering::Relaxed) {
            if !rate.should_tick(clock.elapsed_ns()) {
                tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                continue;
            }
            match self.source.poll() {
                Ok(Some(sample)) => {
                    self.monitor.ingest(&sample)?;
                    self.samples_dispatched += 1;
                    let snapshot = self.monitor.snapshot()?;
                    if snapshots.send(snapshot).await.is_err() {
                        tracing::debug!("snapshot receiver dropped; stopping");
                        break;
                    }
                }
                Ok(None) => {
                    // No sample available, yield briefly
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "sample poll error");
                }
            }
        }

        tracing::info!(
            samples = self.samples_dispatched,
            "stream dispatcher stopped"
        );
        Ok(self.samples_dispatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SyntheticSource;
    use sensorwin_series::SeriesConfig;

    #[tokio::test]
    async fn test_dispatcher_stops_when_receiver_drops() {
        let source = SyntheticSource::new(1, 3);
        let monitor = SeriesMonitor::new("sim", SeriesConfig::new(8, 1)).unwrap();
        let dispatcher = StreamDispatcher::new(Box::new(source), monitor);

        let (tx, mut rx) = mpsc::channel(4);
        let task = tokio::spawn(dispatcher.run(1000, tx));

        let mut received = 0;
        while received < 5 {
            if rx.recv().await.is_some() {
                received += 1;
            }
        }
        drop(rx);

        let dispatched = task.await.unwrap().unwrap();
        assert!(dispatched >= 5);
    }

    #[tokio::test]
    async fn test_stop_handle_halts_loop() {
        let source = SyntheticSource::new(1, 3);
        let monitor = SeriesMonitor::new("sim", SeriesConfig::new(8, 1)).unwrap();
        let dispatcher = StreamDispatcher::new(Box::new(source), monitor);
        let stop = dispatcher.stop_handle();

        let (tx, mut rx) = mpsc::channel(64);
        let task = tokio::spawn(dispatcher.run(1000, tx));

        // First snapshot proves the loop is alive, then ask it to stop.
        assert!(rx.recv().await.is_some());
        stop.store(true, Ordering::Relaxed);

        // Drain so a full channel cannot stall the loop before it sees
        // the flag.
        while rx.recv().await.is_some() {}

        let dispatched = task.await.unwrap().unwrap();
        assert!(dispatched >= 1);
    }

    #[tokio::test]
    async fn test_snapshots_grow_until_window_saturates() {
        let source = SyntheticSource::new(2, 11).with_limit(6);
        let monitor = SeriesMonitor::new("sim", SeriesConfig::new(4, 2)).unwrap();
        let dispatcher = StreamDispatcher::new(Box::new(source), monitor);
        let stop = dispatcher.stop_handle();

        let (tx, mut rx) = mpsc::channel(16);
        let task = tokio::spawn(dispatcher.run(10_000, tx));

        let mut sizes = Vec::new();
        for _ in 0..6 {
            let snapshot = rx.recv().await.expect("snapshot");
            sizes.push(snapshot.samples.len());
        }
        stop.store(true, Ordering::Relaxed);
        drop(rx);
        task.await.unwrap().unwrap();

        assert_eq!(sizes, vec![1, 2, 3, 4, 4, 4]);
    }
}
