//! Run the synthetic sample stream through a monitored series.

use sensorwin_series::{FilterKind, SeriesConfig};
use sensorwin_stream::{SeriesMonitor, StreamDispatcher, SyntheticSource};

pub async fn run(
    samples: usize,
    capacity: usize,
    dimension: usize,
    filter: &str,
    weight: Option<f64>,
    rate: u32,
    seed: u64,
) -> anyhow::Result<()> {
    let filter = FilterKind::from_name(filter, weight)
        .map_err(|e| anyhow::anyhow!("Invalid filter: {e}"))?;
    let config = SeriesConfig {
        capacity,
        dimension,
        auto_filter: true,
        filter,
    };

    println!(
        "Simulating {samples} samples (capacity {capacity}, dimension {dimension}, filter {})",
        filter.name()
    );

    let source = SyntheticSource::new(dimension, seed).with_limit(samples);
    let monitor = SeriesMonitor::new("simulate", config)
        .map_err(|e| anyhow::anyhow!("Failed to build monitor: {e}"))?;
    let dispatcher = StreamDispatcher::new(Box::new(source), monitor);
    let stop = dispatcher.stop_handle();

    let (tx, mut rx) = tokio::sync::mpsc::channel(64);
    let task = tokio::spawn(dispatcher.run(rate, tx));

    let mut received = 0;
    while received < samples {
        let Some(snapshot) = rx.recv().await else {
            break;
        };
        received += 1;
        let newest = &snapshot.samples[0];
        println!(
            "  [{received:>4}] window={:<3} raw={} ewma={} sma={}",
            snapshot.samples.len(),
            fmt_sample(newest),
            fmt_sample(&snapshot.ewma),
            fmt_sample(&snapshot.sma),
        );
    }
    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    drop(rx);

    let dispatched = task
        .await
        .map_err(|e| anyhow::anyhow!("Dispatcher task failed: {e}"))?
        .map_err(|e| anyhow::anyhow!("Dispatcher error: {e}"))?;

    println!("\nDispatched {dispatched} samples.");
    Ok(())
}

fn fmt_sample(sample: &[f64]) -> String {
    let parts: Vec<String> = sample.iter().map(|v| format!("{v:+.4}")).collect();
    if parts.len() == 1 {
        parts.concat()
    } else {
        format!("[{}]", parts.join(", "))
    }
}
