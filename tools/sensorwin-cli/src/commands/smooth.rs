//! Smooth a scalar signal from arguments or stdin.

use std::io::Read;

use sensorwin_processing::{MotionAmplifier, MotionGainConfig};
use sensorwin_series::{AddOptions, FilterKind, SeriesConfig, TimeSeries, View};

pub fn run(
    values: Vec<f64>,
    capacity: usize,
    filter: &str,
    weight: Option<f64>,
    motion_gain: bool,
) -> anyhow::Result<()> {
    let filter = FilterKind::from_name(filter, weight)
        .map_err(|e| anyhow::anyhow!("Invalid filter: {e}"))?;

    let values = if values.is_empty() {
        read_stdin_values()?
    } else {
        values
    };
    if values.is_empty() {
        println!("No input values.");
        return Ok(());
    }

    let config = SeriesConfig {
        capacity,
        dimension: 1,
        auto_filter: true,
        filter,
    };
    let mut series = TimeSeries::new(config)
        .map_err(|e| anyhow::anyhow!("Failed to build series: {e}"))?;
    let mut amplifier = motion_gain.then(|| MotionAmplifier::new(MotionGainConfig::default()));

    println!(
        "{:>6}  {:>12}  {:>12}{}",
        "#",
        "raw",
        filter.name(),
        if motion_gain { "      amplified" } else { "" }
    );
    for (k, value) in values.iter().enumerate() {
        series
            .add_with(&[*value], AddOptions::with_timestamp(k as f64))
            .map_err(|e| anyhow::anyhow!("Insert failed: {e}"))?;
        let smoothed = series.get(View::Filtered, 0)
            .map_err(|e| anyhow::anyhow!("Read failed: {e}"))?[0];
        match amplifier.as_mut() {
            Some(amp) => {
                println!(
                    "{:>6}  {:>12.4}  {:>12.4}  {:>12.4}",
                    k,
                    value,
                    smoothed,
                    amp.step(smoothed)
                );
            }
            None => println!("{:>6}  {:>12.4}  {:>12.4}", k, value, smoothed),
        }
    }

    let ewma = series.ewma();
    let sma = series.sma();
    println!("\nWindow aggregates: ewma={:.4} sma={:.4}", ewma[0], sma[0]);
    Ok(())
}

fn read_stdin_values() -> anyhow::Result<Vec<f64>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    input
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("Invalid value {token:?}: {e}"))
        })
        .collect()
}
