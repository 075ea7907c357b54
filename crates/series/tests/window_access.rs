//! End-to-end window access scenarios, including the wrap-boundary
//! orientation contract: every range read is newest-first, the same axis
//! as single-index access.

use sensorwin_series::{AddOptions, FilterKind, SampleRing, SeriesConfig, TimeSeries, View};

use proptest::prelude::*;

fn scalar_series(capacity: usize) -> TimeSeries {
    TimeSeries::scalar(capacity).expect("valid geometry")
}

fn add_at(series: &mut TimeSeries, value: f64, timestamp: f64) {
    series
        .add_with(&[value], AddOptions::with_timestamp(timestamp))
        .expect("insert");
}

#[test]
fn eviction_scenario_capacity_three() {
    // Insert 1, 2, 3, 4 into capacity 3: 1.0 is evicted.
    let mut series = scalar_series(3);
    for (i, v) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
        add_at(&mut series, *v, i as f64);
    }

    assert_eq!(series.get(View::Raw, 0).unwrap(), &[4.0]);
    assert_eq!(series.get(View::Raw, 1).unwrap(), &[3.0]);
    assert_eq!(series.get(View::Raw, 2).unwrap(), &[2.0]);
    assert_eq!(series.added(), 3);
}

#[test]
fn oldest_retained_after_overflow() {
    // After N + i inserts, get(0) is the newest and get(N-1) the
    // (i+1)-th from the end.
    let n = 5;
    let i = 3;
    let mut series = scalar_series(n);
    for k in 0..(n + i) {
        add_at(&mut series, k as f64, k as f64);
    }

    assert_eq!(series.get(View::Raw, 0).unwrap(), &[(n + i - 1) as f64]);
    assert_eq!(series.get(View::Raw, n - 1).unwrap(), &[i as f64]);
}

#[test]
fn elapsed_is_cumulative_sum_of_deltas() {
    let mut series = scalar_series(8);
    let timestamps = [0.0, 0.3, 0.9, 1.0, 2.5, 2.6];
    for (k, ts) in timestamps.iter().enumerate() {
        add_at(&mut series, k as f64, *ts);
    }

    // Newest-first index k; compare against the next-older entry.
    for k in 0..timestamps.len() - 1 {
        let elapsed = series.elapsed(k).unwrap();
        let prev_elapsed = series.elapsed(k + 1).unwrap();
        let delta = series.delta(k).unwrap();
        assert!((elapsed - (prev_elapsed + delta)).abs() < 1e-12);
    }
}

#[test]
fn saturated_sma_is_arithmetic_mean() {
    let values = [3.0, 1.0, 4.0, 1.0, 5.0];
    let mut series = scalar_series(values.len());
    for (k, v) in values.iter().enumerate() {
        add_at(&mut series, *v, k as f64);
    }

    let mean: f64 = values.iter().sum::<f64>() / values.len() as f64;
    assert!((series.sma()[0] - mean).abs() < 1e-12);
}

#[test]
fn explicit_override_feeds_next_derivation() {
    let mut series = scalar_series(4);
    add_at(&mut series, 1.0, 10.0);
    series
        .add_with(
            &[2.0],
            AddOptions {
                timestamp: Some(100.0),
                delta: Some(5.0),
                elapsed: Some(20.0),
            },
        )
        .unwrap();

    assert_eq!(series.timestamp(0).unwrap(), 100.0);
    assert_eq!(series.delta(0).unwrap(), 5.0);
    assert_eq!(series.elapsed(0).unwrap(), 20.0);

    // The next insert derives its defaults from the stored overrides.
    add_at(&mut series, 3.0, 101.5);
    assert!((series.delta(0).unwrap() - 1.5).abs() < 1e-12);
    assert!((series.elapsed(0).unwrap() - 21.5).abs() < 1e-12);
}

#[test]
fn passthrough_vector_sample_matches_raw_exactly() {
    let config = SeriesConfig {
        capacity: 4,
        dimension: 3,
        auto_filter: true,
        filter: FilterKind::Passthrough,
    };
    let mut series = TimeSeries::new(config).unwrap();
    series
        .add_with(&[1.0, 2.0, 3.0], AddOptions::with_timestamp(0.0))
        .unwrap();

    assert_eq!(
        series.get(View::Filtered, 0).unwrap(),
        series.get(View::Raw, 0).unwrap()
    );
}

#[test]
fn ewma_weights_strictly_decrease_with_age() {
    let config = SeriesConfig {
        capacity: 6,
        dimension: 1,
        auto_filter: false,
        filter: FilterKind::Ewma { weight: Some(0.7) },
    };
    let mut series = TimeSeries::new(config).unwrap();
    for k in 0..6 {
        add_at(&mut series, k as f64, k as f64);
    }

    let table = series.ewma_weight_table();
    for k in 1..series.added() {
        assert!(table[k] < table[k - 1]);
    }
}

#[test]
fn window_orientation_across_wrap_matches_single_index() {
    // Capacity 4 with 6 inserts: the window spans the physical wrap.
    let mut series = scalar_series(4);
    for k in 0..6 {
        add_at(&mut series, k as f64, k as f64);
    }

    let window = series.window(View::Raw, 0..4).unwrap();
    for (j, sample) in window.iter().enumerate() {
        assert_eq!(*sample, series.get(View::Raw, j).unwrap());
    }
    // Newest-first values: 5, 4, 3, 2.
    let values: Vec<f64> = window.iter().map(|s| s[0]).collect();
    assert_eq!(values, vec![5.0, 4.0, 3.0, 2.0]);
}

#[test]
fn interior_window_across_wrap() {
    let mut series = scalar_series(5);
    for k in 0..8 {
        add_at(&mut series, k as f64, k as f64);
    }

    // Relative indices 1..4 inclusive-exclusive: samples 6, 5, 4.
    let window = series.window(View::Raw, 1..4).unwrap();
    let values: Vec<f64> = window.iter().map(|s| s[0]).collect();
    assert_eq!(values, vec![6.0, 5.0, 4.0]);
}

proptest! {
    /// The ring behaves like a naive "keep the last N values" model for
    /// any capacity and insert count, across the wrap boundary.
    #[test]
    fn ring_matches_last_n_model(
        capacity in 1usize..24,
        values in prop::collection::vec(-1e6f64..1e6, 0..80),
    ) {
        let mut ring = SampleRing::new(capacity, 1).unwrap();
        for v in &values {
            ring.push(&[*v]).unwrap();
        }

        let retained: Vec<f64> = values
            .iter()
            .rev()
            .take(capacity)
            .copied()
            .collect();

        prop_assert_eq!(ring.added(), values.len().min(capacity));
        for (i, expected) in retained.iter().enumerate() {
            prop_assert_eq!(ring.get(i).unwrap()[0], *expected);
        }
    }

    /// `added` never exceeds capacity and is monotone until saturation.
    #[test]
    fn added_saturates_monotonically(
        capacity in 1usize..16,
        count in 0usize..64,
    ) {
        let mut ring = SampleRing::new(capacity, 1).unwrap();
        let mut previous = 0;
        for k in 0..count {
            ring.push(&[k as f64]).unwrap();
            prop_assert!(ring.added() <= capacity);
            prop_assert!(ring.added() >= previous);
            previous = ring.added();
        }
    }

    /// Any in-range window agrees element-wise with single-index access.
    #[test]
    fn window_agrees_with_single_index(
        capacity in 1usize..16,
        count in 0usize..48,
        start in 0usize..16,
        len in 0usize..16,
    ) {
        let mut ring = SampleRing::new(capacity, 1).unwrap();
        for k in 0..count {
            ring.push(&[k as f64]).unwrap();
        }

        let start = start % capacity;
        let end = (start + len).min(capacity);
        let window = ring.window(start..end).unwrap();
        prop_assert_eq!(window.len(), end - start);
        for (j, sample) in window.iter().enumerate() {
            prop_assert_eq!(*sample, ring.get(start + j).unwrap());
        }
    }

    /// A normalized EWMA can never leave the range of its inputs.
    #[test]
    fn ewma_is_bounded_by_window_extrema(
        values in prop::collection::vec(0.0f64..100.0, 1..12),
    ) {
        let config = SeriesConfig {
            capacity: 12,
            dimension: 1,
            auto_filter: false,
            filter: FilterKind::Ewma { weight: Some(0.6) },
        };
        let mut series = TimeSeries::new(config).unwrap();
        for (k, v) in values.iter().enumerate() {
            series.add_with(&[*v], AddOptions::with_timestamp(k as f64)).unwrap();
        }

        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let ewma = series.ewma()[0];
        prop_assert!(ewma >= lo - 1e-9 && ewma <= hi + 1e-9);
    }
}
