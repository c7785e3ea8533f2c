//! Property-based tests for the scan noise filter using proptest.
//!
//! Covers: gap filling invariants, window bounds under arbitrary control
//! signals, the temporal weighting formula and startup latency.

use scan_noise_filter::common::{RANGES_PER_SCAN, TIME_SLIDING_WINDOW_SIZE};
use scan_noise_filter::perception::filters::{
    SpatialInterpolator, TemporalHistory, WeightedAggregator, WindowController,
};
use scan_noise_filter::{NoiseFilter, NoiseFilterConfig, SampleFrame};
use proptest::prelude::*;

fn valid_frame() -> impl Strategy<Value = SampleFrame> {
    prop::collection::vec(0.01f64..30.0, RANGES_PER_SCAN)
        .prop_map(|ranges| SampleFrame::new(ranges).unwrap())
}

/// Mix of valid returns, zero dropouts and negative garbage
fn noisy_frame() -> impl Strategy<Value = SampleFrame> {
    prop::collection::vec(
        prop_oneof![
            3 => 0.01f64..30.0,
            2 => Just(0.0),
            1 => -5.0f64..0.0,
        ],
        RANGES_PER_SCAN,
    )
    .prop_map(|ranges| SampleFrame::new(ranges).unwrap())
}

fn window_config() -> impl Strategy<Value = NoiseFilterConfig> {
    (0i64..60, 0i64..120, 0i64..10, 0i64..40).prop_map(|(lower, span, negative, positive)| {
        NoiseFilterConfig {
            window_lower_limit: lower,
            window_upper_limit: lower + span,
            negative_gain: negative,
            positive_gain: positive,
        }
    })
}

// ── Spatial interpolation ────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Scans without dropouts pass through unchanged.
    #[test]
    fn interpolation_is_identity_on_valid_scans(
        frame in valid_frame(),
        window in 1usize..102,
    ) {
        let out = SpatialInterpolator::new().interpolate(&frame, window);
        prop_assert_eq!(out, frame);
    }

    /// Output is never negative, whatever the input.
    #[test]
    fn interpolation_is_non_negative(
        frame in noisy_frame(),
        window in 1usize..102,
    ) {
        let out = SpatialInterpolator::new().interpolate(&frame, window);
        prop_assert_eq!(out.len(), RANGES_PER_SCAN);
        prop_assert!(out.iter().all(|&r| r >= 0.0));
    }

    /// Valid samples are kept exactly; filled gaps stay within the
    /// range of valid samples in the scan.
    #[test]
    fn interpolation_stays_within_valid_range(
        frame in noisy_frame(),
        window in 1usize..102,
    ) {
        let out = SpatialInterpolator::new().interpolate(&frame, window);
        let valid: Vec<f64> = frame.iter().copied().filter(|&r| r > 0.0).collect();
        let max = valid.iter().copied().fold(0.0f64, f64::max);
        let min = valid.iter().copied().fold(f64::INFINITY, f64::min);

        for i in 0..RANGES_PER_SCAN {
            if frame[i] > 0.0 {
                prop_assert_eq!(out[i], frame[i]);
            } else if out[i] != 0.0 {
                prop_assert!(out[i] >= min - 1e-9 && out[i] <= max + 1e-9);
            }
        }
    }
}

// ── Window control ───────────────────────────────────────────────────

proptest! {
    /// The window never leaves its configured bounds.
    #[test]
    fn window_stays_within_bounds(
        config in window_config(),
        signals in prop::collection::vec(0.0f64..4.0, 0..200),
    ) {
        let mut controller = WindowController::new(&config);
        let (lower, upper) = (config.window_lower_limit, config.window_upper_limit);
        prop_assert!((lower..=upper).contains(&(controller.size() as i64)));

        for signal in signals {
            controller.adjust(signal);
            prop_assert!((lower..=upper).contains(&(controller.size() as i64)));
        }
    }
}

// ── Temporal aggregation and orchestration ───────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Output equals (1·f0 + 2·f1 + 3·f2 + 4·f3 + 8·f4) / 18 at every index.
    #[test]
    fn aggregator_matches_weighted_formula(
        frames in prop::collection::vec(valid_frame(), TIME_SLIDING_WINDOW_SIZE),
    ) {
        let mut history = TemporalHistory::new();
        for frame in &frames {
            history.push(frame.clone());
        }
        let out = WeightedAggregator::default().aggregate(&history);

        for i in 0..RANGES_PER_SCAN {
            let expected = (frames[0][i]
                + 2.0 * frames[1][i]
                + 3.0 * frames[2][i]
                + 4.0 * frames[3][i]
                + 8.0 * frames[4][i])
                / 18.0;
            prop_assert!((out[i] - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }

    /// Nothing comes out for the first four scans, then one per scan.
    #[test]
    fn pipeline_has_four_scan_latency(
        config in window_config(),
        frames in prop::collection::vec(noisy_frame(), 5..9),
    ) {
        let mut filter = NoiseFilter::new(config).unwrap();
        for (n, frame) in frames.iter().enumerate() {
            let output = filter.process(frame);
            prop_assert_eq!(output.is_some(), n >= TIME_SLIDING_WINDOW_SIZE - 1);
            prop_assert!(filter.history_len() < TIME_SLIDING_WINDOW_SIZE);

            let window = filter.window_size() as i64;
            prop_assert!(window >= config.window_lower_limit);
            prop_assert!(window <= config.window_upper_limit);
        }
    }
}
