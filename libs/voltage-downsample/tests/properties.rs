//! Property tests for weights and window reduction

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use proptest::prelude::*;
use voltage_downsample::weights::{bonus_count, leave_one_out_distances};
use voltage_downsample::{compute_weights, reduce, WindowPlan};

fn finite_values(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 1..max_len)
}

proptest! {
    #[test]
    fn weights_sum_to_one(values in finite_values(64)) {
        let w = compute_weights(&values);
        prop_assert_eq!(w.len(), values.len());
        let sum: f64 = w.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert!(w.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn top_distances_get_bonus(values in prop::collection::vec(-1.0e3..1.0e3f64, 2..40)) {
        let distances = leave_one_out_distances(&values);
        let mut sorted = distances.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        sorted.dedup();
        // Only meaningful when every distance is distinct
        prop_assume!(sorted.len() == values.len());

        let k = bonus_count(values.len());
        let threshold = sorted[k - 1];
        let w = compute_weights(&values);
        let low = w.iter().cloned().fold(f64::INFINITY, f64::min);

        for (i, &d) in distances.iter().enumerate() {
            if d >= threshold {
                prop_assert!(w[i] > low || k == values.len());
            } else {
                prop_assert!((w[i] - low).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn output_length_bounded(len in 0usize..500, desired in 1usize..200) {
        let ts: Vec<usize> = (0..len).collect();
        let values = vec![1.0; len];
        let points = reduce(&ts, &values, desired).unwrap();
        prop_assert!(points.len() <= desired);

        let expected = if len == 0 {
            0
        } else {
            let size = WindowPlan::new(len, desired).unwrap().window_size();
            len.div_ceil(size).min(desired)
        };
        prop_assert_eq!(points.len(), expected);
    }

    #[test]
    fn averages_stay_within_window_range(values in finite_values(300), desired in 1usize..20) {
        let ts: Vec<usize> = (0..values.len()).collect();
        let points = reduce(&ts, &values, desired).unwrap();
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for p in points {
            prop_assert!(p.value >= lo - 1e-6 && p.value <= hi + 1e-6);
            prop_assert!(p.timestamp < values.len());
        }
    }
}
