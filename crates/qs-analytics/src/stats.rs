//! Five-number summaries over one variable's samples.

use serde::{Deserialize, Serialize};

/// Summary statistics over the valid samples of one variable within a
/// batch.
///
/// `std_dev` is the sample standard deviation (N−1 normalization); with
/// a single sample it is NaN rather than a fabricated zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VariableStats {
    pub samples: usize,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    pub std_dev: f64,
}

/// Compute statistics over `values`. Returns `None` when there are no
/// samples at all, so callers can tell "no data" apart from degenerate
/// single-sample data.
pub fn summarize_values(values: &[f64]) -> Option<VariableStats> {
    if values.is_empty() {
        return None;
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    let std_dev = if n > 1 {
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Some(VariableStats {
        samples: n,
        mean,
        median,
        max: sorted[n - 1],
        min: sorted[0],
        std_dev,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bounds_hold(values in prop::collection::vec(-1e6_f64..1e6_f64, 1..64)) {
            let stats = summarize_values(&values).expect("stats defined");
            // The mean accumulates rounding error, so give it an ulp-scale slack.
            let slack = 1e-9 * stats.max.abs().max(stats.min.abs()).max(1.0);
            prop_assert!(stats.min <= stats.max);
            prop_assert!(stats.min - slack <= stats.mean && stats.mean <= stats.max + slack);
            prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        }

        #[test]
        fn std_dev_is_nan_only_for_single_sample(values in prop::collection::vec(-1e6_f64..1e6_f64, 1..64)) {
            let stats = summarize_values(&values).expect("stats defined");
            prop_assert_eq!(stats.std_dev.is_nan(), values.len() == 1);
        }
    }
}
