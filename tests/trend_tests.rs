//! Property-based and scenario tests for the trend engine
//!
//! Invariants covered:
//! - Sen's slope is invariant under constant shifts
//! - Sen's slope scales linearly under positive scaling
//! - A strictly increasing series maximizes S and reports an increasing trend
//! - The slope matches a brute-force median of all pairwise slopes

use forestwatch::core::errors::Error;
use forestwatch::core::{PValueMethod, TrendDirection};
use forestwatch::trend::{mann_kendall, sens_slope};
use proptest::prelude::*;

const ALPHA: f64 = 0.05;

#[test]
fn test_reference_series_statistics() {
    let series = [100.0, 110.0, 120.0, 130.0, 140.0, 150.0];
    let result = mann_kendall(&series, ALPHA).unwrap();

    assert_eq!(result.s_statistic, 15);
    assert!((result.z_statistic - 2.6301).abs() < 1e-3);
    assert_eq!(result.direction, TrendDirection::Increasing);
    assert!(result.is_significant);
    assert!((result.sens_slope - 10.0).abs() < 1e-12);

    match result.p_value_method {
        PValueMethod::Exact => assert!((result.p_value - 0.0085).abs() < 5e-4),
        PValueMethod::Approximate => assert!((result.p_value - 0.01).abs() < 1e-12),
    }
}

#[test]
fn test_decreasing_series_mirrors_increasing() {
    let series = [150.0, 140.0, 130.0, 120.0, 110.0, 100.0];
    let result = mann_kendall(&series, ALPHA).unwrap();

    assert_eq!(result.s_statistic, -15);
    assert!(result.z_statistic < 0.0);
    assert_eq!(result.direction, TrendDirection::Decreasing);
    assert!(result.is_significant);
    assert!((result.sens_slope + 10.0).abs() < 1e-12);
}

#[test]
fn test_constant_series_has_no_trend() {
    let series = [42.0; 6];
    let result = mann_kendall(&series, ALPHA).unwrap();

    assert_eq!(result.s_statistic, 0);
    assert_eq!(result.z_statistic, 0.0);
    assert_eq!(result.direction, TrendDirection::None);
    assert!(!result.is_significant);
    assert_eq!(result.sens_slope, 0.0);
}

#[test]
fn test_short_series_rejected() {
    assert!(matches!(
        mann_kendall(&[1.0], ALPHA),
        Err(Error::InsufficientData { .. })
    ));
    assert!(matches!(
        mann_kendall(&[], ALPHA),
        Err(Error::InsufficientData { .. })
    ));
    assert!(matches!(
        sens_slope(&[5.0]),
        Err(Error::InsufficientData { .. })
    ));
}

fn brute_force_sens(series: &[f64]) -> (f64, usize) {
    let mut slopes = Vec::new();
    for i in 0..series.len() {
        for j in (i + 1)..series.len() {
            slopes.push((series[j] - series[i]) / ((j - i) as f64));
        }
    }
    slopes.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let count = slopes.len();
    let median = if count % 2 == 1 {
        slopes[count / 2]
    } else {
        (slopes[count / 2 - 1] + slopes[count / 2]) / 2.0
    };
    (median, count)
}

fn bounded_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e6..1e6f64, 3..16)
}

fn strictly_increasing_series() -> impl Strategy<Value = Vec<f64>> {
    (
        -1e4..1e4f64,
        prop::collection::vec(0.001..1e3f64, 2..14),
    )
        .prop_map(|(base, increments)| {
            let mut value = base;
            let mut series = vec![base];
            for increment in increments {
                value += increment;
                series.push(value);
            }
            series
        })
}

proptest! {
    /// Property: adding a constant to every observation leaves the slope
    /// unchanged
    #[test]
    fn prop_slope_shift_invariant(series in bounded_series(), shift in -1e5..1e5f64) {
        let original = sens_slope(&series).unwrap();
        let shifted: Vec<f64> = series.iter().map(|v| v + shift).collect();
        let after = sens_slope(&shifted).unwrap();

        prop_assert!((original - after).abs() < 1e-6 * (1.0 + original.abs()));
    }

    /// Property: scaling every observation by k > 0 scales the slope by k
    #[test]
    fn prop_slope_scales_linearly(series in bounded_series(), k in 0.1..100.0f64) {
        let original = sens_slope(&series).unwrap();
        let scaled: Vec<f64> = series.iter().map(|v| v * k).collect();
        let after = sens_slope(&scaled).unwrap();

        prop_assert!((after - k * original).abs() < 1e-6 * (1.0 + (k * original).abs()));
    }

    /// Property: a strictly increasing series has S = n(n-1)/2, an
    /// increasing direction and a positive slope
    #[test]
    fn prop_strictly_increasing_maximizes_s(series in strictly_increasing_series()) {
        let n = series.len() as i64;
        let result = mann_kendall(&series, ALPHA).unwrap();

        prop_assert_eq!(result.s_statistic, n * (n - 1) / 2);
        prop_assert_eq!(result.direction, TrendDirection::Increasing);
        prop_assert!(result.sens_slope > 0.0);
    }

    /// Property: the slope equals the median over all n(n-1)/2 pairwise
    /// slopes
    #[test]
    fn prop_slope_matches_brute_force(series in bounded_series()) {
        let n = series.len();
        let (expected, count) = brute_force_sens(&series);
        let actual = sens_slope(&series).unwrap();

        prop_assert_eq!(count, n * (n - 1) / 2);
        prop_assert!((actual - expected).abs() < 1e-12 * (1.0 + expected.abs()));
    }

    /// Property: the S statistic never exceeds the pair count in magnitude
    /// and Z keeps its sign
    #[test]
    fn prop_s_bounded_and_z_sign_consistent(series in bounded_series()) {
        let n = series.len() as i64;
        let result = mann_kendall(&series, ALPHA).unwrap();

        prop_assert!(result.s_statistic.abs() <= n * (n - 1) / 2);
        if result.s_statistic > 1 {
            prop_assert!(result.z_statistic > 0.0);
        }
        if result.s_statistic < -1 {
            prop_assert!(result.z_statistic < 0.0);
        }
        prop_assert!(result.p_value >= 0.0 && result.p_value <= 1.0);
    }
}
