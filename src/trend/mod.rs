//! Mann-Kendall trend test and Sen's slope estimation
//!
//! Non-parametric trend detection for short annual series. Both statistics
//! are order-dependent: observations must be supplied in chronological order
//! with no gaps inside the analyzed range.

use crate::core::errors::{Error, Result};
use crate::core::{PValueMethod, TrendDirection, TrendResult};

/// Trend statistics need at least two observations to say anything
const MIN_OBSERVATIONS: usize = 2;

/// Critical value of the standard normal at the two-sided 95% level
#[cfg(not(feature = "exact-pvalues"))]
const Z_CRITICAL_95: f64 = 1.96;

/// Run the Mann-Kendall monotonic-trend test over a time-ordered series.
///
/// The S statistic counts concordant minus discordant pairs, the variance
/// uses the no-ties form `n(n-1)(2n+5)/18` (series with repeated values are
/// not tie-corrected, so their p-values are slightly conservative), and the
/// Z score applies the ±1 continuity correction. The returned result also
/// carries the Sen's slope of the series and whether the trend is
/// significant at `alpha`.
///
/// O(n²) in series length, which is fine for the handful of annual
/// observations this is applied to.
pub fn mann_kendall(series: &[f64], alpha: f64) -> Result<TrendResult> {
    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(Error::insufficient_data(MIN_OBSERVATIONS, n));
    }

    let s = s_statistic(series);
    let variance = (n * (n - 1) * (2 * n + 5)) as f64 / 18.0;

    let z = if s > 0 {
        (s as f64 - 1.0) / variance.sqrt()
    } else if s < 0 {
        (s as f64 + 1.0) / variance.sqrt()
    } else {
        0.0
    };

    let (p_value, p_value_method) = two_sided_p(z.abs());
    let sens_slope = sens_slope(series)?;

    let direction = if z > 0.0 {
        TrendDirection::Increasing
    } else if z < 0.0 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::None
    };

    log::debug!(
        "mann_kendall: n={} S={} Z={:.4} p={:.6} slope={:.4}",
        n,
        s,
        z,
        p_value,
        sens_slope
    );

    Ok(TrendResult {
        s_statistic: s,
        z_statistic: z,
        p_value,
        sens_slope,
        direction,
        is_significant: p_value < alpha,
        p_value_method,
    })
}

/// Sen's slope: the median of all pairwise slopes
/// `(series[j] - series[i]) / (j - i)` for i < j. Robust to single-year
/// outliers, which is why it is paired with Mann-Kendall here instead of a
/// least-squares fit.
pub fn sens_slope(series: &[f64]) -> Result<f64> {
    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(Error::insufficient_data(MIN_OBSERVATIONS, n));
    }

    let mut slopes = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n - 1 {
        for j in i + 1..n {
            slopes.push((series[j] - series[i]) / (j - i) as f64);
        }
    }

    Ok(median(&mut slopes))
}

fn s_statistic(series: &[f64]) -> i64 {
    let mut s = 0_i64;
    for i in 0..series.len() - 1 {
        for j in i + 1..series.len() {
            s += sign(series[j] - series[i]);
        }
    }
    s
}

fn sign(x: f64) -> i64 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Standard median: mean of the two middle order statistics for even-sized
/// input. Callers guarantee `values` is non-empty.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(feature = "exact-pvalues")]
fn two_sided_p(z_abs: f64) -> (f64, PValueMethod) {
    use statrs::distribution::{ContinuousCDF, Normal};

    let standard_normal = Normal::standard();
    let p = 2.0 * (1.0 - standard_normal.cdf(z_abs));
    (p, PValueMethod::Exact)
}

/// Coarse fallback when the statrs CDF is compiled out: 0.01 past the 95%
/// critical value, 0.05 otherwise. Results carry `PValueMethod::Approximate`
/// so callers can tell this path apart from the exact one.
#[cfg(not(feature = "exact-pvalues"))]
fn two_sided_p(z_abs: f64) -> (f64, PValueMethod) {
    let p = if z_abs >= Z_CRITICAL_95 { 0.01 } else { 0.05 };
    (p, PValueMethod::Approximate)
}
