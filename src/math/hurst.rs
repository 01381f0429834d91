//! Hurst exponent estimation for spread series.
//!
//! Uses the lagged-difference variant of the rescaled-range method: the
//! dispersion of `x[t + L] - x[t]` grows like `L^H`, so `H` is recovered from
//! a log-log regression of dispersion against lag.
//!
//! # Algorithm
//!
//! ```text
//! for L in 2..max_lag:
//!     tau(L) = std(x[L..] - x[..n-L])          (population std, divide by N)
//! slope  = OLS slope of ln tau(L) on ln L
//! H      = 2 * slope
//! ```
//!
//! For a random walk `tau(L)` grows like `L^0.5`, so the slope is 0.5 and
//! the doubled value lands near 1.0. The estimate is therefore on twice the
//! textbook Hurst scale; compare results against each other, not against 0.5.
//!
//! # Interpretation
//!
//! - `H ≈ 1`: random walk, no exploitable structure
//! - `H > 1`: trending / persistent spread (up to about 2 for a steady drift)
//! - `H` well below 1: mean-reverting spread (pairs-trading candidate); a
//!   stationary spread sits near 0
//!
//! Short or noisy samples can push the estimate outside `[0, 1]`; that is a
//! property of the estimator and is returned as-is.

use thiserror::Error;

/// Lag bound used when the caller has no preference
pub const DEFAULT_MAX_LAG: usize = 20;

/// Smallest accepted `max_lag` (lag range `[2, 3)` is the single lag 2)
pub const MIN_MAX_LAG: usize = 3;

/// Reasons a Hurst estimate cannot be produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HurstError {
    /// Lag bound below [`MIN_MAX_LAG`]
    #[error("max_lag must be at least 3, got {0}")]
    InvalidMaxLag(usize),

    /// Too few observations for the largest lag
    #[error("insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    /// Lagged differences at `lag` have zero or non-finite dispersion
    #[error("degenerate estimate: dispersion at lag {lag} is {dispersion}")]
    DegenerateLag { lag: usize, dispersion: f64 },

    /// Log-log regression has no finite slope
    #[error("degenerate estimate: regression over {lags} lag(s) has no finite slope")]
    DegenerateFit { lags: usize },
}

impl HurstError {
    /// True for the degenerate-series family, as opposed to bad input sizes.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            HurstError::DegenerateLag { .. } | HurstError::DegenerateFit { .. }
        )
    }
}

/// Minimum series length accepted for `max_lag`.
///
/// The largest lag is `max_lag - 1`, and its difference window must hold at
/// least two values for a dispersion to exist.
pub fn required_samples(max_lag: usize) -> usize {
    max_lag + 1
}

/// Estimate the Hurst exponent of `series` over lags `[2, max_lag)`.
///
/// # Errors
/// - [`HurstError::InvalidMaxLag`] if `max_lag < 3`
/// - [`HurstError::InsufficientSamples`] if `series.len() < max_lag + 1`
/// - [`HurstError::DegenerateLag`] if any lag has zero (constant sub-segment)
///   or non-finite dispersion; such lags are never dropped or floored
/// - [`HurstError::DegenerateFit`] if the regression slope is not finite
pub fn hurst_exponent(series: &[f64], max_lag: usize) -> Result<f64, HurstError> {
    if max_lag < MIN_MAX_LAG {
        return Err(HurstError::InvalidMaxLag(max_lag));
    }

    let required = required_samples(max_lag);
    if series.len() < required {
        return Err(HurstError::InsufficientSamples {
            required,
            actual: series.len(),
        });
    }

    let lag_count = max_lag - 2;
    let mut log_lags = Vec::with_capacity(lag_count);
    let mut log_tau = Vec::with_capacity(lag_count);

    for lag in 2..max_lag {
        let tau = lagged_dispersion(series, lag);
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(HurstError::DegenerateLag {
                lag,
                dispersion: tau,
            });
        }
        log_lags.push((lag as f64).ln());
        log_tau.push(tau.ln());
    }

    let slope = ols_slope(&log_lags, &log_tau);
    if !slope.is_finite() {
        return Err(HurstError::DegenerateFit { lags: lag_count });
    }

    Ok(slope * 2.0)
}

/// Population standard deviation of `x[t + lag] - x[t]`.
fn lagged_dispersion(series: &[f64], lag: usize) -> f64 {
    let diffs: Vec<f64> = series[lag..]
        .iter()
        .zip(series.iter())
        .map(|(later, earlier)| later - earlier)
        .collect();
    population_std(&diffs)
}

/// Standard deviation with an `N` denominator. `NaN` for empty input.
pub fn population_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Least-squares slope of `y` on `x` (degree-1 fit).
///
/// Returns `NaN` when `x` has no spread (fewer than two distinct points).
pub fn ols_slope(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len()) as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        covariance += dx * (yi - mean_y);
        var_x += dx * dx;
    }

    if var_x == 0.0 {
        return f64::NAN;
    }
    covariance / var_x
}
