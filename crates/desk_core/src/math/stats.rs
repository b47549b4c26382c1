//! Empirical statistics over simulated P&L samples.
//!
//! The simulation engine reduces its P&L vectors to order-statistic
//! quantiles (for VaR) and tail means (for expected shortfall). Both are
//! defined here over plain `f64` slices so any component producing a sample
//! can reuse them.

use thiserror::Error;

/// Errors from empirical-statistics computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Sample was empty.
    #[error("Empty sample")]
    EmptySample,

    /// Probability must lie in (0, 1).
    #[error("Probability {p} outside (0, 1)")]
    InvalidProbability {
        /// The offending probability value
        p: f64,
    },
}

/// Arithmetic mean of a sample.
///
/// # Errors
/// `StatsError::EmptySample` for an empty slice.
pub fn mean(sample: &[f64]) -> Result<f64, StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    Ok(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// For a sorted sample `x_0 <= ... <= x_{n-1}` and probability `p`, the
/// quantile sits at fractional rank `h = p * (n - 1)` and interpolates
/// linearly between the neighbouring order statistics. A single-element
/// sample returns that element for any `p`.
///
/// # Errors
///
/// * `StatsError::EmptySample` - empty slice
/// * `StatsError::InvalidProbability` - `p` outside (0, 1)
///
/// # Example
///
/// ```
/// use desk_core::math::stats::quantile;
///
/// let sample = [4.0, 1.0, 3.0, 2.0];
/// assert!((quantile(&sample, 0.5).unwrap() - 2.5).abs() < 1e-12);
/// ```
pub fn quantile(sample: &[f64], p: f64) -> Result<f64, StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    if !(p > 0.0 && p < 1.0) {
        return Err(StatsError::InvalidProbability { p });
    }

    let mut sorted = sample.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let h = p * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;

    if lo + 1 >= sorted.len() {
        return Ok(sorted[sorted.len() - 1]);
    }
    Ok(sorted[lo] + frac * (sorted[lo + 1] - sorted[lo]))
}

/// Mean of the lower `p` tail of a sample (the worst outcomes).
///
/// Averages the `ceil(p * n)` smallest observations; used for expected
/// shortfall, which conditions on losses at or beyond the VaR quantile.
///
/// # Errors
/// Same conditions as [`quantile`].
pub fn lower_tail_mean(sample: &[f64], p: f64) -> Result<f64, StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    if !(p > 0.0 && p < 1.0) {
        return Err(StatsError::InvalidProbability { p });
    }

    let mut sorted = sample.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let k = ((p * sorted.len() as f64).ceil() as usize).clamp(1, sorted.len());
    Ok(sorted[..k].iter().sum::<f64>() / k as f64)
}
