//! Delta-normal VaR from portfolio sensitivities and one-step forecasts.
//!
//! ## Mathematical Formulas
//!
//! With portfolio Delta and Vega, spot S, implied-vol-factor level V, the
//! one-step factor forecasts and their conditional correlation rho:
//!
//! ```text
//! E[dV]   = Vega * V * mean_vol
//! Var[dV] = Delta² S² var_index + Vega² V² var_vol
//!           + 2 Delta Vega S V rho sqrt(var_index * var_vol)
//! VaR_a   = -(E[dV] + z_a * sqrt(Var[dV])),  z_a = Phi^-1(a)
//! ```
//!
//! The loss is reported as a positive number. This is a first-order
//! (Delta) plus volatility (Vega) approximation of the P&L distribution:
//! Gamma, Theta and Rho are excluded by the delta-normal definition, and
//! the book is not repriced.

use desk_models::analytical::{norm_inv_cdf, AnalyticalError};
use thiserror::Error;
use tracing::debug;

/// Errors from the delta-normal mapping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VarError {
    /// A variance input was negative.
    #[error("Negative variance for {factor}: {variance}")]
    NegativeVariance {
        /// Which factor carried the bad variance
        factor: &'static str,
        /// The offending value
        variance: f64,
    },

    /// Correlation outside [-1, 1].
    #[error("Correlation {rho} outside [-1, 1]")]
    InvalidCorrelation {
        /// The offending correlation
        rho: f64,
    },

    /// Confidence quantile could not be computed.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),
}

/// Inputs to the delta-normal mapping.
///
/// Sensitivities come from the aggregated book; the factor moments come
/// from the one-step GARCH forecasts and the DCC correlation forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaNormalInputs {
    /// Portfolio Delta (quantity- and multiplier-weighted)
    pub delta: f64,
    /// Portfolio Vega (quantity- and multiplier-weighted)
    pub vega: f64,
    /// Underlying spot level S
    pub spot: f64,
    /// Implied-vol-factor level V (e.g. vol index / 100)
    pub vol_level: f64,
    /// One-step conditional variance of the index factor
    pub index_variance: f64,
    /// One-step conditional mean of the vol factor
    pub vol_mean: f64,
    /// One-step conditional variance of the vol factor
    pub vol_variance: f64,
    /// One-step conditional correlation between the factors
    pub correlation: f64,
}

/// Delta-normal VaR with its distribution moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaNormalVar {
    /// Expected one-step P&L
    pub expected_change: f64,
    /// One-step P&L standard deviation
    pub std_deviation: f64,
    /// Loss magnitude at the configured tail probability (positive)
    pub value_at_risk: f64,
    /// Tail probability the VaR was computed at
    pub alpha: f64,
}

/// Maps portfolio sensitivities and factor forecasts to a parametric VaR.
///
/// `alpha` is the tail probability (0.05 for a 95% one-sided VaR).
///
/// # Errors
///
/// * `VarError::NegativeVariance` - a factor variance was negative
/// * `VarError::InvalidCorrelation` - correlation outside [-1, 1]
/// * `VarError::Analytical` - `alpha` outside (0, 1)
///
/// # Examples
///
/// ```
/// use desk_risk::var::{delta_normal_var, DeltaNormalInputs};
///
/// let inputs = DeltaNormalInputs {
///     delta: 5200.0,
///     vega: 84_000.0,
///     spot: 3500.0,
///     vol_level: 0.22,
///     index_variance: 1.2e-4,
///     vol_mean: -2.0e-3,
///     vol_variance: 3.5e-3,
///     correlation: -0.75,
/// };
/// let var = delta_normal_var(&inputs, 0.05).unwrap();
/// assert!(var.value_at_risk > 0.0);
/// ```
pub fn delta_normal_var(
    inputs: &DeltaNormalInputs,
    alpha: f64,
) -> Result<DeltaNormalVar, VarError> {
    if inputs.index_variance < 0.0 {
        return Err(VarError::NegativeVariance {
            factor: "index",
            variance: inputs.index_variance,
        });
    }
    if inputs.vol_variance < 0.0 {
        return Err(VarError::NegativeVariance {
            factor: "vol",
            variance: inputs.vol_variance,
        });
    }
    if !(-1.0..=1.0).contains(&inputs.correlation) {
        return Err(VarError::InvalidCorrelation {
            rho: inputs.correlation,
        });
    }

    let z = norm_inv_cdf(alpha)?;

    let ds = inputs.delta * inputs.spot;
    let vv = inputs.vega * inputs.vol_level;

    let expected_change = vv * inputs.vol_mean;
    let variance = ds * ds * inputs.index_variance
        + vv * vv * inputs.vol_variance
        + 2.0 * ds
            * vv
            * inputs.correlation
            * (inputs.index_variance * inputs.vol_variance).sqrt();

    // Cross terms can push the quadratic form marginally negative at the
    // correlation boundary; floor at zero.
    let std_deviation = variance.max(0.0).sqrt();

    let value_at_risk = -(expected_change + z * std_deviation);

    debug!(
        expected_change,
        std_deviation, value_at_risk, alpha, "delta-normal mapping"
    );

    Ok(DeltaNormalVar {
        expected_change,
        std_deviation,
        value_at_risk,
        alpha,
    })
}
