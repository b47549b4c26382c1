//! Error types for volatility and correlation models.

use thiserror::Error;

/// Volatility model errors.
///
/// # Variants
/// - `InvalidCoefficient`: Fitted coefficient violates its domain constraint
/// - `EmptySeries`: A residual/variance series was empty
/// - `SeriesLengthMismatch`: Paired series lengths differ
/// - `NonPositivePseudoVariance`: DCC recursion produced q11 or q22 <= 0
/// - `CorrelationDiverged`: DCC recursion left [-1, 1] beyond tolerance
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolatilityError {
    /// A fitted coefficient violates its domain constraint.
    #[error("Invalid coefficient {name} = {value}: {constraint}")]
    InvalidCoefficient {
        /// Coefficient name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable constraint description
        constraint: &'static str,
    },

    /// A residual or variance series was empty.
    #[error("Empty series for factor {factor}")]
    EmptySeries {
        /// Factor the series belongs to
        factor: &'static str,
    },

    /// Paired series lengths differ.
    #[error("Series length mismatch: {left_len} residuals vs {right_len} variances")]
    SeriesLengthMismatch {
        /// Residual series length
        left_len: usize,
        /// Variance series length
        right_len: usize,
    },

    /// DCC pseudo-variance became non-positive.
    #[error("Non-positive DCC pseudo-variance: q11 = {q11}, q22 = {q22}")]
    NonPositivePseudoVariance {
        /// First diagonal entry
        q11: f64,
        /// Second diagonal entry
        q22: f64,
    },

    /// Recursed correlation left [-1, 1] by more than numerical tolerance.
    #[error("Conditional correlation diverged: rho = {rho}")]
    CorrelationDiverged {
        /// The out-of-range correlation
        rho: f64,
    },
}
