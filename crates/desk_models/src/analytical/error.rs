//! Error types for analytical pricing operations.

use desk_core::types::SolverError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidStrike`: Non-positive strike
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `InvalidProbability`: Quantile probability outside (0, 1)
/// - `NoImpliedVolatility`: Observed price unattainable within the search
///   bracket
/// - `Solver`: Root finder failed to converge
///
/// # Examples
/// ```
/// use desk_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid time to expiry: t = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value in years
        expiry: f64,
    },

    /// Probability outside the open unit interval.
    #[error("Probability {p} outside (0, 1)")]
    InvalidProbability {
        /// The offending probability
        p: f64,
    },

    /// No volatility in the search bracket reproduces the observed price.
    #[error(
        "No implied volatility in [{lo}, {hi}] reproduces price {price}"
    )]
    NoImpliedVolatility {
        /// Observed market price
        price: f64,
        /// Lower bracket bound
        lo: f64,
        /// Upper bracket bound
        hi: f64,
    },

    /// Root finder failed.
    #[error("Solver failure: {0}")]
    Solver(#[from] SolverError),
}
