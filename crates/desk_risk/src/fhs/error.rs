//! Error types for the FHS simulation engine.

use desk_core::math::stats::StatsError;
use thiserror::Error;

use crate::portfolio::PortfolioError;

/// Configuration errors, raised at engine construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Draw count outside [1, MAX_DRAWS].
    #[error("Invalid draw count {0}: must be in range [1, 1_000_000]")]
    InvalidDrawCount(usize),

    /// Horizon outside [1, MAX_HORIZON_DAYS].
    #[error("Invalid horizon {0} days: must be in range [1, 365]")]
    InvalidHorizon(usize),

    /// Tail probability outside (0, 1).
    #[error("Invalid tail probability {0}: must lie in (0, 1)")]
    InvalidConfidence(f64),

    /// A required parameter was missing or malformed.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },
}

/// Runtime errors from a simulation run.
#[derive(Error, Debug)]
pub enum FhsError {
    /// Engine configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Residual pools of the two factors have different lengths.
    #[error("Residual pool mismatch: {index_len} index residuals vs {vol_len} vol residuals")]
    PoolMismatch {
        /// Index-factor residual count
        index_len: usize,
        /// Vol-factor residual count
        vol_len: usize,
    },

    /// Residual pool was empty.
    #[error("Residual pool is empty")]
    EmptyPool,

    /// A position expires inside the simulation horizon.
    ///
    /// Valuation requires positive residual expiry; a book holding
    /// contracts that expire mid-horizon must be split upstream.
    #[error(
        "Position {index} expires within the {horizon_days}-day horizon ({expiry_days:.1} days left)"
    )]
    HorizonExceedsExpiry {
        /// Index of the offending position
        index: usize,
        /// Simulation horizon in days
        horizon_days: usize,
        /// The position's remaining days to expiry
        expiry_days: f64,
    },

    /// Every draw was discarded; no distribution to take a quantile of.
    #[error("All {attempted} simulation draws failed")]
    AllDrawsFailed {
        /// Number of draws attempted
        attempted: usize,
    },

    /// The run was cancelled via its [`CancelToken`](super::CancelToken).
    #[error("Simulation cancelled")]
    Cancelled,

    /// Initial book valuation failed before any draw ran.
    #[error("Initial valuation failed: {0}")]
    Portfolio(#[from] PortfolioError),

    /// Quantile extraction failed.
    #[error("P&L statistics failed: {0}")]
    Stats(#[from] StatsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert!(ConfigError::InvalidDrawCount(0)
            .to_string()
            .contains("Invalid draw count 0"));
        assert!(ConfigError::InvalidConfidence(1.5)
            .to_string()
            .contains("1.5"));
    }

    #[test]
    fn horizon_error_carries_position_context() {
        let err = FhsError::HorizonExceedsExpiry {
            index: 3,
            horizon_days: 21,
            expiry_days: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Position 3"));
        assert!(msg.contains("21-day"));
    }
}
