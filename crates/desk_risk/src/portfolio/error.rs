//! Error types for position enrichment and portfolio aggregation.

use desk_core::market_data::MarketDataError;
use desk_models::analytical::AnalyticalError;
use thiserror::Error;

/// Errors attached to a single position.
///
/// # Variants
/// - `Expired`: Non-positive time to expiry at the evaluation date
/// - `InvalidContract`: Malformed contract terms (strike, multiplier, price)
/// - `MarketData`: Curve lookup failed (tenor outside pillars)
/// - `Analytical`: Valuation or implied-volatility inversion failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    /// The contract has no remaining time value at the evaluation date.
    #[error("Position expired: {days} effective days to expiry")]
    Expired {
        /// Session-adjusted days to expiry (zero or negative)
        days: i64,
    },

    /// Malformed contract terms.
    #[error("Invalid contract: {reason}")]
    InvalidContract {
        /// What was wrong with the contract
        reason: String,
    },

    /// Curve lookup failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Valuation or implied-volatility inversion failed.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),
}

/// Errors for whole-book operations.
///
/// Enrichment tolerates individual position failures (they are reported
/// alongside the book); these errors are the unrecoverable cases.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// The position feed contained no positions.
    #[error("Empty book: no positions to price")]
    EmptyBook,

    /// Every position in the feed failed enrichment.
    #[error("All {failures} positions failed enrichment; first failure at index {first_index}: {first_error}")]
    AllPositionsFailed {
        /// Number of failed positions
        failures: usize,
        /// Index of the first failure
        first_index: usize,
        /// The first failure itself
        first_error: PositionError,
    },

    /// A repricing input left its valid domain.
    #[error("Position {index} repricing failed: {source}")]
    Reprice {
        /// Index of the position within the book
        index: usize,
        /// The underlying failure
        source: PositionError,
    },
}
