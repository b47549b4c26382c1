//! The option book: positions, enrichment and aggregation.
//!
//! - [`OptionPosition`]: one contract as delivered by the position feed
//! - [`PricedPosition`]: a position enriched against a market snapshot
//!   (time to expiry, zero rate, implied volatility, Greeks)
//! - [`PricedPortfolio`]: the enriched book with aggregation and repricing
//! - [`PortfolioGreeks`]: quantity- and multiplier-weighted Greek sums

mod book;
mod error;
mod position;

pub use book::{EnrichmentOutcome, PortfolioGreeks, PositionFailure, PricedPortfolio};
pub use error::{PortfolioError, PositionError};
pub use position::{OptionPosition, PricedPosition};
