//! Market-data snapshot for one evaluation run.
//!
//! This module provides:
//! - [`ZeroCurve`]: zero-coupon yield curve over (tenor-in-days, rate) pillars
//! - [`MarketState`]: immutable snapshot of evaluation date, spot and yield
//! - [`MarketDataError`]: structured errors for lookups and construction
//!
//! Everything here is a read-only snapshot; valuation code receives a
//! `MarketState` by reference and never mutates it.

mod curve;
mod error;
mod snapshot;

pub use curve::ZeroCurve;
pub use error::MarketDataError;
pub use snapshot::MarketState;
