//! # Desk Risk (L3: Portfolio Risk Engine)
//!
//! Tail-risk measurement for a static book of European index options:
//! portfolio Greeks, delta-normal VaR and Filtered Historical Simulation
//! (FHS) VaR over one-day and multi-day horizons.
//!
//! This crate provides:
//! - Position enrichment and portfolio aggregation (`portfolio`)
//! - Wire-format feed contracts with fail-fast validation (`feeds`)
//! - The parametric delta-normal VaR mapper (`var`)
//! - The FHS simulation engine with Rayon parallelism, reproducible
//!   seeding, per-draw failure accounting and cooperative cancellation
//!   (`fhs`)
//!
//! ## Data Flow
//!
//! ```text
//! feeds -> MarketState + OptionPosition book -> PricedPortfolio
//!                                                  |
//!                     GarchFactor (x2) + DCC ------+--> delta-normal VaR
//!                                                  |
//!                     GarchFactor (x2) + pool -----+--> FHS VaR (1d / Nd)
//! ```
//!
//! All inputs are immutable snapshots; simulation draws share them
//! read-only, so draws parallelise without locking and results are
//! identical regardless of thread scheduling.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod feeds;
pub mod fhs;
pub mod portfolio;
pub mod var;
