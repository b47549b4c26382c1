//! # desk_core: Numerical Foundation for the Option Risk Desk
//!
//! ## Layer 1 (Foundation) Role
//!
//! desk_core is the bottom layer of the three-layer workspace, providing:
//! - Root-finding solvers: Newton-Raphson and Brent (`math::solvers`)
//! - Piecewise-linear interpolation (`math::interpolators`)
//! - Empirical distribution statistics for P&L vectors (`math::stats`)
//! - Time types: `Date`, `ExpirySession`, ACT/365 year fractions (`types::time`)
//! - Error types: `SolverError`, `InterpolationError`, `DateError` (`types::error`)
//! - Market-data snapshot and zero-coupon curve (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other desk_* crates, with minimal external
//! dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use desk_core::market_data::ZeroCurve;
//! use desk_core::types::time::{Date, ExpirySession};
//!
//! // Zero-coupon curve from (tenor-in-days, rate) pillars
//! let curve = ZeroCurve::new(&[(30, 0.0010), (90, 0.0015), (365, 0.0030)]).unwrap();
//! let rate = curve.rate_for_days(60.0).unwrap();
//! assert!((rate - 0.00125).abs() < 1e-12);
//!
//! // Time to expiry for a close-session contract
//! let eval = Date::from_ymd(2021, 3, 1).unwrap();
//! let expiry = Date::from_ymd(2021, 6, 18).unwrap();
//! let t = ExpirySession::Close.year_fraction(eval, expiry);
//! assert!(t > 0.29 && t < 0.31);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
