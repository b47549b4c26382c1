//! Closed-form option valuation under Black-Scholes-Merton.
//!
//! This module provides:
//! - The [`BlackScholes`] pricer with continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Theta, Vega, Rho)
//! - Implied-volatility inversion via bracketed root finding
//! - Standard-normal distribution functions
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: supports `f64` and `f32`
//! - **Validated entry points**: non-positive expiry, strike or volatility is
//!   an error, never a silently propagated NaN
//! - **Numerical stability**: erfc-based normal CDF accurate to 1.5e-7

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod implied;

pub use black_scholes::{BlackScholes, OptionGreeks, OptionType};
pub use distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied::implied_volatility;
