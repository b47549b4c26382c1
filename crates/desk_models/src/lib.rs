//! # Desk Models (L2: Pricing and Volatility Dynamics)
//!
//! Closed-form option pricing and the conditional volatility/correlation
//! models driving the risk engine.
//!
//! This crate provides:
//! - Black-Scholes-Merton pricing with continuous dividend yield, analytic
//!   Greeks and implied-volatility inversion (`analytical`)
//! - Standard-normal distribution functions shared by the pricer and the
//!   parametric VaR mapper (`analytical::distributions`)
//! - GARCH(1,1) one-step conditional mean/variance forecasts (`volatility`)
//! - DCC one-step conditional correlation recursion (`volatility`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: formulas accept `f64` or `f32`
//! - **Fitted coefficients are inputs**: estimation happens upstream; this
//!   crate only recurses forward from supplied coefficients
//! - **Pure functions over immutable state**: forecasts and recursions take
//!   last-period state by value and return new state

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod volatility;
