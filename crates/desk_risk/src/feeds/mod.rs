//! Wire-format contracts for the collaborator feeds.
//!
//! The engine consumes five feeds: the position list, the zero-coupon
//! curve, the market snapshot, and one fitted-model set per run (two GARCH
//! factors plus the DCC layer). This module defines their serde shapes,
//! validates them fail-fast before any computation starts, and assembles
//! the domain objects the rest of the crate works with.
//!
//! Curve rates arrive in percent (as quoted); they are converted to
//! decimals during assembly. Everything else is already in natural units.

use desk_core::market_data::{MarketDataError, MarketState, ZeroCurve};
use desk_core::types::time::Date;
use desk_models::volatility::{
    DccCoefficients, GarchCoefficients, GarchFactor, PseudoCorrelation, VolatilityError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::portfolio::OptionPosition;

/// Feed validation and parsing errors.
///
/// All variants fail fast: nothing downstream runs on a malformed feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The position feed held no positions.
    #[error("Position feed is empty")]
    EmptyPositions,

    /// The curve feed held no pillars.
    #[error("Curve feed is empty")]
    EmptyCurve,

    /// Feed could not be parsed as JSON.
    #[error("Malformed feed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Curve construction failed (unsorted pillars, too few points).
    #[error("Curve feed rejected: {0}")]
    Curve(#[from] MarketDataError),

    /// Fitted-model feed rejected (bad coefficients or series).
    #[error("Fitted-model feed rejected: {0}")]
    Model(#[from] VolatilityError),
}

/// One curve pillar as quoted: tenor in days, rate in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Tenor in calendar days
    pub tenor_days: u32,
    /// Zero rate in percent (0.15 = 15 basis points)
    pub rate_percent: f64,
}

/// Market snapshot feed: evaluation date, spot, dividend yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Evaluation date
    pub evaluation_date: Date,
    /// Underlying spot price
    pub spot: f64,
    /// Continuous dividend yield (decimal)
    pub dividend_yield: f64,
}

/// One fitted GARCH factor as delivered by the estimation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedFactor {
    /// Long-run variance weight
    pub omega: f64,
    /// Shock coefficient
    pub alpha: f64,
    /// Persistence coefficient
    pub beta: f64,
    /// Conditional-mean constant (absent for zero-mean fits)
    #[serde(default)]
    pub mu: f64,
    /// Conditional-mean AR(1) loading (absent for zero-mean fits)
    #[serde(default)]
    pub ar1: f64,
    /// Standardised residuals over the estimation window
    pub residuals: Vec<f64>,
    /// Conditional variances over the estimation window
    pub variances: Vec<f64>,
    /// Most recent observed return
    pub last_return: f64,
}

impl FittedFactor {
    /// Assembles the domain factor, validating coefficients and series.
    ///
    /// # Errors
    /// `FeedError::Model` on invalid coefficients or mismatched series.
    pub fn to_factor(&self) -> Result<GarchFactor<f64>, FeedError> {
        let coefficients = GarchCoefficients::new(self.omega, self.alpha, self.beta)?
            .with_mean(self.mu, self.ar1);
        Ok(GarchFactor::new(
            coefficients,
            self.residuals.clone(),
            self.variances.clone(),
            self.last_return,
        )?)
    }
}

/// The fitted-model feed: two GARCH factors plus the DCC layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModelSet {
    /// Equity-index factor (log returns of the underlying)
    pub index_factor: FittedFactor,
    /// Volatility-index factor (log returns of the implied-vol index)
    pub vol_factor: FittedFactor,
    /// DCC shock loading
    pub dcc_a: f64,
    /// DCC persistence loading
    pub dcc_b: f64,
    /// Last fitted pseudo-covariance diagonal (first factor)
    pub q11: f64,
    /// Last fitted pseudo-covariance diagonal (second factor)
    pub q22: f64,
    /// Last fitted pseudo-covariance off-diagonal
    pub q12: f64,
}

impl FittedModelSet {
    /// Assembles both GARCH factors.
    ///
    /// # Errors
    /// `FeedError::Model` if either factor is invalid.
    pub fn factors(&self) -> Result<(GarchFactor<f64>, GarchFactor<f64>), FeedError> {
        Ok((self.index_factor.to_factor()?, self.vol_factor.to_factor()?))
    }

    /// Assembles the DCC coefficients and last fitted state.
    ///
    /// # Errors
    /// `FeedError::Model` on invalid loadings or a non-positive diagonal.
    pub fn dcc(&self) -> Result<(DccCoefficients<f64>, PseudoCorrelation<f64>), FeedError> {
        let coefficients = DccCoefficients::new(self.dcc_a, self.dcc_b)?;
        let state = PseudoCorrelation::new(self.q11, self.q22, self.q12)?;
        Ok((coefficients, state))
    }
}

/// The complete input bundle for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFeed {
    /// Position feed, in book order
    pub positions: Vec<OptionPosition>,
    /// Curve feed, ascending by tenor
    pub curve: Vec<CurvePoint>,
    /// Market snapshot
    pub market: MarketSnapshot,
    /// Fitted volatility/correlation models
    pub models: FittedModelSet,
}

impl RiskFeed {
    /// Parses and validates a feed bundle from JSON.
    ///
    /// Validation is fail-fast: an empty position list, an empty or
    /// unsorted curve, or inconsistent model series is rejected here,
    /// before any valuation starts.
    ///
    /// # Errors
    /// Any [`FeedError`] variant.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        let feed: RiskFeed = serde_json::from_str(json)?;
        feed.validate()?;
        Ok(feed)
    }

    /// Runs the fail-fast contract checks without assembling anything.
    ///
    /// # Errors
    /// Any [`FeedError`] variant.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.positions.is_empty() {
            return Err(FeedError::EmptyPositions);
        }
        if self.curve.is_empty() {
            return Err(FeedError::EmptyCurve);
        }
        // Construction checks ordering and pillar count.
        self.zero_curve()?;
        self.models.factors()?;
        self.models.dcc()?;
        Ok(())
    }

    /// Builds the zero curve, converting percent quotes to decimals.
    ///
    /// # Errors
    /// `FeedError::Curve` on unsorted or insufficient pillars.
    pub fn zero_curve(&self) -> Result<ZeroCurve, FeedError> {
        let pillars: Vec<(u32, f64)> = self
            .curve
            .iter()
            .map(|p| (p.tenor_days, p.rate_percent / 100.0))
            .collect();
        Ok(ZeroCurve::new(&pillars)?)
    }

    /// Builds the market state for the run.
    ///
    /// # Errors
    /// `FeedError::Curve` on curve problems or a non-positive spot.
    pub fn market_state(&self) -> Result<MarketState, FeedError> {
        let curve = self.zero_curve()?;
        Ok(MarketState::new(
            self.market.evaluation_date,
            self.market.spot,
            self.market.dividend_yield,
            curve,
        )?)
    }
}
