//! Black-Scholes-Merton pricing for European index options.
//!
//! Valuation carries a continuous dividend yield q (cost of carry
//! b = r - q), as index options require.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**:  P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// European option payoff direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

/// The five first-order sensitivities of an option value.
///
/// Theta is annualised; divide by 365 (calendar) or 252 (trading) for a
/// per-day decay figure.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionGreeks<T> {
    /// ∂V/∂S - sensitivity to spot
    pub delta: T,
    /// ∂²V/∂S² - convexity with respect to spot
    pub gamma: T,
    /// ∂V/∂t - annualised time decay
    pub theta: T,
    /// ∂V/∂σ - sensitivity to volatility
    pub vega: T,
    /// ∂V/∂r - sensitivity to the zero rate
    pub rho: T,
}

/// Black-Scholes-Merton model for European option pricing.
///
/// Holds the market-level inputs (spot, rate, dividend yield, volatility);
/// contract-level inputs (strike, expiry, payoff direction) are method
/// arguments, so one model instance prices a whole chain.
///
/// # Examples
/// ```
/// use desk_models::analytical::{BlackScholes, OptionType};
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price(OptionType::Call, 100.0, 1.0).unwrap();
/// let put = bs.price(OptionType::Put, 100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free zero rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if `spot <= 0`
    /// - `AnalyticalError::InvalidVolatility` if `volatility <= 0`
    pub fn new(
        spot: T,
        rate: T,
        dividend_yield: T,
        volatility: T,
    ) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(0.0),
            });
        }
        if volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(0.0),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Rejects non-positive strike or expiry before any formula runs.
    fn validate_contract(&self, strike: T, expiry: T) -> Result<(), AnalyticalError> {
        let zero = T::zero();
        if strike <= zero {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(0.0),
            });
        }
        if expiry <= zero {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(0.0),
            });
        }
        Ok(())
    }

    /// Computes the d₁ term.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// Assumes `strike > 0` and `expiry > 0`; the public pricing methods
    /// validate before calling.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();

        let log_moneyness = (self.spot / strike).ln();
        let carry = self.rate - self.dividend_yield + half * self.volatility * self.volatility;

        (log_moneyness + carry * expiry) / vol_sqrt_t
    }

    /// Computes the d₂ term: d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Prices a European option.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidStrike` / `InvalidExpiry` on non-positive
    /// contract terms.
    pub fn price(
        &self,
        option_type: OptionType,
        strike: T,
        expiry: T,
    ) -> Result<T, AnalyticalError> {
        self.validate_contract(strike, expiry)?;

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let div_discount = (-self.dividend_yield * expiry).exp();
        let discount = (-self.rate * expiry).exp();

        let value = match option_type {
            // C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
            OptionType::Call => {
                self.spot * div_discount * norm_cdf(d1) - strike * discount * norm_cdf(d2)
            }
            // P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
            OptionType::Put => {
                strike * discount * norm_cdf(-d2) - self.spot * div_discount * norm_cdf(-d1)
            }
        };
        Ok(value)
    }

    /// Prices a European call. Convenience wrapper over [`price`](Self::price).
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.price(OptionType::Call, strike, expiry)
    }

    /// Prices a European put. Convenience wrapper over [`price`](Self::price).
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.price(OptionType::Put, strike, expiry)
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    pub fn delta(
        &self,
        option_type: OptionType,
        strike: T,
        expiry: T,
    ) -> Result<T, AnalyticalError> {
        self.validate_contract(strike, expiry)?;

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        let div_discount = (-self.dividend_yield * expiry).exp();

        Ok(match option_type {
            OptionType::Call => div_discount * n_d1,
            OptionType::Put => div_discount * (n_d1 - T::one()),
        })
    }

    /// Computes Gamma (∂²V/∂S²), identical for calls and puts.
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T)
    pub fn gamma(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.validate_contract(strike, expiry)?;

        let d1 = self.d1(strike, expiry);
        let div_discount = (-self.dividend_yield * expiry).exp();
        Ok(div_discount * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt()))
    }

    /// Computes Vega (∂V/∂σ), identical for calls and puts.
    ///
    /// Vega = S·e^(-qT)·φ(d₁)·√T
    pub fn vega(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.validate_contract(strike, expiry)?;

        let d1 = self.d1(strike, expiry);
        let div_discount = (-self.dividend_yield * expiry).exp();
        Ok(self.spot * div_discount * norm_pdf(d1) * expiry.sqrt())
    }

    /// Computes Theta (∂V/∂t), annualised.
    ///
    /// - Call Theta = -(S·σ·e^(-qT)·φ(d₁))/(2√T) + q·S·e^(-qT)·N(d₁)
    ///   - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -(S·σ·e^(-qT)·φ(d₁))/(2√T) - q·S·e^(-qT)·N(-d₁)
    ///   + r·K·e^(-rT)·N(-d₂)
    pub fn theta(
        &self,
        option_type: OptionType,
        strike: T,
        expiry: T,
    ) -> Result<T, AnalyticalError> {
        self.validate_contract(strike, expiry)?;

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let div_discount = (-self.dividend_yield * expiry).exp();
        let discount = (-self.rate * expiry).exp();
        let two = T::from(2.0).unwrap();

        // Common decay term: -(S·σ·e^(-qT)·φ(d₁)) / (2√T)
        let decay =
            -(self.spot * self.volatility * div_discount * norm_pdf(d1)) / (two * expiry.sqrt());

        Ok(match option_type {
            OptionType::Call => {
                decay + self.dividend_yield * self.spot * div_discount * norm_cdf(d1)
                    - self.rate * strike * discount * norm_cdf(d2)
            }
            OptionType::Put => {
                decay - self.dividend_yield * self.spot * div_discount * norm_cdf(-d1)
                    + self.rate * strike * discount * norm_cdf(-d2)
            }
        })
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    pub fn rho(
        &self,
        option_type: OptionType,
        strike: T,
        expiry: T,
    ) -> Result<T, AnalyticalError> {
        self.validate_contract(strike, expiry)?;

        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        Ok(match option_type {
            OptionType::Call => strike * expiry * discount * norm_cdf(d2),
            OptionType::Put => -strike * expiry * discount * norm_cdf(-d2),
        })
    }

    /// Computes all five Greeks in one pass, sharing the d₁/d₂ evaluation.
    pub fn greeks(
        &self,
        option_type: OptionType,
        strike: T,
        expiry: T,
    ) -> Result<OptionGreeks<T>, AnalyticalError> {
        self.validate_contract(strike, expiry)?;

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let sqrt_t = expiry.sqrt();
        let div_discount = (-self.dividend_yield * expiry).exp();
        let discount = (-self.rate * expiry).exp();
        let pdf_d1 = norm_pdf(d1);
        let two = T::from(2.0).unwrap();

        let gamma = div_discount * pdf_d1 / (self.spot * self.volatility * sqrt_t);
        let vega = self.spot * div_discount * pdf_d1 * sqrt_t;
        let decay = -(self.spot * self.volatility * div_discount * pdf_d1) / (two * sqrt_t);

        let (delta, theta, rho) = match option_type {
            OptionType::Call => (
                div_discount * norm_cdf(d1),
                decay + self.dividend_yield * self.spot * div_discount * norm_cdf(d1)
                    - self.rate * strike * discount * norm_cdf(d2),
                strike * expiry * discount * norm_cdf(d2),
            ),
            OptionType::Put => (
                div_discount * (norm_cdf(d1) - T::one()),
                decay - self.dividend_yield * self.spot * div_discount * norm_cdf(-d1)
                    + self.rate * strike * discount * norm_cdf(-d2),
                -strike * expiry * discount * norm_cdf(-d2),
            ),
        };

        Ok(OptionGreeks {
            delta,
            gamma,
            theta,
            vega,
            rho,
        })
    }
}
