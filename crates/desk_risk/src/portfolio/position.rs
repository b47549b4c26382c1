//! Option positions and their market-state enrichment.

use desk_core::market_data::MarketState;
use desk_core::types::time::{Date, ExpirySession, DAYS_PER_YEAR};
use desk_models::analytical::{
    implied_volatility, BlackScholes, OptionGreeks, OptionType,
};

use super::error::PositionError;

/// One option contract as delivered by the position feed.
///
/// Quantity is signed (negative = short). Immutable once loaded; everything
/// derived from market data lives on [`PricedPosition`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OptionPosition {
    /// Call or put
    pub option_type: OptionType,
    /// Strike price
    pub strike: f64,
    /// Signed contract count (negative = short)
    pub quantity: f64,
    /// Contract multiplier (index points to currency)
    pub multiplier: f64,
    /// Expiry date
    pub expiry: Date,
    /// Settlement session on the expiry date
    pub session: ExpirySession,
    /// Observed market price per contract (before multiplier)
    pub market_price: f64,
}

impl OptionPosition {
    /// Rejects malformed contract terms before any valuation.
    fn validate(&self) -> Result<(), PositionError> {
        if !(self.strike > 0.0) {
            return Err(PositionError::InvalidContract {
                reason: format!("strike {} must be positive", self.strike),
            });
        }
        if !(self.multiplier > 0.0) {
            return Err(PositionError::InvalidContract {
                reason: format!("multiplier {} must be positive", self.multiplier),
            });
        }
        if !(self.market_price > 0.0) {
            return Err(PositionError::InvalidContract {
                reason: format!("market price {} must be positive", self.market_price),
            });
        }
        if !self.quantity.is_finite() {
            return Err(PositionError::InvalidContract {
                reason: format!("quantity {} must be finite", self.quantity),
            });
        }
        Ok(())
    }
}

/// A position enriched against a [`MarketState`].
///
/// Carries the derived valuation state: session-adjusted time to expiry,
/// the interpolated zero rate for that tenor, the implied volatility backed
/// out of the observed price, the d1/d2 terms and the per-contract Greeks
/// (before quantity/multiplier scaling).
#[derive(Debug, Clone)]
pub struct PricedPosition {
    position: OptionPosition,
    time_to_expiry: f64,
    zero_rate: f64,
    dividend_yield: f64,
    implied_vol: f64,
    d1: f64,
    d2: f64,
    greeks: OptionGreeks<f64>,
}

impl PricedPosition {
    /// Enriches a position: time to expiry, rate lookup, implied volatility
    /// and Greeks, in that order, failing on the first invalid derivation.
    ///
    /// # Errors
    ///
    /// * `PositionError::InvalidContract` - malformed contract terms
    /// * `PositionError::Expired` - non-positive session-adjusted expiry
    /// * `PositionError::MarketData` - tenor outside the curve pillars
    /// * `PositionError::Analytical` - no implied volatility reproduces the
    ///   observed price
    pub fn enrich(
        position: OptionPosition,
        market: &MarketState,
    ) -> Result<Self, PositionError> {
        position.validate()?;

        let days = position
            .session
            .days_to_expiry(market.evaluation_date(), position.expiry);
        if days <= 0 {
            return Err(PositionError::Expired { days });
        }
        let time_to_expiry = days as f64 / DAYS_PER_YEAR;

        let zero_rate = market.curve().rate_for_days(days as f64)?;

        let implied_vol = implied_volatility(
            position.option_type,
            position.market_price,
            market.spot(),
            position.strike,
            time_to_expiry,
            zero_rate,
            market.dividend_yield(),
        )?;

        let model = BlackScholes::new(
            market.spot(),
            zero_rate,
            market.dividend_yield(),
            implied_vol,
        )?;
        let d1 = model.d1(position.strike, time_to_expiry);
        let d2 = model.d2(position.strike, time_to_expiry);
        let greeks = model.greeks(position.option_type, position.strike, time_to_expiry)?;

        Ok(Self {
            position,
            time_to_expiry,
            zero_rate,
            dividend_yield: market.dividend_yield(),
            implied_vol,
            d1,
            d2,
            greeks,
        })
    }

    /// The underlying feed position.
    #[inline]
    pub fn position(&self) -> &OptionPosition {
        &self.position
    }

    /// Session-adjusted ACT/365 time to expiry.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Zero rate interpolated for this position's tenor.
    #[inline]
    pub fn zero_rate(&self) -> f64 {
        self.zero_rate
    }

    /// Implied volatility backed out of the observed price.
    #[inline]
    pub fn implied_vol(&self) -> f64 {
        self.implied_vol
    }

    /// The d1 term at the implied volatility.
    #[inline]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// The d2 term at the implied volatility.
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// Per-contract Greeks at the implied volatility (before
    /// quantity/multiplier scaling).
    #[inline]
    pub fn greeks(&self) -> &OptionGreeks<f64> {
        &self.greeks
    }

    /// Signed position value: quantity * multiplier * market price.
    #[inline]
    pub fn value(&self) -> f64 {
        self.position.quantity * self.position.multiplier * self.position.market_price
    }

    /// Reprices the contract at a shifted spot, proportionally scaled
    /// implied volatility and reduced expiry, holding the zero rate fixed.
    ///
    /// Returns the signed position value (quantity and multiplier applied).
    /// This is the per-draw valuation inside the simulation engine.
    ///
    /// # Errors
    ///
    /// * `PositionError::Expired` - the time decay consumed the remaining
    ///   expiry
    /// * `PositionError::Analytical` - the volatility scale drove sigma to
    ///   zero or below, or the spot left its domain
    pub fn reprice(
        &self,
        spot: f64,
        vol_scale: f64,
        time_decay_years: f64,
    ) -> Result<f64, PositionError> {
        let expiry = self.time_to_expiry - time_decay_years;
        if expiry <= 0.0 {
            return Err(PositionError::Expired {
                days: (expiry * DAYS_PER_YEAR).floor() as i64,
            });
        }

        let sigma = self.implied_vol * vol_scale;
        let model = BlackScholes::new(spot, self.zero_rate, self.dividend_yield, sigma)?;
        let unit = model.price(self.position.option_type, self.position.strike, expiry)?;
        Ok(self.position.quantity * self.position.multiplier * unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use desk_core::market_data::ZeroCurve;

    fn market() -> MarketState {
        let curve = ZeroCurve::new(&[(1, 0.0008), (90, 0.0012), (365, 0.0025)]).unwrap();
        MarketState::new(
            Date::from_ymd(2021, 3, 1).unwrap(),
            3500.0,
            0.02,
            curve,
        )
        .unwrap()
    }

    fn position(expiry: Date) -> OptionPosition {
        OptionPosition {
            option_type: OptionType::Call,
            strike: 3600.0,
            quantity: 2.0,
            multiplier: 100.0,
            expiry,
            session: ExpirySession::Close,
            market_price: 80.0,
        }
    }

    #[test]
    fn enrichment_derives_valuation_state() {
        let expiry = Date::from_ymd(2021, 6, 18).unwrap();
        let priced = PricedPosition::enrich(position(expiry), &market()).unwrap();

        // 109 calendar days, close session.
        assert_relative_eq!(priced.time_to_expiry(), 109.0 / 365.0, epsilon = 1e-12);
        // Rate interpolated between the 90d and 365d pillars.
        assert!(priced.zero_rate() > 0.0012 && priced.zero_rate() < 0.0025);
        assert!(priced.implied_vol() > 0.0);
        assert!(priced.d1() > priced.d2());
        assert!(priced.greeks().delta > 0.0 && priced.greeks().delta < 1.0);
    }

    #[test]
    fn implied_vol_reproduces_market_price() {
        let expiry = Date::from_ymd(2021, 6, 18).unwrap();
        let priced = PricedPosition::enrich(position(expiry), &market()).unwrap();

        let model = BlackScholes::new(
            3500.0,
            priced.zero_rate(),
            0.02,
            priced.implied_vol(),
        )
        .unwrap();
        let reproduced = model
            .price(OptionType::Call, 3600.0, priced.time_to_expiry())
            .unwrap();
        assert_relative_eq!(reproduced, 80.0, epsilon = 1e-7);
    }

    #[test]
    fn open_session_shortens_expiry() {
        let expiry = Date::from_ymd(2021, 6, 18).unwrap();
        let mut open_position = position(expiry);
        open_position.session = ExpirySession::Open;

        let close = PricedPosition::enrich(position(expiry), &market()).unwrap();
        let open = PricedPosition::enrich(open_position, &market()).unwrap();
        assert_relative_eq!(
            close.time_to_expiry() - open.time_to_expiry(),
            1.0 / 365.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn expired_position_is_rejected() {
        let expiry = Date::from_ymd(2021, 3, 1).unwrap();
        let result = PricedPosition::enrich(position(expiry), &market());
        assert!(matches!(result, Err(PositionError::Expired { days: 0 })));
    }

    #[test]
    fn tenor_beyond_curve_is_rejected() {
        let expiry = Date::from_ymd(2023, 3, 1).unwrap();
        let result = PricedPosition::enrich(position(expiry), &market());
        assert!(matches!(result, Err(PositionError::MarketData(_))));
    }

    #[test]
    fn malformed_contract_is_rejected() {
        let expiry = Date::from_ymd(2021, 6, 18).unwrap();
        let mut bad = position(expiry);
        bad.strike = 0.0;
        assert!(matches!(
            PricedPosition::enrich(bad, &market()),
            Err(PositionError::InvalidContract { .. })
        ));

        let mut bad = position(expiry);
        bad.multiplier = -100.0;
        assert!(PricedPosition::enrich(bad, &market()).is_err());
    }

    #[test]
    fn reprice_matches_direct_model() {
        let expiry = Date::from_ymd(2021, 6, 18).unwrap();
        let priced = PricedPosition::enrich(position(expiry), &market()).unwrap();

        let shifted_spot = 3450.0;
        let vol_scale = 1.1;
        let decay = 1.0 / 365.0;

        let value = priced.reprice(shifted_spot, vol_scale, decay).unwrap();

        let model = BlackScholes::new(
            shifted_spot,
            priced.zero_rate(),
            0.02,
            priced.implied_vol() * vol_scale,
        )
        .unwrap();
        let unit = model
            .price(
                OptionType::Call,
                3600.0,
                priced.time_to_expiry() - decay,
            )
            .unwrap();
        assert_relative_eq!(value, 2.0 * 100.0 * unit, epsilon = 1e-10);
    }

    #[test]
    fn reprice_rejects_decay_past_expiry() {
        let expiry = Date::from_ymd(2021, 3, 3).unwrap();
        let priced = PricedPosition::enrich(position(expiry), &market()).unwrap();
        assert!(matches!(
            priced.reprice(3500.0, 1.0, 5.0 / 365.0),
            Err(PositionError::Expired { .. })
        ));
    }

    #[test]
    fn reprice_rejects_collapsed_volatility() {
        let expiry = Date::from_ymd(2021, 6, 18).unwrap();
        let priced = PricedPosition::enrich(position(expiry), &market()).unwrap();
        assert!(matches!(
            priced.reprice(3500.0, 0.0, 0.0),
            Err(PositionError::Analytical(_))
        ));
    }
}
