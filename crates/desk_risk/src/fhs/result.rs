//! Simulation run results.

/// Outcome of one FHS run: the P&L distribution and its tail measures.
///
/// Losses are reported as positive magnitudes. The raw P&L vector is kept
/// for diagnostic reporting (histograms, backtests) by downstream
/// consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pnl: Vec<f64>,
    value_at_risk: f64,
    expected_shortfall: f64,
    alpha: f64,
    requested: usize,
    discarded: usize,
}

impl SimulationOutcome {
    pub(crate) fn new(
        pnl: Vec<f64>,
        value_at_risk: f64,
        expected_shortfall: f64,
        alpha: f64,
        requested: usize,
        discarded: usize,
    ) -> Self {
        Self {
            pnl,
            value_at_risk,
            expected_shortfall,
            alpha,
            requested,
            discarded,
        }
    }

    /// Simulated P&L outcomes, one per surviving draw, in draw order.
    #[inline]
    pub fn pnl(&self) -> &[f64] {
        &self.pnl
    }

    /// Loss magnitude at the configured tail probability (positive).
    #[inline]
    pub fn value_at_risk(&self) -> f64 {
        self.value_at_risk
    }

    /// Mean loss beyond the VaR quantile (positive).
    #[inline]
    pub fn expected_shortfall(&self) -> f64 {
        self.expected_shortfall
    }

    /// Tail probability the measures were computed at.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of draws requested.
    #[inline]
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Number of draws discarded for numerical breakdown.
    #[inline]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Fraction of requested draws that were discarded.
    #[inline]
    pub fn discard_rate(&self) -> f64 {
        if self.requested == 0 {
            0.0
        } else {
            self.discarded as f64 / self.requested as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_and_discard_rate() {
        let outcome =
            SimulationOutcome::new(vec![-1.0, 2.0, 0.5], 1.0, 1.2, 0.05, 4, 1);
        assert_eq!(outcome.pnl().len(), 3);
        assert_eq!(outcome.value_at_risk(), 1.0);
        assert_eq!(outcome.expected_shortfall(), 1.2);
        assert_eq!(outcome.alpha(), 0.05);
        assert_eq!(outcome.requested(), 4);
        assert_eq!(outcome.discarded(), 1);
        assert!((outcome.discard_rate() - 0.25).abs() < 1e-15);
    }
}
