//! The historical standardised-residual pool.

use desk_models::volatility::GarchFactor;

use super::error::FhsError;

/// Paired standardised-residual histories for the two risk factors.
///
/// Residuals are stored pairwise by date so that sampling index `i` draws
/// both factors' shocks from the same day, preserving their contemporaneous
/// dependence, which is the joint bootstrap at the heart of FHS.
#[derive(Debug, Clone)]
pub struct ResidualPool {
    index: Vec<f64>,
    vol: Vec<f64>,
}

impl ResidualPool {
    /// Builds a pool from the two factors' residual series.
    ///
    /// # Errors
    ///
    /// * `FhsError::EmptyPool` - either series is empty
    /// * `FhsError::PoolMismatch` - series lengths differ
    pub fn new(index: Vec<f64>, vol: Vec<f64>) -> Result<Self, FhsError> {
        if index.is_empty() || vol.is_empty() {
            return Err(FhsError::EmptyPool);
        }
        if index.len() != vol.len() {
            return Err(FhsError::PoolMismatch {
                index_len: index.len(),
                vol_len: vol.len(),
            });
        }
        Ok(Self { index, vol })
    }

    /// Builds a pool directly from two fitted factors.
    ///
    /// # Errors
    /// Same conditions as [`new`](Self::new).
    pub fn from_factors(
        index: &GarchFactor<f64>,
        vol: &GarchFactor<f64>,
    ) -> Result<Self, FhsError> {
        Self::new(index.residuals().to_vec(), vol.residuals().to_vec())
    }

    /// Estimation-window length W.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Never true for a constructed pool.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The `i`-th shock pair `(z_index, z_vol)`.
    #[inline]
    pub fn pair(&self, i: usize) -> (f64, f64) {
        (self.index[i], self.vol[i])
    }

    /// Index-factor residuals.
    #[inline]
    pub fn index_residuals(&self) -> &[f64] {
        &self.index
    }

    /// Vol-factor residuals.
    #[inline]
    pub fn vol_residuals(&self) -> &[f64] {
        &self.vol
    }
}
