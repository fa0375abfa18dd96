//! Price and log-return series.

use serde::{Deserialize, Serialize};

use crate::error::{JumpError, Result};

/// An ordered sequence of positive prices.
///
/// Always holds at least [`PriceSeries::MIN_LEN`] finite, strictly positive
/// values. The series cannot be modified after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Minimum number of prices in a series.
    pub const MIN_LEN: usize = 3;

    /// Create a price series, validating length and values.
    pub fn new(prices: Vec<f64>) -> Result<Self> {
        if prices.len() < Self::MIN_LEN {
            return Err(JumpError::InsufficientData {
                required: Self::MIN_LEN,
                got: prices.len(),
            });
        }
        if let Some((index, price)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(JumpError::invalid(
                "prices",
                format!("price at index {} must be finite and positive, got {}", index, price),
            ));
        }
        Ok(Self { prices })
    }

    /// Build the window for one session: the prior session's closes
    /// followed by the next session's opening price.
    pub fn join(prior_closes: &[f64], next_open: f64) -> Result<Self> {
        let mut prices = Vec::with_capacity(prior_closes.len() + 1);
        prices.extend_from_slice(prior_closes);
        prices.push(next_open);
        Self::new(prices)
    }

    /// Raw prices.
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Number of prices.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Natural-log prices.
    pub fn log_prices(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.ln()).collect()
    }

    /// Log-returns derived from this series.
    pub fn log_returns(&self) -> LogReturnSeries {
        LogReturnSeries::from(self)
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = JumpError;

    fn try_from(prices: Vec<f64>) -> Result<Self> {
        Self::new(prices)
    }
}

impl From<PriceSeries> for Vec<f64> {
    fn from(series: PriceSeries) -> Self {
        series.prices
    }
}

/// Log-returns of a [`PriceSeries`].
///
/// Element `i` is `ln(p[i + 1]) - ln(p[i])`; the length is always one less
/// than the source series. Only constructible from a `PriceSeries`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogReturnSeries {
    returns: Vec<f64>,
}

impl LogReturnSeries {
    /// The returns as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.returns
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// True when there are no returns (never the case for a valid series).
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}

impl From<&PriceSeries> for LogReturnSeries {
    fn from(series: &PriceSeries) -> Self {
        let returns = series
            .prices
            .windows(2)
            .map(|w| w[1].ln() - w[0].ln())
            .collect();
        Self { returns }
    }
}
