//! Classical additive decomposition into trend, seasonal, and residual.
//!
//! The scheme is deterministic and parameter-free beyond the seasonal
//! period: trend from a centered moving average, seasonal indices from
//! cycle-position averages of the detrended series, residual as what
//! remains. Trend and residual are undefined at the series edges and are
//! reported as `None`, never as zero or an extrapolation.

use crate::core::TimeSeries;
use crate::decompose::moving_average::centered_moving_average;
use crate::error::{Result, TidecastError};
use crate::utils::stats::variance;
use chrono::NaiveDate;

/// Result of a classical additive decomposition.
///
/// All four component sequences are aligned on the same timestamp index and
/// satisfy `observed[i] == trend[i] + seasonal[i] + residual[i]` at every
/// index where `trend[i]` is defined.
#[derive(Debug, Clone)]
pub struct Decomposition {
    timestamps: Vec<NaiveDate>,
    observed: Vec<f64>,
    trend: Vec<Option<f64>>,
    seasonal: Vec<f64>,
    residual: Vec<Option<f64>>,
    seasonal_indices: Vec<f64>,
}

impl Decomposition {
    /// Timestamps shared by all four components.
    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// The input series values.
    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    /// Centered-moving-average trend; `None` at the series edges.
    pub fn trend(&self) -> &[Option<f64>] {
        &self.trend
    }

    /// Seasonal component, tiled over the full series length.
    pub fn seasonal(&self) -> &[f64] {
        &self.seasonal
    }

    /// Residual component; `None` wherever the trend is undefined.
    pub fn residual(&self) -> &[Option<f64>] {
        &self.residual
    }

    /// The period-length seasonal pattern; its values sum to zero.
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal_indices
    }

    /// Strength of the seasonal component in [0, 1], computed over the
    /// indices where the residual is defined.
    pub fn seasonal_strength(&self) -> f64 {
        let (residual, seasonal): (Vec<f64>, Vec<f64>) = self
            .residual
            .iter()
            .zip(self.seasonal.iter())
            .filter_map(|(r, s)| r.map(|r| (r, *s)))
            .unzip();
        component_strength(&residual, &seasonal)
    }

    /// Strength of the trend component in [0, 1], computed over the indices
    /// where both trend and residual are defined.
    pub fn trend_strength(&self) -> f64 {
        let (residual, trend): (Vec<f64>, Vec<f64>) = self
            .residual
            .iter()
            .zip(self.trend.iter())
            .filter_map(|(r, t)| match (r, t) {
                (Some(r), Some(t)) => Some((*r, *t)),
                _ => None,
            })
            .unzip();
        component_strength(&residual, &trend)
    }
}

/// 1 - var(residual) / var(component + residual), clamped to [0, 1].
fn component_strength(residual: &[f64], component: &[f64]) -> f64 {
    let combined: Vec<f64> = component
        .iter()
        .zip(residual.iter())
        .map(|(c, r)| c + r)
        .collect();
    let var_combined = variance(&combined);
    if !var_combined.is_finite() || var_combined < 1e-10 {
        return 0.0;
    }
    (1.0 - variance(residual) / var_combined).clamp(0.0, 1.0)
}

/// Classical additive decomposer for a fixed seasonal period.
#[derive(Debug, Clone, Copy)]
pub struct ClassicalDecomposition {
    period: usize,
}

impl ClassicalDecomposition {
    /// Create a decomposer for the given seasonal period (12 for monthly
    /// data with yearly seasonality).
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// The configured seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Decompose `series` into trend + seasonal + residual.
    ///
    /// Fails eagerly when the period is smaller than 2 or the series does
    /// not cover two full seasonal cycles.
    pub fn decompose(&self, series: &TimeSeries) -> Result<Decomposition> {
        let period = self.period;
        if period < 2 {
            return Err(TidecastError::InvalidInput(format!(
                "seasonal period must be at least 2, got {period}"
            )));
        }
        let n = series.len();
        if n < 2 * period {
            return Err(TidecastError::InsufficientData {
                needed: 2 * period,
                got: n,
            });
        }

        let observed = series.values().to_vec();
        let trend = centered_moving_average(&observed, period);

        let detrended: Vec<Option<f64>> = observed
            .iter()
            .zip(trend.iter())
            .map(|(y, t)| t.map(|t| y - t))
            .collect();

        // Average detrended values by cycle position, then normalize the
        // period indices to sum to zero (additive model).
        let mut sums = vec![0.0; period];
        let mut counts = vec![0usize; period];
        for (i, d) in detrended.iter().enumerate() {
            if let Some(d) = d {
                sums[i % period] += d;
                counts[i % period] += 1;
            }
        }
        let mut seasonal_indices: Vec<f64> = sums
            .iter()
            .zip(counts.iter())
            .map(|(s, c)| if *c > 0 { s / *c as f64 } else { 0.0 })
            .collect();
        let mean_index = seasonal_indices.iter().sum::<f64>() / period as f64;
        for s in seasonal_indices.iter_mut() {
            *s -= mean_index;
        }

        let seasonal: Vec<f64> = (0..n).map(|i| seasonal_indices[i % period]).collect();

        let residual: Vec<Option<f64>> = observed
            .iter()
            .zip(trend.iter())
            .zip(seasonal.iter())
            .map(|((y, t), s)| t.map(|t| y - t - s))
            .collect();

        Ok(Decomposition {
            timestamps: series.timestamps().to_vec(),
            observed,
            trend,
            seasonal,
            residual,
            seasonal_indices,
        })
    }
}
