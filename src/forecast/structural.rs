//! Additive structural forecasting model.
//!
//! Fits `y(t) = trend(t) + seasonal(t) + noise` where the trend is
//! piecewise linear with automatically placed changepoints and the
//! seasonal component is a truncated Fourier series on a 12-month period.
//! Fitting is one batch ridge-regularized least squares over the full
//! history; there is no online update. Prediction extends the monthly grid
//! and attaches a symmetric uncertainty band whose width grows with
//! distance into the horizon.

use crate::core::TimeSeries;
use crate::error::{Result, TidecastError};
use crate::forecast::changepoints::{changepoint_basis, changepoint_grid, piecewise_linear};
use crate::forecast::fourier::fourier_features;
use crate::utils::linalg::ridge_solve;
use crate::utils::stats::{quantile, quantile_normal, variance};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seasonal period of the fitted periodic component, in samples.
const SEASONAL_PERIOD: f64 = 12.0;

/// Minimum history: two full yearly cycles.
const MIN_HISTORY: usize = 24;

/// Ridge penalty applied to the whole design matrix.
const RIDGE_LAMBDA: f64 = 1e-4;

/// A forecast over the fitted history and a future horizon.
///
/// Holds the historical `(timestamp, actual)` pairs plus aligned
/// `(timestamp, predicted, lower, upper)` sequences covering history and
/// horizon. `lower[i] <= predicted[i] <= upper[i]` holds at every index;
/// over the horizon the band width is monotone non-decreasing.
#[derive(Debug, Clone)]
pub struct ForecastResult {
    timestamps: Vec<NaiveDate>,
    actuals: Vec<f64>,
    predicted: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ForecastResult {
    /// Timestamps for history and horizon, one monthly grid.
    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// Observed history values (length [`Self::history_len`]).
    pub fn actuals(&self) -> &[f64] {
        &self.actuals
    }

    /// Fitted (in-sample) and forecast (out-of-sample) point values.
    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    /// Lower uncertainty bounds, aligned with [`Self::predicted`].
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper uncertainty bounds, aligned with [`Self::predicted`].
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of historical points.
    pub fn history_len(&self) -> usize {
        self.actuals.len()
    }

    /// Number of forecast steps beyond the history.
    pub fn horizon(&self) -> usize {
        self.predicted.len() - self.actuals.len()
    }

    /// Point forecasts over the horizon only.
    pub fn forecast_predicted(&self) -> &[f64] {
        &self.predicted[self.history_len()..]
    }

    /// Band widths (`upper - lower`) over the horizon only.
    pub fn forecast_widths(&self) -> Vec<f64> {
        let n = self.history_len();
        self.upper[n..]
            .iter()
            .zip(self.lower[n..].iter())
            .map(|(u, l)| u - l)
            .collect()
    }
}

#[derive(Debug, Clone)]
struct FittedState {
    history: TimeSeries,
    k: f64,
    m: f64,
    delta: Vec<f64>,
    changepoints: Vec<f64>,
    beta: Vec<f64>,
    sigma: f64,
    fitted: Vec<f64>,
    residuals: Vec<f64>,
}

/// Structural forecaster with piecewise-linear trend and Fourier
/// seasonality.
///
/// All knobs are defaulted; there is no model selection. The model is
/// stateless across calls apart from the fitted parameters: `fit` replaces
/// any previous state and `predict` allocates its own working arrays, so
/// distinct instances may run concurrently without coordination.
#[derive(Debug, Clone)]
pub struct StructuralModel {
    n_changepoints: usize,
    changepoint_range: f64,
    fourier_order: usize,
    interval_level: f64,
    n_simulations: usize,
    seed: u64,
    state: Option<FittedState>,
}

impl Default for StructuralModel {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralModel {
    pub fn new() -> Self {
        Self {
            n_changepoints: 10,
            changepoint_range: 0.8,
            fourier_order: 3,
            interval_level: 0.8,
            n_simulations: 500,
            seed: 42,
            state: None,
        }
    }

    /// Number of candidate changepoints on the trend grid.
    pub fn with_changepoints(mut self, n: usize) -> Self {
        self.n_changepoints = n;
        self
    }

    /// Share of the history over which changepoints are placed.
    pub fn with_changepoint_range(mut self, range: f64) -> Self {
        self.changepoint_range = range.clamp(0.0, 1.0);
        self
    }

    /// Number of Fourier harmonics in the seasonal component.
    pub fn with_fourier_order(mut self, order: usize) -> Self {
        self.fourier_order = order;
        self
    }

    /// Nominal coverage of the uncertainty band, in (0, 1).
    pub fn with_interval_level(mut self, level: f64) -> Self {
        self.interval_level = level.clamp(0.01, 0.99);
        self
    }

    /// Number of simulated trend trajectories for the horizon band.
    pub fn with_simulations(mut self, n: usize) -> Self {
        self.n_simulations = n.max(1);
        self
    }

    /// Seed for the trajectory simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Base growth rate of the fitted trend.
    pub fn growth_rate(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.k)
    }

    /// Trend offset at the start of the history.
    pub fn offset(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.m)
    }

    /// Growth-rate shifts at the fitted changepoints.
    pub fn rate_shifts(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.delta.as_slice())
    }

    /// Residual standard deviation of the fit.
    pub fn sigma(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.sigma)
    }

    /// In-sample fitted values.
    pub fn fitted_values(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.fitted.as_slice())
    }

    /// In-sample residuals (actual - fitted).
    pub fn residuals(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.residuals.as_slice())
    }

    /// Fit the model to the full history in one batch solve.
    ///
    /// Fails with [`TidecastError::InsufficientData`] when the series does
    /// not cover two full yearly cycles, and with
    /// [`TidecastError::ModelFit`] when the series is degenerate or the
    /// solve produces non-finite parameters. No partial state survives a
    /// failed fit.
    pub fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        self.state = None;

        let y = series.values();
        let n = y.len();
        if n < MIN_HISTORY {
            return Err(TidecastError::InsufficientData {
                needed: MIN_HISTORY,
                got: n,
            });
        }
        let var = variance(y);
        if !var.is_finite() || var < 1e-12 {
            return Err(TidecastError::ModelFit(
                "degenerate series: variance is zero".to_string(),
            ));
        }

        // Normalized trend time in [0, 1]; raw sample index for seasonality.
        let t: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        let t_months: Vec<f64> = (0..n).map(|i| i as f64).collect();

        let changepoints = changepoint_grid(n, self.n_changepoints, self.changepoint_range);
        let hinges = changepoint_basis(&t, &changepoints);
        let seasonal = fourier_features(&t_months, SEASONAL_PERIOD, self.fourier_order);

        // Design matrix: intercept, slope, hinge columns, Fourier columns.
        let design: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let mut row = Vec::with_capacity(2 + changepoints.len() + 2 * self.fourier_order);
                row.push(1.0);
                row.push(t[i]);
                row.extend_from_slice(&hinges[i]);
                row.extend_from_slice(&seasonal[i]);
                row
            })
            .collect();

        let coef = ridge_solve(&design, y, RIDGE_LAMBDA).ok_or_else(|| {
            TidecastError::ModelFit("normal equations are singular".to_string())
        })?;
        if coef.iter().any(|c| !c.is_finite()) {
            return Err(TidecastError::ModelFit(
                "solver produced non-finite parameters".to_string(),
            ));
        }

        let m = coef[0];
        let k = coef[1];
        let delta = coef[2..2 + changepoints.len()].to_vec();
        let beta = coef[2 + changepoints.len()..].to_vec();

        let fitted: Vec<f64> = design
            .iter()
            .map(|row| row.iter().zip(coef.iter()).map(|(x, c)| x * c).sum())
            .collect();
        let residuals: Vec<f64> = y.iter().zip(fitted.iter()).map(|(a, f)| a - f).collect();
        let sigma = (residuals.iter().map(|r| r * r).sum::<f64>() / n as f64).sqrt();
        if !sigma.is_finite() {
            return Err(TidecastError::ModelFit(
                "residual scale is non-finite".to_string(),
            ));
        }

        self.state = Some(FittedState {
            history: series.clone(),
            k,
            m,
            delta,
            changepoints,
            beta,
            sigma,
            fitted,
            residuals,
        });
        Ok(())
    }

    /// Forecast `horizon_months` steps beyond the fitted history.
    ///
    /// Fails with [`TidecastError::InvalidInput`] when the horizon is zero
    /// or the model has not been fitted.
    pub fn predict(&self, horizon_months: usize) -> Result<ForecastResult> {
        let state = self.state.as_ref().ok_or_else(|| {
            TidecastError::InvalidInput("model must be fitted before prediction".to_string())
        })?;
        if horizon_months == 0 {
            return Err(TidecastError::InvalidInput(
                "horizon must be positive".to_string(),
            ));
        }

        let n = state.history.len();
        let total = n + horizon_months;
        let denom = (n - 1) as f64;

        let t_full: Vec<f64> = (0..total).map(|i| i as f64 / denom).collect();
        let t_months: Vec<f64> = (0..total).map(|i| i as f64).collect();

        let trend = piecewise_linear(state.k, state.m, &state.delta, &t_full, &state.changepoints);
        let seasonal_features = fourier_features(&t_months, SEASONAL_PERIOD, self.fourier_order);
        let predicted: Vec<f64> = trend
            .iter()
            .zip(seasonal_features.iter())
            .map(|(tr, row)| {
                tr + row
                    .iter()
                    .zip(state.beta.iter())
                    .map(|(x, b)| x * b)
                    .sum::<f64>()
            })
            .collect();

        let z = quantile_normal((1.0 + self.interval_level) / 2.0);
        let base_half = z * state.sigma;

        let future_half = self.simulate_half_widths(state, horizon_months, base_half);

        let mut lower = Vec::with_capacity(total);
        let mut upper = Vec::with_capacity(total);
        for (i, &p) in predicted.iter().enumerate() {
            let half = if i < n { base_half } else { future_half[i - n] };
            lower.push(p - half);
            upper.push(p + half);
        }

        let mut timestamps = state.history.timestamps().to_vec();
        timestamps.extend(state.history.future_timestamps(horizon_months));

        Ok(ForecastResult {
            timestamps,
            actuals: state.history.values().to_vec(),
            predicted,
            lower,
            upper,
        })
    }

    /// Half-widths of the horizon band from simulated trend trajectories.
    ///
    /// Each trajectory perturbs the growth rate with Laplace-distributed
    /// shifts at randomly occurring future changepoints (scale matched to
    /// the fitted rate shifts) plus observation noise; the per-step spread
    /// is the empirical `interval_level` quantile of absolute deviations.
    /// A running maximum keeps the width monotone non-decreasing and the
    /// in-sample band is the floor, so the band can never pinch below the
    /// noise level. Each trajectory re-seeds deterministically, which makes
    /// the per-step spreads independent of the requested horizon length.
    fn simulate_half_widths(
        &self,
        state: &FittedState,
        horizon: usize,
        base_half: f64,
    ) -> Vec<f64> {
        let n = state.history.len();
        let dt = 1.0 / (n - 1) as f64;
        let cp_prob = (state.changepoints.len() as f64 / n as f64).min(1.0);
        let rate_scale = if state.delta.is_empty() {
            0.0
        } else {
            state.delta.iter().map(|d| d.abs()).sum::<f64>() / state.delta.len() as f64
        };

        let mut deviations: Vec<Vec<f64>> = vec![Vec::with_capacity(self.n_simulations); horizon];
        for sim in 0..self.n_simulations {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(sim as u64));
            let mut slope_dev = 0.0;
            let mut trend_dev = 0.0;
            for step in deviations.iter_mut() {
                if rng.gen::<f64>() < cp_prob {
                    slope_dev += sample_laplace(&mut rng, rate_scale);
                }
                trend_dev += slope_dev * dt;
                let noise = sample_normal(&mut rng, state.sigma);
                step.push((trend_dev + noise).abs());
            }
        }

        let mut half_widths = Vec::with_capacity(horizon);
        let mut running_max = base_half;
        for step in &deviations {
            let spread = quantile(step, self.interval_level);
            let half = if spread.is_finite() { spread } else { 0.0 };
            running_max = running_max.max(half);
            half_widths.push(running_max);
        }
        half_widths
    }
}

/// Fit the default structural model and forecast `horizon_months` ahead.
pub fn forecast(series: &TimeSeries, horizon_months: usize) -> Result<ForecastResult> {
    if horizon_months == 0 {
        return Err(TidecastError::InvalidInput(
            "horizon must be positive".to_string(),
        ));
    }
    let mut model = StructuralModel::new();
    model.fit(series)?;
    model.predict(horizon_months)
}

fn sample_normal(rng: &mut StdRng, std: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-12);
    let u2: f64 = rng.gen();
    std * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn sample_laplace(rng: &mut StdRng, scale: f64) -> f64 {
    let u: f64 = rng.gen::<f64>() - 0.5;
    -scale * u.signum() * (1.0 - 2.0 * u.abs()).max(1e-12).ln()
}
