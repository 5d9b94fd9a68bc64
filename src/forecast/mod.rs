//! Structural forecasting: piecewise-linear trend, Fourier seasonality,
//! simulated uncertainty bands.

mod changepoints;
mod fourier;
mod structural;

pub use changepoints::{changepoint_basis, changepoint_grid, piecewise_linear};
pub use fourier::fourier_features;
pub use structural::{forecast, ForecastResult, StructuralModel};
