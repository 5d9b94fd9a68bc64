//! # tidecast
//!
//! Temporal analysis for monthly environmental observations: classical
//! additive decomposition and structural forecasting over series selected
//! from tabular `(timestamp, region, parameter, value)` records.
//!
//! The two analyses are independent and share only the [`core::TimeSeries`]
//! input type:
//!
//! - [`decompose::ClassicalDecomposition`] splits a series into trend,
//!   seasonal, and residual components using a centered moving average.
//! - [`forecast::StructuralModel`] fits a piecewise-linear trend with
//!   Fourier seasonality and projects it forward with a widening
//!   uncertainty band.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tidecast::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let values: Vec<f64> = (0..36)
//!     .map(|i| 26.0 + 0.02 * i as f64
//!         + (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
//!     .collect();
//! let series = TimeSeries::monthly(start, values).unwrap();
//!
//! let parts = ClassicalDecomposition::new(12).decompose(&series).unwrap();
//! assert_eq!(parts.seasonal().len(), 36);
//!
//! let result = forecast(&series, 12).unwrap();
//! assert_eq!(result.horizon(), 12);
//! ```

pub mod core;
pub mod decompose;
pub mod error;
pub mod forecast;
pub mod utils;

pub use error::{Result, TidecastError};

/// Common imports for working with the library.
pub mod prelude {
    pub use crate::core::{Row, SeriesTable, TimeSeries};
    pub use crate::decompose::{ClassicalDecomposition, Decomposition};
    pub use crate::error::{Result, TidecastError};
    pub use crate::forecast::{forecast, ForecastResult, StructuralModel};
}
