//! Core data structures shared by the decomposition and forecasting
//! components.

mod table;
mod time_series;

pub use table::{Row, SeriesTable};
pub use time_series::TimeSeries;
