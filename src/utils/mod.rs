//! Numeric utilities shared by the analysis components.

pub mod linalg;
pub mod stats;

pub use linalg::ridge_solve;
pub use stats::{mean, quantile, quantile_normal, std_dev, variance};
