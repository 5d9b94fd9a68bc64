//! Classical additive seasonal decomposition.

mod classical;
mod moving_average;

pub use classical::{ClassicalDecomposition, Decomposition};
pub use moving_average::centered_moving_average;
