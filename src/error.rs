//! Error types for the tidecast library.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, TidecastError>;

/// Errors that can occur during decomposition, forecasting, or selection.
///
/// All variants are terminal for the single analysis request that raised
/// them; none is retryable and no partial result is ever returned alongside
/// an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TidecastError {
    /// Series too short for the requested period or horizon.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Input rejected before any computation (non-uniform spacing,
    /// non-finite values, zero horizon, bad period, predict before fit).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The selector found no rows for the requested key.
    #[error("empty selection: no rows match region '{region}' and parameter '{parameter}'")]
    EmptySelection { region: String, parameter: String },

    /// The forecasting fit did not converge or produced non-finite
    /// parameters.
    #[error("model fit failed: {0}")]
    ModelFit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = TidecastError::InsufficientData { needed: 24, got: 10 };
        assert_eq!(err.to_string(), "insufficient data: need at least 24, got 10");

        let err = TidecastError::InvalidInput("horizon must be positive".to_string());
        assert_eq!(err.to_string(), "invalid input: horizon must be positive");

        let err = TidecastError::EmptySelection {
            region: "Bay of Bengal".to_string(),
            parameter: "Salinity".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "empty selection: no rows match region 'Bay of Bengal' and parameter 'Salinity'"
        );

        let err = TidecastError::ModelFit("degenerate series".to_string());
        assert_eq!(err.to_string(), "model fit failed: degenerate series");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = TidecastError::InsufficientData { needed: 24, got: 10 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
