//! TimeSeries data structure for regularly sampled monthly data.

use crate::error::{Result, TidecastError};
use chrono::{Datelike, Months, NaiveDate};

/// A univariate time series sampled at calendar-month intervals.
///
/// Invariants, enforced at construction:
/// - timestamps are strictly increasing with exactly one calendar month
///   between consecutive samples (no gaps),
/// - every value is finite,
/// - the series holds at least two samples.
///
/// Timestamps are normalized to the first day of their month, so callers
/// may pass any day-of-month convention. The series is immutable once
/// constructed; the stricter two-full-cycle length requirements live in the
/// decomposition and forecasting contracts, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from explicit timestamps and values.
    pub fn new(timestamps: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(TidecastError::InvalidInput(format!(
                "timestamps and values differ in length: {} vs {}",
                timestamps.len(),
                values.len()
            )));
        }
        if timestamps.len() < 2 {
            return Err(TidecastError::InsufficientData {
                needed: 2,
                got: timestamps.len(),
            });
        }

        let timestamps: Vec<NaiveDate> = timestamps.iter().map(|d| month_floor(*d)).collect();

        for pair in timestamps.windows(2) {
            let expected = next_month(pair[0]);
            if pair[1] <= pair[0] {
                return Err(TidecastError::InvalidInput(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
            if pair[1] != expected {
                return Err(TidecastError::InvalidInput(format!(
                    "non-uniform spacing: expected {} after {}, got {}",
                    expected, pair[0], pair[1]
                )));
            }
        }

        for (i, v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(TidecastError::InvalidInput(format!(
                    "non-finite value at index {i}"
                )));
            }
        }

        Ok(Self { timestamps, values })
    }

    /// Create a series on a monthly grid starting at `start`.
    pub fn monthly(start: NaiveDate, values: Vec<f64>) -> Result<Self> {
        let start = month_floor(start);
        let timestamps: Vec<NaiveDate> = (0..values.len() as u32)
            .map(|i| start + Months::new(i))
            .collect();
        Self::new(timestamps, values)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series holds no samples. Always false for a constructed
    /// series; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sample timestamps (first of each month).
    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    /// Sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First timestamp.
    pub fn start(&self) -> NaiveDate {
        self.timestamps[0]
    }

    /// Last timestamp.
    pub fn end(&self) -> NaiveDate {
        *self.timestamps.last().expect("series is non-empty")
    }

    /// The `horizon` monthly timestamps that follow the series.
    pub fn future_timestamps(&self, horizon: usize) -> Vec<NaiveDate> {
        let end = self.end();
        (1..=horizon as u32).map(|h| end + Months::new(h)).collect()
    }
}

/// First day of the month containing `d`.
fn month_floor(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).expect("first of month is always valid")
}

fn next_month(d: NaiveDate) -> NaiveDate {
    d + Months::new(1)
}
