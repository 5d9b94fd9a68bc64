//! Multi-series observation table and (region, parameter) selection.

use crate::core::TimeSeries;
use crate::error::{Result, TidecastError};
use chrono::NaiveDate;

/// One observation row in a multi-series table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: NaiveDate,
    pub region: String,
    pub parameter: String,
    pub value: f64,
}

impl Row {
    pub fn new(timestamp: NaiveDate, region: &str, parameter: &str, value: f64) -> Self {
        Self {
            timestamp,
            region: region.to_string(),
            parameter: parameter.to_string(),
            value,
        }
    }
}

/// A table of observations spanning multiple regions and parameters.
///
/// The table is the hand-off point between data providers and the analysis
/// components: `select` narrows it to exactly one (region, parameter)
/// series, sorted by timestamp, and validates it as a [`TimeSeries`].
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
    rows: Vec<Row>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct regions, sorted.
    pub fn regions(&self) -> Vec<String> {
        let mut out: Vec<String> = self.rows.iter().map(|r| r.region.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Distinct parameters, sorted.
    pub fn parameters(&self) -> Vec<String> {
        let mut out: Vec<String> = self.rows.iter().map(|r| r.parameter.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Filter the table down to one (region, parameter) series.
    ///
    /// Matching rows are sorted by timestamp before validation, so callers
    /// may insert rows in any order. Fails with
    /// [`TidecastError::EmptySelection`] when no rows match; series-shape
    /// problems (gaps, duplicates, non-finite values) surface as the
    /// invalid-input errors of [`TimeSeries::new`].
    pub fn select(&self, region: &str, parameter: &str) -> Result<TimeSeries> {
        let mut matched: Vec<&Row> = self
            .rows
            .iter()
            .filter(|r| r.region == region && r.parameter == parameter)
            .collect();

        if matched.is_empty() {
            return Err(TidecastError::EmptySelection {
                region: region.to_string(),
                parameter: parameter.to_string(),
            });
        }

        matched.sort_by_key(|r| r.timestamp);

        let timestamps: Vec<NaiveDate> = matched.iter().map(|r| r.timestamp).collect();
        let values: Vec<f64> = matched.iter().map(|r| r.value).collect();
        TimeSeries::new(timestamps, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn sample_table() -> SeriesTable {
        let mut table = SeriesTable::new();
        for (i, v) in [26.0, 26.5, 27.1].iter().enumerate() {
            table.push(Row::new(
                date(2020, 1 + i as u32),
                "Arabian Sea",
                "Sea Surface Temperature",
                *v,
            ));
        }
        for (i, v) in [35.2, 35.0, 35.1].iter().enumerate() {
            table.push(Row::new(
                date(2020, 1 + i as u32),
                "Arabian Sea",
                "Salinity",
                *v,
            ));
        }
        table
    }

    #[test]
    fn select_filters_one_series() {
        let table = sample_table();
        let ts = table.select("Arabian Sea", "Salinity").unwrap();

        assert_eq!(ts.len(), 3);
        assert_eq!(ts.values(), &[35.2, 35.0, 35.1]);
    }

    #[test]
    fn select_sorts_rows_by_timestamp() {
        let mut table = SeriesTable::new();
        table.push(Row::new(date(2020, 3), "A", "temp", 3.0));
        table.push(Row::new(date(2020, 1), "A", "temp", 1.0));
        table.push(Row::new(date(2020, 2), "A", "temp", 2.0));

        let ts = table.select("A", "temp").unwrap();
        assert_eq!(ts.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn select_known_region_absent_parameter_is_empty_selection() {
        let table = sample_table();
        let result = table.select("Arabian Sea", "Chlorophyll");

        assert_eq!(
            result,
            Err(TidecastError::EmptySelection {
                region: "Arabian Sea".to_string(),
                parameter: "Chlorophyll".to_string(),
            })
        );
    }

    #[test]
    fn select_propagates_series_validation() {
        let mut table = SeriesTable::new();
        table.push(Row::new(date(2020, 1), "A", "temp", 1.0));
        table.push(Row::new(date(2020, 4), "A", "temp", 2.0)); // gap

        let result = table.select("A", "temp");
        assert!(matches!(result, Err(TidecastError::InvalidInput(_))));
    }

    #[test]
    fn regions_and_parameters_are_sorted_and_distinct() {
        let table = sample_table();
        assert_eq!(table.regions(), vec!["Arabian Sea".to_string()]);
        assert_eq!(
            table.parameters(),
            vec![
                "Salinity".to_string(),
                "Sea Surface Temperature".to_string()
            ]
        );
    }
}
