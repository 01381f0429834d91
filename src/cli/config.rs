//! CLI configuration bridging CLI arguments to domain types.
//!
//! Command handlers work with a validated `ScanConfig`, never with raw
//! argument strings.

use super::ScanArgs;
use crate::discovery::ScanConfig;
use crate::market::Interval;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when parsing scan arguments.
#[derive(Debug, Error, PartialEq)]
pub enum CliConfigError {
    #[error("Invalid interval: '{0}'. Expected one of 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d, 3d, 1w, 1M")]
    InvalidInterval(String),

    #[error("Invalid {field}: '{value}'. Expected format: YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, CliConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CliConfigError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

impl ScanArgs {
    /// Build and validate the scan configuration.
    ///
    /// An `end_date` of `now` (or empty) leaves the window open-ended.
    pub fn to_config(&self, depth_limit: usize) -> Result<ScanConfig, CliConfigError> {
        let interval: Interval = self
            .interval
            .parse()
            .map_err(|_| CliConfigError::InvalidInterval(self.interval.clone()))?;

        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = match self.end_date.trim() {
            "" | "now" => None,
            raw => Some(parse_date("end_date", raw)?),
        };

        let config = ScanConfig {
            band_low: self.band_low,
            band_high: self.band_high,
            max_lag: self.max_lag,
            interval,
            start_date,
            end_date,
            depth_limit,
            workers: self.workers,
        };
        config.validate().map_err(CliConfigError::Invalid)?;
        Ok(config)
    }
}
