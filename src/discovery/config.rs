//! Configuration for the pair scan

use super::error::ScanError;
use super::filter::LiquidityBand;
use crate::market::{DateRange, Interval};
use crate::math::hurst::{DEFAULT_MAX_LAG, MIN_MAX_LAG};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Configuration for the screening pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Exclusive lower bound of the liquidity band
    #[serde(default = "default_band_low")]
    pub band_low: f64,

    /// Exclusive upper bound of the liquidity band
    #[serde(default = "default_band_high")]
    pub band_high: f64,

    /// Upper bound (exclusive) of the lags fed to the Hurst regression
    #[serde(default = "default_max_lag")]
    pub max_lag: usize,

    /// Candle interval for the historical fetch
    #[serde(default = "default_interval")]
    pub interval: Interval,

    /// First day of the historical window
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last day of the historical window (None = up to now)
    #[serde(default = "default_end_date")]
    pub end_date: Option<NaiveDate>,

    /// Order-book levels per side used for liquidity
    #[serde(default = "default_depth_limit")]
    pub depth_limit: usize,

    /// Pairs estimated in parallel (1 = sequential)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

// Default value functions for serde
fn default_band_low() -> f64 {
    50.0
}
fn default_band_high() -> f64 {
    100.0
}
fn default_max_lag() -> usize {
    DEFAULT_MAX_LAG
}
fn default_interval() -> Interval {
    Interval::OneDay
}
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}
fn default_end_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2023, 12, 31)
}
fn default_depth_limit() -> usize {
    10
}
fn default_workers() -> usize {
    1
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            band_low: default_band_low(),
            band_high: default_band_high(),
            max_lag: default_max_lag(),
            interval: default_interval(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            depth_limit: default_depth_limit(),
            workers: default_workers(),
        }
    }
}

/// Validated parameters shared by every pair of a scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    pub interval: Interval,
    pub range: DateRange,
    pub max_lag: usize,
}

impl ScanConfig {
    /// Validate configuration, naming the offending field on failure
    pub fn validate(&self) -> Result<(), String> {
        if !self.band_low.is_finite() || !self.band_high.is_finite() {
            return Err(format!(
                "liquidity band must be finite, got ({}, {})",
                self.band_low, self.band_high
            ));
        }
        if self.band_low >= self.band_high {
            return Err(format!(
                "band_low must be below band_high, got ({}, {})",
                self.band_low, self.band_high
            ));
        }
        if self.max_lag < MIN_MAX_LAG {
            return Err(format!(
                "max_lag must be at least {}, got {}",
                MIN_MAX_LAG, self.max_lag
            ));
        }
        if self.depth_limit == 0 {
            return Err("depth_limit must be at least 1".to_string());
        }
        if self.workers == 0 {
            return Err("workers must be at least 1".to_string());
        }
        if let Some(end) = self.end_date {
            if self.start_date > end {
                return Err(format!(
                    "start_date {} is after end_date {}",
                    self.start_date, end
                ));
            }
        }
        Ok(())
    }

    pub fn band(&self) -> LiquidityBand {
        LiquidityBand::new(self.band_low, self.band_high)
    }

    /// Validate and derive the per-pair fetch/estimate parameters
    pub fn window(&self) -> Result<ScanWindow, ScanError> {
        self.validate().map_err(ScanError::InvalidConfig)?;
        Ok(ScanWindow {
            interval: self.interval,
            range: DateRange::new(self.start_date, self.end_date)?,
            max_lag: self.max_lag,
        })
    }
}
