//! Market Data Abstraction Layer
//!
//! The scanner only talks to the venue through [`MarketDataSource`]. Any
//! client (REST, recorded snapshots, test fixtures) can be plugged in by
//! implementing the trait; retry and rate-limit policy belong to the
//! implementation, not to the scanner.

pub mod file_source;
pub mod memory;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub use crate::types::{OrderBookSnapshot, PriceSeries, TickerStats};
pub use file_source::FileMarketData;
pub use memory::InMemoryMarketData;

/// The venue could not supply the requested data.
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Venue returned nothing usable for the instrument
    #[error("no data available for {instrument}: {reason}")]
    Unavailable { instrument: String, reason: String },

    /// Backing storage could not be read
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload did not match the expected shape
    #[error("malformed market data in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl MarketDataError {
    pub fn unavailable(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }
}

/// Candle interval, labelled the way spot venues label klines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinute,
    #[serde(rename = "5m")]
    FiveMinute,
    #[serde(rename = "15m")]
    FifteenMinute,
    #[serde(rename = "30m")]
    ThirtyMinute,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHour,
    #[serde(rename = "4h")]
    FourHour,
    #[serde(rename = "6h")]
    SixHour,
    #[serde(rename = "8h")]
    EightHour,
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::ThreeMinute => "3m",
            Interval::FiveMinute => "5m",
            Interval::FifteenMinute => "15m",
            Interval::ThirtyMinute => "30m",
            Interval::OneHour => "1h",
            Interval::TwoHour => "2h",
            Interval::FourHour => "4h",
            Interval::SixHour => "6h",
            Interval::EightHour => "8h",
            Interval::TwelveHour => "12h",
            Interval::OneDay => "1d",
            Interval::ThreeDay => "3d",
            Interval::OneWeek => "1w",
            Interval::OneMonth => "1M",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Interval {
    type Err = String;

    // Case matters: "1m" is one minute, "1M" is one month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1m" => Ok(Interval::OneMinute),
            "3m" => Ok(Interval::ThreeMinute),
            "5m" => Ok(Interval::FiveMinute),
            "15m" => Ok(Interval::FifteenMinute),
            "30m" => Ok(Interval::ThirtyMinute),
            "1h" => Ok(Interval::OneHour),
            "2h" => Ok(Interval::TwoHour),
            "4h" => Ok(Interval::FourHour),
            "6h" => Ok(Interval::SixHour),
            "8h" => Ok(Interval::EightHour),
            "12h" => Ok(Interval::TwelveHour),
            "1d" => Ok(Interval::OneDay),
            "3d" => Ok(Interval::ThreeDay),
            "1w" => Ok(Interval::OneWeek),
            "1M" => Ok(Interval::OneMonth),
            other => Err(format!(
                "Unknown interval: '{}'. Expected one of 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d, 3d, 1w, 1M",
                other
            )),
        }
    }
}

/// Errors raised while building a [`DateRange`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    Malformed(String),

    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// Inclusive candle window. An open end means "up to now".
///
/// Both bounds are midnight UTC of the given day, so a candle belongs to the
/// range when `start <= open_time <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, DateRangeError> {
        if let Some(end) = end {
            if start > end {
                return Err(DateRangeError::Inverted { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, DateRangeError> {
        let start = parse_date(start)?;
        let end = end.map(parse_date).transpose()?;
        Self::new(start, end)
    }

    pub fn start_millis(&self) -> i64 {
        midnight_millis(self.start)
    }

    pub fn end_millis(&self) -> Option<i64> {
        self.end.map(midnight_millis)
    }

    pub fn contains(&self, open_time_ms: i64) -> bool {
        open_time_ms >= self.start_millis()
            && self.end_millis().map_or(true, |end| open_time_ms <= end)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DateRangeError::Malformed(raw.to_string()))
}

fn midnight_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Synchronous market-data collaborator consumed by the scanner.
///
/// Implementations are constructed once at the process boundary and passed
/// in explicitly; they must be shareable across worker threads.
#[cfg_attr(test, mockall::automock)]
pub trait MarketDataSource: Send + Sync {
    /// Every tradable instrument on the venue, in venue order
    fn list_instruments(&self) -> Result<Vec<String>, MarketDataError>;

    /// Order book limited to `depth` levels per side
    fn fetch_order_book(
        &self,
        instrument: &str,
        depth: usize,
    ) -> Result<OrderBookSnapshot, MarketDataError>;

    /// Rolling 24h statistics
    fn fetch_24h_stats(&self, instrument: &str) -> Result<TickerStats, MarketDataError>;

    /// Close prices for `interval` candles opening inside `range`, oldest first
    fn fetch_candles(
        &self,
        instrument: &str,
        interval: Interval,
        range: &DateRange,
    ) -> Result<PriceSeries, MarketDataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_str() {
        assert_eq!("1d".parse::<Interval>().unwrap(), Interval::OneDay);
        assert_eq!("15m".parse::<Interval>().unwrap(), Interval::FifteenMinute);
        assert_eq!("1M".parse::<Interval>().unwrap(), Interval::OneMonth);
        assert_eq!("1m".parse::<Interval>().unwrap(), Interval::OneMinute);
        assert!("2d".parse::<Interval>().is_err());
    }

    #[test]
    fn test_interval_display_matches_label() {
        for label in ["1m", "4h", "1d", "1w", "1M"] {
            assert_eq!(label.parse::<Interval>().unwrap().to_string(), label);
        }
    }

    #[test]
    fn test_date_range_parse() {
        let range = DateRange::parse("2023-01-01", Some("2023-12-31")).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(range.start_millis(), 1_672_531_200_000);
        assert!(range.contains(1_672_531_200_000));
        assert!(!range.contains(1_672_531_199_999));
    }

    #[test]
    fn test_date_range_open_end() {
        let range = DateRange::parse("2023-01-01", None).unwrap();
        assert!(range.end_millis().is_none());
        assert!(range.contains(i64::MAX));
    }

    #[test]
    fn test_date_range_rejects_malformed() {
        assert_eq!(
            DateRange::parse("2023/01/01", None),
            Err(DateRangeError::Malformed("2023/01/01".to_string()))
        );
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        assert!(matches!(
            DateRange::parse("2024-01-01", Some("2023-01-01")),
            Err(DateRangeError::Inverted { .. })
        ));
    }
}
