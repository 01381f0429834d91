//! Directory-backed market data.
//!
//! Reads venue payloads captured to disk:
//!
//! ```text
//! <root>/instruments.json              ["BTCUSDT", "ETHUSDT", ...]
//! <root>/order_books/<ID>.json         {"bids": [[price, qty], ...], "asks": [...]}
//! <root>/tickers/<ID>.json             {"quoteVolume": 123.4}
//! <root>/candles/<ID>_<interval>.json  [{"open_time": 1672531200000, "close": 16625.1}, ...]
//! ```

use super::{DateRange, Interval, MarketDataError, MarketDataSource};
use crate::types::{BookLevel, OrderBookSnapshot, PricePoint, PriceSeries, TickerStats};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct BookFile {
    bids: Vec<BookLevel>,
    asks: Vec<BookLevel>,
}

/// Market data source over a snapshot directory
#[derive(Debug, Clone)]
pub struct FileMarketData {
    root: PathBuf,
}

impl FileMarketData {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_json<T: DeserializeOwned>(&self, instrument: &str, path: PathBuf) -> Result<T, MarketDataError> {
        debug!(path = %path.display(), "Reading market data file");
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MarketDataError::unavailable(
                    instrument,
                    format!("{} not found", path.display()),
                ));
            }
            Err(source) => return Err(MarketDataError::Io { path, source }),
        };
        serde_json::from_str(&raw).map_err(|source| MarketDataError::Malformed { path, source })
    }
}

impl MarketDataSource for FileMarketData {
    fn list_instruments(&self) -> Result<Vec<String>, MarketDataError> {
        self.read_json("*", self.root.join("instruments.json"))
    }

    fn fetch_order_book(
        &self,
        instrument: &str,
        depth: usize,
    ) -> Result<OrderBookSnapshot, MarketDataError> {
        let book: BookFile = self.read_json(
            instrument,
            self.root.join("order_books").join(format!("{}.json", instrument)),
        )?;

        Ok(OrderBookSnapshot {
            instrument: instrument.to_string(),
            bids: book.bids.into_iter().take(depth).collect(),
            asks: book.asks.into_iter().take(depth).collect(),
            depth,
        })
    }

    fn fetch_24h_stats(&self, instrument: &str) -> Result<TickerStats, MarketDataError> {
        self.read_json(
            instrument,
            self.root.join("tickers").join(format!("{}.json", instrument)),
        )
    }

    fn fetch_candles(
        &self,
        instrument: &str,
        interval: Interval,
        range: &DateRange,
    ) -> Result<PriceSeries, MarketDataError> {
        let mut points: Vec<PricePoint> = self.read_json(
            instrument,
            self.root
                .join("candles")
                .join(format!("{}_{}.json", instrument, interval)),
        )?;

        points.retain(|p| range.contains(p.open_time));
        points.sort_by_key(|p| p.open_time);

        if points.is_empty() {
            return Err(MarketDataError::unavailable(
                instrument,
                format!("no {} candles in range", interval),
            ));
        }

        Ok(PriceSeries::new(instrument, interval.as_str(), points))
    }
}
