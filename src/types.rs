//! Common Types Module
//!
//! Market data records shared by the liquidity scorer, the data sources
//! and the pair scanner.

use serde::{Deserialize, Serialize};

/// A single order-book level as `(price, quantity)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel(pub f64, pub f64);

impl BookLevel {
    pub fn price(&self) -> f64 {
        self.0
    }

    pub fn quantity(&self) -> f64 {
        self.1
    }
}

/// Order-book snapshot for one instrument, both sides best-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Instrument identifier (e.g., "BTCUSDT").
    pub instrument: String,
    /// Bid levels, best (highest) first.
    pub bids: Vec<BookLevel>,
    /// Ask levels, best (lowest) first.
    pub asks: Vec<BookLevel>,
    /// Depth limit the snapshot was fetched with.
    pub depth: usize,
}

impl OrderBookSnapshot {
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(BookLevel::price)
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(BookLevel::price)
    }
}

/// Rolling 24h ticker statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerStats {
    /// Total traded value in the quote currency.
    #[serde(alias = "quoteVolume")]
    pub quote_volume: f64,
}

/// One candle reduced to what the scanner consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Candle open time, unix milliseconds.
    pub open_time: i64,
    pub close: f64,
}

/// Close-price history of one instrument over a fetch window.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub instrument: String,
    /// Venue interval label (e.g., "1d").
    pub interval: String,
    /// Observations in ascending time order.
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(instrument: impl Into<String>, interval: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            instrument: instrument.into(),
            interval: interval.into(),
            points,
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Unordered instrument pair, stored in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentPair {
    pub instrument_a: String,
    pub instrument_b: String,
}

impl InstrumentPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            instrument_a: a.into(),
            instrument_b: b.into(),
        }
    }
}

impl std::fmt::Display for InstrumentPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.instrument_a, self.instrument_b)
    }
}
