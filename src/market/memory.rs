//! In-memory market data, for replaying captured data and for tests.

use super::{DateRange, Interval, MarketDataError, MarketDataSource};
use crate::types::{BookLevel, OrderBookSnapshot, PricePoint, PriceSeries, TickerStats};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Book {
    bids: Vec<BookLevel>,
    asks: Vec<BookLevel>,
}

/// Market data held in maps keyed by instrument.
///
/// Candles are stored once per instrument and served for any interval.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    instruments: Vec<String>,
    books: HashMap<String, Book>,
    tickers: HashMap<String, TickerStats>,
    candles: HashMap<String, Vec<PricePoint>>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, instrument: &str) {
        if !self.instruments.iter().any(|i| i == instrument) {
            self.instruments.push(instrument.to_string());
        }
    }

    /// Set the order book for an instrument, levels given best-first
    #[must_use]
    pub fn with_book(mut self, instrument: &str, bids: &[(f64, f64)], asks: &[(f64, f64)]) -> Self {
        self.register(instrument);
        self.books.insert(
            instrument.to_string(),
            Book {
                bids: bids.iter().map(|&(p, q)| BookLevel(p, q)).collect(),
                asks: asks.iter().map(|&(p, q)| BookLevel(p, q)).collect(),
            },
        );
        self
    }

    #[must_use]
    pub fn with_ticker(mut self, instrument: &str, quote_volume: f64) -> Self {
        self.register(instrument);
        self.tickers
            .insert(instrument.to_string(), TickerStats { quote_volume });
        self
    }

    /// Set closes for an instrument; candle `i` opens `i` days after the epoch
    #[must_use]
    pub fn with_daily_closes(mut self, instrument: &str, closes: &[f64]) -> Self {
        const DAY_MS: i64 = 86_400_000;
        self.register(instrument);
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                open_time: i as i64 * DAY_MS,
                close,
            })
            .collect();
        self.candles.insert(instrument.to_string(), points);
        self
    }
}

impl MarketDataSource for InMemoryMarketData {
    fn list_instruments(&self) -> Result<Vec<String>, MarketDataError> {
        Ok(self.instruments.clone())
    }

    fn fetch_order_book(
        &self,
        instrument: &str,
        depth: usize,
    ) -> Result<OrderBookSnapshot, MarketDataError> {
        let book = self
            .books
            .get(instrument)
            .ok_or_else(|| MarketDataError::unavailable(instrument, "no order book"))?;

        Ok(OrderBookSnapshot {
            instrument: instrument.to_string(),
            bids: book.bids.iter().take(depth).copied().collect(),
            asks: book.asks.iter().take(depth).copied().collect(),
            depth,
        })
    }

    fn fetch_24h_stats(&self, instrument: &str) -> Result<TickerStats, MarketDataError> {
        self.tickers
            .get(instrument)
            .copied()
            .ok_or_else(|| MarketDataError::unavailable(instrument, "no 24h ticker"))
    }

    fn fetch_candles(
        &self,
        instrument: &str,
        interval: Interval,
        range: &DateRange,
    ) -> Result<PriceSeries, MarketDataError> {
        let points: Vec<PricePoint> = self
            .candles
            .get(instrument)
            .ok_or_else(|| MarketDataError::unavailable(instrument, "no candles"))?
            .iter()
            .filter(|p| range.contains(p.open_time))
            .copied()
            .collect();

        if points.is_empty() {
            return Err(MarketDataError::unavailable(
                instrument,
                format!("no {} candles in range", interval),
            ));
        }

        Ok(PriceSeries::new(instrument, interval.as_str(), points))
    }
}
