//! Liquidity scoring from order-book depth and 24h traded value.
//!
//! ```text
//! bid_liquidity   = Σ bid quantities over the fetched depth
//! ask_liquidity   = Σ ask quantities over the fetched depth
//! relative_spread = (best_ask - best_bid) / ((best_ask + best_bid) / 2)
//! liquidity_score = (bid_liquidity + ask_liquidity) / (quote_volume_24h * relative_spread)
//! ```

use crate::types::{OrderBookSnapshot, TickerStats};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a snapshot was dropped before scoring.
///
/// Exclusions are a filtering rule, not a failure: the instrument simply
/// does not appear in the liquidity table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    #[error("order book has no bids")]
    EmptyBids,

    #[error("order book has no asks")]
    EmptyAsks,

    #[error("bid liquidity is zero")]
    ZeroBidLiquidity,

    #[error("ask liquidity is zero")]
    ZeroAskLiquidity,

    #[error("24h quote volume is zero")]
    ZeroQuoteVolume,

    #[error("bid-ask spread is zero")]
    ZeroSpread,

    #[error("best prices do not give a positive mid price")]
    InvalidPrice,

    #[error("liquidity score is not a finite number")]
    NonFiniteScore,
}

/// Scored liquidity fields of one instrument, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityMetrics {
    pub bid_liquidity: f64,
    pub ask_liquidity: f64,
    #[serde(alias = "24h_quote_volume")]
    pub quote_volume_24h: f64,
    pub relative_spread: f64,
    pub liquidity_score: f64,
}

/// Liquidity metrics tagged with their instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityRecord {
    pub instrument: String,
    pub metrics: LiquidityMetrics,
}

/// Score one instrument.
///
/// The zero-field check runs before the division, so the score denominator
/// is never zero. A book whose mid price is not positive, or whose fields
/// produce a non-finite score, is excluded rather than stored.
pub fn score(snapshot: &OrderBookSnapshot, stats: &TickerStats) -> Result<LiquidityRecord, Exclusion> {
    let best_bid = snapshot.best_bid().ok_or(Exclusion::EmptyBids)?;
    let best_ask = snapshot.best_ask().ok_or(Exclusion::EmptyAsks)?;

    let bid_liquidity: f64 = snapshot.bids.iter().map(|l| l.quantity()).sum();
    let ask_liquidity: f64 = snapshot.asks.iter().map(|l| l.quantity()).sum();

    let mid_price = (best_ask + best_bid) / 2.0;
    let relative_spread = (best_ask - best_bid) / mid_price;
    let quote_volume_24h = stats.quote_volume;

    if bid_liquidity == 0.0 {
        return Err(Exclusion::ZeroBidLiquidity);
    }
    if ask_liquidity == 0.0 {
        return Err(Exclusion::ZeroAskLiquidity);
    }
    if quote_volume_24h == 0.0 {
        return Err(Exclusion::ZeroQuoteVolume);
    }
    if !(mid_price > 0.0 && relative_spread.is_finite()) {
        return Err(Exclusion::InvalidPrice);
    }
    if relative_spread == 0.0 {
        return Err(Exclusion::ZeroSpread);
    }

    let liquidity_score = (bid_liquidity + ask_liquidity) / (quote_volume_24h * relative_spread);
    if !liquidity_score.is_finite() {
        return Err(Exclusion::NonFiniteScore);
    }

    Ok(LiquidityRecord {
        instrument: snapshot.instrument.clone(),
        metrics: LiquidityMetrics {
            bid_liquidity,
            ask_liquidity,
            quote_volume_24h,
            relative_spread,
            liquidity_score,
        },
    })
}
