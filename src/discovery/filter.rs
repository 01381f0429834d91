//! Universe filtering and spread construction
//!
//! Narrows the liquidity table to a score band, enumerates candidate pairs,
//! and aligns two close series into a spread.

use crate::liquidity::LiquidityTable;
use crate::types::InstrumentPair;
use tracing::{debug, info};

/// Open liquidity-score interval `(low, high)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityBand {
    pub low: f64,
    pub high: f64,
}

impl LiquidityBand {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Both bounds are exclusive
    pub fn contains(&self, score: f64) -> bool {
        self.low < score && score < self.high
    }
}

/// Instruments whose score lies strictly inside `band`, in table order.
pub fn select_universe(table: &LiquidityTable, band: &LiquidityBand) -> Vec<String> {
    let selected: Vec<String> = table
        .iter()
        .filter(|(instrument, metrics)| {
            let keep = band.contains(metrics.liquidity_score);
            if !keep {
                debug!(
                    instrument = %instrument,
                    score = metrics.liquidity_score,
                    "Outside liquidity band"
                );
            }
            keep
        })
        .map(|(instrument, _)| instrument.to_string())
        .collect();

    info!(
        candidates = table.len(),
        selected = selected.len(),
        low = band.low,
        high = band.high,
        "Liquidity band applied"
    );
    selected
}

/// Every unordered pair of `instruments`, each exactly once.
///
/// The first element always precedes the second in input order, and pairs
/// come out in lexicographic index order: (0,1), (0,2), ..., (1,2), ...
/// Inputs are expected to be distinct.
pub fn pair_combinations(instruments: &[String]) -> Vec<InstrumentPair> {
    let n = instruments.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(InstrumentPair::new(
                instruments[i].clone(),
                instruments[j].clone(),
            ));
        }
    }
    pairs
}

/// Band filter followed by pair enumeration.
pub fn select_pairs(table: &LiquidityTable, band: &LiquidityBand) -> Vec<InstrumentPair> {
    pair_combinations(&select_universe(table, band))
}

/// Truncate two series to a common length, keeping the most recent values.
///
/// The longer series loses its earliest observations; both results end on
/// the original final elements.
pub fn align_tail<'a>(a: &'a [f64], b: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let len = a.len().min(b.len());
    (&a[a.len() - len..], &b[b.len() - len..])
}

/// Element-wise `a - b` after tail alignment.
pub fn spread(a: &[f64], b: &[f64]) -> Vec<f64> {
    let (a, b) = align_tail(a, b);
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}
