//! Liquidity scan over an instrument universe.

use super::scorer::{score, Exclusion, LiquidityRecord};
use super::table::LiquidityTable;
use crate::logging::ProgressLog;
use crate::market::{MarketDataError, MarketDataSource};
use tracing::{debug, info, warn};

/// Result of assessing one instrument.
///
/// Keeps "the venue call failed" apart from "the instrument has a zero
/// liquidity field".
#[derive(Debug)]
pub enum LiquidityOutcome {
    Scored(LiquidityRecord),
    Excluded(Exclusion),
    Unavailable(MarketDataError),
}

/// Fetch and score a single instrument.
pub fn assess_instrument(
    source: &dyn MarketDataSource,
    instrument: &str,
    depth: usize,
) -> LiquidityOutcome {
    let book = match source.fetch_order_book(instrument, depth) {
        Ok(book) => book,
        Err(e) => return LiquidityOutcome::Unavailable(e),
    };
    let stats = match source.fetch_24h_stats(instrument) {
        Ok(stats) => stats,
        Err(e) => return LiquidityOutcome::Unavailable(e),
    };

    match score(&book, &stats) {
        Ok(record) => LiquidityOutcome::Scored(record),
        Err(exclusion) => LiquidityOutcome::Excluded(exclusion),
    }
}

/// Summary of a liquidity scan.
#[derive(Debug, Default)]
pub struct LiquidityScan {
    /// Scored instruments in universe order
    pub table: LiquidityTable,
    /// Instruments dropped by a zero-field or empty-book rule
    pub excluded: Vec<(String, Exclusion)>,
    /// Instruments whose data could not be fetched
    pub unavailable: Vec<(String, MarketDataError)>,
}

/// Score every instrument in `instruments`, in order.
///
/// Per-instrument failures never abort the scan.
pub fn scan_liquidity(
    source: &dyn MarketDataSource,
    instruments: &[String],
    depth: usize,
) -> LiquidityScan {
    info!(
        instruments = instruments.len(),
        depth = depth,
        "Starting liquidity scan"
    );

    let mut scan = LiquidityScan::default();
    let mut progress = ProgressLog::new("liquidity", instruments.len());

    for instrument in instruments {
        match assess_instrument(source, instrument, depth) {
            LiquidityOutcome::Scored(record) => {
                debug!(
                    instrument = %instrument,
                    score = record.metrics.liquidity_score,
                    "Scored"
                );
                scan.table.insert(record);
            }
            LiquidityOutcome::Excluded(reason) => {
                debug!(instrument = %instrument, reason = %reason, "Excluded");
                scan.excluded.push((instrument.clone(), reason));
            }
            LiquidityOutcome::Unavailable(e) => {
                warn!(instrument = %instrument, error = %e, "Market data unavailable, skipping");
                scan.unavailable.push((instrument.clone(), e));
            }
        }
        progress.advance();
    }

    info!(
        scored = scan.table.len(),
        excluded = scan.excluded.len(),
        unavailable = scan.unavailable.len(),
        "Liquidity scan complete"
    );
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::InMemoryMarketData;

    fn universe(source: &InMemoryMarketData) -> Vec<String> {
        source.list_instruments().unwrap()
    }

    #[test]
    fn test_scan_classifies_instruments() {
        let source = InMemoryMarketData::new()
            .with_book("GOOD", &[(99.0, 5.0)], &[(101.0, 5.0)])
            .with_ticker("GOOD", 100.0)
            .with_book("FLAT", &[(100.0, 5.0)], &[(100.0, 5.0)])
            .with_ticker("FLAT", 100.0)
            .with_book("NOTICKER", &[(99.0, 5.0)], &[(101.0, 5.0)]);

        let scan = scan_liquidity(&source, &universe(&source), 10);

        assert_eq!(scan.table.len(), 1);
        assert!(scan.table.get("GOOD").is_some());
        assert_eq!(scan.excluded, vec![("FLAT".to_string(), Exclusion::ZeroSpread)]);
        assert_eq!(scan.unavailable.len(), 1);
        assert_eq!(scan.unavailable[0].0, "NOTICKER");
    }

    #[test]
    fn test_zero_volume_never_reaches_table() {
        let source = InMemoryMarketData::new()
            .with_book("DEAD", &[(99.0, 5.0)], &[(101.0, 5.0)])
            .with_ticker("DEAD", 0.0);

        let scan = scan_liquidity(&source, &universe(&source), 10);
        assert!(scan.table.is_empty());
        assert_eq!(scan.excluded[0].1, Exclusion::ZeroQuoteVolume);
    }

    #[test]
    fn test_zero_priced_book_keeps_table_loadable() {
        let source = InMemoryMarketData::new()
            .with_book("GOOD", &[(99.0, 5.0)], &[(101.0, 5.0)])
            .with_ticker("GOOD", 100.0)
            .with_book("FREE", &[(0.0, 5.0)], &[(0.0, 5.0)])
            .with_ticker("FREE", 10.0);

        let scan = scan_liquidity(&source, &universe(&source), 10);
        assert_eq!(scan.excluded, vec![("FREE".to_string(), Exclusion::InvalidPrice)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liquidity_scores.json");
        scan.table.save_json(&path).unwrap();
        let reloaded = LiquidityTable::load_json(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get("GOOD").is_some());
    }

    #[test]
    fn test_assess_missing_book_is_unavailable() {
        let source = InMemoryMarketData::new().with_ticker("AAA", 1.0);
        assert!(matches!(
            assess_instrument(&source, "AAA", 10),
            LiquidityOutcome::Unavailable(_)
        ));
    }
}
