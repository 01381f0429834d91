//! Liquidity command handler.
//!
//! Implements the `liquidity` subcommand: score every listed instrument and
//! persist the table as JSON.

use crate::discovery::ScanError;
use crate::liquidity::{scan_liquidity, LiquidityScan};
use crate::market::MarketDataSource;
use std::path::Path;
use tracing::info;

/// List the venue's instruments and score each one.
///
/// # Errors
/// Fails when the listing fails or returns no instruments.
pub fn score_universe(
    source: &dyn MarketDataSource,
    depth: usize,
) -> Result<LiquidityScan, ScanError> {
    if depth == 0 {
        return Err(ScanError::InvalidConfig(
            "depth_limit must be at least 1".to_string(),
        ));
    }

    let instruments = source.list_instruments()?;
    if instruments.is_empty() {
        return Err(ScanError::EmptyUniverse(
            "the venue listed no instruments".to_string(),
        ));
    }

    let scan = scan_liquidity(source, &instruments, depth);
    info!(
        listed = instruments.len(),
        scored = scan.table.len(),
        excluded = scan.excluded.len(),
        unavailable = scan.unavailable.len(),
        "Liquidity scores computed"
    );
    Ok(scan)
}

/// Run the liquidity scoring stage and save the table.
///
/// # Errors
/// Returns error if listing fails or the table cannot be written.
pub fn run_liquidity(
    source: &dyn MarketDataSource,
    depth: usize,
    output_path: &str,
) -> Result<LiquidityScan, Box<dyn std::error::Error>> {
    info!("--- pairscan: Liquidity Scoring ---");

    let scan = score_universe(source, depth)?;
    scan.table.save_json(Path::new(output_path)).map_err(ScanError::from)?;

    info!(
        output = output_path,
        instruments = scan.table.len(),
        "Liquidity table saved"
    );
    println!(
        "\n✓ Saved {} liquidity scores to {} ({} excluded, {} unavailable)",
        scan.table.len(),
        output_path,
        scan.excluded.len(),
        scan.unavailable.len()
    );

    Ok(scan)
}
