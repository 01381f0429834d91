//! Pair scan command handlers.
//!
//! Implements the `scan-pairs` and `run` subcommands: narrow the liquidity
//! table to the configured band, estimate every pair's spread Hurst exponent
//! and persist the results.

use super::liquidity::run_liquidity;
use crate::cli::ScanArgs;
use crate::discovery::{
    scan_pairs, scan_pairs_concurrent, select_pairs, ScanConfig, ScanError, ScanReport,
};
use crate::liquidity::LiquidityTable;
use crate::logging::{CsvRecorder, MultiRecorder, PairRecorder, TracingRecorder};
use crate::market::MarketDataSource;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Pairs shown in the console summary
const TOP_PAIRS_SHOWN: usize = 20;

/// Scan every pair of `table` that falls inside the configured band.
///
/// # Errors
/// Fails on an empty table or invalid configuration; per-pair failures land
/// in the report instead.
pub async fn scan_table(
    source: Arc<dyn MarketDataSource>,
    table: &LiquidityTable,
    config: &ScanConfig,
    recorder: &dyn PairRecorder,
) -> Result<ScanReport, ScanError> {
    if table.is_empty() {
        return Err(ScanError::EmptyUniverse(
            "liquidity table has no instruments".to_string(),
        ));
    }
    // Reject bad settings before any pair is enumerated
    config.window()?;

    let pairs = select_pairs(table, &config.band());
    if pairs.is_empty() {
        warn!(
            band_low = config.band_low,
            band_high = config.band_high,
            "Fewer than two instruments inside the liquidity band"
        );
    }

    if config.workers > 1 {
        scan_pairs_concurrent(source, pairs, config, recorder).await
    } else {
        scan_pairs(source.as_ref(), &pairs, config, recorder)
    }
}

fn recorder_for(results_csv: &str) -> MultiRecorder {
    MultiRecorder::new(vec![
        Box::new(CsvRecorder::new(PathBuf::from(results_csv))),
        Box::new(TracingRecorder::new()),
    ])
}

fn print_summary(report: &ScanReport, output_path: &str) {
    println!(
        "\n{:<24} | {:>8} | {:>7}",
        "Pair", "Hurst", "Samples"
    );
    println!("{}", "-".repeat(45));

    for result in report.table.ranked().into_iter().take(TOP_PAIRS_SHOWN) {
        println!(
            "{:<24} | {:>8.4} | {:>7}",
            format!("{}/{}", result.instrument_a, result.instrument_b),
            result.hurst_exponent,
            result.samples
        );
    }

    println!(
        "\n✓ Saved {} estimates to {} ({} pairs failed)",
        report.table.len(),
        output_path,
        report.failures.len()
    );
}

async fn scan_and_save(
    source: Arc<dyn MarketDataSource>,
    table: &LiquidityTable,
    args: &ScanArgs,
    depth: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config(depth)?;
    info!(
        instruments = table.len(),
        band_low = config.band_low,
        band_high = config.band_high,
        max_lag = config.max_lag,
        interval = %config.interval,
        workers = config.workers,
        "Configuration loaded"
    );

    let recorder = recorder_for(&args.results_csv);
    let report = match scan_table(source, table, &config, &recorder).await {
        Ok(report) => report,
        Err(e) => {
            error!("Pair scan failed: {}", e);
            return Err(e.into());
        }
    };

    report.table.save_json(Path::new(&args.output))?;
    info!(
        output = %args.output,
        estimates = report.table.len(),
        "Pair results saved"
    );

    print_summary(&report, &args.output);
    Ok(())
}

/// Run the pair scan against a saved liquidity table.
///
/// # Errors
/// Returns error if the table cannot be read, the configuration is invalid
/// or the results cannot be written.
pub async fn run_scan_pairs(
    source: Arc<dyn MarketDataSource>,
    liquidity_path: &str,
    args: &ScanArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- pairscan: Pair Scan ---");

    let table = LiquidityTable::load_json(Path::new(liquidity_path)).map_err(ScanError::from)?;
    info!(input = liquidity_path, instruments = table.len(), "Liquidity table loaded");

    scan_and_save(source, &table, args, ScanConfig::default().depth_limit).await
}

/// Score liquidity, save the table, then scan pairs from it.
///
/// # Errors
/// Returns error from either stage.
pub async fn run_pipeline(
    source: Arc<dyn MarketDataSource>,
    depth: usize,
    liquidity_output: &str,
    args: &ScanArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate scan settings before spending time on the liquidity stage
    args.to_config(depth)?;

    let scan = run_liquidity(source.as_ref(), depth, liquidity_output)?;
    scan_and_save(source, &scan.table, args, depth).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{HurstTable, PairOutcome};
    use crate::liquidity::{LiquidityMetrics, LiquidityRecord};
    use crate::logging::RecordError;
    use crate::market::InMemoryMarketData;
    use tempfile::tempdir;

    struct Silent;

    impl PairRecorder for Silent {
        fn record(&self, _outcome: &PairOutcome) -> Result<(), RecordError> {
            Ok(())
        }
    }

    fn book_market() -> InMemoryMarketData {
        // Scores: AAA 500, BBB 75, CCC 60, DDD 40
        InMemoryMarketData::new()
            .with_book("AAA", &[(99.0, 5.0)], &[(101.0, 5.0)])
            .with_ticker("AAA", 1.0)
            .with_book("BBB", &[(99.0, 0.75)], &[(101.0, 0.75)])
            .with_ticker("BBB", 1.0)
            .with_book("CCC", &[(99.0, 0.6)], &[(101.0, 0.6)])
            .with_ticker("CCC", 1.0)
            .with_book("DDD", &[(99.0, 0.4)], &[(101.0, 0.4)])
            .with_ticker("DDD", 1.0)
    }

    #[tokio::test]
    async fn test_empty_table_is_fatal() {
        let source: Arc<dyn MarketDataSource> = Arc::new(InMemoryMarketData::new());
        let result = scan_table(
            source,
            &LiquidityTable::new(),
            &ScanConfig::default(),
            &Silent,
        )
        .await;
        assert!(matches!(result, Err(ScanError::EmptyUniverse(_))));
    }

    #[tokio::test]
    async fn test_single_survivor_yields_empty_report() {
        let source: Arc<dyn MarketDataSource> = Arc::new(InMemoryMarketData::new());
        let mut table = LiquidityTable::new();
        table.insert(LiquidityRecord {
            instrument: "BBB".to_string(),
            metrics: LiquidityMetrics {
                bid_liquidity: 1.0,
                ask_liquidity: 1.0,
                quote_volume_24h: 1.0,
                relative_spread: 0.025,
                liquidity_score: 80.0,
            },
        });
        let report = scan_table(source, &table, &ScanConfig::default(), &Silent)
            .await
            .unwrap();
        assert_eq!(report.scanned(), 0);
    }

    #[tokio::test]
    async fn test_pipeline_writes_all_artifacts() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        let other: Vec<f64> = (0..120).map(|i| 50.0 + ((i * 5) % 13) as f64).collect();
        let source = book_market()
            .with_daily_closes("BBB", &closes)
            .with_daily_closes("CCC", &other);
        let source: Arc<dyn MarketDataSource> = Arc::new(source);

        let dir = tempdir().unwrap();
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();
        let args = ScanArgs {
            band_low: 50.0,
            band_high: 100.0,
            max_lag: 20,
            interval: "1d".to_string(),
            start_date: "1970-01-01".to_string(),
            end_date: "now".to_string(),
            workers: 1,
            output: path("hurst_results.json"),
            results_csv: path("pair_results.csv"),
        };

        run_pipeline(source, 10, &path("liquidity_scores.json"), &args)
            .await
            .unwrap();

        let results = HurstTable::load_json(Path::new(&args.output)).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.get("BBB", "CCC").is_some());

        let log = std::fs::read_to_string(&args.results_csv).unwrap();
        assert_eq!(log.lines().count(), 2);
    }
}
