use mockall::mock;
use pairscan::cli::ScanArgs;
use pairscan::commands::{run_export_csv, run_pipeline, scan_table};
use pairscan::discovery::{select_pairs, HurstTable, PairOutcome, ScanConfig};
use pairscan::liquidity::LiquidityTable;
use pairscan::logging::{PairRecorder, RecordError};
use pairscan::market::{
    DateRange, FileMarketData, Interval, MarketDataError, MarketDataSource,
};
use pairscan::types::{InstrumentPair, OrderBookSnapshot, PricePoint, PriceSeries, TickerStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

// --- Mocks ---

mock! {
    pub Source {}

    impl MarketDataSource for Source {
        fn list_instruments(&self) -> Result<Vec<String>, MarketDataError>;
        fn fetch_order_book(&self, instrument: &str, depth: usize) -> Result<OrderBookSnapshot, MarketDataError>;
        fn fetch_24h_stats(&self, instrument: &str) -> Result<TickerStats, MarketDataError>;
        fn fetch_candles(&self, instrument: &str, interval: Interval, range: &DateRange) -> Result<PriceSeries, MarketDataError>;
    }
}

#[derive(Default)]
struct CollectingRecorder {
    pairs: Mutex<Vec<(InstrumentPair, &'static str)>>,
}

impl PairRecorder for CollectingRecorder {
    fn record(&self, outcome: &PairOutcome) -> Result<(), RecordError> {
        self.pairs
            .lock()
            .unwrap()
            .push((outcome.pair.clone(), outcome.status()));
        Ok(())
    }
}

// --- Helpers ---

/// 2023-01-01T00:00:00Z
const START_2023_MS: i64 = 1_672_531_200_000;
const DAY_MS: i64 = 86_400_000;

fn random_walk(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level = 100.0;
    (0..len)
        .map(|_| {
            level += rng.random_range(-1.0..1.0);
            level
        })
        .collect()
}

fn scenario_table_json() -> &'static str {
    r#"{
        "AAA": {"bid_liquidity": 30.0, "ask_liquidity": 30.0, "quote_volume_24h": 1.0, "relative_spread": 1.0, "liquidity_score": 60.0},
        "BBB": {"bid_liquidity": 75.0, "ask_liquidity": 75.0, "quote_volume_24h": 1.0, "relative_spread": 1.0, "liquidity_score": 150.0},
        "CCC": {"bid_liquidity": 37.5, "ask_liquidity": 37.5, "quote_volume_24h": 1.0, "relative_spread": 1.0, "liquidity_score": 75.0}
    }"#
}

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn candles_json(closes: &[f64]) -> String {
    let points: Vec<PricePoint> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            open_time: START_2023_MS + i as i64 * DAY_MS,
            close,
        })
        .collect();
    serde_json::to_string(&points).unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_band_scenario_scans_single_pair() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("liquidity_scores.json");
    fs::write(&path, scenario_table_json()).unwrap();
    let table = LiquidityTable::load_json(&path).unwrap();

    let config = ScanConfig::default();
    assert_eq!(
        select_pairs(&table, &config.band()),
        vec![InstrumentPair::new("AAA", "CCC")]
    );

    let mut source = MockSource::new();
    source
        .expect_fetch_candles()
        .times(2)
        .returning(|instrument, interval, _| {
            let seed = if instrument == "AAA" { 11 } else { 12 };
            let points = random_walk(seed, 365)
                .into_iter()
                .enumerate()
                .map(|(i, close)| PricePoint {
                    open_time: START_2023_MS + i as i64 * DAY_MS,
                    close,
                })
                .collect();
            Ok(PriceSeries::new(instrument, interval.as_str(), points))
        });

    let recorder = CollectingRecorder::default();
    let report = scan_table(Arc::new(source), &table, &config, &recorder)
        .await
        .unwrap();

    assert_eq!(report.table.len(), 1);
    let result = report.table.get("AAA", "CCC").unwrap();
    assert_eq!(result.samples, 365);
    assert!(result.hurst_exponent.is_finite());
    assert_eq!(
        *recorder.pairs.lock().unwrap(),
        vec![(InstrumentPair::new("AAA", "CCC"), "ok")]
    );
}

#[tokio::test]
async fn test_unavailable_leg_is_local_to_its_pairs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("liquidity_scores.json");
    fs::write(
        &path,
        r#"{
            "AAA": {"bid_liquidity": 1.0, "ask_liquidity": 1.0, "quote_volume_24h": 1.0, "relative_spread": 1.0, "liquidity_score": 60.0},
            "CCC": {"bid_liquidity": 1.0, "ask_liquidity": 1.0, "quote_volume_24h": 1.0, "relative_spread": 1.0, "liquidity_score": 70.0},
            "DDD": {"bid_liquidity": 1.0, "ask_liquidity": 1.0, "quote_volume_24h": 1.0, "relative_spread": 1.0, "liquidity_score": 80.0}
        }"#,
    )
    .unwrap();
    let table = LiquidityTable::load_json(&path).unwrap();

    let mut source = MockSource::new();
    source
        .expect_fetch_candles()
        .returning(|instrument, interval, _| {
            if instrument == "DDD" {
                return Err(MarketDataError::unavailable(instrument, "delisted"));
            }
            let seed = instrument.len() as u64 + instrument.as_bytes()[0] as u64;
            let points = random_walk(seed, 200)
                .into_iter()
                .enumerate()
                .map(|(i, close)| PricePoint {
                    open_time: START_2023_MS + i as i64 * DAY_MS,
                    close,
                })
                .collect();
            Ok(PriceSeries::new(instrument, interval.as_str(), points))
        });

    let config = ScanConfig {
        workers: 2,
        ..ScanConfig::default()
    };
    let recorder = CollectingRecorder::default();
    let report = scan_table(Arc::new(source), &table, &config, &recorder)
        .await
        .unwrap();

    assert_eq!(report.scanned(), 3);
    assert_eq!(report.table.len(), 1);
    assert!(report.table.get("AAA", "CCC").is_some());
    let failed: Vec<InstrumentPair> = report.failures.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(
        failed,
        vec![
            InstrumentPair::new("AAA", "DDD"),
            InstrumentPair::new("CCC", "DDD"),
        ]
    );
    assert_eq!(recorder.pairs.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_file_backed_pipeline() {
    let data = tempdir().unwrap();
    let root = data.path();

    write(root, "instruments.json", r#"["AAA", "BBB", "CCC", "ZZZ"]"#);
    // AAA: (0.6 + 0.6) / (1 * 0.02) = 60
    write(root, "order_books/AAA.json", r#"{"bids": [[99.0, 0.6]], "asks": [[101.0, 0.6]]}"#);
    write(root, "tickers/AAA.json", r#"{"quote_volume": 1.0}"#);
    // BBB: 150, outside the band
    write(root, "order_books/BBB.json", r#"{"bids": [[99.0, 1.5]], "asks": [[101.0, 1.5]]}"#);
    write(root, "tickers/BBB.json", r#"{"quoteVolume": 1.0}"#);
    // CCC: 75
    write(root, "order_books/CCC.json", r#"{"bids": [[99.0, 0.5], [98.0, 0.25]], "asks": [[101.0, 0.75]]}"#);
    write(root, "tickers/CCC.json", r#"{"quote_volume": 1.0}"#);
    // ZZZ: empty bid side, excluded
    write(root, "order_books/ZZZ.json", r#"{"bids": [], "asks": [[101.0, 1.0]]}"#);
    write(root, "tickers/ZZZ.json", r#"{"quote_volume": 1.0}"#);

    write(root, "candles/AAA_1d.json", &candles_json(&random_walk(21, 365)));
    write(root, "candles/CCC_1d.json", &candles_json(&random_walk(22, 300)));

    let out = tempdir().unwrap();
    let out_path = |name: &str| out.path().join(name).to_str().unwrap().to_string();
    let args = ScanArgs {
        band_low: 50.0,
        band_high: 100.0,
        max_lag: 20,
        interval: "1d".to_string(),
        start_date: "2023-01-01".to_string(),
        end_date: "2023-12-31".to_string(),
        workers: 1,
        output: out_path("hurst_results.json"),
        results_csv: out_path("pair_results.csv"),
    };

    let source: Arc<dyn MarketDataSource> = Arc::new(FileMarketData::new(root));
    run_pipeline(source, 10, &out_path("liquidity_scores.json"), &args)
        .await
        .unwrap();

    let liquidity = LiquidityTable::load_json(Path::new(&out_path("liquidity_scores.json"))).unwrap();
    let scored: Vec<&str> = liquidity.iter().map(|(id, _)| id).collect();
    assert_eq!(scored, vec!["AAA", "BBB", "CCC"]);

    let results = HurstTable::load_json(Path::new(&args.output)).unwrap();
    assert_eq!(results.len(), 1);
    let result = results.get("AAA", "CCC").unwrap();
    // CCC is shorter; the spread keeps its 300 most recent points
    assert_eq!(result.samples, 300);

    let log = fs::read_to_string(&args.results_csv).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("AAA,CCC,ok,"));
}

#[test]
fn test_liquidity_table_csv_round_trip_is_bit_exact() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("liquidity_scores.json");
    let csv = dir.path().join("liquidity_scores.csv");

    fs::write(
        &json,
        r#"{
            "ETHBTC": {"bid_liquidity": 123.456789012345, "ask_liquidity": 0.1, "24h_quote_volume": 1234.5678, "relative_spread": 0.00012345678901234567, "liquidity_score": 0.30000000000000004},
            "LTCBTC": {"bid_liquidity": 1e-9, "ask_liquidity": 98765.4321, "quote_volume_24h": 3.0, "relative_spread": 0.000333, "liquidity_score": 98.76543210123}
        }"#,
    )
    .unwrap();

    run_export_csv(json.to_str().unwrap(), csv.to_str().unwrap()).unwrap();

    let original = LiquidityTable::load_json(&json).unwrap();
    let reparsed = LiquidityTable::load_csv(&csv).unwrap();
    assert_eq!(reparsed.len(), 2);
    for (id, metrics) in original.iter() {
        let back = reparsed.get(id).unwrap();
        assert_eq!(back.bid_liquidity.to_bits(), metrics.bid_liquidity.to_bits());
        assert_eq!(back.ask_liquidity.to_bits(), metrics.ask_liquidity.to_bits());
        assert_eq!(back.quote_volume_24h.to_bits(), metrics.quote_volume_24h.to_bits());
        assert_eq!(back.relative_spread.to_bits(), metrics.relative_spread.to_bits());
        assert_eq!(back.liquidity_score.to_bits(), metrics.liquidity_score.to_bits());
    }
}
