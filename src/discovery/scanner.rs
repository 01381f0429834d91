//! Pair scan orchestration
//!
//! For every candidate pair: fetch both close series over the configured
//! window, build the tail-aligned spread, estimate its Hurst exponent and
//! record the outcome immediately. A pair that fails is recorded and skipped;
//! only configuration problems abort a scan.

use super::config::{ScanConfig, ScanWindow};
use super::error::{PairFailure, ScanError};
use super::filter::spread;
use super::results::{HurstResult, PairOutcome, ScanReport};
use crate::logging::{PairRecorder, ProgressLog};
use crate::market::MarketDataSource;
use crate::math::hurst_exponent;
use crate::types::InstrumentPair;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, error, info, warn};

/// Estimate the Hurst exponent of one pair's spread `a - b`.
pub fn estimate_pair(
    source: &dyn MarketDataSource,
    pair: &InstrumentPair,
    window: &ScanWindow,
) -> Result<HurstResult, PairFailure> {
    let series_a = source.fetch_candles(&pair.instrument_a, window.interval, &window.range)?;
    let series_b = source.fetch_candles(&pair.instrument_b, window.interval, &window.range)?;

    let spread = spread(&series_a.closes(), &series_b.closes());
    debug!(
        pair = %pair,
        len_a = series_a.len(),
        len_b = series_b.len(),
        samples = spread.len(),
        "Spread aligned"
    );

    let hurst = hurst_exponent(&spread, window.max_lag)?;

    Ok(HurstResult {
        instrument_a: pair.instrument_a.clone(),
        instrument_b: pair.instrument_b.clone(),
        hurst_exponent: hurst,
        samples: spread.len(),
    })
}

/// Record one outcome; recorder failures are counted, never fatal.
fn persist(recorder: &dyn PairRecorder, outcome: &PairOutcome, report: &mut ScanReport) {
    if let Err(e) = recorder.record(outcome) {
        warn!(pair = %outcome.pair, error = %e, "Failed to record pair outcome");
        report.record_errors += 1;
    }
}

fn finish(recorder: &dyn PairRecorder, report: &mut ScanReport) {
    if let Err(e) = recorder.flush() {
        warn!(error = %e, "Failed to flush pair recorder");
        report.record_errors += 1;
    }

    info!(
        scanned = report.scanned(),
        estimated = report.table.len(),
        failed = report.failures.len(),
        degenerate = report.degenerate(),
        record_errors = report.record_errors,
        "Pair scan complete"
    );
}

/// Readable reason for an estimation task that did not return.
fn task_failure(e: JoinError) -> PairFailure {
    if !e.is_panic() {
        return PairFailure::TaskFailed(e.to_string());
    }
    let panic_info = e.into_panic();
    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    PairFailure::TaskFailed(format!("panicked: {}", panic_msg))
}

/// Scan `pairs` one after another.
///
/// The returned report lists estimates and failures in pair order.
pub fn scan_pairs(
    source: &dyn MarketDataSource,
    pairs: &[InstrumentPair],
    config: &ScanConfig,
    recorder: &dyn PairRecorder,
) -> Result<ScanReport, ScanError> {
    let window = config.window()?;

    info!(
        pairs = pairs.len(),
        interval = %window.interval,
        max_lag = window.max_lag,
        "Starting pair scan"
    );

    let mut report = ScanReport::default();
    let mut progress = ProgressLog::new("pairs", pairs.len());

    for pair in pairs {
        let outcome = PairOutcome {
            pair: pair.clone(),
            result: estimate_pair(source, pair, &window),
        };
        persist(recorder, &outcome, &mut report);
        report.push(outcome);
        progress.advance();
    }

    finish(recorder, &mut report);
    Ok(report)
}

/// Scan `pairs` on the blocking pool with at most `config.workers` pairs in
/// flight.
///
/// Outcomes are recorded in completion order; the report is in pair order,
/// identical to what [`scan_pairs`] returns for the same input. A task that
/// panics is reported as [`PairFailure::TaskFailed`] for its pair.
pub async fn scan_pairs_concurrent(
    source: Arc<dyn MarketDataSource>,
    pairs: Vec<InstrumentPair>,
    config: &ScanConfig,
    recorder: &dyn PairRecorder,
) -> Result<ScanReport, ScanError> {
    let window = config.window()?;
    let workers = config.workers;

    info!(
        pairs = pairs.len(),
        workers,
        interval = %window.interval,
        max_lag = window.max_lag,
        "Starting concurrent pair scan"
    );

    let total = pairs.len();
    let mut report = ScanReport::default();
    let mut progress = ProgressLog::new("pairs", total);
    let mut completed: Vec<(usize, PairOutcome)> = Vec::with_capacity(total);
    let mut join_set: JoinSet<(usize, PairOutcome)> = JoinSet::new();
    let mut in_flight: HashMap<Id, (usize, InstrumentPair)> = HashMap::with_capacity(workers);
    let mut pending = pairs.into_iter().enumerate();

    loop {
        while join_set.len() < workers {
            let Some((index, pair)) = pending.next() else {
                break;
            };
            let source = Arc::clone(&source);
            let task_pair = pair.clone();
            let handle = join_set.spawn_blocking(move || {
                let result = estimate_pair(source.as_ref(), &task_pair, &window);
                (index, PairOutcome { pair: task_pair, result })
            });
            in_flight.insert(handle.id(), (index, pair));
        }

        let Some(joined) = join_set.join_next_with_id().await else {
            break;
        };

        let (index, outcome) = match joined {
            Ok((id, finished)) => {
                in_flight.remove(&id);
                finished
            }
            Err(e) => {
                let Some((index, pair)) = in_flight.remove(&e.id()) else {
                    error!(error = %e, "Untracked pair estimation task failed");
                    continue;
                };
                let failure = task_failure(e);
                error!(pair = %pair, error = %failure, "Pair estimation task failed");
                (index, PairOutcome { pair, result: Err(failure) })
            }
        };
        persist(recorder, &outcome, &mut report);
        completed.push((index, outcome));
        progress.advance();
    }

    completed.sort_by_key(|(index, _)| *index);
    for (_, outcome) in completed {
        report.push(outcome);
    }

    finish(recorder, &mut report);
    Ok(report)
}
