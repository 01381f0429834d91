//! Tracing-based Pair Recorder
//!
//! Emits one structured log line per pair outcome. Zero additional
//! dependencies.

use super::recorder::{PairRecorder, RecordError};
use crate::discovery::PairOutcome;
use tracing::{info, warn};

/// Recorder that emits structured tracing logs
pub struct TracingRecorder;

impl TracingRecorder {
    /// Create a new tracing recorder
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl PairRecorder for TracingRecorder {
    fn record(&self, outcome: &PairOutcome) -> Result<(), RecordError> {
        match &outcome.result {
            Ok(result) => info!(
                target: "pairs",
                instrument_a = %result.instrument_a,
                instrument_b = %result.instrument_b,
                hurst = result.hurst_exponent,
                samples = result.samples,
                "Hurst exponent for spread"
            ),
            Err(failure) => warn!(
                target: "pairs",
                instrument_a = %outcome.pair.instrument_a,
                instrument_b = %outcome.pair.instrument_b,
                status = failure.kind(),
                error = %failure,
                "No estimate for pair"
            ),
        }
        Ok(())
    }
}
