//! Pair scan results and their persisted table

use super::error::{PairFailure, ScanError};
use crate::types::InstrumentPair;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Hurst exponent of one pair's spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HurstResult {
    pub instrument_a: String,
    pub instrument_b: String,
    /// May fall outside [0, 1] for short or noisy samples
    pub hurst_exponent: f64,
    /// Aligned spread length the estimate was computed on
    pub samples: usize,
}

impl HurstResult {
    pub fn pair(&self) -> InstrumentPair {
        InstrumentPair::new(self.instrument_a.clone(), self.instrument_b.clone())
    }
}

/// What happened to one pair
#[derive(Debug)]
pub struct PairOutcome {
    pub pair: InstrumentPair,
    pub result: Result<HurstResult, PairFailure>,
}

/// Every successful estimate of a scan, in pair order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HurstTable {
    pub results: Vec<HurstResult>,
}

impl HurstTable {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, instrument_a: &str, instrument_b: &str) -> Option<&HurstResult> {
        self.results
            .iter()
            .find(|r| r.instrument_a == instrument_a && r.instrument_b == instrument_b)
    }

    /// Pairs sorted by ascending exponent (most mean-reverting first)
    pub fn ranked(&self) -> Vec<&HurstResult> {
        let mut ranked: Vec<&HurstResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| a.hurst_exponent.total_cmp(&b.hurst_exponent));
        ranked
    }

    pub fn save_json(&self, path: &Path) -> Result<(), ScanError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self, ScanError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Summary of a pair scan
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Successful estimates, in pair order
    pub table: HurstTable,
    /// Pairs that produced no estimate, in pair order
    pub failures: Vec<(InstrumentPair, PairFailure)>,
    /// Outcomes the incremental recorder failed to persist
    pub record_errors: usize,
}

impl ScanReport {
    pub(crate) fn push(&mut self, outcome: PairOutcome) {
        match outcome.result {
            Ok(result) => self.table.results.push(result),
            Err(failure) => self.failures.push((outcome.pair, failure)),
        }
    }

    pub fn scanned(&self) -> usize {
        self.table.len() + self.failures.len()
    }

    /// Failures of the degenerate-series family
    pub fn degenerate(&self) -> usize {
        self.failures
            .iter()
            .filter(|(_, f)| f.kind() == "degenerate")
            .count()
    }
}
