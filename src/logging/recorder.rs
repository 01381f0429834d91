//! Pair Result Recording
//!
//! Provides a pluggable `PairRecorder` trait so every pair outcome is
//! persisted as soon as it is computed, instead of only at the end of a
//! long scan:
//! - CSV append log (`CsvRecorder`)
//! - Structured logs via tracing (`TracingRecorder`)
//! - Fan-out to several backends (`MultiRecorder`)

use crate::discovery::PairOutcome;
use std::io::Write;
use thiserror::Error;

/// Error type for result recording operations
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CSV header of the per-pair result log
pub const CSV_HEADER: &str = "instrument_a,instrument_b,status,hurst_exponent,samples,detail";

/// Commas and line breaks would split the row
fn csv_safe(raw: &str) -> String {
    raw.replace([',', '\n', '\r'], ";")
}

impl PairOutcome {
    /// Status column: `ok` or the failure kind
    pub fn status(&self) -> &'static str {
        match &self.result {
            Ok(_) => "ok",
            Err(failure) => failure.kind(),
        }
    }

    /// Write the CSV row (without newline) directly to a writer.
    pub fn write_csv_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match &self.result {
            Ok(result) => write!(
                writer,
                "{},{},ok,{},{},",
                self.pair.instrument_a, self.pair.instrument_b, result.hurst_exponent, result.samples,
            ),
            Err(failure) => write!(
                writer,
                "{},{},{},,,{}",
                self.pair.instrument_a,
                self.pair.instrument_b,
                failure.kind(),
                csv_safe(&failure.to_string()),
            ),
        }
    }

    /// Format as CSV line (allocates a new String).
    pub fn to_csv_line(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write_csv_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Trait for recording pair outcomes to various backends
pub trait PairRecorder: Send + Sync {
    /// Record one outcome. Called once per pair, as soon as it is known.
    fn record(&self, outcome: &PairOutcome) -> Result<(), RecordError>;

    /// Flush any buffered records (optional, default no-op)
    fn flush(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

/// A recorder that fans out to multiple backends
pub struct MultiRecorder {
    recorders: Vec<Box<dyn PairRecorder>>,
}

impl MultiRecorder {
    /// Create a new multi-recorder with the given backends
    pub fn new(recorders: Vec<Box<dyn PairRecorder>>) -> Self {
        Self { recorders }
    }

    /// Add a recorder
    pub fn add(&mut self, recorder: Box<dyn PairRecorder>) {
        self.recorders.push(recorder);
    }
}

impl PairRecorder for MultiRecorder {
    fn record(&self, outcome: &PairOutcome) -> Result<(), RecordError> {
        let mut error_count = 0;
        let mut last_error = None;

        for recorder in &self.recorders {
            if let Err(e) = recorder.record(outcome) {
                // Best-effort: one failing backend does not silence the others
                tracing::error!(error = %e, pair = %outcome.pair, "Failed to record pair outcome to backend");
                last_error = Some(e);
                error_count += 1;
            }
        }

        if error_count > 0 && error_count == self.recorders.len() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        Ok(())
    }

    fn flush(&self) -> Result<(), RecordError> {
        for recorder in &self.recorders {
            recorder.flush()?;
        }
        Ok(())
    }
}
