//! CSV Pair Recorder
//!
//! Appends one row per pair outcome to a CSV file as the scan progresses, so
//! a late failure never loses the pairs already processed.

use super::recorder::{PairRecorder, RecordError, CSV_HEADER};
use crate::discovery::PairOutcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only CSV recorder
pub struct CsvRecorder {
    file_path: PathBuf,
    /// Serializes writes and tracks header state
    state: Mutex<CsvState>,
}

struct CsvState {
    header_written: bool,
}

impl CsvRecorder {
    /// Create a new CSV recorder. An existing non-empty file is appended to.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            state: Mutex::new(CsvState {
                header_written: false,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl PairRecorder for CsvRecorder {
    fn record(&self, outcome: &PairOutcome) -> Result<(), RecordError> {
        // Handle mutex poisoning gracefully
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        if !guard.header_written {
            let needs_header = file.metadata().map(|m| m.len() == 0).unwrap_or(true);
            if needs_header {
                writeln!(file, "{}", CSV_HEADER)?;
            }
            guard.header_written = true;
        }

        outcome.write_csv_to(&mut file)?;
        writeln!(file)?;
        Ok(())
    }
}
