//! Rate-limited progress logging.
//!
//! Long scans touch thousands of instruments or pairs; `ProgressLog` emits at
//! most one progress line per interval plus a final line on completion.

use std::time::{Duration, Instant};
use tracing::info;

/// Default spacing between progress lines
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// A lightweight rate limiter for logging to prevent log storms.
#[derive(Debug)]
pub struct LogThrottle {
    last_log_time: Option<Instant>,
    suppressed_count: u64,
    interval: Duration,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            last_log_time: None,
            suppressed_count: 0,
            interval,
        }
    }

    /// True if the interval has passed since the last emitted line.
    /// Otherwise counts the call as suppressed.
    pub fn should_log(&mut self) -> bool {
        let now = Instant::now();
        match self.last_log_time {
            Some(last) if now.duration_since(last) < self.interval => {
                self.suppressed_count += 1;
                false
            }
            _ => {
                self.last_log_time = Some(now);
                true
            }
        }
    }

    /// Suppressed calls since the last emitted line; resets the counter.
    pub fn take_suppressed(&mut self) -> u64 {
        std::mem::take(&mut self.suppressed_count)
    }
}

/// Throttled `done/total` progress reporter for a named stage.
#[derive(Debug)]
pub struct ProgressLog {
    stage: &'static str,
    total: usize,
    done: usize,
    throttle: LogThrottle,
}

impl ProgressLog {
    pub fn new(stage: &'static str, total: usize) -> Self {
        Self::with_interval(stage, total, DEFAULT_PROGRESS_INTERVAL)
    }

    pub fn with_interval(stage: &'static str, total: usize, interval: Duration) -> Self {
        Self {
            stage,
            total,
            done: 0,
            throttle: LogThrottle::new(interval),
        }
    }

    /// Mark one unit of work finished.
    ///
    /// Returns the number of progress lines skipped since the previous one
    /// when this call emits a line, `None` when it is throttled.
    pub fn advance(&mut self) -> Option<u64> {
        self.done += 1;
        let finished = self.done >= self.total;
        if !(finished || self.throttle.should_log()) {
            return None;
        }

        let pct = if self.total == 0 {
            100.0
        } else {
            self.done as f64 * 100.0 / self.total as f64
        };
        let suppressed = self.throttle.take_suppressed();
        info!(
            stage = self.stage,
            done = self.done,
            total = self.total,
            pct = format!("{:.1}", pct),
            suppressed,
            "Progress"
        );
        Some(suppressed)
    }

    pub fn done(&self) -> usize {
        self.done
    }
}
