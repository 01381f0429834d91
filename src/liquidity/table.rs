//! Persisted liquidity table.
//!
//! JSON form is an object keyed by instrument, in scan order:
//!
//! ```json
//! {"BTCUSDT": {"bid_liquidity": 1.2, "ask_liquidity": 3.4, "quote_volume_24h": 5.6,
//!              "relative_spread": 0.0001, "liquidity_score": 81.2}}
//! ```
//!
//! The CSV export writes one row per instrument under
//! `symbol,bid_liquidity,ask_liquidity,quote_volume_24h,relative_spread,liquidity_score`.
//! Floats are written in shortest round-trip form, so re-importing the CSV
//! reproduces every value bit for bit.

use super::scorer::{LiquidityMetrics, LiquidityRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

const CSV_HEADER: &str =
    "symbol,bid_liquidity,ask_liquidity,quote_volume_24h,relative_spread,liquidity_score";
const LEGACY_CSV_HEADER: &str =
    "symbol,bid_liquidity,ask_liquidity,24h_quote_volume,relative_spread,liquidity_score";

/// Errors reading or writing a liquidity table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error on line {line}: {message}")]
    Csv { line: usize, message: String },
}

/// Liquidity metrics keyed by instrument, preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiquidityTable {
    entries: IndexMap<String, LiquidityMetrics>,
}

impl LiquidityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record. A replaced instrument keeps its position.
    pub fn insert(&mut self, record: LiquidityRecord) {
        self.entries.insert(record.instrument, record.metrics);
    }

    pub fn get(&self, instrument: &str) -> Option<&LiquidityMetrics> {
        self.entries.get(instrument)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LiquidityMetrics)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn save_json(&self, path: &Path) -> Result<(), TableError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self, TableError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the CSV export to `writer`.
    pub fn write_csv_to<W: Write>(&self, writer: &mut W) -> Result<(), TableError> {
        writeln!(writer, "{}", CSV_HEADER)?;
        for (line, (symbol, m)) in self.entries.iter().enumerate() {
            if symbol.contains([',', '"', '\n', '\r']) {
                return Err(TableError::Csv {
                    line: line + 2,
                    message: format!("symbol '{}' cannot be written unquoted", symbol),
                });
            }
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                symbol,
                m.bid_liquidity,
                m.ask_liquidity,
                m.quote_volume_24h,
                m.relative_spread,
                m.liquidity_score,
            )?;
        }
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, TableError> {
        let mut buf = Vec::new();
        self.write_csv_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| TableError::Csv {
            line: 0,
            message: e.to_string(),
        })
    }

    pub fn save_csv(&self, path: &Path) -> Result<(), TableError> {
        let mut file = fs::File::create(path)?;
        self.write_csv_to(&mut file)?;
        file.flush()?;
        Ok(())
    }

    /// Parse a CSV export back into a table.
    pub fn from_csv_str(raw: &str) -> Result<Self, TableError> {
        let mut lines = raw.lines().enumerate();

        match lines.next() {
            Some((_, header)) if header.trim() == CSV_HEADER || header.trim() == LEGACY_CSV_HEADER => {}
            Some((_, header)) => {
                return Err(TableError::Csv {
                    line: 1,
                    message: format!("unexpected header '{}'", header),
                });
            }
            None => {
                return Err(TableError::Csv {
                    line: 1,
                    message: "missing header".to_string(),
                });
            }
        }

        let mut table = Self::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 6 {
                return Err(TableError::Csv {
                    line: line_no,
                    message: format!("expected 6 fields, got {}", fields.len()),
                });
            }

            let number = |i: usize| -> Result<f64, TableError> {
                fields[i].trim().parse::<f64>().map_err(|e| TableError::Csv {
                    line: line_no,
                    message: format!("field {} '{}': {}", i + 1, fields[i], e),
                })
            };

            table.insert(LiquidityRecord {
                instrument: fields[0].trim().to_string(),
                metrics: LiquidityMetrics {
                    bid_liquidity: number(1)?,
                    ask_liquidity: number(2)?,
                    quote_volume_24h: number(3)?,
                    relative_spread: number(4)?,
                    liquidity_score: number(5)?,
                },
            });
        }

        Ok(table)
    }

    pub fn load_csv(path: &Path) -> Result<Self, TableError> {
        let raw = fs::read_to_string(path)?;
        Self::from_csv_str(&raw)
    }
}

impl FromIterator<LiquidityRecord> for LiquidityTable {
    fn from_iter<I: IntoIterator<Item = LiquidityRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}
