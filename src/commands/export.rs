//! CSV export command handler.

use crate::discovery::ScanError;
use crate::liquidity::LiquidityTable;
use std::path::Path;
use tracing::info;

/// Convert a liquidity table JSON file into CSV.
///
/// # Errors
/// Returns error if the input cannot be read or the output written.
pub fn run_export_csv(input_path: &str, output_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = LiquidityTable::load_json(Path::new(input_path)).map_err(ScanError::from)?;
    table.save_csv(Path::new(output_path)).map_err(ScanError::from)?;

    info!(
        input = input_path,
        output = output_path,
        rows = table.len(),
        "Liquidity table exported"
    );
    println!("\n✓ Exported {} rows to {}", table.len(), output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidity::{LiquidityMetrics, LiquidityRecord};
    use tempfile::tempdir;

    #[test]
    fn test_export_round_trips() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("liquidity_scores.json");
        let csv = dir.path().join("liquidity_scores.csv");

        let table: LiquidityTable = vec![LiquidityRecord {
            instrument: "AAA".to_string(),
            metrics: LiquidityMetrics {
                bid_liquidity: 12.5,
                ask_liquidity: 7.25,
                quote_volume_24h: 0.1,
                relative_spread: 0.003,
                liquidity_score: 65_833.333_333_333_33,
            },
        }]
        .into_iter()
        .collect();
        table.save_json(&json).unwrap();

        run_export_csv(json.to_str().unwrap(), csv.to_str().unwrap()).unwrap();
        assert_eq!(LiquidityTable::load_csv(&csv).unwrap(), table);
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let out = dir.path().join("out.csv");
        assert!(run_export_csv(missing.to_str().unwrap(), out.to_str().unwrap()).is_err());
    }
}
