use clap::Parser;
use dotenv::dotenv;
use pairscan::cli::{Cli, Commands};
use pairscan::commands::{run_export_csv, run_liquidity, run_pipeline, run_scan_pairs};
use pairscan::market::{FileMarketData, MarketDataSource};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// --- Main Application Logic ---
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from the .env file
    dotenv().ok();

    let cli = Cli::parse();

    // Initialize Logger (RUST_LOG wins over --verbose)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.verbose));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let source: Arc<dyn MarketDataSource> = Arc::new(FileMarketData::new(&cli.data_dir));

    match &cli.command {
        Commands::Liquidity { depth, output } => {
            run_liquidity(source.as_ref(), *depth, output)?;
        }
        Commands::ExportCsv { input, output } => {
            run_export_csv(input, output)?;
        }
        Commands::ScanPairs { liquidity, scan } => {
            run_scan_pairs(source, liquidity, scan).await?;
        }
        Commands::Run {
            depth,
            liquidity_output,
            scan,
        } => {
            run_pipeline(source, *depth, liquidity_output, scan).await?;
        }
    }

    Ok(())
}
