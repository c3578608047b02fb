use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use portfolio_tracker_core::PortfolioTracker;

mod display;
mod logging;
mod menu;

/// Personal stock-portfolio tracker: record holdings and buy/sell
/// transactions, persist them to CSV files, and report unrealized
/// gain/loss against current market prices.
#[derive(Debug, Parser)]
#[command(name = "portfolio-tracker", version)]
struct Args {
    /// Stock holdings file
    #[arg(long, default_value = "portfolio.csv")]
    portfolio_file: PathBuf,

    /// Transaction log file (append-only)
    #[arg(long, default_value = "transactions.csv")]
    transactions_file: PathBuf,

    /// Gain/loss report file
    #[arg(long, default_value = "gain_loss_report.csv")]
    report_file: PathBuf,

    /// Log file
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = logging::init(&args.log_file)?;

    let paths = menu::FilePaths {
        portfolio: args.portfolio_file,
        transactions: args.transactions_file,
        report: args.report_file,
    };
    let tracker = PortfolioTracker::new();

    match menu::run(tracker, &paths).await {
        Ok(()) => {
            tracing::info!("Session ended");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Application error: {e}");
            let mut source = e.source();
            while let Some(err) = source {
                tracing::error!("   Caused by: {err}");
                source = err.source();
            }
            Err(e)
        }
    }
}
