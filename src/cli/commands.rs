use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "congressintel",
    about = "Backtest congressional trade disclosures, rank politicians and build a signal portfolio"
)]
pub struct Cli {
    /// TOML config file (falls back to $CONGRESSINTEL_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log backtest progress instead of drawing a progress bar
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Live feed of every disclosed trade with its live-mode signal
    Signals {
        /// Only show trades with this signal (strong-buy, buy, watch, ignore)
        #[arg(long)]
        signal: Option<String>,
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Backtested purchases with realized returns and final signals
    Backtest {
        /// Only show trades with this signal (strong-buy, buy, watch, ignore)
        #[arg(long)]
        signal: Option<String>,
    },
    /// Politicians ranked by skill score
    Leaderboard {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Allocate capital across the best STRONG BUY tickers
    Portfolio {
        /// Capital to allocate (defaults to [portfolio].capital)
        #[arg(long)]
        capital: Option<f64>,
    },
    /// Best STRONG BUY / BUY trade per ticker
    Opportunities {
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Headline metrics of the current run
    Summary,
    /// Send the STRONG BUY digest to the configured destination
    Alert {
        /// Log the digest instead of delivering it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the effective scoring profile
    Profile,
}
