use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use congressintel::cli::commands::{Cli, Commands};
use congressintel::cli::progress::BarProgress;
use congressintel::domain::ports::progress::{LogProgress, ProgressReporter};
use congressintel::domain::values::final_signal::FinalSignal;
use congressintel::infrastructure::config::{AppConfig, ENV_CONFIG_PATH};
use congressintel::infrastructure::notifiers::LogNotifier;
use congressintel::CongressIntel;
use serde::Serialize;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from));
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    config.logging.init();

    let ci = match CongressIntel::new(&config) {
        Ok(ci) => ci,
        Err(e) => {
            eprintln!("Error initializing congressintel: {e}");
            std::process::exit(1);
        }
    };

    let progress: Box<dyn ProgressReporter> = if cli.quiet {
        Box::new(LogProgress { every: 25 })
    } else {
        Box::new(BarProgress::new())
    };
    let result = run_command(ci, &config, cli.command, progress.as_ref()).await;
    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    mut ci: CongressIntel,
    config: &AppConfig,
    cmd: Commands,
    progress: &dyn ProgressReporter,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Signals { signal, limit } => {
            let filter = parse_signal(signal.as_deref())?;
            let snapshot = ci.snapshot(progress).await?;
            let rows: Vec<_> = snapshot
                .live_feed
                .iter()
                .filter(|s| filter.map_or(true, |f| s.final_signal == f))
                .take(limit)
                .collect();
            print_json(&rows)?;
        }
        Commands::Backtest { signal } => {
            let filter = parse_signal(signal.as_deref())?;
            let snapshot = ci.snapshot(progress).await?;
            match filter {
                Some(f) => print_json(&snapshot.with_signal(f))?,
                None => print_json(&snapshot.backtested)?,
            }
        }
        Commands::Leaderboard { limit } => {
            let snapshot = ci.snapshot(progress).await?;
            let rows: Vec<_> = snapshot.leaderboard.iter().take(limit).collect();
            print_json(&rows)?;
        }
        Commands::Portfolio { capital } => {
            let capital = capital.unwrap_or(config.portfolio.capital);
            let portfolio = ci.portfolio(capital, progress).await?;
            if portfolio.is_empty() {
                tracing::warn!("No STRONG BUY tickers to allocate");
            }
            print_json(&portfolio)?;
        }
        Commands::Opportunities { limit } => {
            let top = ci.opportunities(limit, progress).await?;
            print_json(&top)?;
        }
        Commands::Summary => {
            let snapshot = ci.snapshot(progress).await?;
            print_json(&snapshot.summary)?;
        }
        Commands::Alert { dry_run } => {
            if dry_run {
                let destination = config
                    .notifications
                    .destination
                    .clone()
                    .unwrap_or_else(|| "log".into());
                ci.set_notifier(
                    Arc::new(LogNotifier),
                    destination,
                    config.notifications.subject.clone(),
                );
            } else if !ci.alerts_configured() {
                tracing::warn!(
                    "Set CONGRESSINTEL_WEBHOOK_URL and CONGRESSINTEL_ALERT_TO to deliver alerts"
                );
            }
            let sent = ci.send_alerts(progress).await?;
            print_json(&serde_json::json!({ "sent": sent }))?;
        }
        Commands::Profile => {
            print_json(ci.profile())?;
        }
    }
    Ok(())
}

fn parse_signal(s: Option<&str>) -> Result<Option<FinalSignal>, String> {
    s.map(str::parse).transpose()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
