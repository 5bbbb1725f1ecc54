//! Full scoring run: ingest, classify, backtest, rank, compose.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::application::backtest::{BacktestEngine, SkippedTrade};
use crate::application::classify::SignalClassifier;
use crate::application::compose::SignalComposer;
use crate::application::ingest::IngestUseCase;
use crate::application::skill::{by_politician, SkillAggregator};
use crate::domain::entities::scored_trade::{BacktestedTrade, ClassifiedTrade, LiveSignal};
use crate::domain::error::DomainError;
use crate::domain::ports::price_provider::HistoricalPriceProvider;
use crate::domain::ports::progress::ProgressReporter;
use crate::domain::ports::trade_feed::TradeFeed;
use crate::domain::values::final_signal::FinalSignal;
use crate::domain::values::politician_stats::PoliticianStats;
use crate::domain::values::rounding::round_dp;
use crate::domain::values::scoring_profile::ScoringProfile;

/// Characters of the top trader's name shown in the summary.
pub const TOP_TRADER_WIDTH: usize = 20;

/// Headline numbers of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub rows_fetched: usize,
    pub rows_dropped: usize,
    pub trades_ingested: usize,
    pub purchases_attempted: usize,
    pub backtested: usize,
    pub data_gaps: usize,
    pub politicians: usize,
    pub strong_buys: usize,
    pub avg_return_180d: Option<f64>,
    pub top_trader: Option<String>,
}

/// Everything one run produces, as a read-only snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSnapshot {
    pub generated_at: DateTime<Utc>,
    pub profile: ScoringProfile,
    pub live_feed: Vec<LiveSignal>,
    pub backtested: Vec<BacktestedTrade>,
    pub leaderboard: Vec<PoliticianStats>,
    pub skipped: Vec<SkippedTrade>,
    pub summary: RunSummary,
}

impl PipelineSnapshot {
    pub fn with_signal(&self, signal: FinalSignal) -> Vec<&BacktestedTrade> {
        self.backtested
            .iter()
            .filter(|t| t.final_signal == signal)
            .collect()
    }

    pub fn strong_buys(&self) -> Vec<&BacktestedTrade> {
        self.with_signal(FinalSignal::StrongBuy)
    }
}

pub struct PipelineUseCase {
    ingest: IngestUseCase,
    engine: BacktestEngine,
}

impl PipelineUseCase {
    pub fn new(feed: Arc<dyn TradeFeed>, prices: Arc<dyn HistoricalPriceProvider>) -> Self {
        Self {
            ingest: IngestUseCase::new(feed),
            engine: BacktestEngine::new(prices),
        }
    }

    /// Run the whole pipeline against the current feeds.
    ///
    /// Fails when the feed or the price provider is unreachable, or when no
    /// purchase could be backtested at all.
    pub async fn run(
        &self,
        profile: &ScoringProfile,
        progress: &dyn ProgressReporter,
    ) -> Result<PipelineSnapshot, DomainError> {
        let generated_at = Utc::now();
        let ingested = self.ingest.execute(generated_at).await?;
        let trades_ingested = ingested.trades.len();

        let classified = SignalClassifier::new(profile.classifier.clone()).classify_all(ingested.trades);
        let purchases: Vec<ClassifiedTrade> = classified
            .iter()
            .filter(|c| c.trade.is_purchase())
            .cloned()
            .collect();
        let purchases_attempted = purchases.len();

        info!(purchases = purchases_attempted, "Backtesting purchases");
        let batch = self.engine.run_batch(purchases, progress).await?;
        if batch.completed.is_empty() {
            return Err(DomainError::NoBacktestResults {
                attempted: purchases_attempted,
            });
        }

        let leaderboard = SkillAggregator::new(profile.skill).aggregate(
            batch
                .completed
                .iter()
                .map(|(c, r)| (c.trade.politician.as_str(), r)),
        );
        let stats = by_politician(&leaderboard);
        let composer = SignalComposer::new(profile.clone());

        let backtested: Vec<BacktestedTrade> = batch
            .completed
            .into_iter()
            .map(|(c, backtest)| {
                let politician = stats.get(c.trade.politician.as_str()).copied();
                let final_signal =
                    composer.compose(&c.trade, c.signal_strength, politician, Some(&backtest));
                BacktestedTrade {
                    skill_score: politician.map(|s| s.skill_score).unwrap_or_default(),
                    trade: c.trade,
                    signal_strength: c.signal_strength,
                    backtest,
                    final_signal,
                }
            })
            .collect();

        let live_feed: Vec<LiveSignal> = classified
            .into_iter()
            .map(|c| {
                let politician = stats.get(c.trade.politician.as_str()).copied();
                let final_signal = composer.compose(&c.trade, c.signal_strength, politician, None);
                LiveSignal {
                    skill_score: politician.map(|s| s.skill_score),
                    trade: c.trade,
                    signal_strength: c.signal_strength,
                    final_signal,
                }
            })
            .collect();

        let summary = RunSummary {
            rows_fetched: ingested.rows_fetched,
            rows_dropped: ingested.rows_dropped,
            trades_ingested,
            purchases_attempted,
            backtested: backtested.len(),
            data_gaps: batch.skipped.len(),
            politicians: leaderboard.len(),
            strong_buys: backtested
                .iter()
                .filter(|t| t.final_signal == FinalSignal::StrongBuy)
                .count(),
            avg_return_180d: average(backtested.iter().map(|t| t.backtest.return_180d())),
            top_trader: leaderboard
                .first()
                .map(|s| s.politician.chars().take(TOP_TRADER_WIDTH).collect()),
        };

        info!(
            backtested = summary.backtested,
            politicians = summary.politicians,
            strong_buys = summary.strong_buys,
            "Pipeline run complete"
        );

        Ok(PipelineSnapshot {
            generated_at,
            profile: profile.clone(),
            live_feed,
            backtested,
            leaderboard,
            skipped: batch.skipped,
            summary,
        })
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| round_dp(sum / n as f64, 2))
}
