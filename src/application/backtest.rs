//! Forward-return backtesting of disclosed purchases.
//!
//! For each purchase the engine fetches daily closes from the disclosure
//! date to 370 calendar days later, takes the first close as the entry and
//! samples returns at fixed horizons. Horizons are trading-day offsets into
//! the fetched series and clamp to the last close when the series is
//! shorter than the horizon, so near-horizon returns on short windows are
//! approximations.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::entities::scored_trade::ClassifiedTrade;
use crate::domain::error::DomainError;
use crate::domain::ports::price_provider::{HistoricalPriceProvider, PriceError};
use crate::domain::ports::progress::ProgressReporter;
use crate::domain::values::backtest_result::{BacktestResult, HORIZONS, LOOKAHEAD_DAYS};
use crate::domain::values::rounding::{pct_change, round_dp};

/// Why a purchase has no backtest result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DataGap {
    /// The provider returned an empty series.
    NoData,
    /// The provider does not know the ticker.
    UnknownTicker,
    /// The series contained values that cannot be used as prices.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BacktestOutcome {
    Completed(BacktestResult),
    Gap(DataGap),
}

/// A purchase that could not be backtested.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTrade {
    pub trade_id: String,
    pub ticker: String,
    pub disclosure_date: NaiveDate,
    pub gap: DataGap,
}

#[derive(Debug, Default)]
pub struct BatchBacktest {
    pub completed: Vec<(ClassifiedTrade, BacktestResult)>,
    pub skipped: Vec<SkippedTrade>,
}

/// Compute a backtest from daily closes, oldest first.
pub fn compute_backtest(closes: &[f64]) -> Result<BacktestResult, DataGap> {
    let entry = *closes.first().ok_or(DataGap::NoData)?;
    if let Some(bad) = closes.iter().find(|c| !c.is_finite()) {
        return Err(DataGap::Malformed(format!("non-finite close {bad}")));
    }
    if entry <= 0.0 {
        return Err(DataGap::Malformed(format!("entry price {entry} is not positive")));
    }

    let last = closes.len() - 1;
    let returns = HORIZONS
        .iter()
        .map(|&days| {
            let idx = (days as usize).min(last);
            (days, round_dp(pct_change(entry, closes[idx]), 2))
        })
        .collect();

    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);

    Ok(BacktestResult {
        entry_price: round_dp(entry, 2),
        returns,
        max_gain_pct: round_dp(pct_change(entry, max), 2),
        max_drawdown_pct: round_dp(pct_change(entry, min), 2),
        observations: closes.len(),
    })
}

pub struct BacktestEngine {
    prices: Arc<dyn HistoricalPriceProvider>,
}

impl BacktestEngine {
    pub fn new(prices: Arc<dyn HistoricalPriceProvider>) -> Self {
        Self { prices }
    }

    /// Backtest one ticker from its disclosure date.
    ///
    /// Missing or unusable data is a [`BacktestOutcome::Gap`]. Only an
    /// unreachable provider is an error.
    pub async fn backtest(
        &self,
        ticker: &str,
        disclosure_date: NaiveDate,
    ) -> Result<BacktestOutcome, DomainError> {
        let end = disclosure_date + Duration::days(LOOKAHEAD_DAYS);
        let points = match self.prices.daily_closes(ticker, disclosure_date, end).await {
            Ok(points) => points,
            Err(PriceError::NotFound(_)) => return Ok(BacktestOutcome::Gap(DataGap::UnknownTicker)),
            Err(PriceError::Malformed(msg)) => {
                return Ok(BacktestOutcome::Gap(DataGap::Malformed(msg)))
            }
            Err(PriceError::Unavailable { status, detail }) => {
                return Err(DomainError::UpstreamUnavailable {
                    source_name: self.prices.name().to_string(),
                    status,
                    detail: format!("{ticker}: {detail}"),
                })
            }
        };

        let closes: Vec<f64> = points
            .iter()
            .filter(|p| p.date >= disclosure_date)
            .map(|p| p.close)
            .collect();

        Ok(match compute_backtest(&closes) {
            Ok(result) => BacktestOutcome::Completed(result),
            Err(gap) => BacktestOutcome::Gap(gap),
        })
    }

    /// Backtest each purchase in turn, one provider call at a time.
    pub async fn run_batch(
        &self,
        purchases: Vec<ClassifiedTrade>,
        progress: &dyn ProgressReporter,
    ) -> Result<BatchBacktest, DomainError> {
        let total = purchases.len();
        let mut batch = BatchBacktest::default();

        for (idx, classified) in purchases.into_iter().enumerate() {
            let trade = &classified.trade;
            let outcome = match self.backtest(&trade.ticker, trade.disclosure_date).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    progress.finish();
                    return Err(e);
                }
            };

            match outcome {
                BacktestOutcome::Completed(result) => batch.completed.push((classified, result)),
                BacktestOutcome::Gap(gap) => {
                    debug!(ticker = %trade.ticker, date = %trade.disclosure_date, ?gap, "No backtest");
                    batch.skipped.push(SkippedTrade {
                        trade_id: trade.id.clone(),
                        ticker: trade.ticker.clone(),
                        disclosure_date: trade.disclosure_date,
                        gap,
                    });
                }
            }
            progress.report(idx + 1, total);
        }
        progress.finish();

        if !batch.skipped.is_empty() {
            warn!(
                skipped = batch.skipped.len(),
                completed = batch.completed.len(),
                "Some purchases had no usable price data"
            );
        }
        Ok(batch)
    }
}
