//! Skill-weighted model portfolio from STRONG BUY signals.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::scored_trade::BacktestedTrade;
use crate::domain::error::DomainError;
use crate::domain::ports::price_provider::LivePriceProvider;
use crate::domain::values::final_signal::FinalSignal;
use crate::domain::values::portfolio::{Portfolio, PortfolioEntry};
use crate::domain::values::rounding::round_dp;
use crate::domain::values::scoring_profile::AllocationProfile;

const MAX_NAME_CHARS: usize = 30;

/// STRONG BUY disclosures of one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerGroup {
    pub ticker: String,
    pub mean_skill: f64,
    pub mean_return_90d: f64,
    pub signal_count: usize,
}

/// Group STRONG BUY trades by ticker and keep the `max_positions` best by
/// mean skill. Tickers with equal skill keep first-appearance order.
pub fn select_tickers(trades: &[BacktestedTrade], max_positions: usize) -> Vec<TickerGroup> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (f64, f64, usize)> = HashMap::new();
    for t in trades.iter().filter(|t| t.final_signal == FinalSignal::StrongBuy) {
        let entry = sums.entry(t.trade.ticker.as_str()).or_insert_with(|| {
            order.push(t.trade.ticker.as_str());
            (0.0, 0.0, 0)
        });
        entry.0 += t.skill_score;
        entry.1 += t.backtest.return_90d();
        entry.2 += 1;
    }

    let mut groups: Vec<TickerGroup> = order
        .into_iter()
        .filter_map(|ticker| {
            let (skill, r90, count) = *sums.get(ticker)?;
            Some(TickerGroup {
                ticker: ticker.to_string(),
                mean_skill: skill / count as f64,
                mean_return_90d: r90 / count as f64,
                signal_count: count,
            })
        })
        .collect();

    groups.sort_by(|a, b| b.mean_skill.total_cmp(&a.mean_skill));
    groups.truncate(max_positions);
    groups
}

/// Proportional weights by mean skill.
///
/// Non-positive skill is floored at zero, so such tickers stay listed with
/// no weight. When no ticker has positive skill every weight is zero.
pub fn skill_weights(groups: &[TickerGroup]) -> Vec<f64> {
    let total: f64 = groups.iter().map(|g| g.mean_skill.max(0.0)).sum();
    groups
        .iter()
        .map(|g| {
            if total > 0.0 {
                g.mean_skill.max(0.0) / total
            } else {
                0.0
            }
        })
        .collect()
}

pub struct PortfolioAllocator {
    live: Arc<dyn LivePriceProvider>,
    profile: AllocationProfile,
}

impl PortfolioAllocator {
    pub fn new(live: Arc<dyn LivePriceProvider>, profile: AllocationProfile) -> Self {
        Self { live, profile }
    }

    /// Allocate `capital` across the best STRONG BUY tickers in `trades`.
    ///
    /// Trades with other signals are ignored. A ticker whose live price
    /// cannot be fetched keeps its allocation but gets zero shares.
    pub async fn allocate(
        &self,
        trades: &[BacktestedTrade],
        capital: f64,
    ) -> Result<Portfolio, DomainError> {
        if !capital.is_finite() || capital <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "capital must be a positive amount, got {capital}"
            )));
        }

        let groups = select_tickers(trades, self.profile.max_positions);
        let weights = skill_weights(&groups);

        let mut entries = Vec::with_capacity(groups.len());
        for (group, weight) in groups.into_iter().zip(weights) {
            let allocation = round_dp(weight * capital, 2);
            let (price, name) = match self.live.latest(&group.ticker).await {
                Ok(quote) => (
                    quote
                        .price
                        .filter(|p| p.is_finite() && *p > 0.0)
                        .map(|p| round_dp(p, 2)),
                    quote.name,
                ),
                Err(e) => {
                    warn!(ticker = %group.ticker, provider = self.live.name(), error = %e, "Live price unavailable");
                    (None, None)
                }
            };
            let shares = match price {
                Some(p) if p > 0.0 => (allocation / p).floor() as u64,
                _ => 0,
            };
            let name = name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| group.ticker.clone())
                .chars()
                .take(MAX_NAME_CHARS)
                .collect();

            entries.push(PortfolioEntry {
                ticker: group.ticker,
                name,
                skill_score: round_dp(group.mean_skill, 2),
                return_90d: round_dp(group.mean_return_90d, 2),
                signal_count: group.signal_count,
                weight,
                allocation,
                price,
                shares,
            });
        }

        Ok(Portfolio::new(capital, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ticker: &str, skill: f64) -> TickerGroup {
        TickerGroup {
            ticker: ticker.into(),
            mean_skill: skill,
            mean_return_90d: 0.0,
            signal_count: 1,
        }
    }

    #[test]
    fn test_weights_proportional_to_skill() {
        let w = skill_weights(&[group("A", 30.0), group("B", 10.0)]);
        assert_eq!(w, vec![0.75, 0.25]);
    }

    #[test]
    fn test_non_positive_skill_floored() {
        let w = skill_weights(&[group("A", 30.0), group("B", -10.0), group("C", 0.0)]);
        assert_eq!(w, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_all_non_positive_gives_zero_weights() {
        let w = skill_weights(&[group("A", -1.0), group("B", 0.0)]);
        assert_eq!(w, vec![0.0, 0.0]);
    }

    #[test]
    fn test_no_groups() {
        assert!(skill_weights(&[]).is_empty());
    }
}
