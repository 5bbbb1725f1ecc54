//! Per-politician performance aggregation and skill scoring.

use std::collections::HashMap;

use crate::domain::values::backtest_result::BacktestResult;
use crate::domain::values::politician_stats::PoliticianStats;
use crate::domain::values::rounding::round_dp;
use crate::domain::values::scoring_profile::SkillWeights;

pub struct SkillAggregator {
    weights: SkillWeights,
}

impl SkillAggregator {
    pub fn new(weights: SkillWeights) -> Self {
        Self { weights }
    }

    /// Aggregate backtests by politician.
    ///
    /// The result is sorted by skill score, highest first. Politicians with
    /// equal scores keep the order in which they first appear in `rows`.
    pub fn aggregate<'a, I>(&self, rows: I) -> Vec<PoliticianStats>
    where
        I: IntoIterator<Item = (&'a str, &'a BacktestResult)>,
    {
        let mut order: Vec<&'a str> = Vec::new();
        let mut groups: HashMap<&'a str, Vec<&'a BacktestResult>> = HashMap::new();
        for (politician, result) in rows {
            let group = groups.entry(politician).or_default();
            if group.is_empty() {
                order.push(politician);
            }
            group.push(result);
        }

        let mut stats: Vec<PoliticianStats> = order
            .into_iter()
            .filter_map(|name| {
                let group = groups.get(name)?;
                self.politician_stats(name, group)
            })
            .collect();

        // sort_by is stable, which keeps first-appearance order on ties
        stats.sort_by(|a, b| b.skill_score.total_cmp(&a.skill_score));
        stats
    }

    /// Composite skill score from (rounded) mean returns and the best gain.
    pub fn skill_score(&self, mean_90d: f64, mean_180d: f64, mean_365d: f64, max_gain: f64) -> f64 {
        let w = &self.weights;
        round_dp(
            mean_90d * w.return_90d
                + mean_180d * w.return_180d
                + mean_365d * w.return_365d
                + max_gain * w.max_gain,
            2,
        )
    }

    fn politician_stats(&self, name: &str, group: &[&BacktestResult]) -> Option<PoliticianStats> {
        if group.is_empty() {
            return None;
        }

        let r90 = sorted(group.iter().map(|r| r.return_90d()));
        let r180 = sorted(group.iter().map(|r| r.return_180d()));
        let r365 = sorted(group.iter().map(|r| r.return_365d()));
        let max_gain = group
            .iter()
            .map(|r| r.max_gain_pct)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_drawdown = group
            .iter()
            .map(|r| r.max_drawdown_pct)
            .fold(f64::INFINITY, f64::min);

        let mean_90d = round_dp(mean(&r90), 2);
        let mean_180d = round_dp(mean(&r180), 2);
        let mean_365d = round_dp(mean(&r365), 2);
        let max_gain = round_dp(max_gain, 2);
        let wins = r90.iter().filter(|r| **r > 0.0).count();

        Some(PoliticianStats {
            politician: name.to_string(),
            return_90d_mean: mean_90d,
            return_90d_median: round_dp(median(&r90), 2),
            return_180d_mean: mean_180d,
            return_180d_median: round_dp(median(&r180), 2),
            return_365d_mean: mean_365d,
            return_365d_median: round_dp(median(&r365), 2),
            total_trades: group.len(),
            max_gain_pct: max_gain,
            max_drawdown_pct: round_dp(max_drawdown, 2),
            win_rate_pct: round_dp(wins as f64 / group.len() as f64 * 100.0, 1),
            skill_score: self.skill_score(mean_90d, mean_180d, mean_365d, max_gain),
        })
    }
}

/// Index stats by politician name.
pub fn by_politician(stats: &[PoliticianStats]) -> HashMap<&str, &PoliticianStats> {
    stats.iter().map(|s| (s.politician.as_str(), s)).collect()
}

fn sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v
}

/// Mean of an already sorted slice. Summing in sorted order keeps the
/// result independent of input row order.
fn mean(sorted: &[f64]) -> f64 {
    sorted.iter().sum::<f64>() / sorted.len() as f64
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
