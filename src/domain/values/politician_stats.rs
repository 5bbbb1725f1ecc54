use serde::{Deserialize, Serialize};

/// Aggregated backtest performance for one politician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliticianStats {
    pub politician: String,
    pub return_90d_mean: f64,
    pub return_90d_median: f64,
    pub return_180d_mean: f64,
    pub return_180d_median: f64,
    pub return_365d_mean: f64,
    pub return_365d_median: f64,
    pub total_trades: usize,
    pub max_gain_pct: f64,
    pub max_drawdown_pct: f64,
    /// Share of trades with a positive 90-day return, in percent.
    pub win_rate_pct: f64,
    pub skill_score: f64,
}
