use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holding horizons at which returns are sampled, as trading-day offsets
/// into the daily close series (index 0 is the entry close).
pub const HORIZONS: [u32; 7] = [7, 14, 30, 60, 90, 180, 365];

/// Calendar days of price history requested after the disclosure date.
pub const LOOKAHEAD_DAYS: i64 = 370;

/// Forward performance of one disclosed purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// First close on or after the disclosure date, rounded to cents.
    pub entry_price: f64,
    /// Percentage return keyed by horizon in days.
    pub returns: BTreeMap<u32, f64>,
    /// Highest close over the fetched window, relative to entry.
    pub max_gain_pct: f64,
    /// Lowest close over the fetched window, relative to entry.
    pub max_drawdown_pct: f64,
    /// Number of daily closes the result was computed from.
    pub observations: usize,
}

impl BacktestResult {
    pub fn return_at(&self, days: u32) -> Option<f64> {
        self.returns.get(&days).copied()
    }

    pub fn return_90d(&self) -> f64 {
        self.return_at(90).unwrap_or(0.0)
    }

    pub fn return_180d(&self) -> f64 {
        self.return_at(180).unwrap_or(0.0)
    }

    pub fn return_365d(&self) -> f64 {
        self.return_at(365).unwrap_or(0.0)
    }
}
