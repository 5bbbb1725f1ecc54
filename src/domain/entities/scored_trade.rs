//! Trades annotated by the scoring pipeline.

use crate::domain::entities::trade_record::TradeRecord;
use crate::domain::values::backtest_result::BacktestResult;
use crate::domain::values::final_signal::FinalSignal;
use crate::domain::values::signal_strength::SignalStrength;
use serde::Serialize;

/// A trade with its static signal strength.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTrade {
    #[serde(flatten)]
    pub trade: TradeRecord,
    pub signal_strength: SignalStrength,
}

/// A live-feed trade with the reduced (no realized return) final signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSignal {
    #[serde(flatten)]
    pub trade: TradeRecord,
    pub signal_strength: SignalStrength,
    /// Skill score of the politician, when they have backtested history.
    pub skill_score: Option<f64>,
    pub final_signal: FinalSignal,
}

/// A purchase with realized forward returns and its final signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestedTrade {
    #[serde(flatten)]
    pub trade: TradeRecord,
    pub signal_strength: SignalStrength,
    #[serde(flatten)]
    pub backtest: BacktestResult,
    pub skill_score: f64,
    pub final_signal: FinalSignal,
}
