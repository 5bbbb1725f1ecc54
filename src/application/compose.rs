//! Final signal composition.
//!
//! Merges the static signal strength with realized evidence (politician
//! skill, the trade's own 90-day return) into a recommendation tier. Trades
//! without a backtest are scored in a reduced live mode.

use crate::domain::entities::trade_record::TradeRecord;
use crate::domain::values::backtest_result::BacktestResult;
use crate::domain::values::final_signal::FinalSignal;
use crate::domain::values::politician_stats::PoliticianStats;
use crate::domain::values::scoring_profile::ScoringProfile;
use crate::domain::values::signal_strength::SignalStrength;
use crate::domain::values::transaction_type::TransactionType;

pub struct SignalComposer {
    profile: ScoringProfile,
}

impl SignalComposer {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    /// Pick the mode from the evidence available for this trade.
    pub fn compose(
        &self,
        trade: &TradeRecord,
        strength: SignalStrength,
        stats: Option<&PoliticianStats>,
        backtest: Option<&BacktestResult>,
    ) -> FinalSignal {
        let score = match backtest {
            Some(result) => self.backtested_score(strength, stats.map(|s| s.skill_score), result),
            None => self.live_score(trade, strength, stats.map(|s| s.skill_score)),
        };
        self.profile.tiers.tier(score)
    }

    pub fn backtested_score(
        &self,
        strength: SignalStrength,
        skill_score: Option<f64>,
        backtest: &BacktestResult,
    ) -> i32 {
        let w = &self.profile.backtested;
        let mut score = w.strength.points(strength);
        if skill_score.is_some_and(|s| s > w.skill_threshold) {
            score += w.skill_points;
        }
        if backtest
            .return_at(90)
            .is_some_and(|r| r > w.return_90d_threshold)
        {
            score += w.return_points;
        }
        score
    }

    pub fn live_score(
        &self,
        trade: &TradeRecord,
        strength: SignalStrength,
        skill_score: Option<f64>,
    ) -> i32 {
        let w = &self.profile.live;
        let mut score = w.strength.points(strength);
        if w.skill_bonus && skill_score.is_some_and(|s| s > w.skill_threshold) {
            score += w.skill_points;
        }
        if trade.transaction_type == TransactionType::Purchase {
            score += w.purchase_points;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::chamber::Chamber;
    use crate::domain::values::scoring_profile::LiveWeights;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::BTreeMap;

    fn trade(tx: TransactionType) -> TradeRecord {
        TradeRecord::new(
            "Lee Park".into(),
            Chamber::House,
            Some("R".into()),
            "AMD".into(),
            tx,
            "$15,001 - $50,000".into(),
            None,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn stats(skill: f64) -> PoliticianStats {
        PoliticianStats {
            politician: "Lee Park".into(),
            return_90d_mean: 0.0,
            return_90d_median: 0.0,
            return_180d_mean: 0.0,
            return_180d_median: 0.0,
            return_365d_mean: 0.0,
            return_365d_median: 0.0,
            total_trades: 1,
            max_gain_pct: 0.0,
            max_drawdown_pct: 0.0,
            win_rate_pct: 0.0,
            skill_score: skill,
        }
    }

    fn backtest(r90: f64) -> BacktestResult {
        let mut returns = BTreeMap::new();
        returns.insert(90, r90);
        BacktestResult {
            entry_price: 10.0,
            returns,
            max_gain_pct: r90.max(0.0),
            max_drawdown_pct: 0.0,
            observations: 100,
        }
    }

    fn composer() -> SignalComposer {
        SignalComposer::new(ScoringProfile::default())
    }

    #[test]
    fn test_backtested_tiers() {
        let c = composer();
        let t = trade(TransactionType::Purchase);
        let cases = [
            (SignalStrength::High, 40.0, 20.0, FinalSignal::StrongBuy), // 3+2+2
            (SignalStrength::High, 40.0, 5.0, FinalSignal::StrongBuy),  // 3+2
            (SignalStrength::High, 10.0, 5.0, FinalSignal::Watch),      // 3
            (SignalStrength::Medium, 40.0, 5.0, FinalSignal::Buy),      // 2+2
            (SignalStrength::Medium, 10.0, 20.0, FinalSignal::Buy),     // 2+2
            (SignalStrength::Medium, 10.0, 5.0, FinalSignal::Watch),    // 2
            (SignalStrength::Low, 40.0, 20.0, FinalSignal::Buy),        // 0+2+2
            (SignalStrength::Low, 40.0, 5.0, FinalSignal::Watch),       // 2
            (SignalStrength::Low, 10.0, 5.0, FinalSignal::Ignore),      // 0
        ];
        for (strength, skill, r90, expected) in cases {
            let s = stats(skill);
            let b = backtest(r90);
            assert_eq!(
                c.compose(&t, strength, Some(&s), Some(&b)),
                expected,
                "{strength} skill={skill} r90={r90}"
            );
        }
    }

    #[test]
    fn test_thresholds_are_strict() {
        let c = composer();
        let t = trade(TransactionType::Purchase);
        let s = stats(30.0);
        let b = backtest(15.0);
        // Neither bonus applies at exactly the threshold.
        assert_eq!(c.backtested_score(SignalStrength::High, Some(s.skill_score), &b), 3);
        assert_eq!(c.compose(&t, SignalStrength::High, Some(&s), Some(&b)), FinalSignal::Watch);
    }

    #[test]
    fn test_live_mode_defaults() {
        let c = composer();
        let t = trade(TransactionType::Purchase);
        assert_eq!(c.compose(&t, SignalStrength::High, None, None), FinalSignal::Watch);
        assert_eq!(
            c.compose(&t, SignalStrength::High, Some(&stats(45.0)), None),
            FinalSignal::StrongBuy
        );
        assert_eq!(c.compose(&t, SignalStrength::Medium, None, None), FinalSignal::Ignore);
    }

    #[test]
    fn test_live_purchase_bonus_profile() {
        let profile = ScoringProfile {
            live: LiveWeights {
                skill_bonus: false,
                purchase_points: 1,
                ..LiveWeights::default()
            },
            ..ScoringProfile::default()
        };
        let c = SignalComposer::new(profile);
        let buy = trade(TransactionType::Purchase);
        let sell = trade(TransactionType::Sale);
        assert_eq!(c.live_score(&buy, SignalStrength::High, Some(99.0)), 4);
        assert_eq!(c.compose(&buy, SignalStrength::High, None, None), FinalSignal::Buy);
        assert_eq!(c.compose(&sell, SignalStrength::High, None, None), FinalSignal::Watch);
    }

    #[test]
    fn test_compose_is_idempotent() {
        let c = composer();
        let t = trade(TransactionType::Purchase);
        let s = stats(31.0);
        let b = backtest(16.0);
        let first = c.compose(&t, SignalStrength::Medium, Some(&s), Some(&b));
        let second = c.compose(&t, SignalStrength::Medium, Some(&s), Some(&b));
        assert_eq!(first, second);
        assert_eq!(first, FinalSignal::StrongBuy);
    }
}
