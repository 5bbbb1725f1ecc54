//! Signal strength classification.
//!
//! A linear point score over the static attributes of a disclosure:
//! purchases, large disclosed amounts and Senate seats each add points,
//! and the total maps onto LOW / MEDIUM / HIGH.

use crate::domain::entities::scored_trade::ClassifiedTrade;
use crate::domain::entities::trade_record::TradeRecord;
use crate::domain::values::chamber::Chamber;
use crate::domain::values::scoring_profile::ClassifierProfile;
use crate::domain::values::signal_strength::SignalStrength;
use crate::domain::values::transaction_type::TransactionType;

pub struct SignalClassifier {
    profile: ClassifierProfile,
}

impl SignalClassifier {
    pub fn new(profile: ClassifierProfile) -> Self {
        Self { profile }
    }

    /// Raw point score before tier mapping.
    pub fn score(&self, trade: &TradeRecord) -> i32 {
        let p = &self.profile;
        let mut score = 0;
        if trade.transaction_type == TransactionType::Purchase {
            score += p.purchase_points;
        }
        if self.is_large_amount(&trade.amount_range) {
            score += p.large_amount_points;
        }
        if trade.chamber == Chamber::Senate {
            score += p.senate_points;
        }
        score
    }

    pub fn classify(&self, trade: &TradeRecord) -> SignalStrength {
        let score = self.score(trade);
        if score >= self.profile.high_threshold {
            SignalStrength::High
        } else if score >= self.profile.medium_threshold {
            SignalStrength::Medium
        } else {
            SignalStrength::Low
        }
    }

    pub fn classify_all(&self, trades: Vec<TradeRecord>) -> Vec<ClassifiedTrade> {
        trades
            .into_iter()
            .map(|trade| {
                let signal_strength = self.classify(&trade);
                ClassifiedTrade {
                    trade,
                    signal_strength,
                }
            })
            .collect()
    }

    fn is_large_amount(&self, amount_range: &str) -> bool {
        self.profile
            .large_amount_markers
            .iter()
            .any(|marker| amount_range.contains(marker.as_str()))
    }
}
