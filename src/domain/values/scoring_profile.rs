//! Tunable point weights and tier thresholds.
//!
//! Every constant used by the classifier, the skill aggregator, the signal
//! composer and the portfolio allocator lives here. The defaults reproduce
//! the current production scoring; alternative profiles are loaded from the
//! `[scoring]` section of the config file.

use serde::{Deserialize, Serialize};

use crate::domain::values::final_signal::FinalSignal;
use crate::domain::values::signal_strength::SignalStrength;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub classifier: ClassifierProfile,
    pub skill: SkillWeights,
    pub backtested: BacktestedWeights,
    pub live: LiveWeights,
    pub tiers: TierThresholds,
    pub allocation: AllocationProfile,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            classifier: ClassifierProfile::default(),
            skill: SkillWeights::default(),
            backtested: BacktestedWeights::default(),
            live: LiveWeights::default(),
            tiers: TierThresholds::default(),
            allocation: AllocationProfile::default(),
        }
    }
}

impl ScoringProfile {
    /// Reject profiles whose thresholds cannot produce a sane ordering.
    pub fn validate(&self) -> Result<(), String> {
        let c = &self.classifier;
        if c.high_threshold < c.medium_threshold {
            return Err(format!(
                "classifier.high_threshold ({}) must be >= classifier.medium_threshold ({})",
                c.high_threshold, c.medium_threshold
            ));
        }
        if c.large_amount_markers.iter().any(|m| m.trim().is_empty()) {
            return Err("classifier.large_amount_markers must not contain empty markers".into());
        }
        let t = &self.tiers;
        if !(t.strong_buy >= t.buy && t.buy >= t.watch) {
            return Err(format!(
                "tiers must satisfy strong_buy >= buy >= watch (got {} / {} / {})",
                t.strong_buy, t.buy, t.watch
            ));
        }
        if self.allocation.max_positions == 0 {
            return Err("allocation.max_positions must be at least 1".into());
        }
        Ok(())
    }
}

/// Points awarded by static signal strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthPoints {
    pub high: i32,
    pub medium: i32,
    pub low: i32,
}

impl StrengthPoints {
    pub fn points(&self, strength: SignalStrength) -> i32 {
        match strength {
            SignalStrength::High => self.high,
            SignalStrength::Medium => self.medium,
            SignalStrength::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierProfile {
    pub purchase_points: i32,
    pub large_amount_points: i32,
    pub senate_points: i32,
    /// Substrings of the disclosed amount range that mark a large trade.
    pub large_amount_markers: Vec<String>,
    pub high_threshold: i32,
    pub medium_threshold: i32,
}

impl Default for ClassifierProfile {
    fn default() -> Self {
        Self {
            purchase_points: 2,
            large_amount_points: 2,
            senate_points: 1,
            large_amount_markers: vec!["$50,000".into(), "$100,000".into()],
            high_threshold: 4,
            medium_threshold: 2,
        }
    }
}

/// Weights of the composite skill score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillWeights {
    pub return_90d: f64,
    pub return_180d: f64,
    pub return_365d: f64,
    pub max_gain: f64,
}

impl Default for SkillWeights {
    fn default() -> Self {
        Self {
            return_90d: 0.2,
            return_180d: 0.4,
            return_365d: 0.3,
            max_gain: 0.1,
        }
    }
}

/// Composer weights for trades with a realized backtest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestedWeights {
    pub strength: StrengthPoints,
    /// Skill score must be strictly above this to earn `skill_points`.
    pub skill_threshold: f64,
    pub skill_points: i32,
    /// 90-day return (%) must be strictly above this to earn `return_points`.
    pub return_90d_threshold: f64,
    pub return_points: i32,
}

impl Default for BacktestedWeights {
    fn default() -> Self {
        Self {
            strength: StrengthPoints {
                high: 3,
                medium: 2,
                low: 0,
            },
            skill_threshold: 30.0,
            skill_points: 2,
            return_90d_threshold: 15.0,
            return_points: 2,
        }
    }
}

/// Composer weights for live trades that have no realized return yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveWeights {
    pub strength: StrengthPoints,
    /// When false, skill never adds points to a live trade.
    pub skill_bonus: bool,
    /// Skill score must be strictly above this to earn `skill_points`.
    pub skill_threshold: f64,
    pub skill_points: i32,
    pub purchase_points: i32,
}

impl Default for LiveWeights {
    fn default() -> Self {
        Self {
            strength: StrengthPoints {
                high: 3,
                medium: 0,
                low: 0,
            },
            skill_bonus: true,
            skill_threshold: 30.0,
            skill_points: 2,
            purchase_points: 0,
        }
    }
}

/// Minimum scores (inclusive) for each signal tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub strong_buy: i32,
    pub buy: i32,
    pub watch: i32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            strong_buy: 5,
            buy: 4,
            watch: 2,
        }
    }
}

impl TierThresholds {
    pub fn tier(&self, score: i32) -> FinalSignal {
        if score >= self.strong_buy {
            FinalSignal::StrongBuy
        } else if score >= self.buy {
            FinalSignal::Buy
        } else if score >= self.watch {
            FinalSignal::Watch
        } else {
            FinalSignal::Ignore
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationProfile {
    /// Number of tickers the model portfolio holds at most.
    pub max_positions: usize,
}

impl Default for AllocationProfile {
    fn default() -> Self {
        Self { max_positions: 10 }
    }
}
