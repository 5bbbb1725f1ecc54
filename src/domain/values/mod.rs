pub mod backtest_result;
pub mod chamber;
pub mod final_signal;
pub mod politician_stats;
pub mod portfolio;
pub mod scoring_profile;
pub mod signal_strength;
pub mod transaction_type;
pub mod rounding;
