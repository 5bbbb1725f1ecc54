use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Final recommendation tier for a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalSignal {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "WATCH")]
    Watch,
    #[serde(rename = "IGNORE")]
    Ignore,
}

impl FinalSignal {
    pub fn is_actionable(&self) -> bool {
        matches!(self, FinalSignal::StrongBuy | FinalSignal::Buy)
    }
}

impl fmt::Display for FinalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalSignal::StrongBuy => write!(f, "STRONG BUY"),
            FinalSignal::Buy => write!(f, "BUY"),
            FinalSignal::Watch => write!(f, "WATCH"),
            FinalSignal::Ignore => write!(f, "IGNORE"),
        }
    }
}

impl FromStr for FinalSignal {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "strong buy" => Ok(FinalSignal::StrongBuy),
            "buy" => Ok(FinalSignal::Buy),
            "watch" => Ok(FinalSignal::Watch),
            "ignore" => Ok(FinalSignal::Ignore),
            _ => Err(format!("Unknown signal: {s}")),
        }
    }
}
