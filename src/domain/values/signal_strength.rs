use serde::{Deserialize, Serialize};
use std::fmt;

/// Static strength of a disclosed trade, derived from its attributes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStrength {
    Low,
    Medium,
    High,
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStrength::Low => write!(f, "LOW"),
            SignalStrength::Medium => write!(f, "MEDIUM"),
            SignalStrength::High => write!(f, "HIGH"),
        }
    }
}
