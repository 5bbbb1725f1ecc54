use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Purchase,
    Sale,
    Exchange,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Purchase => write!(f, "Purchase"),
            TransactionType::Sale => write!(f, "Sale"),
            TransactionType::Exchange => write!(f, "Exchange"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    /// Disclosures qualify sales as "Sale (Partial)" / "Sale (Full)"; both map to `Sale`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "purchase" || lower == "buy" {
            Ok(TransactionType::Purchase)
        } else if lower.starts_with("sale") || lower == "sell" {
            Ok(TransactionType::Sale)
        } else if lower == "exchange" {
            Ok(TransactionType::Exchange)
        } else {
            Err(format!("Unknown transaction type: {s}"))
        }
    }
}
