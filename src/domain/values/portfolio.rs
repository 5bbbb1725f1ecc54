//! Model portfolio built from STRONG BUY signals.

use serde::Serialize;

/// One ticker selected for allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioEntry {
    pub ticker: String,
    /// Display name from the live price provider, falling back to the ticker.
    pub name: String,
    pub skill_score: f64,
    pub return_90d: f64,
    /// Number of STRONG BUY disclosures behind this ticker.
    pub signal_count: usize,
    pub weight: f64,
    pub allocation: f64,
    pub price: Option<f64>,
    pub shares: u64,
}

impl PortfolioEntry {
    /// Capital actually spent on whole shares.
    pub fn invested(&self) -> f64 {
        self.price.map(|p| p * self.shares as f64).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    pub capital: f64,
    pub entries: Vec<PortfolioEntry>,
    pub total_invested: f64,
    pub cash_remaining: f64,
}

impl Portfolio {
    pub fn new(capital: f64, entries: Vec<PortfolioEntry>) -> Self {
        let total_invested: f64 = entries.iter().map(PortfolioEntry::invested).sum();
        Self {
            capital,
            entries,
            total_invested,
            cash_remaining: capital - total_invested,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ticker: &str, weight: f64, allocation: f64, price: Option<f64>, shares: u64) -> PortfolioEntry {
        PortfolioEntry {
            ticker: ticker.into(),
            name: ticker.into(),
            skill_score: 10.0,
            return_90d: 5.0,
            signal_count: 1,
            weight,
            allocation,
            price,
            shares,
        }
    }

    #[test]
    fn test_empty_portfolio() {
        let p = Portfolio::new(200.0, vec![]);
        assert!(p.is_empty());
        assert_eq!(p.total_weight(), 0.0);
        assert_eq!(p.cash_remaining, 200.0);
    }

    #[test]
    fn test_invested_ignores_missing_prices() {
        let p = Portfolio::new(
            200.0,
            vec![
                entry("AAPL", 0.75, 150.0, Some(40.0), 3),
                entry("XYZ", 0.25, 50.0, None, 0),
            ],
        );
        assert_eq!(p.total_invested, 120.0);
        assert_eq!(p.cash_remaining, 80.0);
        assert!((p.total_weight() - 1.0).abs() < 1e-9);
    }
}
