//! Price data ports: historical daily closes and latest quotes.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Most recent close for a ticker, with a display name when known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub price: Option<f64>,
    pub name: Option<String>,
}

#[derive(Debug, Error)]
pub enum PriceError {
    /// Unknown or delisted ticker.
    #[error("ticker not found: {0}")]
    NotFound(String),
    /// The provider answered but the payload was unusable.
    #[error("malformed price data: {0}")]
    Malformed(String),
    /// The provider could not be reached or answered with a non-success status.
    #[error("price provider unavailable{}: {detail}", status_suffix(.status))]
    Unavailable { status: Option<u16>, detail: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Daily close history.
#[async_trait]
pub trait HistoricalPriceProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Daily closes for `ticker` within `[start, end]`, oldest first.
    /// An empty vector means the provider has no data for that window.
    async fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, PriceError>;
}

/// Latest close lookup.
#[async_trait]
pub trait LivePriceProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn latest(&self, ticker: &str) -> Result<Quote, PriceError>;
}
