//! Trade disclosure feed port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::values::chamber::Chamber;

/// A disclosure row as delivered by the feed, before validation.
///
/// Every field is optional: feeds routinely omit or blank out columns, and
/// the ingestion step decides which rows are usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisclosureRow {
    pub politician: Option<String>,
    pub party: Option<String>,
    pub ticker: Option<String>,
    pub transaction: Option<String>,
    pub amount_range: Option<String>,
    pub transaction_date: Option<String>,
    pub disclosure_date: Option<String>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    /// Non-success HTTP status from the feed.
    #[error("feed returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    /// Network or transport failure.
    #[error("network error: {0}")]
    Network(String),
    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
    /// Credentials or endpoint missing.
    #[error("config error: {0}")]
    Config(String),
}

/// Source of disclosed trades for one chamber.
#[async_trait]
pub trait TradeFeed: Send + Sync {
    /// Human-readable name of this feed.
    fn name(&self) -> &str;

    /// Fetch every currently published disclosure for `chamber`.
    async fn fetch(&self, chamber: Chamber) -> Result<Vec<DisclosureRow>, FeedError>;
}
